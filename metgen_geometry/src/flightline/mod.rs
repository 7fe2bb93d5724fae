/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “MetGen” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! polygon generation for dense point clouds such as LIDAR flightlines.
//!
//! The generator turns up to hundreds of thousands of (lon,lat) points into a single simplified
//! counter-clockwise polygon that covers (almost) all of them:
//!
//! 1. degenerate inputs (single point, two points, collinear points) get a small box
//! 2. antimeridian crossing point sets are processed in shifted (0..360) longitude space
//! 3. large sets are subsampled to [`SUBSAMPLE_THRESHOLD`] points
//! 4. a concave hull (or a track buffer for [`PolygonAlgorithm::Simple`]) is computed
//! 5. coverage is improved by buffering in bounded steps
//! 6. the ring is repaired and simplified below the vertex cap, with convex hull fallbacks
//!
//! Generation is deterministic and never fails for finite input

use std::{fmt, time::Instant};
use serde::{Serialize,Deserialize};
use geo_types::Coord;

use metgen_common::{debug, info, warn};
use crate::{GPolygon, PolygonAlgorithm, PolygonConfig};
use crate::coords::{validate_finite, normalize, from_lon_lat_arrays, distinct_points, bounding_box, open_part,
    orientation, signed_ring_area, ensure_ccw};
use crate::errors::Result;

pub mod antimeridian;
pub mod subsample;
pub mod hull;
pub mod coverage;
pub mod cleanup;

pub use subsample::SUBSAMPLE_THRESHOLD;
use antimeridian::{crosses_antimeridian, shift, unshift};
use subsample::subsample;
use hull::{buffer_track, concave_hull, convex_hull, decimate_track, segment_box, square_around};
use coverage::{CoverageTracker, coverage, enhance};
use cleanup::{clamp_ring, collapse_ring, force_max_vertices, repair, simplify_to_max_vertices};

/// half width of the box we put around single points, and the buffer for two point / collinear sets
pub const DEGENERATE_BUFFER: f64 = 0.01;
/// bounds for the base buffer increment (degrees)
pub const MIN_BASE_BUFFER: f64 = 1e-4;
pub const MAX_BASE_BUFFER: f64 = 0.05;
/// base buffer increment as fraction of the coordinate range
pub const BASE_BUFFER_RATIO: f64 = 0.002;
/// max number of track points used for the simple (line buffer) algorithm
pub const MAX_TRACK_POINTS: usize = 1000;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all="snake_case")]
pub enum GenerationMethod {
    None,
    SimpleBuffer,
    ConcaveHull,
    LineBuffer,
    ConvexHull,
}

impl GenerationMethod {
    pub fn as_str (&self)->&'static str {
        match self {
            GenerationMethod::None => "none",
            GenerationMethod::SimpleBuffer => "simple_buffer",
            GenerationMethod::ConcaveHull => "concave_hull",
            GenerationMethod::LineBuffer => "line_buffer",
            GenerationMethod::ConvexHull => "convex_hull",
        }
    }
}

impl fmt::Display for GenerationMethod {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str()) }
}

/// generated polygon plus diagnostics. Only `polygon` is used for metadata output
#[derive(Debug,Clone,Serialize)]
pub struct PolygonGenerationResult {
    #[serde(skip)]
    pub polygon: Option<GPolygon>,
    pub method: GenerationMethod,
    pub vertex_count: usize,
    pub data_point_count: usize,
    pub final_data_coverage: f64,
    pub subsampling_used: bool,
    pub generation_time_seconds: f64,
    pub antimeridian_crossing: bool,
    pub buffer_distance: f64,
    pub fallback: bool,
}

impl PolygonGenerationResult {
    fn empty (start: Instant)->Self {
        PolygonGenerationResult {
            polygon: None,
            method: GenerationMethod::None,
            vertex_count: 0,
            data_point_count: 0,
            final_data_coverage: 0.0,
            subsampling_used: false,
            generation_time_seconds: start.elapsed().as_secs_f64(),
            antimeridian_crossing: false,
            buffer_distance: 0.0,
            fallback: false
        }
    }
}

/// intermediate ring in working (possibly shifted) space
struct Outline {
    ring: Vec<Coord<f64>>,
    method: GenerationMethod,
    buffer_distance: f64,
    fallback: bool,
    subsampling_used: bool,
}

/// generate from separate longitude and latitude arrays, which have to have the same length
pub fn generate_from_arrays (lons: &[f64], lats: &[f64], config: &PolygonConfig)->Result<PolygonGenerationResult> {
    let points = from_lon_lat_arrays( lons, lats)?;
    generate( &points, config)
}

/// generate a covering polygon for a point cloud
pub fn generate (points: &[Coord<f64>], config: &PolygonConfig)->Result<PolygonGenerationResult> {
    let start = Instant::now();
    validate_finite( points)?;

    if points.is_empty() {
        return Ok( PolygonGenerationResult::empty( start))
    }

    let points = normalize( points);
    let antimeridian_crossing = crosses_antimeridian( &points);
    let work_all = if antimeridian_crossing {
        debug!("point set crosses antimeridian, using shifted longitudes");
        shift( &points)
    } else {
        points
    };

    let distinct = distinct_points( &work_all);
    let outline = if distinct.len() == 1 {
        Outline {
            ring: square_around( distinct[0], DEGENERATE_BUFFER),
            method: GenerationMethod::SimpleBuffer,
            buffer_distance: DEGENERATE_BUFFER,
            fallback: false,
            subsampling_used: false
        }
    } else if let Some((a,b)) = collinear_extremes( &distinct) {
        Outline {
            ring: segment_box( a, b, DEGENERATE_BUFFER),
            method: GenerationMethod::SimpleBuffer,
            buffer_distance: DEGENERATE_BUFFER,
            fallback: false,
            subsampling_used: false
        }
    } else {
        point_cloud_outline( &distinct, config)
    };

    let clamped = clamp_ring( &outline.ring, antimeridian_crossing);
    let collapsed = collapse_ring( &clamped, config.min_point_distance_tolerance);
    let mut final_data_coverage = coverage( &collapsed, &work_all);
    let ring = if final_data_coverage < config.target_coverage && collapsed.len() < clamped.len() {
        // collapsing lost data points, check if the uncollapsed ring does better
        let clamped_coverage = coverage( &clamped, &work_all);
        if clamped_coverage > final_data_coverage {
            final_data_coverage = clamped_coverage;
            clamped
        } else {
            collapsed
        }
    } else {
        collapsed
    };
    let ring = if antimeridian_crossing { unshift( &ring) } else { ring };

    // latitude clamping can leave polar data outside of the ring
    let mut fallback = outline.fallback;
    if final_data_coverage < config.target_coverage && !fallback {
        warn!("final coverage {:.4} below target {} after clamping", final_data_coverage, config.target_coverage);
        fallback = true;
    }

    let polygon = GPolygon::from_closed_ccw( ring);
    let result = PolygonGenerationResult {
        vertex_count: polygon.vertex_count(),
        polygon: Some(polygon),
        method: outline.method,
        data_point_count: work_all.len(),
        final_data_coverage,
        subsampling_used: outline.subsampling_used,
        generation_time_seconds: start.elapsed().as_secs_f64(),
        antimeridian_crossing,
        buffer_distance: outline.buffer_distance,
        fallback
    };

    info!("generated {} polygon with {} vertices for {} points, coverage {:.4} in {:.3}s",
          result.method, result.vertex_count, result.data_point_count, result.final_data_coverage, result.generation_time_seconds);
    Ok(result)
}

/// if all (at least 2) distinct points are collinear return the two extreme points
fn collinear_extremes (distinct: &[Coord<f64>])->Option<(Coord<f64>,Coord<f64>)> {
    let cmp = |p: &&Coord<f64>, q: &&Coord<f64>| p.x.total_cmp(&q.x).then( p.y.total_cmp(&q.y));
    let a = *distinct.iter().min_by( cmp)?;
    let b = *distinct.iter().max_by( cmp)?;

    if distinct.len() == 2 || distinct.iter().all( |p| orientation( a, b, *p) == geo::kernels::Orientation::Collinear) {
        Some((a,b))
    } else {
        None
    }
}

fn base_buffer (points: &[Coord<f64>])->f64 {
    let bbox = bounding_box( points);
    let range = bbox.width().max( bbox.height());
    (range * BASE_BUFFER_RATIO).clamp( MIN_BASE_BUFFER, MAX_BASE_BUFFER)
}

/// max edge length for concave hull digging: a share of the coordinate range that grows with the
/// number of points, but never below three times the mean point spacing
fn max_edge_length (points: &[Coord<f64>], hull_area: f64)->f64 {
    let n = points.len();
    let bbox = bounding_box( points);
    let range = bbox.width().max( bbox.height());

    let ratio = if n < 1_000 { 0.03 } else if n < 10_000 { 0.05 } else { 0.08 };
    let mean_spacing = (hull_area / n as f64).sqrt();

    (range * ratio).max( 3.0 * mean_spacing)
}

/// the general case: at least 3 non-collinear distinct points
fn point_cloud_outline (distinct: &[Coord<f64>], config: &PolygonConfig)->Outline {
    let subsampling_used = distinct.len() > SUBSAMPLE_THRESHOLD;
    let work = if subsampling_used {
        let sub = subsample( distinct, SUBSAMPLE_THRESHOLD);
        debug!("subsampled {} points to {}", distinct.len(), sub.len());
        sub
    } else {
        distinct.to_vec()
    };

    let base = base_buffer( &work);
    let hull_ring = convex_hull( &work);
    let hull_area = signed_ring_area( &hull_ring).abs();

    let mut fallback = false;
    let mut buffer_distance = 0.0;

    let built = match config.algorithm {
        PolygonAlgorithm::Complex => {
            let max_edge = max_edge_length( &work, hull_area);
            debug!("concave hull with max edge length {:.6}", max_edge);
            let d = base * 0.5;
            concave_hull( &work, max_edge)
                .and_then( |r| hull::buffer_ring( &r, d))
                .and_then( |r| repair( &r, base * 0.01))
                .map( |r| (r, GenerationMethod::ConcaveHull, d))
        }
        PolygonAlgorithm::Simple => {
            let track = decimate_track( &work, MAX_TRACK_POINTS);
            let d = base * 2.0;
            buffer_track( &track, d)
                .and_then( |r| repair( &r, base * 0.01))
                .map( |r| (r, GenerationMethod::LineBuffer, d))
        }
    };

    let (ring, mut method) = match built {
        Some((ring, method, d)) => {
            buffer_distance = d;
            (ring, method)
        }
        None => {
            warn!("{:?} hull construction failed, using convex hull", config.algorithm);
            fallback = true;
            (hull_ring.clone(), GenerationMethod::ConvexHull)
        }
    };

    //--- coverage enhancement
    let mut tracker = CoverageTracker::new( &work, &ring);
    let mut ring = ring;
    if tracker.ratio() < config.target_coverage {
        let enhanced = enhance( ring, &mut tracker, base, config.target_coverage, hull_area);
        ring = enhanced.ring;
        buffer_distance += enhanced.buffer_added;
        if enhanced.emergency { fallback = true }
        debug!("coverage after {} enhancement steps: {:.4}", enhanced.steps, tracker.ratio());
    }

    //--- repair and simplify
    let repaired = match repair( &ring, base * 0.01) {
        Some(r) => {
            if r != ring { tracker.reset( &r) }
            Some(r)
        }
        None => None
    };

    let simplified = repaired.and_then( |r| {
        if open_part( &r).len() > config.max_vertices {
            simplify_to_max_vertices( &r, &mut tracker, config.max_vertices, config.target_coverage)
        } else {
            Some(r)
        }
    });

    let ring = match simplified {
        Some(r) if tracker.ratio() >= config.target_coverage || method == GenerationMethod::ConvexHull => r,
        _ => {
            warn!("could not meet coverage {} with at most {} vertices, using convex hull", config.target_coverage, config.max_vertices);
            fallback = true;
            method = GenerationMethod::ConvexHull;
            buffer_distance = 0.0;
            force_max_vertices( &hull_ring, config.max_vertices)
        }
    };

    Outline { ring: ensure_ccw( ring), method, buffer_distance, fallback, subsampling_used }
}
