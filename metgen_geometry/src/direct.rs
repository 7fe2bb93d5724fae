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

//! builds polygons from point sequences that already describe the boundary (e.g. `.spo` files or
//! science file perimeters). No hull computation or buffering is involved

use geo_types::Coord;

use crate::{GPolygon, DEFAULT_MIN_POINT_DISTANCE};
use crate::coords::{validate_finite, normalize, closed, collapse_within_tolerance, distinct_count, open_part, signed_ring_area, ensure_ccw,
    is_simple_ring};
use crate::errors::{Result, invalid_geometry};

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum SourceWinding {
    Clockwise,
    CounterClockwise
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct DirectBuildOptions {
    pub source_winding: SourceWinding,
    pub min_point_distance_tolerance: f64
}

impl DirectBuildOptions {
    pub fn clockwise_source (min_point_distance_tolerance: f64)->Self {
        DirectBuildOptions { source_winding: SourceWinding::Clockwise, min_point_distance_tolerance }
    }

    pub fn counter_clockwise_source (min_point_distance_tolerance: f64)->Self {
        DirectBuildOptions { source_winding: SourceWinding::CounterClockwise, min_point_distance_tolerance }
    }
}

impl Default for DirectBuildOptions {
    fn default()->Self {
        DirectBuildOptions { source_winding: SourceWinding::CounterClockwise, min_point_distance_tolerance: DEFAULT_MIN_POINT_DISTANCE }
    }
}

/// turn an ordered boundary into a closed counter-clockwise ring.
///
/// Steps are: validate and normalize, close, reverse clockwise sources, collapse points within
/// tolerance, reject degenerate or self-intersecting rings, enforce counter-clockwise winding
pub fn build (points: &[Coord<f64>], opts: &DirectBuildOptions)->Result<GPolygon> {
    validate_finite( points)?;
    let points = normalize( points);

    let mut ring = closed( &points);
    if opts.source_winding == SourceWinding::Clockwise {
        ring.reverse();
    }

    let ring = collapse_within_tolerance( &ring, opts.min_point_distance_tolerance);

    let n_distinct = distinct_count( open_part(&ring));
    if n_distinct < 3 {
        return Err( invalid_geometry( "direct_polygon", format!("only {n_distinct} distinct points left after collapsing within {}", opts.min_point_distance_tolerance)))
    }
    if signed_ring_area( &ring) == 0.0 {
        return Err( invalid_geometry( "direct_polygon", "boundary has zero area"))
    }
    if !is_simple_ring( &ring) {
        return Err( invalid_geometry( "direct_polygon", "boundary is self-intersecting"))
    }

    Ok( GPolygon::from_closed_ccw( ensure_ccw( ring)))
}
