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

//! geometry extraction: build the [`GeometryContext`] of a granule from its available sources,
//! resolve it and turn the selected source data into a [`GeometryRecord`]

use std::path::Path;
use geo_types::Coord;

use metgen_common::{BoundingBox, debug, info};
use crate::{GeometryContext, GeometryDecision, GeometrySource, GeometryType, GranuleSpatialRepresentation,
    PointSequence, PolygonBuilder, PolygonConfig};
use crate::config::GeometryConfig;
use crate::coords::{distinct_count, normalize, open_part, validate_finite};
use crate::direct::{self, DirectBuildOptions, SourceWinding};
use crate::errors::{Result, MetgenGeometryError, insufficient_points, invalid_geometry, malformed_input};
use crate::flightline::{self, PolygonGenerationResult};
use crate::grid::{GridAxes, thinned_perimeter};
use crate::resolver::resolve;
use crate::sidecar::{read_sidecar, SidecarKind};
use crate::ummg::{BoundingRectangle, GeometryRecord, LonLat};

/// geometry derived from a science file
#[derive(Debug,Clone,PartialEq)]
pub struct ScienceGeometry {
    pub points: PointSequence,
    pub bbox: Option<BoundingBox<f64>>,
    pub gridded: bool
}

impl ScienceGeometry {
    pub fn from_points (points: PointSequence)->Self {
        ScienceGeometry { points, bbox: None, gridded: false }
    }

    pub fn from_bbox (bbox: BoundingBox<f64>, gridded: bool)->Self {
        ScienceGeometry { points: Vec::new(), bbox: Some(bbox), gridded }
    }

    /// thinned, padded perimeter and bounding box of a regular grid
    pub fn from_grid (axes: &GridAxes)->Result<Self> {
        Ok( ScienceGeometry { points: thinned_perimeter( axes)?, bbox: Some( axes.bounding_box()?), gridded: true } )
    }
}

/// abstraction for where the geometry data of a granule comes from
pub trait GeometrySources {
    fn granule_id (&self)->&str;
    fn spatial_representation (&self)->GranuleSpatialRepresentation;
    fn spo_points (&self)->Option<&[Coord<f64>]>;
    fn spatial_points (&self)->Option<&[Coord<f64>]>;
    fn science_geometry (&self)->Option<&ScienceGeometry>;
    fn collection_rectangles (&self)->&[BoundingBox<f64>];
}

/// in-memory geometry sources of a granule
#[derive(Debug,Clone,PartialEq)]
pub struct GranuleGeometryData {
    pub granule_id: String,
    pub spatial_representation: GranuleSpatialRepresentation,
    pub spo: Option<PointSequence>,
    pub spatial: Option<PointSequence>,
    pub science: Option<ScienceGeometry>,
    pub collection_rectangles: Vec<BoundingBox<f64>>,
}

impl GranuleGeometryData {
    pub fn new (granule_id: impl ToString, spatial_representation: GranuleSpatialRepresentation)->Self {
        GranuleGeometryData {
            granule_id: granule_id.to_string(),
            spatial_representation,
            spo: None,
            spatial: None,
            science: None,
            collection_rectangles: Vec::new()
        }
    }

    pub fn with_spo (mut self, points: PointSequence)->Self { self.spo = Some(points); self }
    pub fn with_spatial (mut self, points: PointSequence)->Self { self.spatial = Some(points); self }
    pub fn with_science (mut self, science: ScienceGeometry)->Self { self.science = Some(science); self }

    pub fn with_collection_rectangles (mut self, rects: Vec<BoundingBox<f64>>)->Self {
        self.collection_rectangles = rects;
        self
    }

    /// add the points of a `.spo` or `.spatial` sidecar file
    pub fn with_sidecar_file <P: AsRef<Path>> (self, path: &P)->Result<Self> {
        let sidecar = read_sidecar( path)?;
        debug!("read {} points from {:?}", sidecar.points.len(), path.as_ref());
        Ok( match sidecar.kind {
            SidecarKind::Spo => self.with_spo( sidecar.points),
            SidecarKind::Spatial => self.with_spatial( sidecar.points),
        })
    }
}

impl GeometrySources for GranuleGeometryData {
    fn granule_id (&self)->&str { self.granule_id.as_str() }
    fn spatial_representation (&self)->GranuleSpatialRepresentation { self.spatial_representation }
    fn spo_points (&self)->Option<&[Coord<f64>]> { self.spo.as_deref() }
    fn spatial_points (&self)->Option<&[Coord<f64>]> { self.spatial.as_deref() }
    fn science_geometry (&self)->Option<&ScienceGeometry> { self.science.as_ref() }
    fn collection_rectangles (&self)->&[BoundingBox<f64>] { self.collection_rectangles.as_slice() }
}

/// the outcome of extraction. `generation` is only set if the flightline generator was used
#[derive(Debug,Clone)]
pub struct ExtractedGeometry {
    pub decision: GeometryDecision,
    pub record: GeometryRecord,
    pub generation: Option<PolygonGenerationResult>,
}

pub fn build_context <S: GeometrySources> (src: &S, config: &GeometryConfig)->GeometryContext {
    let mut ctx = GeometryContext::new( src.granule_id(), src.spatial_representation())
        .with_collection_rectangles( src.collection_rectangles().len())
        .with_override( config.collection_geometry_override)
        .with_polygon_config( config.polygon_config());

    // spo boundaries might be closed, only distinct vertices count
    if let Some(pts) = src.spo_points() { ctx = ctx.with_spo( distinct_count( open_part( pts))) }
    if let Some(pts) = src.spatial_points() { ctx = ctx.with_spatial_file( pts.len()) }
    if let Some(sg) = src.science_geometry() {
        ctx = ctx.with_science_geometry( sg.points.len(), sg.gridded, sg.bbox.is_some())
    }
    ctx
}

/// resolve and extract the geometry of a granule
pub fn resolve_geometry <S: GeometrySources> (src: &S, config: &GeometryConfig)->Result<ExtractedGeometry> {
    let ctx = build_context( src, config);
    let decision = resolve( &ctx);
    let extracted = extract( src, &decision, &ctx.polygon)?;
    info!("granule {}: {} from {:?} (rule {})", ctx.granule_id, extracted.record.type_name(), decision.source, decision.rule);
    Ok(extracted)
}

/// read the points of the decided source and produce the record
pub fn extract <S: GeometrySources> (src: &S, decision: &GeometryDecision, polygon_config: &PolygonConfig)->Result<ExtractedGeometry> {
    let granule_id = src.granule_id();
    if let Some(err) = decision.to_error( granule_id) {
        return Err(err)
    }

    let (record, generation) = extract_record( src, decision, polygon_config).map_err( |e| e.with_granule( granule_id))?;
    Ok( ExtractedGeometry { decision: decision.clone(), record, generation } )
}

fn extract_record <S: GeometrySources> (src: &S, decision: &GeometryDecision, polygon_config: &PolygonConfig)->Result<(GeometryRecord,Option<PolygonGenerationResult>)> {
    match decision.geometry_type {
        GeometryType::Point => {
            let pts = source_points( src, decision.source)?;
            Ok( (point_record( pts)?, None) )
        }
        GeometryType::BoundingRectangle => {
            Ok( (GeometryRecord::BoundingRectangle( source_rectangle( src, decision.source)?), None) )
        }
        GeometryType::Polygon => {
            let pts = source_points( src, decision.source)?;
            match decision.polygon_builder {
                Some(PolygonBuilder::Generated) => {
                    let res = flightline::generate( pts, polygon_config)?;
                    match res.polygon.clone() {
                        Some(poly) => Ok( (GeometryRecord::GPolygon(poly), Some(res)) ),
                        None => Err( invalid_geometry( "flightline_polygon", "no polygon generated"))
                    }
                }
                Some(PolygonBuilder::Direct{ clockwise_source }) => {
                    let source_winding = if clockwise_source { SourceWinding::Clockwise } else { SourceWinding::CounterClockwise };
                    let opts = DirectBuildOptions { source_winding, min_point_distance_tolerance: polygon_config.min_point_distance_tolerance };
                    Ok( (GeometryRecord::GPolygon( direct::build( pts, &opts)?), None) )
                }
                None => Err( invalid_geometry( decision.rule, "polygon decision without builder"))
            }
        }
        GeometryType::None => Err( invalid_geometry( decision.rule, "no geometry type"))
    }
}

fn source_points <S: GeometrySources> (src: &S, source: GeometrySource)->Result<&[Coord<f64>]> {
    let pts = match source {
        GeometrySource::SpoFile => src.spo_points(),
        GeometrySource::SpatialFile => src.spatial_points(),
        GeometrySource::ScienceFile => src.science_geometry().map( |sg| sg.points.as_slice()),
        _ => None
    };
    pts.ok_or_else( || malformed_input( "extract", format!("no point data for source {:?}", source)))
}

fn point_record (pts: &[Coord<f64>])->Result<GeometryRecord> {
    validate_finite( pts)?;
    let p = normalize( pts).first().copied().ok_or_else( || insufficient_points( "point", "no point"))?;
    Ok( GeometryRecord::Point( LonLat::from(p)))
}

fn source_rectangle <S: GeometrySources> (src: &S, source: GeometrySource)->Result<BoundingRectangle> {
    let bbox = match source {
        GeometrySource::OverrideCollection | GeometrySource::CollectionFallback => {
            src.collection_rectangles().first().copied()
                .ok_or_else( || malformed_input( "extract", "missing collection bounding rectangle"))?
        }
        GeometrySource::ScienceFile => {
            src.science_geometry().and_then( |sg| sg.bbox)
                .ok_or_else( || malformed_input( "extract", "missing science file bounding box"))?
        }
        GeometrySource::SpatialFile | GeometrySource::SpoFile => {
            let pts = source_points( src, source)?;
            validate_finite( pts)?;
            if pts.len() != 2 {
                return Err( malformed_input( "bounding_rectangle", format!("bounding rectangle needs 2 points, got {}", pts.len())))
            }
            BoundingBox::from_corners( pts[0].x, pts[0].y, pts[1].x, pts[1].y)
        }
        GeometrySource::None => return Err( malformed_input( "extract", "no geometry source"))
    };
    Ok( BoundingRectangle::from( bbox))
}
