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
#![allow(unused)]

//! granule geometry resolution and flightline polygon generation.
//!
//! Given what we know about the geometry sources of a granule (sidecar `.spo` / `.spatial` files,
//! geometry derived from the science file, collection bounding rectangles) this crate decides
//! which UMM-G geometry to emit ([`resolver`]), extracts the raw points from the selected source
//! ([`extractor`]) and turns them into a [`ummg::GeometryRecord`]. Polygons are either built
//! directly from pre-ordered boundaries ([`direct`]) or generated from dense point clouds such as
//! LIDAR flightlines ([`flightline`]).

use std::{fmt, str::FromStr};
use serde::{Serialize,Deserialize};
use geo_types::Coord;

mod errors;
pub use errors::*;

pub mod config;
pub mod coords;
pub mod direct;
pub mod flightline;
pub mod resolver;
pub mod extractor;
pub mod ummg;
pub mod sidecar;
pub mod grid;

/// ordered (longitude,latitude) pairs, stored as geo `Coord` with x = longitude and y = latitude
pub type PointSequence = Vec<Coord<f64>>;

/* #region enums  ********************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all="UPPERCASE")]
pub enum GranuleSpatialRepresentation {
    Geodetic,
    Cartesian
}

impl FromStr for GranuleSpatialRepresentation {
    type Err = MetgenGeometryError;

    fn from_str (s: &str)->Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "GEODETIC" => Ok(GranuleSpatialRepresentation::Geodetic),
            "CARTESIAN" => Ok(GranuleSpatialRepresentation::Cartesian),
            _ => Err( config_error( format!("unknown granule spatial representation '{s}'")))
        }
    }
}

impl fmt::Display for GranuleSpatialRepresentation {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GranuleSpatialRepresentation::Geodetic => write!(f, "GEODETIC"),
            GranuleSpatialRepresentation::Cartesian => write!(f, "CARTESIAN"),
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all="SCREAMING_SNAKE_CASE")]
pub enum GeometrySource {
    OverrideCollection,
    SpoFile,
    SpatialFile,
    ScienceFile,
    CollectionFallback,
    None
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all="SCREAMING_SNAKE_CASE")]
pub enum GeometryType {
    Point,
    BoundingRectangle,
    Polygon,
    None
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Default)]
pub enum PolygonAlgorithm {
    /// buffer around the (decimated) point track
    Simple,
    /// concave hull with adaptive edge length
    #[default]
    Complex
}

/* #endregion enums */

/* #region context & decision  *******************************************************************************/

/// polygon generation settings that are part of the per-granule context
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct PolygonConfig {
    pub enabled: bool,
    pub algorithm: PolygonAlgorithm,
    pub target_coverage: f64,
    pub max_vertices: usize,
    pub min_point_distance_tolerance: f64,
}

pub const DEFAULT_TARGET_COVERAGE: f64 = 0.98;
pub const DEFAULT_MAX_VERTICES: usize = 100;
pub const DEFAULT_MIN_POINT_DISTANCE: f64 = 1e-4;

impl Default for PolygonConfig {
    fn default()->Self {
        PolygonConfig {
            enabled: false,
            algorithm: PolygonAlgorithm::Complex,
            target_coverage: DEFAULT_TARGET_COVERAGE,
            max_vertices: DEFAULT_MAX_VERTICES,
            min_point_distance_tolerance: DEFAULT_MIN_POINT_DISTANCE
        }
    }
}

/// what is known about the geometry sources of a single granule. Only counts and flags, the
/// resolver never looks at coordinates
#[derive(Debug,Clone,PartialEq)]
pub struct GeometryContext {
    pub granule_id: String,
    pub spatial_representation: GranuleSpatialRepresentation,

    pub has_spo: bool,
    pub spo_point_count: usize,

    pub has_spatial_file: bool,
    pub spatial_point_count: usize,

    pub has_science_geometry: bool,
    pub science_point_count: usize,
    pub science_is_gridded: bool,
    pub science_has_bbox: bool,

    pub bounding_rectangle_count: usize,
    pub collection_geometry_override: bool,

    pub polygon: PolygonConfig,
}

impl GeometryContext {
    pub fn new (granule_id: impl ToString, spatial_representation: GranuleSpatialRepresentation)->Self {
        GeometryContext {
            granule_id: granule_id.to_string(),
            spatial_representation,
            has_spo: false,
            spo_point_count: 0,
            has_spatial_file: false,
            spatial_point_count: 0,
            has_science_geometry: false,
            science_point_count: 0,
            science_is_gridded: false,
            science_has_bbox: false,
            bounding_rectangle_count: 0,
            collection_geometry_override: false,
            polygon: PolygonConfig::default()
        }
    }

    pub fn with_spo (mut self, point_count: usize)->Self {
        self.has_spo = true;
        self.spo_point_count = point_count;
        self
    }

    pub fn with_spatial_file (mut self, point_count: usize)->Self {
        self.has_spatial_file = true;
        self.spatial_point_count = point_count;
        self
    }

    pub fn with_science_geometry (mut self, point_count: usize, is_gridded: bool, has_bbox: bool)->Self {
        self.has_science_geometry = true;
        self.science_point_count = point_count;
        self.science_is_gridded = is_gridded;
        self.science_has_bbox = has_bbox;
        self
    }

    pub fn with_collection_rectangles (mut self, count: usize)->Self {
        self.bounding_rectangle_count = count;
        self
    }

    pub fn with_override (mut self, collection_geometry_override: bool)->Self {
        self.collection_geometry_override = collection_geometry_override;
        self
    }

    pub fn with_polygon_config (mut self, polygon: PolygonConfig)->Self {
        self.polygon = polygon;
        self
    }

    pub fn is_geodetic (&self)->bool { self.spatial_representation == GranuleSpatialRepresentation::Geodetic }
    pub fn is_cartesian (&self)->bool { self.spatial_representation == GranuleSpatialRepresentation::Cartesian }

    /// number of granule level sources (spo, spatial, science) that are present
    pub fn granule_source_count (&self)->usize {
        [self.has_spo, self.has_spatial_file, self.has_science_geometry].iter().filter(|b| **b).count()
    }
}

/// how the extractor should turn the selected points into a polygon
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum PolygonBuilder {
    /// points already form the boundary, `clockwise_source` tells if they have to be reversed
    Direct { clockwise_source: bool },
    /// points are a cloud that needs the flightline generator
    Generated
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum DecisionErrorKind {
    NoApplicableRule,
    InvalidOverrideConfiguration,
    InsufficientPoints
}

#[derive(Debug,Clone,PartialEq)]
pub struct DecisionError {
    pub kind: DecisionErrorKind,
    pub message: String
}

/// the outcome of geometry resolution. Either a (source,type) pair or an error
#[derive(Debug,Clone,PartialEq)]
pub struct GeometryDecision {
    pub source: GeometrySource,
    pub geometry_type: GeometryType,
    pub polygon_builder: Option<PolygonBuilder>,
    pub rule: &'static str,
    pub error: Option<DecisionError>,
}

impl GeometryDecision {
    pub fn new (rule: &'static str, source: GeometrySource, geometry_type: GeometryType)->Self {
        GeometryDecision { source, geometry_type, polygon_builder: None, rule, error: None }
    }

    pub fn polygon (rule: &'static str, source: GeometrySource, builder: PolygonBuilder)->Self {
        GeometryDecision { source, geometry_type: GeometryType::Polygon, polygon_builder: Some(builder), rule, error: None }
    }

    /// a decision for a source that was selected but cannot be used. `geometry_type` is what the
    /// rule would have produced
    pub fn failed (rule: &'static str, source: GeometrySource, geometry_type: GeometryType, kind: DecisionErrorKind, message: impl ToString)->Self {
        let error = Some( DecisionError{ kind, message: message.to_string() });
        GeometryDecision { source, geometry_type, polygon_builder: None, rule, error }
    }

    pub fn is_ok (&self)->bool { self.error.is_none() }

    /// turn a failed decision into the corresponding error for the given granule
    pub fn to_error (&self, granule_id: &str)->Option<MetgenGeometryError> {
        self.error.as_ref().map( |e| {
            let err = match e.kind {
                DecisionErrorKind::NoApplicableRule => no_applicable_rule( self.rule, &e.message),
                DecisionErrorKind::InvalidOverrideConfiguration => invalid_override( self.rule, &e.message),
                DecisionErrorKind::InsufficientPoints => insufficient_points( self.rule, &e.message),
            };
            err.with_granule( granule_id)
        })
    }
}

/* #endregion context & decision */

/* #region output geometries  ********************************************************************************/

/// a single closed, counter-clockwise ring with at least 4 coordinate pairs (first == last)
#[derive(Debug,Clone,PartialEq)]
pub struct GPolygon {
    ring: Vec<Coord<f64>>
}

impl GPolygon {
    /// caller has to guarantee the ring is closed, counter-clockwise and has >= 4 coordinates
    pub(crate) fn from_closed_ccw (ring: Vec<Coord<f64>>)->Self { GPolygon{ ring } }

    pub fn ring (&self)->&[Coord<f64>] { &self.ring }

    /// number of distinct vertices, i.e. without the closing coordinate
    pub fn vertex_count (&self)->usize { self.ring.len().saturating_sub(1) }
}

/* #endregion output geometries */
