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

//! geometry configuration, usually loaded from a RON file such as
//! ```ron
//! GeometryConfig(
//!     collection_geometry_override: false,
//!     spatial_polygon_enabled: true,
//!     spatial_polygon_algorithm: Complex,
//!     spatial_polygon_target_coverage: 0.98,
//!     spatial_polygon_max_vertices: 100,
//! )
//! ```
//! missing fields get their defaults

use std::path::Path;
use serde::{Serialize,Deserialize};

use metgen_common::fs::existing_non_empty_contents;
use crate::{PolygonAlgorithm, PolygonConfig, DEFAULT_MAX_VERTICES, DEFAULT_MIN_POINT_DISTANCE, DEFAULT_TARGET_COVERAGE};
use crate::errors::{Result, MetgenGeometryError, config_error};

pub const MIN_TARGET_COVERAGE: f64 = 0.80;
pub const MAX_TARGET_COVERAGE: f64 = 1.0;
pub const MIN_MAX_VERTICES: usize = 10;
pub const MAX_MAX_VERTICES: usize = 1000;

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// use the single collection bounding rectangle for all (cartesian) granules
    pub collection_geometry_override: bool,
    /// generate polygons for `.spatial` point clouds instead of using the points as boundary
    pub spatial_polygon_enabled: bool,
    pub spatial_polygon_algorithm: PolygonAlgorithm,
    pub spatial_polygon_target_coverage: f64,
    pub spatial_polygon_max_vertices: usize,
    /// degrees, consecutive boundary points closer than this are collapsed
    pub min_point_distance_tolerance: f64,
}

impl Default for GeometryConfig {
    fn default()->Self {
        GeometryConfig {
            collection_geometry_override: false,
            spatial_polygon_enabled: false,
            spatial_polygon_algorithm: PolygonAlgorithm::Complex,
            spatial_polygon_target_coverage: DEFAULT_TARGET_COVERAGE,
            spatial_polygon_max_vertices: DEFAULT_MAX_VERTICES,
            min_point_distance_tolerance: DEFAULT_MIN_POINT_DISTANCE
        }
    }
}

impl GeometryConfig {
    pub fn from_ron_str (s: &str)->Result<Self> {
        let config: GeometryConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate (&self)->Result<()> {
        let cov = self.spatial_polygon_target_coverage;
        if !(MIN_TARGET_COVERAGE..=MAX_TARGET_COVERAGE).contains(&cov) {
            return Err( config_error( format!("spatial_polygon_target_coverage {cov} not in [{MIN_TARGET_COVERAGE},{MAX_TARGET_COVERAGE}]")))
        }

        let nv = self.spatial_polygon_max_vertices;
        if !(MIN_MAX_VERTICES..=MAX_MAX_VERTICES).contains(&nv) {
            return Err( config_error( format!("spatial_polygon_max_vertices {nv} not in [{MIN_MAX_VERTICES},{MAX_MAX_VERTICES}]")))
        }

        let tol = self.min_point_distance_tolerance;
        if !(tol.is_finite() && tol > 0.0) {
            return Err( config_error( format!("min_point_distance_tolerance {tol} has to be a positive number")))
        }

        Ok(())
    }

    pub fn polygon_config (&self)->PolygonConfig {
        PolygonConfig {
            enabled: self.spatial_polygon_enabled,
            algorithm: self.spatial_polygon_algorithm,
            target_coverage: self.spatial_polygon_target_coverage,
            max_vertices: self.spatial_polygon_max_vertices,
            min_point_distance_tolerance: self.min_point_distance_tolerance
        }
    }
}

/// load and validate a RON geometry config file
pub fn load_config <P: AsRef<Path>> (path: P)->Result<GeometryConfig> {
    let contents = existing_non_empty_contents( &path)?;
    GeometryConfig::from_ron_str( contents.as_str())
}
