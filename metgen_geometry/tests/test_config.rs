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

use std::path::PathBuf;
use approx::assert_relative_eq;

use metgen_geometry::{MetgenGeometryError, PolygonAlgorithm};
use metgen_geometry::config::{load_config, GeometryConfig};

fn data_file (name: &str)->PathBuf {
    PathBuf::from( env!("CARGO_MANIFEST_DIR")).join( "tests/data").join( name)
}

#[test]
fn test_load_config () {
    let config = load_config( data_file( "geometry.ron")).unwrap();
    println!("{:?}", config);

    assert!( config.spatial_polygon_enabled);
    assert_eq!( config.spatial_polygon_algorithm, PolygonAlgorithm::Simple);
    assert_eq!( config.spatial_polygon_max_vertices, 50);
    assert_relative_eq!( config.min_point_distance_tolerance, 1e-4); // default

    let polygon = config.polygon_config();
    assert!( polygon.enabled);
    assert_relative_eq!( polygon.target_coverage, 0.95);
}

#[test]
fn test_defaults () {
    let config = GeometryConfig::from_ron_str( "GeometryConfig()").unwrap();
    assert_eq!( config, GeometryConfig::default());
    assert!( !config.collection_geometry_override);
    assert_eq!( config.spatial_polygon_algorithm, PolygonAlgorithm::Complex);
    assert_eq!( config.spatial_polygon_target_coverage, 0.98);
    assert_eq!( config.spatial_polygon_max_vertices, 100);
}

#[test]
fn test_invalid_values () {
    let err = load_config( data_file( "invalid_coverage.ron")).unwrap_err();
    println!("{}", err);
    assert!( matches!( err, MetgenGeometryError::ConfigError(_)));

    let res = GeometryConfig::from_ron_str( "GeometryConfig( spatial_polygon_max_vertices: 5)");
    assert!( matches!( res, Err(MetgenGeometryError::ConfigError(_))));

    let res = GeometryConfig::from_ron_str( "GeometryConfig( spatial_polygon_max_vertices: 1001)");
    assert!( matches!( res, Err(MetgenGeometryError::ConfigError(_))));

    let res = GeometryConfig::from_ron_str( "GeometryConfig( min_point_distance_tolerance: 0.0)");
    assert!( matches!( res, Err(MetgenGeometryError::ConfigError(_))));

    let config = GeometryConfig { spatial_polygon_target_coverage: 0.8, spatial_polygon_max_vertices: 1000, ..GeometryConfig::default() };
    assert!( config.validate().is_ok());
}

#[test]
fn test_malformed_config () {
    let res = GeometryConfig::from_ron_str( "GeometryConfig( spatial_polygon_enabled: maybe )");
    assert!( matches!( res, Err(MetgenGeometryError::RonError(_))));

    assert!( matches!( load_config( data_file( "missing.ron")), Err(MetgenGeometryError::IOError(_))));
}
