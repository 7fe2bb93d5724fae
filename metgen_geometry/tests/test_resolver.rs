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

use metgen_geometry::*;
use metgen_geometry::resolver::{resolve, RULES, NO_APPLICABLE_SOURCE};
use metgen_geometry::GranuleSpatialRepresentation::{Cartesian, Geodetic};

fn assert_decision (d: &GeometryDecision, source: GeometrySource, geometry_type: GeometryType) {
    println!("{:?}", d);
    assert!( d.is_ok());
    assert_eq!( d.source, source);
    assert_eq!( d.geometry_type, geometry_type);
}

fn assert_failed (d: &GeometryDecision, source: GeometrySource, kind: DecisionErrorKind) {
    println!("{:?}", d);
    assert!( !d.is_ok());
    assert_eq!( d.source, source);
    assert_eq!( d.error.as_ref().map(|e| e.kind), Some(kind));
}

fn enabled_polygons ()->PolygonConfig {
    PolygonConfig { enabled: true, ..PolygonConfig::default() }
}

#[test]
fn test_no_rule_applies_to_empty_context () {
    let ctx = GeometryContext::new( "G0", Geodetic);
    assert!( RULES.iter().all( |rule| rule(&ctx).is_none()));

    let d = resolve( &ctx);
    assert_failed( &d, GeometrySource::None, DecisionErrorKind::NoApplicableRule);
    assert_eq!( d.geometry_type, GeometryType::None);
    assert_eq!( d.error.as_ref().map(|e| e.message.as_str()), Some(NO_APPLICABLE_SOURCE));

    let err = d.to_error( "G0").unwrap();
    println!("{}", err);
    assert!( matches!( err, MetgenGeometryError::NoApplicableRule{..}));
    assert_eq!( err.granule(), Some("G0"));
}

#[test]
fn test_collection_override () {
    let ctx = GeometryContext::new( "G1", Cartesian).with_override( true).with_collection_rectangles( 1);
    let d = resolve( &ctx);
    assert_decision( &d, GeometrySource::OverrideCollection, GeometryType::BoundingRectangle);
    assert_eq!( d.rule, "collection_override");

    // override wins over granule level sources
    let ctx = ctx.with_spatial_file( 2).with_science_geometry( 0, true, true);
    assert_decision( &resolve( &ctx), GeometrySource::OverrideCollection, GeometryType::BoundingRectangle);
}

#[test]
fn test_invalid_collection_override () {
    let ctx = GeometryContext::new( "G2", Cartesian).with_override( true).with_collection_rectangles( 2);
    let d = resolve( &ctx);
    assert_failed( &d, GeometrySource::OverrideCollection, DecisionErrorKind::InvalidOverrideConfiguration);
    let err = d.to_error( "G2").unwrap();
    assert!( matches!( err, MetgenGeometryError::InvalidOverrideConfiguration{..}));

    let ctx = GeometryContext::new( "G2", Cartesian).with_override( true);
    assert_failed( &resolve( &ctx), GeometrySource::OverrideCollection, DecisionErrorKind::InvalidOverrideConfiguration);

    let ctx = GeometryContext::new( "G2", Geodetic).with_override( true).with_collection_rectangles( 1);
    assert_failed( &resolve( &ctx), GeometrySource::OverrideCollection, DecisionErrorKind::InvalidOverrideConfiguration);
}

#[test]
fn test_spo () {
    let ctx = GeometryContext::new( "G3", Geodetic).with_spo( 5).with_polygon_config( enabled_polygons());
    let d = resolve( &ctx);
    assert_decision( &d, GeometrySource::SpoFile, GeometryType::Polygon);
    assert_eq!( d.polygon_builder, Some(PolygonBuilder::Direct{ clockwise_source: true }));

    let ctx = GeometryContext::new( "G3", Geodetic).with_spo( 2);
    assert_failed( &resolve( &ctx), GeometrySource::SpoFile, DecisionErrorKind::InsufficientPoints);

    let ctx = GeometryContext::new( "G3", Cartesian).with_spo( 5);
    assert_failed( &resolve( &ctx), GeometrySource::SpoFile, DecisionErrorKind::NoApplicableRule);
}

#[test]
fn test_source_precedence () {
    let ctx = GeometryContext::new( "G4", Geodetic)
        .with_spo( 4)
        .with_spatial_file( 1)
        .with_science_geometry( 1, false, false)
        .with_collection_rectangles( 1);
    assert_eq!( ctx.granule_source_count(), 3);
    assert_decision( &resolve( &ctx), GeometrySource::SpoFile, GeometryType::Polygon);

    let ctx = GeometryContext::new( "G4", Geodetic).with_spatial_file( 1).with_science_geometry( 10, false, false);
    assert_decision( &resolve( &ctx), GeometrySource::SpatialFile, GeometryType::Point);

    // a failing higher priority source is not skipped
    let ctx = GeometryContext::new( "G4", Geodetic).with_spo( 1).with_spatial_file( 1);
    assert_failed( &resolve( &ctx), GeometrySource::SpoFile, DecisionErrorKind::InsufficientPoints);
}

#[test]
fn test_spatial_cartesian () {
    let ctx = GeometryContext::new( "G5", Cartesian).with_spatial_file( 2);
    assert_decision( &resolve( &ctx), GeometrySource::SpatialFile, GeometryType::BoundingRectangle);

    for n in [1, 3, 10] {
        let ctx = GeometryContext::new( "G5", Cartesian).with_spatial_file( n);
        assert_failed( &resolve( &ctx), GeometrySource::SpatialFile, DecisionErrorKind::NoApplicableRule);
    }

    let ctx = GeometryContext::new( "G5", Cartesian).with_spatial_file( 0);
    assert_failed( &resolve( &ctx), GeometrySource::SpatialFile, DecisionErrorKind::InsufficientPoints);
}

#[test]
fn test_spatial_geodetic () {
    let ctx = GeometryContext::new( "G6", Geodetic).with_spatial_file( 1);
    assert_decision( &resolve( &ctx), GeometrySource::SpatialFile, GeometryType::Point);

    let ctx = GeometryContext::new( "G6", Geodetic).with_spatial_file( 0);
    assert_failed( &resolve( &ctx), GeometrySource::SpatialFile, DecisionErrorKind::InsufficientPoints);

    let ctx = GeometryContext::new( "G6", Geodetic).with_spatial_file( 500).with_polygon_config( enabled_polygons());
    let d = resolve( &ctx);
    assert_decision( &d, GeometrySource::SpatialFile, GeometryType::Polygon);
    assert_eq!( d.polygon_builder, Some(PolygonBuilder::Generated));

    let ctx = GeometryContext::new( "G6", Geodetic).with_spatial_file( 500);
    let d = resolve( &ctx);
    assert_decision( &d, GeometrySource::SpatialFile, GeometryType::Polygon);
    assert_eq!( d.polygon_builder, Some(PolygonBuilder::Direct{ clockwise_source: false }));

    // two points are never a point cloud
    let ctx = GeometryContext::new( "G6", Geodetic).with_spatial_file( 2).with_polygon_config( enabled_polygons());
    assert_eq!( resolve( &ctx).polygon_builder, Some(PolygonBuilder::Direct{ clockwise_source: false }));
}

#[test]
fn test_science_file () {
    let ctx = GeometryContext::new( "G7", Cartesian).with_science_geometry( 0, true, true);
    assert_decision( &resolve( &ctx), GeometrySource::ScienceFile, GeometryType::BoundingRectangle);

    let ctx = GeometryContext::new( "G7", Cartesian).with_science_geometry( 0, true, false);
    assert_failed( &resolve( &ctx), GeometrySource::ScienceFile, DecisionErrorKind::NoApplicableRule);

    let ctx = GeometryContext::new( "G7", Cartesian).with_science_geometry( 21, false, true);
    assert_failed( &resolve( &ctx), GeometrySource::ScienceFile, DecisionErrorKind::NoApplicableRule);

    let ctx = GeometryContext::new( "G7", Geodetic).with_science_geometry( 1, false, false);
    assert_decision( &resolve( &ctx), GeometrySource::ScienceFile, GeometryType::Point);

    let ctx = GeometryContext::new( "G7", Geodetic).with_science_geometry( 21, true, true);
    let d = resolve( &ctx);
    assert_decision( &d, GeometrySource::ScienceFile, GeometryType::Polygon);
    assert_eq!( d.polygon_builder, Some(PolygonBuilder::Direct{ clockwise_source: false }));

    let ctx = GeometryContext::new( "G7", Geodetic).with_science_geometry( 0, false, false);
    assert_failed( &resolve( &ctx), GeometrySource::ScienceFile, DecisionErrorKind::InsufficientPoints);
}

#[test]
fn test_collection_fallback () {
    let ctx = GeometryContext::new( "G8", Cartesian).with_collection_rectangles( 1);
    let d = resolve( &ctx);
    assert_decision( &d, GeometrySource::CollectionFallback, GeometryType::BoundingRectangle);
    assert_eq!( d.rule, "collection_fallback");

    let ctx = GeometryContext::new( "G8", Cartesian).with_collection_rectangles( 3);
    assert_failed( &resolve( &ctx), GeometrySource::CollectionFallback, DecisionErrorKind::NoApplicableRule);

    let ctx = GeometryContext::new( "G8", Geodetic).with_collection_rectangles( 1);
    assert_failed( &resolve( &ctx), GeometrySource::CollectionFallback, DecisionErrorKind::NoApplicableRule);
}

#[test]
fn test_resolution_is_deterministic () {
    let ctx = GeometryContext::new( "G9", Geodetic).with_spatial_file( 42).with_polygon_config( enabled_polygons());
    assert_eq!( resolve( &ctx), resolve( &ctx));
}

#[test]
fn test_parse_spatial_representation () {
    assert_eq!( "geodetic".parse::<GranuleSpatialRepresentation>().unwrap(), Geodetic);
    assert_eq!( " CARTESIAN ".parse::<GranuleSpatialRepresentation>().unwrap(), Cartesian);
    assert!( "ORBIT".parse::<GranuleSpatialRepresentation>().is_err());
    assert_eq!( Cartesian.to_string(), "CARTESIAN");
}
