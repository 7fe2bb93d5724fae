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

use std::f64::consts::PI;
use geo_types::Coord;
use rand::{Rng, SeedableRng, rngs::StdRng};

use metgen_geometry::{MetgenGeometryError, PolygonAlgorithm, PolygonConfig};
use metgen_geometry::coords::{is_ccw, is_closed, is_simple_ring, signed_ring_area};
use metgen_geometry::flightline::{generate, generate_from_arrays, GenerationMethod, PolygonGenerationResult};
use metgen_geometry::flightline::antimeridian::shift;
use metgen_geometry::flightline::hull::convex_hull;
use metgen_geometry::flightline::subsample::subsample;

fn random_cloud (rng: &mut StdRng, n: usize, lon0: f64, lat0: f64, size: f64)->Vec<Coord<f64>> {
    (0..n).map( |_| Coord{ x: lon0 + rng.random_range( 0.0..size), y: lat0 + rng.random_range( 0.0..size) }).collect()
}

/// a wavy LIDAR track with some cross track jitter
fn flightline (rng: &mut StdRng, n: usize)->Vec<Coord<f64>> {
    (0..n).map( |i| {
        let t = i as f64 / n as f64;
        Coord{ x: -105.0 + t + rng.random_range( -0.001..0.001), y: 40.0 + 0.1 * (2.0 * PI * t).sin() + rng.random_range( -0.002..0.002) }
    }).collect()
}

fn check_result (res: &PolygonGenerationResult, config: &PolygonConfig) {
    println!("{}", serde_json::to_string( res).unwrap());
    let poly = res.polygon.as_ref().expect("no polygon");
    let ring = poly.ring();

    assert!( is_closed( ring));
    assert!( ring.len() >= 4);
    assert_eq!( res.vertex_count, ring.len() - 1);
    assert!( res.vertex_count <= config.max_vertices);
    assert!( ring.iter().all( |p| p.x >= -180.0 && p.x <= 180.0 && p.y >= -90.0 && p.y <= 90.0));
    assert!( res.final_data_coverage >= config.target_coverage || res.fallback);
}

#[test]
fn test_empty_input () {
    let res = generate( &[], &PolygonConfig::default()).unwrap();
    assert!( res.polygon.is_none());
    assert_eq!( res.method, GenerationMethod::None);
    assert_eq!( res.data_point_count, 0);
}

#[test]
fn test_single_point () {
    let pts = vec![ Coord{ x: 10.0, y: 20.0 }; 5];
    let config = PolygonConfig::default();
    let res = generate( &pts, &config).unwrap();

    check_result( &res, &config);
    assert_eq!( res.method, GenerationMethod::SimpleBuffer);
    assert_eq!( res.vertex_count, 4);
    assert_eq!( res.data_point_count, 5);
    assert_eq!( res.final_data_coverage, 1.0);
    assert!( is_ccw( res.polygon.as_ref().unwrap().ring()));
}

#[test]
fn test_two_points () {
    let pts = vec![ Coord{ x: 0.0, y: 0.0 }, Coord{ x: 1.0, y: 1.0 }];
    let config = PolygonConfig::default();
    let res = generate( &pts, &config).unwrap();

    check_result( &res, &config);
    assert_eq!( res.method, GenerationMethod::SimpleBuffer);
    assert_eq!( res.vertex_count, 4);
    assert_eq!( res.final_data_coverage, 1.0);
}

#[test]
fn test_collinear_points () {
    let pts: Vec<Coord<f64>> = (0..50).map( |i| Coord{ x: -100.0 + i as f64 * 0.01, y: 35.0 }).collect();
    let config = PolygonConfig::default();
    let res = generate( &pts, &config).unwrap();

    check_result( &res, &config);
    assert_eq!( res.method, GenerationMethod::SimpleBuffer);
    assert_eq!( res.final_data_coverage, 1.0);
    assert!( is_ccw( res.polygon.as_ref().unwrap().ring()));
}

#[test]
fn test_malformed_input () {
    let pts = vec![ Coord{ x: 0.0, y: 0.0 }, Coord{ x: f64::INFINITY, y: 1.0 }, Coord{ x: 1.0, y: 0.0 }];
    assert!( matches!( generate( &pts, &PolygonConfig::default()), Err(MetgenGeometryError::MalformedInput{..})));

    let res = generate_from_arrays( &[0.0, 1.0, 2.0], &[0.0, 1.0], &PolygonConfig::default());
    assert!( matches!( res, Err(MetgenGeometryError::MalformedInput{..})));

    let res = generate_from_arrays( &[0.0, 1.0, 0.0], &[0.0, 0.0, f64::NAN], &PolygonConfig::default());
    assert!( matches!( res, Err(MetgenGeometryError::MalformedInput{..})));
}

#[test]
fn test_random_clouds () {
    let mut rng = StdRng::seed_from_u64( 42);
    let config = PolygonConfig { enabled: true, ..PolygonConfig::default() };

    for n in [100, 1000, 5000] {
        let lon0 = rng.random_range( -170.0..170.0);
        let lat0 = rng.random_range( -60.0..60.0);
        let pts = random_cloud( &mut rng, n, lon0, lat0, 1.0);

        let res = generate( &pts, &config).unwrap();
        check_result( &res, &config);
        assert!( !res.subsampling_used);
        assert!( !res.antimeridian_crossing);

        let ring = res.polygon.as_ref().unwrap().ring();
        assert!( is_ccw( ring));
        assert!( is_simple_ring( ring));
    }
}

#[test]
fn test_vertex_cap () {
    let mut rng = StdRng::seed_from_u64( 7);
    let pts = random_cloud( &mut rng, 2000, 12.0, 47.0, 0.5);

    for max_vertices in [10, 25, 60] {
        let config = PolygonConfig { max_vertices, ..PolygonConfig::default() };
        let res = generate( &pts, &config).unwrap();
        check_result( &res, &config);
    }
}

#[test]
fn test_simple_algorithm () {
    let mut rng = StdRng::seed_from_u64( 3);
    let pts = flightline( &mut rng, 2000);
    let config = PolygonConfig { algorithm: PolygonAlgorithm::Simple, ..PolygonConfig::default() };

    let res = generate( &pts, &config).unwrap();
    check_result( &res, &config);
    assert!( res.method == GenerationMethod::LineBuffer || res.method == GenerationMethod::ConvexHull);
}

#[test]
fn test_antimeridian_crossing () {
    let mut rng = StdRng::seed_from_u64( 180);
    let pts: Vec<Coord<f64>> = (0..500).map( |i| {
        let x = if i % 2 == 0 { rng.random_range( 179.0..180.0) } else { rng.random_range( -180.0..-179.0) };
        Coord{ x, y: rng.random_range( 10.0..11.0) }
    }).collect();
    let config = PolygonConfig::default();

    let res = generate( &pts, &config).unwrap();
    check_result( &res, &config);
    assert!( res.antimeridian_crossing);

    let ring = res.polygon.as_ref().unwrap().ring();
    assert!( ring.iter().any( |p| p.x > 0.0) && ring.iter().any( |p| p.x < 0.0));

    // valid in continuous (shifted) longitude space
    let shifted = shift( ring);
    assert!( is_ccw( &shifted));
    assert!( is_simple_ring( &shifted));
    assert!( signed_ring_area( &shifted) < 4.0);
}

#[test]
fn test_subsampled_flightline () {
    let mut rng = StdRng::seed_from_u64( 15);
    let pts = flightline( &mut rng, 15_000);
    let config = PolygonConfig::default();

    let res = generate( &pts, &config).unwrap();
    check_result( &res, &config);
    assert!( res.subsampling_used);
    assert_eq!( res.data_point_count, 15_000);
    assert!( res.final_data_coverage >= 0.90);
    assert!( res.vertex_count <= 150);
}

#[test]
fn test_subsample_keeps_hull () {
    let mut rng = StdRng::seed_from_u64( 99);
    let pts = random_cloud( &mut rng, 20_000, 0.0, 0.0, 2.0);

    let sub = subsample( &pts, 8000);
    assert_eq!( sub.len(), 8000);

    let full_area = signed_ring_area( &convex_hull( &pts));
    let sub_area = signed_ring_area( &convex_hull( &sub));
    println!("hull area {} subsampled {}", full_area, sub_area);
    assert!( (full_area - sub_area).abs() < 1e-9);

    assert_eq!( subsample( &pts[..100], 8000), pts[..100].to_vec());
}

#[test]
fn test_deterministic () {
    let mut rng = StdRng::seed_from_u64( 1);
    let pts = random_cloud( &mut rng, 800, -80.0, 30.0, 0.3);
    let config = PolygonConfig::default();

    let a = generate( &pts, &config).unwrap();
    let b = generate( &pts, &config).unwrap();
    assert_eq!( a.polygon, b.polygon);
    assert_eq!( a.final_data_coverage, b.final_data_coverage);
}

#[test]
fn test_polar_cloud () {
    let mut rng = StdRng::seed_from_u64( 90);
    let pts: Vec<Coord<f64>> = (0..2000).map( |_| Coord{ x: rng.random_range( 10.0..11.0), y: rng.random_range( 89.85..90.0) }).collect();
    let config = PolygonConfig::default();

    let res = generate( &pts, &config).unwrap();
    check_result( &res, &config);

    // data above the latitude limit can't be covered
    assert!( res.final_data_coverage < config.target_coverage);
    assert!( res.fallback);
    assert!( res.polygon.as_ref().unwrap().ring().iter().all( |p| p.y <= 89.9));
}
