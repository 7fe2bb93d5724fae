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

use geo_types::Coord;

use metgen_geometry::MetgenGeometryError;
use metgen_geometry::coords::{is_ccw, is_closed};
use metgen_geometry::grid::{index_subset, pixel_padding, thinned_perimeter, GridAxes};

#[test]
fn test_index_subset () {
    assert_eq!( index_subset( 5), vec![0, 1, 2, 3, 4]);
    assert_eq!( index_subset( 6), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!( index_subset( 11), vec![0, 2, 4, 6, 8, 10]);
    assert_eq!( index_subset( 100), vec![0, 20, 40, 59, 79, 99]);
}

#[test]
fn test_padding () {
    assert_eq!( pixel_padding( -0.5), 0.25);

    let axes = GridAxes::new( vec![1.0, 2.0, 3.0], vec![30.0, 20.0, 10.0]);
    let (x,y) = axes.padded().unwrap();
    assert_eq!( x, vec![0.5, 2.0, 3.5]);
    assert_eq!( y, vec![35.0, 20.0, 5.0]);

    let axes = axes.with_resolution( 2.0, 4.0);
    let bbox = axes.bounding_box().unwrap();
    assert_eq!( (bbox.west, bbox.south, bbox.east, bbox.north), (0.0, 8.0, 4.0, 32.0));
}

#[test]
fn test_thinned_perimeter () {
    let x: Vec<f64> = (0..10).map( |i| 0.5 + i as f64).collect();
    let y: Vec<f64> = (0..10).map( |i| 9.5 - i as f64).collect();
    let perimeter = thinned_perimeter( &GridAxes::new( x, y)).unwrap();
    println!("{:?}", perimeter);

    assert_eq!( perimeter.len(), 21);
    assert!( is_closed( &perimeter));
    assert!( is_ccw( &perimeter));
    assert_eq!( perimeter[0], Coord{ x: 0.0, y: 10.0 });
    assert_eq!( perimeter[5], Coord{ x: 0.0, y: 0.0 });
    assert_eq!( perimeter[10], Coord{ x: 10.0, y: 0.0 });
    assert_eq!( perimeter[15], Coord{ x: 10.0, y: 10.0 });
}

#[test]
fn test_small_grid () {
    let perimeter = thinned_perimeter( &GridAxes::new( vec![0.0, 1.0], vec![1.0, 0.0])).unwrap();
    println!("{:?}", perimeter);
    assert_eq!( perimeter, vec![
        Coord{ x: -0.5, y: 1.5 }, Coord{ x: -0.5, y: -0.5 }, Coord{ x: 1.5, y: -0.5 }, Coord{ x: 1.5, y: 1.5 }, Coord{ x: -0.5, y: 1.5 }
    ]);

    let err = thinned_perimeter( &GridAxes::new( vec![0.0], vec![1.0, 0.0])).unwrap_err();
    assert!( matches!( err, MetgenGeometryError::MalformedInput{..}));
}
