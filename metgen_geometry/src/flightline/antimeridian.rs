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

//! detection and unwrapping of point sets that cross the antimeridian

use geo_types::Coord;
use metgen_common::angle::{shift_west_to_east, unshift_east_to_west, clamp_longitude};
use metgen_common::MinMaxAvg;

pub fn lon_span (points: &[Coord<f64>])->f64 {
    MinMaxAvg::from_values( points.iter().map(|p| p.x)).range()
}

/// a point set crosses the antimeridian if its longitude span exceeds 180 degrees and moving the
/// western hemisphere by +360 makes it narrower
pub fn crosses_antimeridian (points: &[Coord<f64>])->bool {
    let span = lon_span( points);
    if span > 180.0 {
        let shifted_span = MinMaxAvg::from_values( points.iter().map(|p| shift_west_to_east(p.x))).range();
        shifted_span < span
    } else {
        false
    }
}

pub fn shift (points: &[Coord<f64>])->Vec<Coord<f64>> {
    points.iter().map( |p| Coord{ x: shift_west_to_east(p.x), y: p.y }).collect()
}

/// map shifted longitudes back into [-180,180]
pub fn unshift (ring: &[Coord<f64>])->Vec<Coord<f64>> {
    ring.iter().map( |p| Coord{ x: clamp_longitude( unshift_east_to_west(p.x)), y: p.y }).collect()
}
