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

use approx::assert_relative_eq;
use metgen_common::{BoundingBox, MinMaxAvg, if_let};

#[test]
fn test_bbox_from_corners () {
    let bbox = BoundingBox::<f64>::from_corners( 10.0, 10.0, 0.0, 0.0);
    println!("{:?}", bbox);
    assert_eq!( bbox, BoundingBox::new( 0.0, 0.0, 10.0, 10.0));
    assert_relative_eq!( bbox.width(), 10.0);
    assert_relative_eq!( bbox.height(), 10.0);

    let bbox = BoundingBox::<i32>::from_corners( -120, 36, -118, 35);
    assert_eq!( (bbox.west, bbox.south, bbox.east, bbox.north), (-120, 35, -118, 36));
}

#[test]
fn test_min_max_avg () {
    let acc = MinMaxAvg::from_values( [3.0, 1.0, 2.0, 6.0]);
    println!("{:?}", acc);
    assert_eq!( acc.n, 4);
    assert_relative_eq!( acc.min, 1.0);
    assert_relative_eq!( acc.max, 6.0);
    assert_relative_eq!( acc.avg, 3.0);
    assert_relative_eq!( acc.range(), 5.0);

    assert_eq!( MinMaxAvg::default().range(), 0.0);
}

#[test]
fn test_if_let () {
    let p: Option<i64> = Some(1);
    let q: Result<i64,&'static str> = Err("nope");

    let res = if_let! {
        Some(a) = { p } else { -1 },
        Ok(b)   = { q } else |_e| { -2 } => {
            a + b
        }
    };
    assert_eq!( res, -2);
}
