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

//! shared utilities for the metgen crates: angle normalization, generic bounding boxes,
//! simple accumulators, file helpers and the syntactic sugar macros we use throughout

use serde::{Serialize,Deserialize};
use num::Num;

pub mod macros;
pub mod fs;
pub mod angle;

/// a generic bounding box without semantics for the coordinate type
#[repr(C)]
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox <T: Num> {
    pub west: T,
    pub south: T,
    pub east: T,
    pub north: T
}

impl <T: Num + Copy + PartialOrd> BoundingBox<T> {
    pub fn new(west: T, south: T, east: T, north: T)->Self {
        BoundingBox{ west, south, east, north}
    }

    /// the smallest box containing both corner points, regardless of their order
    pub fn from_corners (x0: T, y0: T, x1: T, y1: T) -> BoundingBox<T> {
        let (west,east) = if x0 <= x1 { (x0,x1) } else { (x1,x0) };
        let (south,north) = if y0 <= y1 { (y0,y1) } else { (y1,y0) };
        BoundingBox{ west, south, east, north }
    }

    pub fn width (&self) -> T { self.east - self.west }
    pub fn height (&self) -> T { self.north - self.south }
}

/// a simple incremental min/max/avg accumulator
#[derive(Debug,Clone)]
pub struct MinMaxAvg {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64
}

impl MinMaxAvg {
    pub fn new()->Self { MinMaxAvg { n: 0, min: f64::MAX, max: f64::MIN, avg: f64::NAN } }

    pub fn from_values (it: impl IntoIterator<Item=f64>) -> Self {
        let mut acc = MinMaxAvg::new();
        for x in it { acc.add(x) }
        acc
    }

    /// add a new observation
    pub fn add (&mut self, x: f64) {
        self.n += 1;

        if self.n > 1 {
            self.avg = self.avg + (x - self.avg) / self.n as f64;
            if x < self.min { self.min = x }
            if x > self.max { self.max = x }
        } else {
            self.min = x;
            self.max = x;
            self.avg = x;
        }
    }

    /// max - min, 0 if there were no observations
    pub fn range (&self) -> f64 {
        if self.n > 0 { self.max - self.min } else { 0.0 }
    }
}

impl Default for MinMaxAvg {
    fn default()->Self { MinMaxAvg::new() }
}
