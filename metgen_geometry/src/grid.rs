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

//! perimeter extraction for regular geographic science grids.
//!
//! Instead of using every cell of the grid border we keep [`THINNED_AXIS_SIZE`] roughly evenly
//! spaced positions per axis, and move the outermost cell centers outward by half a pixel so that
//! the perimeter describes the grid edges

use geo_types::Coord;

use metgen_common::BoundingBox;
use crate::PointSequence;
use crate::errors::{Result, malformed_input};

pub const THINNED_AXIS_SIZE: usize = 6;
const INDEX_STEP: f64 = 0.2; // 1 / (THINNED_AXIS_SIZE - 1)

/// cell center coordinates of a regular grid. `x` are longitudes, `y` latitudes (usually north to south)
#[derive(Debug,Clone,PartialEq)]
pub struct GridAxes {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// pixel size (x,y) if known, otherwise derived from the axis spacing
    pub resolution: Option<(f64,f64)>
}

impl GridAxes {
    pub fn new (x: Vec<f64>, y: Vec<f64>)->Self { GridAxes { x, y, resolution: None } }

    pub fn with_resolution (mut self, dx: f64, dy: f64)->Self {
        self.resolution = Some((dx,dy));
        self
    }

    fn validate (&self)->Result<()> {
        if self.x.len() < 2 || self.y.len() < 2 {
            return Err( malformed_input( "grid", format!("grid axes need at least 2 values, got {}x{}", self.x.len(), self.y.len())))
        }
        if self.x.iter().chain( self.y.iter()).any( |v| !v.is_finite()) {
            return Err( malformed_input( "grid", "non-finite grid axis value"))
        }
        Ok(())
    }

    /// axes with the outermost values moved outward by half a pixel
    pub fn padded (&self)->Result<(Vec<f64>,Vec<f64>)> {
        self.validate()?;
        let (dx,dy) = self.resolution.unwrap_or( (self.x[1] - self.x[0], self.y[1] - self.y[0]));
        Ok( (pad_axis( &self.x, pixel_padding(dx)), pad_axis( &self.y, pixel_padding(dy))) )
    }

    pub fn bounding_box (&self)->Result<BoundingBox<f64>> {
        let (x,y) = self.padded()?;
        let (x0,x1) = (x[0], x[x.len()-1]);
        let (y0,y1) = (y[0], y[y.len()-1]);
        Ok( BoundingBox::from_corners( x0, y0, x1, y1) )
    }
}

#[inline]
pub fn pixel_padding (resolution: f64)->f64 { resolution.abs() / 2.0 }

fn pad_axis (axis: &[f64], pad: f64)->Vec<f64> {
    let mut v = axis.to_vec();
    let last = v.len() - 1;
    if v[0] <= v[last] {
        v[0] -= pad;
        v[last] += pad;
    } else {
        v[0] += pad;
        v[last] -= pad;
    }
    v
}

/// first, last and approximately evenly spaced indices in between
pub fn index_subset (len: usize)->Vec<usize> {
    if len > THINNED_AXIS_SIZE {
        let last = (len - 1) as f64;
        (0..THINNED_AXIS_SIZE).map( |i| (i as f64 * last * INDEX_STEP).round() as usize).collect()
    } else {
        (0..len).collect()
    }
}

#[inline]
fn round8 (v: f64)->f64 { (v * 1e8).round() / 1e8 }

/// closed perimeter of the (padded) grid: left side top to bottom, bottom side left to right,
/// right side bottom to top and top side right to left
pub fn thinned_perimeter (axes: &GridAxes)->Result<PointSequence> {
    let (x, y) = axes.padded()?;
    let xi = index_subset( x.len());
    let yi = index_subset( y.len());
    let (xn, yn) = (xi.len(), yi.len());
    let (x_first, x_last) = (x[0], x[x.len()-1]);
    let (y_first, y_last) = (y[0], y[y.len()-1]);

    let left = yi[..yn-1].iter().map( |i| (x_first, y[*i]));
    let bottom = xi[..xn-1].iter().map( |i| (x[*i], y_last));
    let right = yi[1..].iter().rev().map( |i| (x_last, y[*i]));
    let top = xi.iter().rev().map( |i| (x[*i], y_first));

    let mut perimeter: PointSequence = left.chain( bottom).chain( right).chain( top)
        .map( |(lon,lat)| Coord{ x: round8(lon), y: round8(lat) })
        .collect();

    if perimeter.first() != perimeter.last() {
        perimeter.push( perimeter[0]);
    }
    Ok(perimeter)
}
