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

//! point budget reduction for large clouds. We keep what shapes the outline (convex hull vertices
//! and per grid cell extremes) and fill up with a regular stride

use std::collections::HashSet;
use geo_types::Coord;

use crate::coords::{open_part, bounding_box, coord_key};
use super::hull::convex_hull;

pub const SUBSAMPLE_THRESHOLD: usize = 8000;
pub const GRID_CELLS: usize = 64;

/// reduce `points` to at most `budget` points, preserving input order
pub fn subsample (points: &[Coord<f64>], budget: usize)->Vec<Coord<f64>> {
    let n = points.len();
    if n <= budget { return points.to_vec() }

    let mut keep = vec![false; n];
    let mut count = 0;

    //--- convex hull vertices
    let hull = convex_hull( points);
    let mut hull_keys: HashSet<(u64,u64)> = open_part(&hull).iter().map( coord_key).collect();
    for (i,p) in points.iter().enumerate() {
        if hull_keys.remove( &coord_key(p)) {
            keep[i] = true;
            count += 1;
        }
    }

    //--- per cell extremes (west, east, south, north)
    let bbox = bounding_box( points);
    let w = bbox.width().max( f64::EPSILON);
    let h = bbox.height().max( f64::EPSILON);
    let mut cells: Vec<[Option<usize>;4]> = vec![[None;4]; GRID_CELLS * GRID_CELLS];

    for (i,p) in points.iter().enumerate() {
        let cx = (((p.x - bbox.west) / w * GRID_CELLS as f64) as usize).min( GRID_CELLS-1);
        let cy = (((p.y - bbox.south) / h * GRID_CELLS as f64) as usize).min( GRID_CELLS-1);
        let cell = &mut cells[cy * GRID_CELLS + cx];

        if cell[0].map_or( true, |j| p.x < points[j].x) { cell[0] = Some(i) }
        if cell[1].map_or( true, |j| p.x > points[j].x) { cell[1] = Some(i) }
        if cell[2].map_or( true, |j| p.y < points[j].y) { cell[2] = Some(i) }
        if cell[3].map_or( true, |j| p.y > points[j].y) { cell[3] = Some(i) }
    }

    'cells: for cell in &cells {
        for i in cell.iter().flatten() {
            if count >= budget { break 'cells }
            if !keep[*i] {
                keep[*i] = true;
                count += 1;
            }
        }
    }

    //--- regular stride fill
    if count < budget {
        let stride = (n as f64 / (budget - count) as f64).max(1.0);
        let mut k = 0.0;
        while (k as usize) < n && count < budget {
            let i = k as usize;
            if !keep[i] {
                keep[i] = true;
                count += 1;
            }
            k += stride;
        }
    }

    points.iter().zip( keep).filter_map( |(p,k)| k.then_some(*p)).collect()
}
