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

//! ring validation, repair and vertex reduction

use geo::kernels::Orientation;
use geo_types::Coord;

use metgen_common::angle::clamp_longitude;
use crate::coords::{closed, collapse_within_tolerance, distinct_count, ensure_ccw, in_ccw_triangle, is_simple_ring,
    open_part, orientation, remove_spikes, segments_intersect};
use super::coverage::CoverageTracker;
use super::hull::buffer_ring;

pub const MAX_ABS_LATITUDE: f64 = 89.9;

/// remove spikes and duplicates, then try a tiny re-buffer to dissolve self intersections.
/// Returns `None` if the ring can't be made simple that way
pub fn repair (ring: &[Coord<f64>], tiny: f64)->Option<Vec<Coord<f64>>> {
    let r = ensure_ccw( remove_spikes( ring));
    if is_simple_ring( &r) { return Some(r) }

    let rb = ensure_ccw( remove_spikes( &buffer_ring( &r, tiny)?));
    if is_simple_ring( &rb) { Some(rb) } else { None }
}

#[inline]
fn triangle_area (a: Coord<f64>, b: Coord<f64>, c: Coord<f64>)->f64 {
    ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
}

/// can vertex i of the open ring be removed without the new edge crossing the ring or enclosing
/// other vertices
fn shortcut_is_valid (pts: &[Coord<f64>], i: usize)->bool {
    let n = pts.len();
    let ia = (i + n - 1) % n;
    let ib = (i + 1) % n;
    let (a, v, b) = (pts[ia], pts[i], pts[ib]);

    let (t0,t1,t2) = if orientation( a, v, b) == Orientation::Clockwise { (a,b,v) } else { (a,v,b) };

    for j in 0..n {
        if j == ia || j == i || j == ib { continue }
        let c = pts[j];
        if c != a && c != b && in_ccw_triangle( t0, t1, t2, c) { return false }

        let jn = (j + 1) % n;
        if jn == ia { continue } // edge ending in a
        let d = pts[jn];
        if segments_intersect( a, b, c, d) { return false }
    }
    true
}

/// greedy smallest-area vertex removal until the ring has at most `max_vertices` vertices.
/// Convex vertices are only removed if the data coverage stays at or above `target` (or no point
/// is lost), reflex vertices can always go since that only grows the polygon. Returns `None` if
/// the vertex cap cannot be reached
pub fn simplify_to_max_vertices (ring: &[Coord<f64>], tracker: &mut CoverageTracker, max_vertices: usize, target: f64)->Option<Vec<Coord<f64>>> {
    let mut pts: Vec<Coord<f64>> = open_part( ring).to_vec();
    let min_covered = target * tracker.len() as f64;

    while pts.len() > max_vertices {
        let n = pts.len();
        if n <= 3 { return None }

        let mut candidates: Vec<(usize,f64)> = (0..n)
            .map( |i| (i, triangle_area( pts[(i+n-1) % n], pts[i], pts[(i+1) % n])))
            .collect();
        candidates.sort_by( |a,b| a.1.total_cmp( &b.1));

        let mut removed = false;
        for (i,_) in candidates {
            if !shortcut_is_valid( &pts, i) { continue }

            let a = pts[(i+n-1) % n];
            let v = pts[i];
            let b = pts[(i+1) % n];

            match orientation( a, v, b) {
                Orientation::CounterClockwise => {
                    let lost = tracker.lost_by_cut( a, v, b);
                    if lost.is_empty() || (tracker.n_covered() - lost.len()) as f64 >= min_covered {
                        tracker.uncover( &lost);
                    } else {
                        continue
                    }
                }
                Orientation::Clockwise => {
                    let gained = tracker.gained_by_fill( a, v, b);
                    tracker.cover( &gained);
                }
                Orientation::Collinear => {}
            }

            pts.remove(i);
            removed = true;
            break;
        }

        if !removed { return None }
    }

    Some( closed( &pts))
}

/// reduce a convex ring to `max_vertices` regardless of coverage
pub fn force_max_vertices (ring: &[Coord<f64>], max_vertices: usize)->Vec<Coord<f64>> {
    let mut pts: Vec<Coord<f64>> = open_part( ring).to_vec();

    while pts.len() > max_vertices.max(3) {
        let n = pts.len();
        let i_min = (0..n)
            .min_by( |&i,&j| {
                let ai = triangle_area( pts[(i+n-1) % n], pts[i], pts[(i+1) % n]);
                let aj = triangle_area( pts[(j+n-1) % n], pts[j], pts[(j+1) % n]);
                ai.total_cmp( &aj)
            })
            .unwrap_or(0);
        pts.remove( i_min);
    }

    closed( &pts)
}

/// clamp latitudes to [-89.9,89.9], and longitudes to [-180,180] if we are not in shifted
/// antimeridian space
pub fn clamp_ring (ring: &[Coord<f64>], shifted: bool)->Vec<Coord<f64>> {
    ring.iter().map( |p| {
        let x = if shifted { p.x } else { clamp_longitude(p.x) };
        Coord{ x, y: p.y.clamp( -MAX_ABS_LATITUDE, MAX_ABS_LATITUDE) }
    }).collect()
}

/// collapse points within `tolerance`. Degenerate results keep the input ring
pub fn collapse_ring (ring: &[Coord<f64>], tolerance: f64)->Vec<Coord<f64>> {
    let collapsed = collapse_within_tolerance( ring, tolerance);
    if distinct_count( open_part( &collapsed)) >= 3 { collapsed } else { ring.to_vec() }
}
