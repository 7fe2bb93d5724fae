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

//! utilities for raw coordinate sequences: validation, normalization, ring closing, winding and
//! tolerance based de-duplication. All functions treat x as longitude and y as latitude

use geo::{Area, kernels::{Kernel, Orientation, RobustKernel}};
use geo_types::{Coord, LineString, Polygon};
use itertools::Itertools;

use metgen_common::BoundingBox;
use metgen_common::angle::{normalize_180, clamp_latitude};
use crate::errors::{Result, malformed_input};

/// all coordinates have to be finite numbers
pub fn validate_finite (points: &[Coord<f64>])->Result<()> {
    if let Some((i,p)) = points.iter().find_position( |p| !(p.x.is_finite() && p.y.is_finite())) {
        Err( malformed_input( "validate", format!("non-finite coordinate ({},{}) at index {}", p.x, p.y, i)))
    } else {
        Ok(())
    }
}

/// wrap longitudes into [-180,180] and clamp latitudes to [-90,90]
pub fn normalize (points: &[Coord<f64>])->Vec<Coord<f64>> {
    points.iter().map( |p| Coord{ x: normalize_180(p.x), y: clamp_latitude(p.y) }).collect()
}

/// zip separate longitude and latitude arrays
pub fn from_lon_lat_arrays (lons: &[f64], lats: &[f64])->Result<Vec<Coord<f64>>> {
    if lons.len() != lats.len() {
        return Err( malformed_input( "input", format!("{} longitudes but {} latitudes", lons.len(), lats.len())))
    }
    Ok( lons.iter().zip( lats.iter()).map( |(x,y)| Coord{ x: *x, y: *y }).collect() )
}

pub fn is_closed (points: &[Coord<f64>])->bool {
    points.len() > 1 && points.first() == points.last()
}

/// return a copy that is closed (last == first) if it has at least 2 points
pub fn closed (points: &[Coord<f64>])->Vec<Coord<f64>> {
    let mut ring = points.to_vec();
    if ring.len() > 1 && !is_closed(&ring) {
        ring.push( ring[0]);
    }
    ring
}

/// the open part of a ring, i.e. without the closing coordinate
pub fn open_part (ring: &[Coord<f64>])->&[Coord<f64>] {
    if is_closed(ring) { &ring[..ring.len()-1] } else { ring }
}

/// exact bit pattern of a coordinate, for hashing
#[inline]
pub fn coord_key (p: &Coord<f64>)->(u64,u64) {
    (p.x.to_bits(), p.y.to_bits())
}

/// the smallest lon/lat box containing all points (all zero if there are none)
pub fn bounding_box (points: &[Coord<f64>])->BoundingBox<f64> {
    if points.is_empty() { return BoundingBox::new( 0.0, 0.0, 0.0, 0.0) }

    points.iter().skip(1).fold( BoundingBox::new( points[0].x, points[0].y, points[0].x, points[0].y), |b,p| {
        BoundingBox::new( b.west.min(p.x), b.south.min(p.y), b.east.max(p.x), b.north.max(p.y))
    })
}

/// number of distinct coordinates (exact comparison)
pub fn distinct_count (points: &[Coord<f64>])->usize {
    points.iter().unique_by( |p| coord_key(p)).count()
}

pub fn distinct_points (points: &[Coord<f64>])->Vec<Coord<f64>> {
    points.iter().unique_by( |p| coord_key(p)).copied().collect()
}

/// signed shoelace area of a (closed or open) ring, positive for counter-clockwise winding
pub fn signed_ring_area (ring: &[Coord<f64>])->f64 {
    if ring.len() < 3 { return 0.0 }
    Polygon::new( LineString::from( ring.to_vec()), vec![]).signed_area()
}

pub fn is_ccw (ring: &[Coord<f64>])->bool {
    signed_ring_area(ring) > 0.0
}

/// reverse the ring if it is clockwise. Idempotent
pub fn ensure_ccw (ring: Vec<Coord<f64>>)->Vec<Coord<f64>> {
    if signed_ring_area(&ring) < 0.0 {
        ring.into_iter().rev().collect()
    } else {
        ring
    }
}

#[inline]
pub fn distance (a: &Coord<f64>, b: &Coord<f64>)->f64 {
    (a.x - b.x).hypot( a.y - b.y)
}

/// drop consecutive points of a closed ring that are closer than `tolerance` to the last kept
/// point, including the closing pair. The result is closed again
pub fn collapse_within_tolerance (ring: &[Coord<f64>], tolerance: f64)->Vec<Coord<f64>> {
    let open = open_part(ring);
    let mut kept: Vec<Coord<f64>> = Vec::with_capacity( open.len() + 1);

    for p in open {
        match kept.last() {
            Some(last) if distance( last, p) < tolerance => {}
            _ => kept.push(*p)
        }
    }
    while kept.len() > 1 && distance( &kept[0], &kept[kept.len()-1]) < tolerance {
        kept.pop();
    }

    closed(&kept)
}

/// remove exact consecutive duplicates and spikes (vertices where the ring doubles back on itself)
/// from a closed ring
pub fn remove_spikes (ring: &[Coord<f64>])->Vec<Coord<f64>> {
    let mut pts: Vec<Coord<f64>> = open_part(ring).to_vec();
    pts.dedup();
    while pts.len() > 1 && pts.first() == pts.last() { pts.pop(); }

    let mut changed = true;
    while changed && pts.len() >= 3 {
        changed = false;
        let n = pts.len();
        for i in 0..n {
            let prev = pts[(i + n - 1) % n];
            let cur = pts[i];
            let next = pts[(i + 1) % n];
            if prev == next || is_backtrack( &prev, &cur, &next) {
                pts.remove(i);
                pts.dedup();
                changed = true;
                break;
            }
        }
    }

    closed(&pts)
}

fn is_backtrack (prev: &Coord<f64>, cur: &Coord<f64>, next: &Coord<f64>)->bool {
    if orientation( *prev, *cur, *next) == Orientation::Collinear {
        let d1 = *cur - *prev;
        let d2 = *next - *cur;
        d1.x * d2.x + d1.y * d2.y < 0.0
    } else {
        false
    }
}

/* #region robust predicates  ********************************************************************************/

#[inline]
pub fn orientation (p: Coord<f64>, q: Coord<f64>, r: Coord<f64>)->Orientation {
    RobustKernel::orient2d( p, q, r)
}

#[inline]
fn on_segment_bbox (p: &Coord<f64>, q: &Coord<f64>, r: &Coord<f64>)->bool {
    r.x >= p.x.min(q.x) && r.x <= p.x.max(q.x) && r.y >= p.y.min(q.y) && r.y <= p.y.max(q.y)
}

/// do the closed segments p1-p2 and q1-q2 share at least one point
pub fn segments_intersect (p1: Coord<f64>, p2: Coord<f64>, q1: Coord<f64>, q2: Coord<f64>)->bool {
    if p1.x.max(p2.x) < q1.x.min(q2.x) || q1.x.max(q2.x) < p1.x.min(p2.x) ||
       p1.y.max(p2.y) < q1.y.min(q2.y) || q1.y.max(q2.y) < p1.y.min(p2.y) {
        return false
    }

    let o1 = orientation( p1, p2, q1);
    let o2 = orientation( p1, p2, q2);
    let o3 = orientation( q1, q2, p1);
    let o4 = orientation( q1, q2, p2);

    if o1 != o2 && o3 != o4 && o1 != Orientation::Collinear && o2 != Orientation::Collinear
        && o3 != Orientation::Collinear && o4 != Orientation::Collinear {
        return true
    }

    (o1 == Orientation::Collinear && on_segment_bbox( &p1, &p2, &q1)) ||
    (o2 == Orientation::Collinear && on_segment_bbox( &p1, &p2, &q2)) ||
    (o3 == Orientation::Collinear && on_segment_bbox( &q1, &q2, &p1)) ||
    (o4 == Orientation::Collinear && on_segment_bbox( &q1, &q2, &p2))
}

/// is `r` inside or on the boundary of the counter-clockwise triangle a,b,c
pub fn in_ccw_triangle (a: Coord<f64>, b: Coord<f64>, c: Coord<f64>, r: Coord<f64>)->bool {
    orientation( a, b, r) != Orientation::Clockwise &&
    orientation( b, c, r) != Orientation::Clockwise &&
    orientation( c, a, r) != Orientation::Clockwise
}

/// check that a closed ring has at least 3 distinct vertices, non-zero area and that no two
/// non-adjacent edges touch
pub fn is_simple_ring (ring: &[Coord<f64>])->bool {
    let pts = open_part(ring);
    let n = pts.len();
    if n < 3 || distinct_count(pts) != n || signed_ring_area(pts) == 0.0 {
        return false
    }

    for i in 0..n {
        let a1 = pts[i];
        let a2 = pts[(i+1) % n];

        // adjacent edge folding back onto this one
        if is_backtrack( &a1, &a2, &pts[(i+2) % n]) { return false }

        for j in (i+2)..n {
            if i == 0 && j == n-1 { continue } // shares the first vertex
            let b1 = pts[j];
            let b2 = pts[(j+1) % n];
            if segments_intersect( a1, a2, b1, b2) { return false }
        }
    }
    true
}

/* #endregion robust predicates */
