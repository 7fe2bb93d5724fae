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

//! hull construction: convex hull, concave hull by edge digging, and buffer based outlines

use std::collections::HashSet;
use geo::{Area, Buffer, ConvexHull};
use geo_types::{Coord, LineString, MultiPoint, MultiPolygon, Point, Polygon};
use rstar::{RTree, AABB, primitives::GeomWithData};

use crate::coords::{closed, coord_key, distance, ensure_ccw, in_ccw_triangle, open_part, segments_intersect};

type IndexedPoint = GeomWithData<[f64;2],usize>;

/// closed counter-clockwise convex hull ring
pub fn convex_hull (points: &[Coord<f64>])->Vec<Coord<f64>> {
    let mp: MultiPoint<f64> = points.iter().map( |p| Point::from(*p)).collect();
    let hull = mp.convex_hull();
    ensure_ccw( closed( hull.exterior().0.as_slice()))
}

/// axis aligned square around a single point
pub fn square_around (p: Coord<f64>, half_width: f64)->Vec<Coord<f64>> {
    vec![
        Coord{ x: p.x - half_width, y: p.y - half_width },
        Coord{ x: p.x + half_width, y: p.y - half_width },
        Coord{ x: p.x + half_width, y: p.y + half_width },
        Coord{ x: p.x - half_width, y: p.y + half_width },
        Coord{ x: p.x - half_width, y: p.y - half_width },
    ]
}

/// rectangle that extends the segment a-b by `d` on all sides
pub fn segment_box (a: Coord<f64>, b: Coord<f64>, d: f64)->Vec<Coord<f64>> {
    let len = distance( &a, &b);
    if len == 0.0 { return square_around( a, d) }

    let u = Coord{ x: (b.x - a.x) / len * d, y: (b.y - a.y) / len * d }; // along
    let n = Coord{ x: -u.y, y: u.x }; // left normal

    let ring = vec![
        a - u - n,
        b + u - n,
        b + u + n,
        a - u + n,
        a - u - n,
    ];
    ensure_ccw( ring)
}

fn largest_exterior (mp: &MultiPolygon<f64>)->Option<Vec<Coord<f64>>> {
    mp.0.iter()
        .max_by( |a,b| a.unsigned_area().total_cmp( &b.unsigned_area()))
        .map( |p| ensure_ccw( closed( p.exterior().0.as_slice())))
        .filter( |r| r.len() >= 4)
}

/// outward buffer of a ring. Holes of the result are dropped since they would only reduce coverage
pub fn buffer_ring (ring: &[Coord<f64>], distance: f64)->Option<Vec<Coord<f64>>> {
    let poly = Polygon::new( LineString::from( ring.to_vec()), vec![]);
    largest_exterior( &poly.buffer( distance))
}

/// buffer around a point track
pub fn buffer_track (track: &[Coord<f64>], distance: f64)->Option<Vec<Coord<f64>>> {
    let line = LineString::from( track.to_vec());
    largest_exterior( &line.buffer( distance))
}

/// every n-th point of the track so that at most `max_points` remain. The last point is always kept
pub fn decimate_track (track: &[Coord<f64>], max_points: usize)->Vec<Coord<f64>> {
    if track.len() <= max_points || max_points < 2 { return track.to_vec() }

    let step = track.len().div_ceil( max_points - 1);
    let mut pts: Vec<Coord<f64>> = track.iter().step_by( step).copied().collect();
    if let Some(last) = track.last() {
        if pts.last() != Some(last) { pts.push(*last) }
    }
    pts
}

/// concave hull by edge digging: starting from the convex hull, every edge longer than `max_edge`
/// is split at the closest interior point that projects onto it, as long as the ring stays simple.
/// Since we always dig to the closest candidate no input point ends up outside of the result.
/// `points` have to be distinct
pub fn concave_hull (points: &[Coord<f64>], max_edge: f64)->Option<Vec<Coord<f64>>> {
    let hull = convex_hull( points);
    let mut ring: Vec<Coord<f64>> = open_part( &hull).to_vec();
    if ring.len() < 3 { return None }

    let hull_keys: HashSet<(u64,u64)> = ring.iter().map( coord_key).collect();
    let mut used: Vec<bool> = points.iter().map( |p| hull_keys.contains( &coord_key(p))).collect();

    let tree: RTree<IndexedPoint> = RTree::bulk_load(
        points.iter().enumerate().map( |(i,p)| GeomWithData::new( [p.x, p.y], i)).collect()
    );

    let mut i = 0;
    while i < ring.len() {
        let n = ring.len();
        let a = ring[i];
        let b = ring[(i+1) % n];
        let len = distance( &a, &b);

        if len > max_edge {
            if let Some(k) = dig_candidate( &tree, points, &used, a, b, len) {
                let p = points[k];
                if is_valid_dig( &ring, i, p) {
                    ring.insert( i+1, p);
                    used[k] = true;
                    continue; // re-check the new a-p edge
                }
            }
        }
        i += 1;
    }

    Some( ensure_ccw( closed( &ring)))
}

/// the unused point with the smallest distance to edge a-b that projects onto the edge and is
/// closer to both end points than the edge is long
fn dig_candidate (tree: &RTree<IndexedPoint>, points: &[Coord<f64>], used: &[bool], a: Coord<f64>, b: Coord<f64>, len: f64)->Option<usize> {
    let mid = [(a.x + b.x) / 2.0, (a.y + b.y) / 2.0];
    let env = AABB::from_corners( [mid[0] - len, mid[1] - len], [mid[0] + len, mid[1] + len]);
    let d = b - a;
    let len2 = len * len;

    let mut best: Option<(usize,f64)> = None;
    for item in tree.locate_in_envelope( &env) {
        let k = item.data;
        if used[k] { continue }

        let p = points[k];
        let v = p - a;
        let t = (v.x * d.x + v.y * d.y) / len2;
        if t <= 0.0 || t >= 1.0 { continue }

        let h = (d.x * v.y - d.y * v.x) / len; // > 0 on the inside of a ccw ring
        if h < 0.0 { continue }
        if distance( &a, &p) >= len || distance( &p, &b) >= len { continue }

        if best.is_none_or( |(_,bh)| h < bh) {
            best = Some((k,h));
        }
    }
    best.map( |(k,_)| k)
}

/// replacing edge i (a-b) by a-p-b must not enclose other ring vertices or cross other edges
fn is_valid_dig (ring: &[Coord<f64>], i: usize, p: Coord<f64>)->bool {
    let n = ring.len();
    let a = ring[i];
    let b = ring[(i+1) % n];

    for j in 0..n {
        if j == i { continue }
        let c = ring[j];
        let d = ring[(j+1) % n];

        if c != a && c != b && in_ccw_triangle( a, b, p, c) { return false }

        let ends_at_a = (j+1) % n == i;
        let starts_at_b = j == (i+1) % n;

        if ends_at_a {
            if segments_intersect( p, b, c, d) { return false }
        } else if starts_at_b {
            if segments_intersect( a, p, c, d) { return false }
        } else if segments_intersect( a, p, c, d) || segments_intersect( p, b, c, d) {
            return false
        }
    }
    true
}
