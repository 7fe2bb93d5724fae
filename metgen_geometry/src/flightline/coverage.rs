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

//! data coverage bookkeeping and coverage driven polygon growth

use geo::{Area, Intersects};
use geo_types::{Coord, LineString, Point, Polygon};
use rstar::{RTree, AABB, primitives::GeomWithData};

use metgen_common::{debug, warn};
use crate::coords::{in_ccw_triangle, open_part, orientation, signed_ring_area};
use super::hull::buffer_ring;

pub const EMERGENCY_COVERAGE: f64 = 0.85;
pub const EMERGENCY_FACTOR: f64 = 3.0;
pub const MAX_ENHANCEMENT_STEPS: usize = 8;
pub const MAX_AREA_FACTOR: f64 = 4.0;
pub const MAX_VERTEX_FACTOR: usize = 3;
pub const VERTEX_SLACK: usize = 50;

type IndexedPoint = GeomWithData<[f64;2],usize>;

fn ring_polygon (ring: &[Coord<f64>])->Polygon<f64> {
    Polygon::new( LineString::from( ring.to_vec()), vec![])
}

/// share of points that are inside or on the boundary of the ring
pub fn coverage (ring: &[Coord<f64>], points: &[Coord<f64>])->f64 {
    if points.is_empty() { return 1.0 }
    let poly = ring_polygon( ring);
    let n_covered = points.iter().filter( |p| poly.intersects( &Point::from(**p))).count();
    n_covered as f64 / points.len() as f64
}

/// keeps track of which data points are covered by the current ring, so that local ring edits
/// only have to look at the points inside of the affected triangle
pub struct CoverageTracker {
    points: Vec<Coord<f64>>,
    tree: RTree<IndexedPoint>,
    covered: Vec<bool>,
    n_covered: usize,
}

impl CoverageTracker {
    pub fn new (points: &[Coord<f64>], ring: &[Coord<f64>])->Self {
        let tree = RTree::bulk_load(
            points.iter().enumerate().map( |(i,p)| GeomWithData::new( [p.x, p.y], i)).collect()
        );
        let poly = ring_polygon( ring);
        let covered: Vec<bool> = points.iter().map( |p| poly.intersects( &Point::from(*p))).collect();
        let n_covered = covered.iter().filter(|c| **c).count();

        CoverageTracker { points: points.to_vec(), tree, covered, n_covered }
    }

    pub fn len (&self)->usize { self.points.len() }
    pub fn n_covered (&self)->usize { self.n_covered }

    pub fn ratio (&self)->f64 {
        if self.points.is_empty() { 1.0 } else { self.n_covered as f64 / self.points.len() as f64 }
    }

    /// recompute all flags for a new ring
    pub fn reset (&mut self, ring: &[Coord<f64>]) {
        let poly = ring_polygon( ring);
        for (i,p) in self.points.iter().enumerate() {
            self.covered[i] = poly.intersects( &Point::from(*p));
        }
        self.n_covered = self.covered.iter().filter(|c| **c).count();
    }

    /// number of currently uncovered points that `ring` would cover. Only valid for rings that
    /// contain the current one (e.g. buffered versions of it)
    pub fn uncovered_inside (&self, ring: &[Coord<f64>])->Vec<usize> {
        let poly = ring_polygon( ring);
        self.covered.iter().enumerate()
            .filter( |(i,c)| !**c && poly.intersects( &Point::from( self.points[*i])))
            .map( |(i,_)| i)
            .collect()
    }

    fn in_triangle_bbox (&self, a: Coord<f64>, b: Coord<f64>, c: Coord<f64>)->impl Iterator<Item=usize> + '_ {
        let env = AABB::from_corners(
            [a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y)],
            [a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y)]
        );
        self.tree.locate_in_envelope( &env).map( |item| item.data).collect::<Vec<usize>>().into_iter()
    }

    /// covered points that would be lost if the convex vertex v of the ccw ring a-v-b is cut off
    pub fn lost_by_cut (&self, a: Coord<f64>, v: Coord<f64>, b: Coord<f64>)->Vec<usize> {
        self.in_triangle_bbox( a, v, b)
            .filter( |i| self.covered[*i])
            .filter( |i| {
                let q = self.points[*i];
                orientation( a, b, q) == geo::kernels::Orientation::Clockwise && in_ccw_triangle( a, v, b, q)
            })
            .collect()
    }

    /// uncovered points that would be gained if the reflex vertex v of the ccw ring a-v-b is removed
    pub fn gained_by_fill (&self, a: Coord<f64>, v: Coord<f64>, b: Coord<f64>)->Vec<usize> {
        self.in_triangle_bbox( a, v, b)
            .filter( |i| !self.covered[*i])
            .filter( |i| in_ccw_triangle( a, b, v, self.points[*i]))
            .collect()
    }

    pub fn cover (&mut self, idxs: &[usize]) {
        for i in idxs {
            if !self.covered[*i] {
                self.covered[*i] = true;
                self.n_covered += 1;
            }
        }
    }

    pub fn uncover (&mut self, idxs: &[usize]) {
        for i in idxs {
            if self.covered[*i] {
                self.covered[*i] = false;
                self.n_covered -= 1;
            }
        }
    }
}

/// outcome of coverage enhancement
pub struct Enhanced {
    pub ring: Vec<Coord<f64>>,
    pub buffer_added: f64,
    pub emergency: bool,
    pub steps: usize,
}

/// grow `ring` by buffering until `target` coverage is reached or growth limits are hit.
///
/// An initial coverage below [`EMERGENCY_COVERAGE`] first gets an emergency buffer of
/// [`EMERGENCY_FACTOR`] times `base`. Each following step is only accepted if it covers additional
/// points, keeps the area below [`MAX_AREA_FACTOR`] times the convex hull area and does not grow
/// the vertex count beyond [`MAX_VERTEX_FACTOR`] times the initial count (plus [`VERTEX_SLACK`])
pub fn enhance (ring: Vec<Coord<f64>>, tracker: &mut CoverageTracker, base: f64, target: f64, hull_area: f64)->Enhanced {
    let initial_vertices = open_part( &ring).len();
    let max_vertices = initial_vertices * MAX_VERTEX_FACTOR + VERTEX_SLACK;
    let max_area = hull_area * MAX_AREA_FACTOR;

    let mut current = ring;
    let mut buffer_added = 0.0;
    let mut emergency = false;
    let mut steps = 0;

    if tracker.ratio() < EMERGENCY_COVERAGE {
        let d = base * EMERGENCY_FACTOR;
        if let Some(r) = buffer_ring( &current, d) {
            warn!("coverage {:.3} below {}, applying emergency buffer of {}", tracker.ratio(), EMERGENCY_COVERAGE, d);
            let gained = tracker.uncovered_inside( &r);
            tracker.cover( &gained);
            current = r;
            buffer_added += d;
            emergency = true;
        }
    }

    let mut multiplier = 1.0;
    while steps < MAX_ENHANCEMENT_STEPS && tracker.ratio() < target {
        steps += 1;
        let d = base * multiplier;

        let Some(candidate) = buffer_ring( &current, d) else { break };

        let area = signed_ring_area( &candidate).abs();
        let n_vertices = open_part( &candidate).len();
        if area > max_area || n_vertices > max_vertices {
            debug!("stop coverage enhancement at step {}: area {:.6} (max {:.6}), vertices {} (max {})", steps, area, max_area, n_vertices, max_vertices);
            break
        }

        let gained = tracker.uncovered_inside( &candidate);
        if gained.is_empty() {
            multiplier += 1.0; // try a larger increment
        } else {
            tracker.cover( &gained);
            current = candidate;
            buffer_added += d;
            multiplier = 1.0;
            debug!("coverage enhancement step {} with buffer {}: coverage {:.4}", steps, d, tracker.ratio());
        }
    }

    Enhanced { ring: current, buffer_added, emergency, steps }
}
