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

//! UMM-G geometry records and their JSON representation

use serde::{Serialize, Deserialize, Serializer};
use geo_types::Coord;

use metgen_common::BoundingBox;
use crate::GPolygon;
use crate::errors::Result;

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="PascalCase")]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64
}

impl From<Coord<f64>> for LonLat {
    fn from (c: Coord<f64>)->Self { LonLat { longitude: c.x, latitude: c.y } }
}

impl From<&Coord<f64>> for LonLat {
    fn from (c: &Coord<f64>)->Self { LonLat { longitude: c.x, latitude: c.y } }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct BoundingRectangle {
    #[serde(rename="WestBoundingCoordinate")]
    pub west: f64,
    #[serde(rename="EastBoundingCoordinate")]
    pub east: f64,
    #[serde(rename="NorthBoundingCoordinate")]
    pub north: f64,
    #[serde(rename="SouthBoundingCoordinate")]
    pub south: f64,
}

impl From<BoundingBox<f64>> for BoundingRectangle {
    fn from (b: BoundingBox<f64>)->Self {
        BoundingRectangle { west: b.west, east: b.east, north: b.north, south: b.south }
    }
}

impl From<&BoundingRectangle> for BoundingBox<f64> {
    fn from (r: &BoundingRectangle)->Self {
        BoundingBox::new( r.west, r.south, r.east, r.north)
    }
}

#[derive(Serialize)]
struct Boundary {
    #[serde(rename="Points")]
    points: Vec<LonLat>
}

#[derive(Serialize)]
struct GPolygonJson {
    #[serde(rename="Boundary")]
    boundary: Boundary
}

impl Serialize for GPolygon {
    fn serialize<S: Serializer> (&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let json = GPolygonJson { boundary: Boundary { points: self.ring().iter().map( LonLat::from).collect() }};
        json.serialize( serializer)
    }
}

/// the final geometry of a granule
#[derive(Debug,Clone,PartialEq,Serialize)]
pub enum GeometryRecord {
    Point(LonLat),
    BoundingRectangle(BoundingRectangle),
    GPolygon(GPolygon),
}

impl GeometryRecord {
    pub fn type_name (&self)->&'static str {
        match self {
            GeometryRecord::Point(_) => "Point",
            GeometryRecord::BoundingRectangle(_) => "BoundingRectangle",
            GeometryRecord::GPolygon(_) => "GPolygon",
        }
    }

    pub fn to_json (&self)->Result<String> {
        Ok( serde_json::to_string( self)? )
    }

    pub fn to_json_pretty (&self)->Result<String> {
        Ok( serde_json::to_string_pretty( self)? )
    }
}
