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

//! reader for sidecar point files. Both `.spatial` (raw points) and `.spo` (clockwise polygon
//! boundary) files have one whitespace separated `longitude latitude` pair per line

use std::path::Path;
use geo_types::Coord;

use metgen_common::fs::{extension, filepath_contents_as_string};
use crate::PointSequence;
use crate::errors::{Result, malformed_input};

pub const SPO_SUFFIX: &str = "spo";
pub const SPATIAL_SUFFIX: &str = "spatial";

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum SidecarKind {
    Spo,
    Spatial
}

#[derive(Debug,Clone,PartialEq)]
pub struct Sidecar {
    pub kind: SidecarKind,
    pub points: PointSequence
}

pub fn sidecar_kind <P: AsRef<Path>> (path: &P)->Option<SidecarKind> {
    match extension( path) {
        Some(SPO_SUFFIX) => Some(SidecarKind::Spo),
        Some(SPATIAL_SUFFIX) => Some(SidecarKind::Spatial),
        _ => None
    }
}

/// parse `lon lat` lines. Empty lines and lines starting with '#' are skipped
pub fn parse_points (contents: &str)->Result<PointSequence> {
    let mut points = Vec::new();

    for (i,line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            return Err( malformed_input( "sidecar", format!("line {}: expected 'lon lat', got '{}'", i+1, line)))
        }

        let x = parse_coord( fields[0], i)?;
        let y = parse_coord( fields[1], i)?;
        points.push( Coord{ x, y });
    }

    Ok(points)
}

fn parse_coord (s: &str, i: usize)->Result<f64> {
    let v: f64 = s.parse().map_err( |_| malformed_input( "sidecar", format!("line {}: not a number '{}'", i+1, s)))?;
    if v.is_finite() { Ok(v) } else { Err( malformed_input( "sidecar", format!("line {}: non-finite value '{}'", i+1, s))) }
}

pub fn read_points <P: AsRef<Path>> (path: &P)->Result<PointSequence> {
    let contents = filepath_contents_as_string( path)?;
    parse_points( &contents)
}

/// read a sidecar file, using its extension to determine the kind
pub fn read_sidecar <P: AsRef<Path>> (path: &P)->Result<Sidecar> {
    let kind = sidecar_kind( path).ok_or_else( || malformed_input( "sidecar", format!("not a .{SPO_SUFFIX} or .{SPATIAL_SUFFIX} file: {:?}", path.as_ref())))?;
    let points = read_points( path)?;
    Ok( Sidecar { kind, points } )
}
