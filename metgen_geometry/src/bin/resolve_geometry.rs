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

//! tool to resolve the UMM-G geometry of a granule from its sidecar files and collection extent.
//! Prints the geometry record as JSON (and polygon generation diagnostics to stderr)

use anyhow::{Result,anyhow};
use tracing_subscriber::EnvFilter;

use metgen_common::{define_cli, check_cli, BoundingBox};
use metgen_geometry::{GranuleSpatialRepresentation, config::{GeometryConfig, load_config}};
use metgen_geometry::extractor::{GranuleGeometryData, resolve_geometry};

define_cli! { ARGS [about="resolve UMM-G geometry of a granule from sidecar files and collection bounding rectangles"] =
    config: Option<String> [help="path of RON geometry config file", short, long],
    gsr: String [help="granule spatial representation (GEODETIC or CARTESIAN)", long, default_value="GEODETIC"],
    rect: Vec<String> [help="collection bounding rectangle as 'west,south,east,north' (can be repeated)", long],
    granule_id: String [help="id of granule"],
    sidecar: Vec<String> [help="paths of .spo or .spatial sidecar files"]
}

fn parse_rect (s: &str)->Result<BoundingBox<f64>> {
    let vs: Vec<f64> = s.split(',').map( |v| v.trim().parse::<f64>()).collect::<std::result::Result<Vec<f64>,_>>()?;
    if vs.len() == 4 {
        Ok( BoundingBox::new( vs[0], vs[1], vs[2], vs[3]))
    } else {
        Err( anyhow!("expected 'west,south,east,north', got '{}'", s))
    }
}

fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info")))
        .init();
    check_cli!(ARGS);

    let config = match &ARGS.config {
        Some(path) => load_config( path)?,
        None => GeometryConfig::default()
    };
    let gsr: GranuleSpatialRepresentation = ARGS.gsr.parse()?;
    let rects = ARGS.rect.iter().map( |s| parse_rect(s)).collect::<Result<Vec<_>>>()?;

    let mut data = GranuleGeometryData::new( &ARGS.granule_id, gsr).with_collection_rectangles( rects);
    for path in &ARGS.sidecar {
        data = data.with_sidecar_file( path)?;
    }

    let extracted = resolve_geometry( &data, &config)?;
    println!("{}", extracted.record.to_json_pretty()?);

    if let Some(generation) = &extracted.generation {
        eprintln!("{}", serde_json::to_string_pretty( generation)?);
    }
    Ok(())
}
