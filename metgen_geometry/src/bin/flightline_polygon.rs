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

//! tool to generate a covering polygon for a file of 'lon lat' points (e.g. a LIDAR flightline
//! `.spatial` file). Prints the GPolygon JSON and the generation diagnostics

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use metgen_common::{define_cli, check_cli, if_let};
use metgen_geometry::{PolygonAlgorithm, config::{GeometryConfig, load_config}, flightline::generate, sidecar::read_points};

define_cli! { ARGS [about="generate a simplified covering polygon for a flightline point file"] =
    config: Option<String> [help="path of RON geometry config file", short, long],
    simple: bool [help="use the simple (track buffer) algorithm instead of the concave hull", short, long],
    max_vertices: Option<usize> [help="max number of polygon vertices (overrides config)", long],
    pathname: String [help="path of file with 'lon lat' lines"]
}

fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info")))
        .init();
    check_cli!(ARGS);

    let mut config = match &ARGS.config {
        Some(path) => load_config( path)?,
        None => GeometryConfig::default()
    };
    if ARGS.simple { config.spatial_polygon_algorithm = PolygonAlgorithm::Simple }
    if let Some(n) = ARGS.max_vertices { config.spatial_polygon_max_vertices = n }
    config.validate()?;

    let points = read_points( &ARGS.pathname)?;
    let result = generate( &points, &config.polygon_config())?;

    if_let! {
        Some(polygon) = { &result.polygon } else { println!("no polygon for empty point set") } => {
            println!("{}", serde_json::to_string_pretty( polygon)?);
        }
    }
    println!("{}", serde_json::to_string_pretty( &result)?);
    Ok(())
}
