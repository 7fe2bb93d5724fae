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

/// normalization and clamping of geodetic angles (in degrees)

/// wrap into [-180,180]. Note that both 180 and -180 are kept as is
#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

#[inline]
pub fn clamp_longitude (lon: f64) -> f64 { lon.clamp( -180.0, 180.0) }

#[inline]
pub fn clamp_latitude (lat: f64) -> f64 { lat.clamp( -90.0, 90.0) }

/// move western hemisphere longitudes [-180,0) to [180,360) so that data around the antimeridian
/// becomes continuous
#[inline]
pub fn shift_west_to_east (lon: f64) -> f64 {
    if lon < 0.0 { lon + 360.0 } else { lon }
}

/// inverse of [`shift_west_to_east`]
#[inline]
pub fn unshift_east_to_west (lon: f64) -> f64 {
    if lon >= 180.0 { lon - 360.0 } else { lon }
}
