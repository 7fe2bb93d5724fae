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

//! geometry resolution: a pure decision function that picks the geometry source and type for a
//! granule from a [`GeometryContext`].
//!
//! Rules are evaluated in order and the first one that applies wins. Granule level sources have a
//! fixed precedence of SPO file > spatial file > science file, collection geometry is either an
//! explicit override (checked first) or the last resort

use metgen_common::{debug, warn};
use crate::{GeometryContext, GeometryDecision, GeometrySource, GeometryType, PolygonBuilder, DecisionErrorKind};
use crate::GranuleSpatialRepresentation::{Cartesian, Geodetic};

pub type GeometryRule = fn(&GeometryContext)->Option<GeometryDecision>;

/// all rules in priority order
pub static RULES: &[GeometryRule] = &[
    rule_collection_override,
    rule_spo,
    rule_spatial_file,
    rule_science_file,
    rule_collection_fallback,
];

pub const NO_APPLICABLE_SOURCE: &str = "no applicable geometry source";

/// evaluate the rules in order, returning the first decision (which might be a failed one)
pub fn resolve (ctx: &GeometryContext)->GeometryDecision {
    if ctx.granule_source_count() > 1 {
        warn!("granule {} has {} geometry sources (spo: {}, spatial: {}, science: {}), using the highest priority one",
              ctx.granule_id, ctx.granule_source_count(), ctx.has_spo, ctx.has_spatial_file, ctx.has_science_geometry);
    }

    let decision = RULES.iter()
        .find_map( |rule| rule(ctx))
        .unwrap_or_else( || GeometryDecision::failed( "no_source", GeometrySource::None, GeometryType::None, DecisionErrorKind::NoApplicableRule, NO_APPLICABLE_SOURCE));

    debug!("granule {} geometry decision: {:?}", ctx.granule_id, decision);
    decision
}

/// an explicit collection override needs a cartesian granule and exactly one collection rectangle
pub fn rule_collection_override (ctx: &GeometryContext)->Option<GeometryDecision> {
    const RULE: &str = "collection_override";
    use GeometrySource::OverrideCollection as SRC;

    if !ctx.collection_geometry_override { return None }

    let decision = match (ctx.spatial_representation, ctx.bounding_rectangle_count) {
        (Cartesian, 1) => GeometryDecision::new( RULE, SRC, GeometryType::BoundingRectangle),
        (Cartesian, 0) => GeometryDecision::failed( RULE, SRC, GeometryType::BoundingRectangle, DecisionErrorKind::InvalidOverrideConfiguration,
                                                    "collection geometry override requires a collection bounding rectangle"),
        (Cartesian, n) => GeometryDecision::failed( RULE, SRC, GeometryType::BoundingRectangle, DecisionErrorKind::InvalidOverrideConfiguration,
                                                    format!("collection geometry override requires exactly one bounding rectangle, found {n}")),
        (Geodetic, _) => GeometryDecision::failed( RULE, SRC, GeometryType::BoundingRectangle, DecisionErrorKind::InvalidOverrideConfiguration,
                                                   "collection geometry override requires CARTESIAN spatial representation"),
    };
    Some(decision)
}

/// `.spo` files hold a clockwise polygon boundary that is used as is (reversed)
pub fn rule_spo (ctx: &GeometryContext)->Option<GeometryDecision> {
    const RULE: &str = "spo_file";
    use GeometrySource::SpoFile as SRC;

    if !ctx.has_spo { return None }

    let decision = match ctx.spatial_representation {
        Cartesian => GeometryDecision::failed( RULE, SRC, GeometryType::Polygon, DecisionErrorKind::NoApplicableRule,
                                               "SPO files cannot be used with CARTESIAN spatial representation"),
        Geodetic if ctx.spo_point_count <= 2 => GeometryDecision::failed( RULE, SRC, GeometryType::Polygon, DecisionErrorKind::InsufficientPoints,
                                                                          format!("SPO files require at least 3 points, found {}", ctx.spo_point_count)),
        Geodetic => GeometryDecision::polygon( RULE, SRC, PolygonBuilder::Direct{ clockwise_source: true }),
    };
    Some(decision)
}

/// `.spatial` files hold one or more raw points
pub fn rule_spatial_file (ctx: &GeometryContext)->Option<GeometryDecision> {
    const RULE: &str = "spatial_file";
    use GeometrySource::SpatialFile as SRC;

    if !ctx.has_spatial_file { return None }

    let n = ctx.spatial_point_count;
    let decision = match ctx.spatial_representation {
        Cartesian => match n {
            2 => GeometryDecision::new( RULE, SRC, GeometryType::BoundingRectangle),
            0 => GeometryDecision::failed( RULE, SRC, GeometryType::BoundingRectangle, DecisionErrorKind::InsufficientPoints,
                                           "spatial file has no points"),
            _ => GeometryDecision::failed( RULE, SRC, GeometryType::BoundingRectangle, DecisionErrorKind::NoApplicableRule,
                                           format!("CARTESIAN spatial files need exactly 2 points, found {n}")),
        }
        Geodetic => match n {
            0 => GeometryDecision::failed( RULE, SRC, GeometryType::Point, DecisionErrorKind::InsufficientPoints,
                                           "spatial file has no points"),
            1 => GeometryDecision::new( RULE, SRC, GeometryType::Point),
            n if ctx.polygon.enabled && n >= 3 => GeometryDecision::polygon( RULE, SRC, PolygonBuilder::Generated),
            _ => GeometryDecision::polygon( RULE, SRC, PolygonBuilder::Direct{ clockwise_source: false }),
        }
    };
    Some(decision)
}

/// geometry derived from the science file: a bbox, a point or an ordered perimeter
pub fn rule_science_file (ctx: &GeometryContext)->Option<GeometryDecision> {
    const RULE: &str = "science_file";
    use GeometrySource::ScienceFile as SRC;

    if !ctx.has_science_geometry { return None }

    let decision = match ctx.spatial_representation {
        Cartesian if ctx.science_is_gridded && ctx.science_has_bbox => GeometryDecision::new( RULE, SRC, GeometryType::BoundingRectangle),
        Cartesian if ctx.science_is_gridded => GeometryDecision::failed( RULE, SRC, GeometryType::BoundingRectangle, DecisionErrorKind::NoApplicableRule,
                                                                         "gridded CARTESIAN science file has no bounding box"),
        Cartesian => GeometryDecision::failed( RULE, SRC, GeometryType::BoundingRectangle, DecisionErrorKind::NoApplicableRule,
                                               "non-gridded science files cannot be used with CARTESIAN spatial representation"),
        Geodetic => match ctx.science_point_count {
            0 => GeometryDecision::failed( RULE, SRC, GeometryType::Point, DecisionErrorKind::InsufficientPoints,
                                           "science file geometry has no points"),
            1 => GeometryDecision::new( RULE, SRC, GeometryType::Point),
            _ => GeometryDecision::polygon( RULE, SRC, PolygonBuilder::Direct{ clockwise_source: false }),
        }
    };
    Some(decision)
}

/// last resort: the (single) collection bounding rectangle for cartesian granules
pub fn rule_collection_fallback (ctx: &GeometryContext)->Option<GeometryDecision> {
    const RULE: &str = "collection_fallback";
    use GeometrySource::CollectionFallback as SRC;

    if ctx.bounding_rectangle_count == 0 { return None }

    let decision = match (ctx.spatial_representation, ctx.bounding_rectangle_count) {
        (Cartesian, 1) => GeometryDecision::new( RULE, SRC, GeometryType::BoundingRectangle),
        (Cartesian, n) => GeometryDecision::failed( RULE, SRC, GeometryType::BoundingRectangle, DecisionErrorKind::NoApplicableRule,
                                                    format!("collection has {n} bounding rectangles, can't pick one")),
        (Geodetic, _) => GeometryDecision::failed( RULE, SRC, GeometryType::BoundingRectangle, DecisionErrorKind::NoApplicableRule,
                                                   "collection geometry can only be used for CARTESIAN granules"),
    };
    Some(decision)
}
