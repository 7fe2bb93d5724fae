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

use thiserror::Error;
use metgen_common::map_to_opaque_error;

pub type Result<T> = std::result::Result<T, MetgenGeometryError>;

/// the error type of the geometry engine. Domain variants carry the granule id (empty when raised
/// by a builder that does not know about granules) and the rule or processing step that failed
#[derive(Error,Debug)]
pub enum MetgenGeometryError {
    #[error("no applicable geometry rule for granule '{granule}' ({step}): {msg}")]
    NoApplicableRule { granule: String, step: String, msg: String },

    #[error("invalid collection geometry override for granule '{granule}' ({step}): {msg}")]
    InvalidOverrideConfiguration { granule: String, step: String, msg: String },

    #[error("insufficient points for granule '{granule}' ({step}): {msg}")]
    InsufficientPoints { granule: String, step: String, msg: String },

    #[error("invalid geometry for granule '{granule}' ({step}): {msg}")]
    InvalidGeometry { granule: String, step: String, msg: String },

    #[error("malformed input for granule '{granule}' ({step}): {msg}")]
    MalformedInput { granule: String, step: String, msg: String },

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config error {0}")]
    ConfigError( String ),

    #[error("RON parse error {0}")]
    RonError( String ),

    #[error("serde error {0}")]
    SerdeError( #[from] serde_json::Error),
}

map_to_opaque_error!( ron::error::SpannedError => MetgenGeometryError::RonError);

impl MetgenGeometryError {
    /// attach the granule id to domain errors that were raised without one
    pub fn with_granule (self, granule_id: &str)->Self {
        use MetgenGeometryError::*;
        match self {
            NoApplicableRule{step,msg,..} => NoApplicableRule{ granule: granule_id.to_string(), step, msg },
            InvalidOverrideConfiguration{step,msg,..} => InvalidOverrideConfiguration{ granule: granule_id.to_string(), step, msg },
            InsufficientPoints{step,msg,..} => InsufficientPoints{ granule: granule_id.to_string(), step, msg },
            InvalidGeometry{step,msg,..} => InvalidGeometry{ granule: granule_id.to_string(), step, msg },
            MalformedInput{step,msg,..} => MalformedInput{ granule: granule_id.to_string(), step, msg },
            other => other
        }
    }

    pub fn granule (&self)->Option<&str> {
        use MetgenGeometryError::*;
        match self {
            NoApplicableRule{granule,..} | InvalidOverrideConfiguration{granule,..} | InsufficientPoints{granule,..} |
            InvalidGeometry{granule,..} | MalformedInput{granule,..} => Some(granule.as_str()),
            _ => None
        }
    }
}

pub fn no_applicable_rule (step: impl ToString, msg: impl ToString)->MetgenGeometryError {
    MetgenGeometryError::NoApplicableRule{ granule: String::new(), step: step.to_string(), msg: msg.to_string() }
}

pub fn invalid_override (step: impl ToString, msg: impl ToString)->MetgenGeometryError {
    MetgenGeometryError::InvalidOverrideConfiguration{ granule: String::new(), step: step.to_string(), msg: msg.to_string() }
}

pub fn insufficient_points (step: impl ToString, msg: impl ToString)->MetgenGeometryError {
    MetgenGeometryError::InsufficientPoints{ granule: String::new(), step: step.to_string(), msg: msg.to_string() }
}

pub fn invalid_geometry (step: impl ToString, msg: impl ToString)->MetgenGeometryError {
    MetgenGeometryError::InvalidGeometry{ granule: String::new(), step: step.to_string(), msg: msg.to_string() }
}

pub fn malformed_input (step: impl ToString, msg: impl ToString)->MetgenGeometryError {
    MetgenGeometryError::MalformedInput{ granule: String::new(), step: step.to_string(), msg: msg.to_string() }
}

pub fn config_error (msg: impl ToString)->MetgenGeometryError {
    MetgenGeometryError::ConfigError(msg.to_string())
}
