#![doc = include_str!("../README.md")]

pub mod area;
pub mod modes;
pub mod params;

/// Errors reading or writing legacy parameters.
///
/// # Example
/// ```rust
/// use camshim_legacy::prelude::*;
///
/// let err = LegacyParameters::unflatten("zoom").unwrap_err();
/// assert!(matches!(err, ParameterError::MalformedPair(_)));
/// assert_eq!(err.code(), "malformed_pair");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    #[error("malformed parameter pair {0:?}")]
    MalformedPair(String),
    #[error("empty parameter key")]
    EmptyKey,
    #[error("parameter {key:?} contains a reserved character")]
    ReservedChar { key: String },
    #[error("parameter {key:?} is not an integer: {value:?}")]
    InvalidInt { key: String, value: String },
    #[error("invalid area: {0}")]
    InvalidArea(String),
    #[error("invalid preview fps range {0:?}")]
    InvalidFpsRange(String),
    #[error("unknown {kind} value {value:?}")]
    UnknownValue { kind: &'static str, value: String },
}

impl ParameterError {
    /// Stable string code for error classification.
    pub fn code(&self) -> &'static str {
        match self {
            ParameterError::MalformedPair(_) => "malformed_pair",
            ParameterError::EmptyKey => "empty_key",
            ParameterError::ReservedChar { .. } => "reserved_char",
            ParameterError::InvalidInt { .. } => "invalid_int",
            ParameterError::InvalidArea(_) => "invalid_area",
            ParameterError::InvalidFpsRange(_) => "invalid_fps_range",
            ParameterError::UnknownValue { .. } => "unknown_value",
        }
    }
}

pub mod prelude {
    pub use crate::{
        ParameterError,
        area::{AREA_COORD_MAX, AREA_COORD_MIN, AREA_WEIGHT_MAX, AREA_WEIGHT_MIN, Area},
        modes::{LegacyAntibanding, LegacyFlashMode},
        params::{LegacyParameters, PREVIEW_FPS_MAX_INDEX, PREVIEW_FPS_MIN_INDEX, SupportedList},
    };
}
