use thiserror::Error;

use crate::core::quadrature::QuadratureError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Geometry is unusable: {reason}")]
    EmptyGeometry { reason: &'static str },

    #[error("Draft {draft} m is below the lowest usable waterline ({min_z} m)")]
    DraftBelowRange { draft: f64, min_z: f64 },

    #[error("Invalid range for {what}: {min} .. {max}")]
    InvalidRange { what: &'static str, min: f64, max: f64 },

    #[error("Parameter {what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("Loading condition has no vertical center of gravity (KG)")]
    MissingKg,

    #[error("Unknown stability method: {name:?}")]
    UnknownMethod { name: String },

    #[error("Vessel not found: {vessel:?}")]
    VesselNotFound { vessel: String },

    #[error("Loadcase not found: {loadcase:?}")]
    LoadcaseNotFound { loadcase: String },

    #[error("Quadrature failed: {source}")]
    Quadrature {
        #[from]
        source: QuadratureError,
    },

    #[error("Calculation cancelled")]
    Cancelled,
}
