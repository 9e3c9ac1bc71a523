//! Error types for geoform

use thiserror::Error;

/// Failure modes of the capability contract.
///
/// `Unsupported` means the backing format cannot perform the operation at
/// all; `NotFound` means the operation ran and matched nothing. Callers must
/// treat the two differently.
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("operation not supported by this geometry format")]
    Unsupported,

    #[error("no matching entry")]
    NotFound,

    #[error(transparent)]
    Render(#[from] crate::render::RenderError),
}

/// Result type for capability-contract operations
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Failure modes of model loading, contained at the dispatcher boundary.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GLTF error: {0}")]
    Gltf(#[from] gltf::Error),

    /// Parsed but unusable content with no structured cause.
    #[error("invalid model: {0}")]
    InvalidModel(String),
}
