use thiserror::Error;

/// Errors raised by the surfaces around the generator (export, presets, validation).
///
/// The generation engine itself is total and never returns one of these.
#[derive(Debug, Error)]
pub enum BendError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("preset not found: {0}")]
    PresetNotFound(String),
}

pub type Result<T> = std::result::Result<T, BendError>;
