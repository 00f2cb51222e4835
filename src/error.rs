//! Startup and shutdown errors
//!
//! Nothing in the simulation itself fails. Everything here happens before the
//! first frame or while writing the final snapshot, and is fatal to the process.

/// Errors from loading configuration, building assets or saving snapshots.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
    #[error("invalid asset {name}: {reason}")]
    InvalidAsset { name: &'static str, reason: String },
}
