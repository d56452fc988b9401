//! Errors raised while loading card configuration.
//!
//! Card, cell and ripple operations are total and never fail; only reading
//! a configuration file can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid color {0:?}, expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("ripple duration must be positive, got {0}s")]
    InvalidRippleDuration(f64),
}
