//! Errors raised while setting up the demo.
//!
//! The tank model itself cannot fail; only the harness (config file, font,
//! GPU, window) returns these.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config '{path}': {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("Failed to parse font '{path}': {reason}")]
    Font { path: PathBuf, reason: String },

    #[error("GPU setup error: {0}")]
    Gpu(String),

    #[error("Window creation error: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

pub type Result<T> = std::result::Result<T, Error>;
