//! Error types for the Galaxy2D lighting engine
//!
//! This module defines the error types used throughout the light-map pipeline,
//! including device failures, resource lifecycle and technique configuration.

use std::fmt;

/// Result type for Galaxy2D lighting operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy2D lighting errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error reported by the graphics device
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (render target, texture, hull geometry, ...)
    InvalidResource(String),

    /// Initialization failed (render targets, content loading)
    InitializationFailed(String),

    /// A shadow or light technique that has no shader implementation
    UnimplementedTechnique(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::UnimplementedTechnique(msg) => write!(f, "Unimplemented technique: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
