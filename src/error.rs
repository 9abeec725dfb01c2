//! Central error handling for the glyphforge mesher.
//!
//! Provides a unified TextMeshError enum with consistent categorization
//! across font loading, text layout, and cap tessellation.

use thiserror::Error;

/// Centralized error type for all mesher operations.
#[derive(Error, Debug)]
pub enum TextMeshError {
    #[error("Font error: {0}")]
    Font(String),

    #[error("Mesher is not ready: no usable font is loaded")]
    NotReady,

    #[error("No contours generated from the text using the loaded font")]
    NoGeometry,

    #[error("Tessellation error: {0}")]
    Tessellation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TextMeshError {
    /// Convenience constructors for common error types
    pub fn font<T: ToString>(msg: T) -> Self {
        TextMeshError::Font(msg.to_string())
    }

    pub fn tessellation<T: ToString>(msg: T) -> Self {
        TextMeshError::Tessellation(msg.to_string())
    }
}

pub type MesherResult<T> = Result<T, TextMeshError>;
