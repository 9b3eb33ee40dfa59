//! Error types for the logo generator

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or writing a logo
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A font file was found but could not be used
    #[error("Font error: {0}")]
    FontError(String),

    /// Failed to rasterize the display list
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to encode the canvas as PNG
    #[error("PNG encoding failed: {0}")]
    EncodeError(String),

    /// Failed to create the output directory or write the file
    #[error("Failed to write output: {0}")]
    OutputError(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}
