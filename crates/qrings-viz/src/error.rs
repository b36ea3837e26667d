//! Error types for coupling-map rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while drawing or writing a coupling-map image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build scene: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("invalid canvas size {width}x{height}")]
    Canvas { width: u32, height: u32 },
}

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::CreateDir {
            path: PathBuf::from("images"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to create output directory images: denied"
        );

        let err = RenderError::Canvas {
            width: 0,
            height: 0,
        };
        assert_eq!(err.to_string(), "invalid canvas size 0x0");
    }
}
