//! # Export Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Export Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Pipeline      │  │   Share         │  │     Read                │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NothingToExport│  │  Unsupported    │  │  Io                     │ │
//! │  │  Capture        │  │  Cancelled      │  │  Empty                  │ │
//! │  │  Encode         │  │  Failed         │  │                         │ │
//! │  │  Delivery       │  │  (recovered by  │  │  (propagated to the     │ │
//! │  │                 │  │   saving)       │  │   image picker)         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  None of these end the session; every retry is a user action.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Failures of an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Customer name, shop number and item list are all empty.
    #[error("Enter a customer name or shop number and add some items before exporting.")]
    NothingToExport,

    /// The rasterizer produced no bitmap.
    #[error("Something went wrong while creating the image. Please try again.")]
    Capture,

    /// PNG encoding failed.
    #[error("Failed to encode the report image: {0}")]
    Encode(String),

    /// The file could not be handed to the user.
    #[error("Failed to save the report image: {0}")]
    Delivery(#[from] DeliveryError),
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        ExportError::Encode(err.to_string())
    }
}

/// Why the share sheet did not deliver the file.
///
/// Always recovered by falling back to a download.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// No share capability, or it refuses this particular file.
    #[error("Direct sharing is not supported here. The image was saved so you can share it manually.")]
    Unsupported,

    /// The user dismissed the share sheet.
    #[error("Sharing was cancelled. The image was saved so you can share it manually.")]
    Cancelled,

    /// The platform share call failed.
    #[error("Sharing failed ({0}). The image was saved so you can share it manually.")]
    Failed(String),
}

/// Failures writing a downloaded artefact.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The name is not a single plain file name.
    #[error("Refusing to save under the file name {0:?}")]
    InvalidName(String),

    /// No free file name could be found next to existing downloads.
    #[error("No free file name for {0} in the download directory")]
    NameExhausted(String),
}

/// Failures turning a picked file into a data URL.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is empty")]
    Empty(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_error_messages_mention_fallback() {
        for err in [
            ShareError::Unsupported,
            ShareError::Cancelled,
            ShareError::Failed("boom".into()),
        ] {
            assert!(err.to_string().contains("saved"));
        }
    }

    #[test]
    fn test_delivery_converts_to_export_error() {
        let err: ExportError = DeliveryError::NameExhausted("a.png".into()).into();
        assert!(matches!(err, ExportError::Delivery(_)));
    }
}
