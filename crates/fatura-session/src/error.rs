//! # API Error Type
//!
//! Unified error type for session commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command Function  ──►  Result<T, ApiError>                             │
//! │                                                                         │
//! │  ValidationError ──────────────────────► VALIDATION_ERROR               │
//! │  ExportError::NothingToExport ─────────► NOTHING_TO_EXPORT              │
//! │  ExportError::Capture ─────────────────► CAPTURE_ERROR                  │
//! │  ReadError ────────────────────────────► READ_ERROR                     │
//! │  ExportError::Delivery ────────────────► DELIVERY_ERROR                 │
//! │  anything else ────────────────────────► INTERNAL                       │
//! │                                                                         │
//! │  try {                                                                  │
//! │    await invoke('export_as_image')                                      │
//! │  } catch (e) {                                                          │
//! │    // e.code = "NOTHING_TO_EXPORT"                                      │
//! │    // e.message = "Enter a customer name or shop number ..."            │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use fatura_core::CoreError;
use fatura_export::{ExportError, ReadError};
use serde::Serialize;
use ts_rs::TS;

use crate::config::ConfigError;

/// API error returned from session commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Please fill in all item fields correctly ..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Form input rejected; the draft is kept for correction
    ValidationError,

    /// Export requested for an empty report
    NothingToExport,

    /// The rasterizer produced no image
    CaptureError,

    /// A picked image file could not be read
    ReadError,

    /// The exported file could not be saved
    DeliveryError,

    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::DataUrlDecode(e) => {
                ApiError::validation(format!("Image data is corrupted: {}", e))
            }
        }
    }
}

/// Converts export errors to API errors.
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        let code = match &err {
            ExportError::NothingToExport => ErrorCode::NothingToExport,
            ExportError::Capture => ErrorCode::CaptureError,
            ExportError::Delivery(_) => ErrorCode::DeliveryError,
            ExportError::Encode(e) => {
                // Log the actual error but return a generic message
                tracing::error!("PNG encoding failed: {}", e);
                return ApiError::new(ErrorCode::CaptureError, ExportError::Capture.to_string());
            }
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ReadError> for ApiError {
    fn from(err: ReadError) -> Self {
        tracing::warn!("Image read failed: {}", err);
        ApiError::new(ErrorCode::ReadError, "The selected image could not be read.")
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(e) => ApiError::validation(e.to_string()),
            other => ApiError::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fatura_core::{ItemField, ValidationError};

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::from(ExportError::NothingToExport);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOTHING_TO_EXPORT");
        assert!(json["message"].as_str().unwrap().contains("customer name"));
    }

    #[test]
    fn test_validation_message_names_fields() {
        let err = ApiError::from(CoreError::Validation(ValidationError::IncompleteItem {
            fields: vec![ItemField::UnitPrice],
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("price"));
    }

    #[test]
    fn test_encode_failure_reads_as_capture_error() {
        let err = ApiError::from(ExportError::Encode("bad".into()));
        assert_eq!(err.code, ErrorCode::CaptureError);
        assert!(!err.message.contains("bad"));
    }

    #[test]
    fn test_read_error_code() {
        let err = ApiError::from(ReadError::Empty("card.png".into()));
        assert_eq!(err.code, ErrorCode::ReadError);
    }
}
