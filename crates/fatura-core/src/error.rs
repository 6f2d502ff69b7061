//! # Error Types
//!
//! Domain-specific error types for fatura-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fatura-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Item draft / input validation failures         │
//! │                                                                         │
//! │  fatura-export errors (separate crate)                                 │
//! │  └── ExportError      - Capture, encoding, delivery failures           │
//! │                                                                         │
//! │  fatura-session errors                                                 │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Core Error
// =============================================================================

/// Core report logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A data URL carried a payload that is not valid base64.
    #[error("Data URL payload is not valid base64: {0}")]
    DataUrlDecode(#[from] base64::DecodeError),
}

// =============================================================================
// Item Fields
// =============================================================================

/// The user-editable fields of the "add item" form.
///
/// Used to tell the user exactly which inputs need fixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Name,
    UnitPrice,
    PackingQuantity,
    CartonCount,
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemField::Name => "name",
            ItemField::UnitPrice => "price",
            ItemField::PackingQuantity => "packing",
            ItemField::CartonCount => "cartons",
        };
        f.write_str(label)
    }
}

fn join_fields(fields: &[ItemField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// The form keeps its values so the user can correct them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// The item draft is incomplete.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Add item" with price = 0
    ///      │
    ///      ▼
    /// IncompleteItem { fields: [UnitPrice] }
    ///      │
    ///      ▼
    /// UI shows which fields to fill; the draft is kept as typed
    /// ```
    #[error(
        "Please fill in all item fields correctly (name, price, packing, cartons); invalid: {}. The item image is optional.",
        join_fields(.fields)
    )]
    IncompleteItem { fields: Vec<ItemField> },

    /// Arithmetic on the value would overflow the money range.
    #[error("{field} is too large")]
    Overflow { field: String },

    /// Invalid format (e.g., malformed data URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., an id generator repeating itself).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
