//! # Validation Module
//!
//! Input validation for the report form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Disables export buttons while busy / empty                        │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Item draft rules (name, price, packing, cartons)                  │
//! │  └── Configuration sanity (office name)                                │
//! │                                                                         │
//! │  Header fields (customer name, shop number) are free text: no rules.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ItemField, ValidationError};
use crate::types::ItemDraft;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an item draft before it is added to the ledger.
///
/// ## Rules
/// - Name must not be blank
/// - Unit price, packing quantity and carton count must be strictly positive
/// - The item image is optional
///
/// Every failing field is reported, not just the first one.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  User clicks "Add item"                                                │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_item_draft(&draft) ← THIS FUNCTION                           │
/// │       │                                                                 │
/// │       ├── any field invalid? → IncompleteItem { fields }, draft kept   │
/// │       │                                                                 │
/// │       └── OK → LineItem appended, draft cleared                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Example
/// ```rust
/// use fatura_core::money::Money;
/// use fatura_core::types::ItemDraft;
/// use fatura_core::validation::validate_item_draft;
///
/// let mut draft = ItemDraft {
///     name: "Tea".to_string(),
///     unit_price: Money::from_cents(250),
///     packing_quantity: 12,
///     carton_count: 3,
///     image_preview: None,
/// };
/// assert!(validate_item_draft(&draft).is_ok());
///
/// draft.carton_count = 0;
/// assert!(validate_item_draft(&draft).is_err());
/// ```
pub fn validate_item_draft(draft: &ItemDraft) -> ValidationResult<()> {
    let mut fields = Vec::new();

    if draft.name.trim().is_empty() {
        fields.push(ItemField::Name);
    }
    if !draft.unit_price.is_positive() {
        fields.push(ItemField::UnitPrice);
    }
    if draft.packing_quantity <= 0 {
        fields.push(ItemField::PackingQuantity);
    }
    if draft.carton_count <= 0 {
        fields.push(ItemField::CartonCount);
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::IncompleteItem { fields })
    }
}

/// Validates the office name printed in the report header.
///
/// ## Rules
/// - Must not be blank
pub fn validate_office_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "office name".to_string(),
        });
    }

    Ok(())
}

/// Validates the currency symbol printed next to amounts.
///
/// ## Rules
/// - Must not be blank
pub fn validate_currency_symbol(symbol: &str) -> ValidationResult<()> {
    if symbol.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "currency symbol".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
