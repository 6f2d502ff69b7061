//! # Domain Types
//!
//! Core domain types used throughout Fatura.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ItemDraft     │   │    LineItem     │   │  MerchantInfo   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │──►│  id (ItemId)    │   │  shop_number    │       │
//! │  │  unit_price     │   │  name           │   │  shop_card_     │       │
//! │  │  packing_qty    │   │  unit_price     │   │   image_preview │       │
//! │  │  carton_count   │   │  packing_qty    │   └─────────────────┘       │
//! │  │  image_preview  │   │  carton_count   │                             │
//! │  └─────────────────┘   │  subtotal       │   ┌─────────────────┐       │
//! │     (form input)       └─────────────────┘   │    DataUrl      │       │
//! │                          (immutable row)     │  data:<mime>;   │       │
//! │                                              │  base64,<bytes> │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Item Id
// =============================================================================

/// Opaque identifier of a line item, unique within a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Data URL
// =============================================================================

/// A base64 data URL (`data:<mime>;base64,<payload>`).
///
/// Image previews travel to the rendering layer in this form, so the
/// rasterizer never needs a cross-origin fetch for them.
///
/// Deserializing goes through [`DataUrl::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(try_from = "String")]
pub struct DataUrl(String);

impl DataUrl {
    /// Encodes raw bytes as a data URL with the given MIME type.
    ///
    /// ## Example
    /// ```rust
    /// use fatura_core::types::DataUrl;
    ///
    /// let url = DataUrl::from_bytes("image/png", b"hi");
    /// assert_eq!(url.as_str(), "data:image/png;base64,aGk=");
    /// ```
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        DataUrl(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }

    /// Accepts a data URL handed over by the UI host.
    ///
    /// ## Rules
    /// - Must start with `data:`
    /// - Must declare `;base64,` encoding
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        let Some(rest) = text.strip_prefix("data:") else {
            return Err(ValidationError::InvalidFormat {
                field: "data url".to_string(),
                reason: "must start with 'data:'".to_string(),
            });
        };
        if !rest.contains(";base64,") {
            return Err(ValidationError::InvalidFormat {
                field: "data url".to_string(),
                reason: "must be base64 encoded".to_string(),
            });
        }
        Ok(DataUrl(text.to_string()))
    }

    /// Returns the declared MIME type.
    pub fn mime(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(mime, _)| mime)
            .unwrap_or_default()
    }

    /// Decodes the payload back into bytes.
    pub fn decode(&self) -> CoreResult<Vec<u8>> {
        let payload = self
            .0
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .unwrap_or_default();
        Ok(STANDARD.decode(payload)?)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DataUrl {
    type Error = ValidationError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        DataUrl::parse(&text)
    }
}

// =============================================================================
// Merchant Info
// =============================================================================

/// The merchant the report is addressed to.
///
/// Mutated in place as the fields change; no lifecycle of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MerchantInfo {
    /// Shop number as typed (free text, may be empty).
    pub shop_number: String,

    /// Photo of the shop's business card.
    pub shop_card_image_preview: Option<DataUrl>,
}

// =============================================================================
// Item Draft
// =============================================================================

/// The "add item" form before submission.
///
/// Numeric fields may hold anything the user typed; validation happens
/// only when the draft is submitted to the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    pub unit_price: Money,
    pub packing_quantity: i64,
    pub carton_count: i64,
    pub image_preview: Option<DataUrl>,
}

// =============================================================================
// Line Item
// =============================================================================

/// One priced row of the invoice.
///
/// ## Invariant
/// `subtotal == unit_price × packing_quantity × carton_count`. Fields are
/// private so a line item can only be built by [`ItemLedger::add_item`]
/// and never edited afterwards. Serialize-only for the same reason.
///
/// [`ItemLedger::add_item`]: crate::ledger::ItemLedger::add_item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    id: ItemId,
    name: String,
    unit_price: Money,
    packing_quantity: i64,
    carton_count: i64,
    image_preview: Option<DataUrl>,
    subtotal: Money,
}

impl LineItem {
    /// Freezes a validated draft into a line item.
    ///
    /// The caller is expected to have validated the draft; this only
    /// guards the multiplication against overflow.
    pub(crate) fn from_draft(id: ItemId, draft: &ItemDraft) -> Result<Self, ValidationError> {
        let subtotal = draft
            .unit_price
            .checked_multiply_quantity(draft.packing_quantity)
            .and_then(|m| m.checked_multiply_quantity(draft.carton_count))
            .ok_or_else(|| ValidationError::Overflow {
                field: "subtotal".to_string(),
            })?;

        Ok(LineItem {
            id,
            name: draft.name.trim().to_string(),
            unit_price: draft.unit_price,
            packing_quantity: draft.packing_quantity,
            carton_count: draft.carton_count,
            image_preview: draft.image_preview.clone(),
            subtotal,
        })
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn packing_quantity(&self) -> i64 {
        self.packing_quantity
    }

    pub fn carton_count(&self) -> i64 {
        self.carton_count
    }

    pub fn image_preview(&self) -> Option<&DataUrl> {
        self.image_preview.as_ref()
    }

    /// unit price × packing × cartons
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(price_cents: i64, packing: i64, cartons: i64) -> ItemDraft {
        ItemDraft {
            name: "  Rice 5kg ".to_string(),
            unit_price: Money::from_cents(price_cents),
            packing_quantity: packing,
            carton_count: cartons,
            image_preview: None,
        }
    }

    #[test]
    fn test_line_item_subtotal() {
        let item = LineItem::from_draft(ItemId::new("1"), &draft(1000, 5, 2)).unwrap();
        assert_eq!(item.subtotal(), Money::from_cents(10000));
        assert_eq!(item.name(), "Rice 5kg");
    }

    #[test]
    fn test_line_item_overflow_is_rejected() {
        let err = LineItem::from_draft(ItemId::new("1"), &draft(i64::MAX / 2, 3, 1)).unwrap_err();
        assert!(matches!(err, ValidationError::Overflow { .. }));
    }

    #[test]
    fn test_data_url_parse_and_decode() {
        let url = DataUrl::parse("data:image/jpeg;base64,AAEC").unwrap();
        assert_eq!(url.mime(), "image/jpeg");
        assert_eq!(url.decode().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_data_url_parse_rejects_non_base64() {
        assert!(DataUrl::parse("https://example.com/a.png").is_err());
        assert!(DataUrl::parse("data:text/plain,hello").is_err());
    }

    #[test]
    fn test_data_url_decode_reports_bad_payload() {
        let url = DataUrl::parse("data:image/png;base64,@@@").unwrap();
        assert!(url.decode().is_err());
    }

    #[test]
    fn test_data_url_deserialize_validates() {
        let url: DataUrl = serde_json::from_str(r#""data:image/png;base64,aGk=""#).unwrap();
        assert_eq!(url.decode().unwrap(), b"hi");
        assert_eq!(serde_json::to_string(&url).unwrap(), r#""data:image/png;base64,aGk=""#);

        assert!(serde_json::from_str::<DataUrl>(r#""notadataurl""#).is_err());
        assert!(serde_json::from_str::<DataUrl>(r#""data:text/plain,hello""#).is_err());

        let info: Result<MerchantInfo, _> = serde_json::from_str(
            r#"{"shopNumber":"12","shopCardImagePreview":"https://example.com/a.png"}"#,
        );
        assert!(info.is_err());
    }

    #[test]
    fn test_merchant_info_serializes_camel_case() {
        let info = MerchantInfo {
            shop_number: "12".to_string(),
            shop_card_image_preview: None,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["shopNumber"], "12");
        assert!(json["shopCardImagePreview"].is_null());
    }
}
