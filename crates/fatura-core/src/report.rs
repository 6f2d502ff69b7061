//! # Report State
//!
//! Everything the user has typed into the invoice form, plus the ledger.
//!
//! ## Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Report State Updates                                 │
//! │                                                                         │
//! │  Input event ──► ReportAction::SetItemPrice(..) ──► apply() ──► draft  │
//! │                                                                         │
//! │  "Add item"  ──► ReportAction::AddItem ──► apply() ──► ledger + clear  │
//! │                                                                         │
//! │  "Delete"    ──► ReportAction::RemoveItem(id) ──► apply() ──► ledger   │
//! │                                                                         │
//! │  Export      ──► snapshot() ──► ReportSnapshot (immutable copy)        │
//! │                                                                         │
//! │  One reducer, one tagged variant per field: no field-name lookups.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Snapshots?
//! Rasterization is asynchronous. The exported image is always rebuilt
//! from a [`ReportSnapshot`], so edits made while an export is running
//! cannot tear the captured picture.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::ledger::{IdGenerator, ItemLedger};
use crate::money::Money;
use crate::naming::{format_long_date, Locale};
use crate::types::{DataUrl, ItemDraft, ItemId, LineItem, MerchantInfo};

// =============================================================================
// Header
// =============================================================================

/// Constant fields of a session: fixed once the session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub office_name: String,
    pub currency_symbol: String,
    /// Session start date, already formatted for display.
    pub date_label: String,
}

impl ReportHeader {
    /// Builds a header, formatting `started_on` for `locale`.
    pub fn new(
        office_name: impl Into<String>,
        currency_symbol: impl Into<String>,
        started_on: NaiveDate,
        locale: Locale,
    ) -> Self {
        ReportHeader {
            office_name: office_name.into(),
            currency_symbol: currency_symbol.into(),
            date_label: format_long_date(started_on, locale),
        }
    }
}

// =============================================================================
// Actions
// =============================================================================

/// One user edit, dispatched through [`ReportState::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ReportAction {
    SetCustomerName(String),
    SetShopNumber(String),
    SetMerchantCardImage(Option<DataUrl>),
    SetItemName(String),
    SetItemPrice(Money),
    /// Raw text from the price input; unparsable text clears the price.
    SetItemPriceText(String),
    SetItemPacking(i64),
    SetItemCartons(i64),
    SetItemImage(Option<DataUrl>),
    AddItem,
    RemoveItem(ItemId),
}

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable view of the report, composed right before an export.
///
/// This is exactly what the rendering layer draws off-screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    pub office_name: String,
    pub date_label: String,
    pub customer_name: String,
    pub merchant: MerchantInfo,
    pub items: Vec<LineItem>,
    pub grand_total: Money,
    pub currency_symbol: String,
}

impl ReportSnapshot {
    /// False only when customer name and shop number are blank and there
    /// are no items: such a report is not worth exporting.
    pub fn has_content(&self) -> bool {
        has_content(&self.customer_name, &self.merchant, self.items.is_empty())
    }

    /// Label used in the artefact file name.
    ///
    /// ## Precedence
    /// trimmed customer name → trimmed shop number → `default_label`
    pub fn export_label(&self, default_label: &str) -> String {
        [self.customer_name.trim(), self.merchant.shop_number.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or(default_label)
            .to_string()
    }
}

fn has_content(customer_name: &str, merchant: &MerchantInfo, no_items: bool) -> bool {
    !customer_name.trim().is_empty() || !merchant.shop_number.trim().is_empty() || !no_items
}

// =============================================================================
// Report State
// =============================================================================

/// The live, mutable form state of one session.
#[derive(Debug)]
pub struct ReportState {
    header: ReportHeader,
    customer_name: String,
    merchant: MerchantInfo,
    draft: ItemDraft,
    ledger: ItemLedger,
}

impl ReportState {
    /// Starts an empty report.
    pub fn new(header: ReportHeader, ids: Box<dyn IdGenerator>) -> Self {
        ReportState {
            header,
            customer_name: String::new(),
            merchant: MerchantInfo::default(),
            draft: ItemDraft::default(),
            ledger: ItemLedger::new(ids),
        }
    }

    /// Applies one edit.
    ///
    /// ## Errors
    /// Only `AddItem` can fail (draft validation). On failure nothing
    /// changes and the draft is kept for correction.
    pub fn apply(&mut self, action: ReportAction) -> CoreResult<()> {
        match action {
            ReportAction::SetCustomerName(name) => self.customer_name = name,
            ReportAction::SetShopNumber(number) => self.merchant.shop_number = number,
            ReportAction::SetMerchantCardImage(image) => {
                self.merchant.shop_card_image_preview = image
            }
            ReportAction::SetItemName(name) => self.draft.name = name,
            ReportAction::SetItemPrice(price) => self.draft.unit_price = price,
            ReportAction::SetItemPriceText(text) => {
                self.draft.unit_price = Money::parse_decimal(&text).unwrap_or_default()
            }
            ReportAction::SetItemPacking(packing) => self.draft.packing_quantity = packing,
            ReportAction::SetItemCartons(cartons) => self.draft.carton_count = cartons,
            ReportAction::SetItemImage(image) => self.draft.image_preview = image,
            ReportAction::AddItem => {
                self.add_item()?;
            }
            ReportAction::RemoveItem(id) => {
                self.ledger.remove_item(&id);
            }
        }
        Ok(())
    }

    /// Submits the draft to the ledger and clears it on success.
    pub fn add_item(&mut self) -> CoreResult<ItemId> {
        let id = self.ledger.add_item(&self.draft)?;
        self.draft = ItemDraft::default();
        Ok(id)
    }

    /// Composes the immutable export view.
    pub fn snapshot(&self) -> ReportSnapshot {
        ReportSnapshot {
            office_name: self.header.office_name.clone(),
            date_label: self.header.date_label.clone(),
            customer_name: self.customer_name.clone(),
            merchant: self.merchant.clone(),
            items: self.ledger.items().to_vec(),
            grand_total: self.ledger.grand_total(),
            currency_symbol: self.header.currency_symbol.clone(),
        }
    }

    /// See [`ReportSnapshot::has_content`].
    pub fn has_content(&self) -> bool {
        has_content(&self.customer_name, &self.merchant, self.ledger.is_empty())
    }

    pub fn header(&self) -> &ReportHeader {
        &self.header
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn merchant(&self) -> &MerchantInfo {
        &self.merchant
    }

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn ledger(&self) -> &ItemLedger {
        &self.ledger
    }

    pub fn grand_total(&self) -> Money {
        self.ledger.grand_total()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ItemField, ValidationError};
    use crate::ledger::SequentialIds;

    fn state() -> ReportState {
        let header = ReportHeader::new(
            "Al Noor",
            "$",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            Locale::English,
        );
        ReportState::new(header, Box::new(SequentialIds::new()))
    }

    fn fill_draft(state: &mut ReportState, name: &str, price: i64, packing: i64, cartons: i64) {
        state.apply(ReportAction::SetItemName(name.to_string())).unwrap();
        state
            .apply(ReportAction::SetItemPrice(Money::from_cents(price)))
            .unwrap();
        state.apply(ReportAction::SetItemPacking(packing)).unwrap();
        state.apply(ReportAction::SetItemCartons(cartons)).unwrap();
    }

    #[test]
    fn test_add_item_clears_draft() {
        let mut state = state();
        fill_draft(&mut state, "A", 1000, 5, 2);
        state.apply(ReportAction::AddItem).unwrap();

        assert_eq!(state.draft(), &ItemDraft::default());
        assert_eq!(state.grand_total(), Money::from_cents(10000));
    }

    #[test]
    fn test_failed_add_keeps_draft() {
        let mut state = state();
        fill_draft(&mut state, "A", 1000, 5, 0);
        let before = state.draft().clone();

        let err = state.apply(ReportAction::AddItem).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::IncompleteItem { ref fields })
                if fields == &[ItemField::CartonCount]
        ));
        assert_eq!(state.draft(), &before);
        assert!(state.ledger().is_empty());
    }

    #[test]
    fn test_draft_image_moves_into_item() {
        let mut state = state();
        let image = DataUrl::from_bytes("image/png", &[1, 2, 3]);
        fill_draft(&mut state, "A", 100, 1, 1);
        state
            .apply(ReportAction::SetItemImage(Some(image.clone())))
            .unwrap();
        let id = state.add_item().unwrap();

        let item = state.ledger().get(&id).unwrap();
        assert_eq!(item.image_preview(), Some(&image));
        assert!(state.draft().image_preview.is_none());
    }

    #[test]
    fn test_remove_item_through_reducer() {
        let mut state = state();
        fill_draft(&mut state, "A", 1000, 5, 2);
        let a = state.add_item().unwrap();
        fill_draft(&mut state, "B", 300, 1, 4);
        state.add_item().unwrap();

        state.apply(ReportAction::RemoveItem(a)).unwrap();
        assert_eq!(state.grand_total(), Money::from_cents(1200));

        // absent id: no-op
        state
            .apply(ReportAction::RemoveItem(ItemId::new("nope")))
            .unwrap();
        assert_eq!(state.ledger().len(), 1);
    }

    #[test]
    fn test_price_text() {
        let mut state = state();
        state
            .apply(ReportAction::SetItemPriceText("10.50".into()))
            .unwrap();
        assert_eq!(state.draft().unit_price, Money::from_cents(1050));

        fill_draft(&mut state, "A", 100, 5, 2);
        state
            .apply(ReportAction::SetItemPriceText("abc".into()))
            .unwrap();
        assert!(state.draft().unit_price.is_zero());

        let err = state.apply(ReportAction::AddItem).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::IncompleteItem { ref fields })
                if fields == &[ItemField::UnitPrice]
        ));
        assert!(state.ledger().is_empty());
    }

    #[test]
    fn test_merchant_setters_overwrite() {
        let mut state = state();
        let card = DataUrl::from_bytes("image/jpeg", &[9]);

        state.apply(ReportAction::SetShopNumber("12".into())).unwrap();
        state
            .apply(ReportAction::SetMerchantCardImage(Some(card.clone())))
            .unwrap();
        assert_eq!(state.merchant().shop_number, "12");
        assert_eq!(state.merchant().shop_card_image_preview, Some(card));

        state.apply(ReportAction::SetShopNumber(String::new())).unwrap();
        state.apply(ReportAction::SetMerchantCardImage(None)).unwrap();
        assert_eq!(state.merchant(), &MerchantInfo::default());
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let mut state = state();
        state
            .apply(ReportAction::SetCustomerName("Sami".into()))
            .unwrap();
        fill_draft(&mut state, "A", 1000, 5, 2);
        state.add_item().unwrap();

        assert_eq!(state.snapshot(), state.snapshot());
    }

    #[test]
    fn test_snapshot_composes_header_and_totals() {
        let mut state = state();
        fill_draft(&mut state, "A", 1000, 5, 2);
        state.add_item().unwrap();
        fill_draft(&mut state, "B", 300, 1, 4);
        state.add_item().unwrap();

        let snapshot = state.snapshot();
        assert_eq!(snapshot.office_name, "Al Noor");
        assert_eq!(snapshot.currency_symbol, "$");
        assert_eq!(snapshot.date_label, "January 5, 2024");
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(
            snapshot.grand_total,
            snapshot.items.iter().map(LineItem::subtotal).sum::<Money>()
        );
        assert_eq!(snapshot.grand_total, Money::from_cents(11200));
    }

    #[test]
    fn test_snapshot_is_detached_from_later_edits() {
        let mut state = state();
        state
            .apply(ReportAction::SetCustomerName("Sami".into()))
            .unwrap();
        let snapshot = state.snapshot();

        state
            .apply(ReportAction::SetCustomerName("Other".into()))
            .unwrap();
        assert_eq!(snapshot.customer_name, "Sami");
    }

    #[test]
    fn test_has_content() {
        let mut state = state();
        assert!(!state.has_content());
        assert!(!state.snapshot().has_content());

        state
            .apply(ReportAction::SetCustomerName("   ".into()))
            .unwrap();
        assert!(!state.has_content());

        state.apply(ReportAction::SetShopNumber("7".into())).unwrap();
        assert!(state.has_content());
        assert!(state.snapshot().has_content());

        state.apply(ReportAction::SetShopNumber(" ".into())).unwrap();
        fill_draft(&mut state, "A", 100, 1, 1);
        assert!(!state.has_content());
        state.add_item().unwrap();
        assert!(state.has_content());
        assert!(state.snapshot().has_content());
    }

    #[test]
    fn test_export_label_precedence() {
        let mut state = state();
        assert_eq!(state.snapshot().export_label("invoice"), "invoice");

        state.apply(ReportAction::SetShopNumber(" 12 ".into())).unwrap();
        assert_eq!(state.snapshot().export_label("invoice"), "12");

        state
            .apply(ReportAction::SetCustomerName(" Sami ".into()))
            .unwrap();
        assert_eq!(state.snapshot().export_label("invoice"), "Sami");
    }

    #[test]
    fn test_action_wire_format() {
        let action: ReportAction =
            serde_json::from_str(r#"{"type":"setItemPacking","value":12}"#).unwrap();
        assert_eq!(action, ReportAction::SetItemPacking(12));

        let action: ReportAction = serde_json::from_str(r#"{"type":"addItem"}"#).unwrap();
        assert_eq!(action, ReportAction::AddItem);

        let action: ReportAction =
            serde_json::from_str(r#"{"type":"setItemPriceText","value":"10.50"}"#).unwrap();
        assert_eq!(action, ReportAction::SetItemPriceText("10.50".into()));

        let action: ReportAction = serde_json::from_str(
            r#"{"type":"setItemImage","value":"data:image/png;base64,aGk="}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            ReportAction::SetItemImage(Some(DataUrl::from_bytes("image/png", b"hi")))
        );

        let bad: Result<ReportAction, _> =
            serde_json::from_str(r#"{"type":"setItemImage","value":"not a data url"}"#);
        assert!(bad.is_err());
    }
}
