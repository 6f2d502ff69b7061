//! # Item Ledger
//!
//! The ordered list of line items on the invoice.
//!
//! ## Ledger Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Operations                                    │
//! │                                                                         │
//! │  Frontend Action          Ledger Call             State Change          │
//! │  ───────────────          ───────────             ────────────          │
//! │                                                                         │
//! │  Click "Add item" ──────► add_item(&draft) ─────► items.push(item)     │
//! │                                                                         │
//! │  Click "Delete" ────────► remove_item(&id) ─────► items.retain(..)     │
//! │                                                                         │
//! │  Footer total ──────────► grand_total() ────────► (read only, derived) │
//! │                                                                         │
//! │  NOTE: append order is display order. The grand total is never        │
//! │        cached, so it cannot go stale.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifiers
//! Ids come from an injected [`IdGenerator`]: [`UuidIds`] in production,
//! [`SequentialIds`] where deterministic ids are wanted (tests, previews).

use std::fmt;

use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{ItemDraft, ItemId, LineItem};
use crate::validation::{validate_item_draft, ValidationResult};

/// How many fresh ids the ledger draws before giving up on a generator
/// that keeps repeating itself.
const MAX_ID_ATTEMPTS: usize = 8;

// =============================================================================
// Id Generators
// =============================================================================

/// Source of item identifiers.
pub trait IdGenerator: Send + fmt::Debug {
    /// Returns the next identifier.
    fn next_id(&mut self) -> ItemId;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> ItemId {
        ItemId::new(Uuid::new_v4().to_string())
    }
}

/// Monotonic counter identifiers: `item-1`, `item-2`, ...
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ItemId {
        self.next += 1;
        ItemId::new(format!("item-{}", self.next))
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// The invoice's line items.
///
/// ## Invariants
/// - Item ids are unique within the ledger
/// - `grand_total() == Σ subtotal` at all times
/// - Items are never edited in place; only appended or removed
#[derive(Debug)]
pub struct ItemLedger {
    items: Vec<LineItem>,
    ids: Box<dyn IdGenerator>,
}

impl ItemLedger {
    /// Creates an empty ledger drawing ids from `ids`.
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        ItemLedger {
            items: Vec::new(),
            ids,
        }
    }

    /// Validates the draft and appends it as a new line item.
    ///
    /// ## Behavior
    /// - Invalid draft: `IncompleteItem` naming every bad field, no mutation
    /// - Valid draft: subtotal computed, fresh id assigned, item appended
    /// - Grand total would overflow: `Overflow`, no mutation
    ///
    /// Clearing the draft is the caller's job (see `ReportState`).
    pub fn add_item(&mut self, draft: &ItemDraft) -> ValidationResult<ItemId> {
        validate_item_draft(draft)?;

        let id = self.fresh_id()?;
        let item = LineItem::from_draft(id.clone(), draft)?;
        self.grand_total()
            .checked_add(item.subtotal())
            .ok_or_else(|| ValidationError::Overflow {
                field: "grand total".to_string(),
            })?;
        self.items.push(item);

        Ok(id)
    }

    /// Removes the item with the given id.
    ///
    /// An unknown id is not an error: returns `None` and changes nothing.
    pub fn remove_item(&mut self, id: &ItemId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Sum of all subtotals, recomputed on every call.
    pub fn grand_total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: &ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn fresh_id(&mut self) -> ValidationResult<ItemId> {
        let mut last = None;
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if self.get(&id).is_none() {
                return Ok(id);
            }
            last = Some(id);
        }

        Err(ValidationError::Duplicate {
            field: "item id".to_string(),
            value: last.map(|id| id.to_string()).unwrap_or_default(),
        })
    }
}

impl Default for ItemLedger {
    fn default() -> Self {
        ItemLedger::new(Box::new(UuidIds))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ItemField;

    fn draft(name: &str, price_cents: i64, packing: i64, cartons: i64) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            unit_price: Money::from_cents(price_cents),
            packing_quantity: packing,
            carton_count: cartons,
            image_preview: None,
        }
    }

    fn ledger() -> ItemLedger {
        ItemLedger::new(Box::new(SequentialIds::new()))
    }

    #[test]
    fn test_add_remove_scenario() {
        let mut ledger = ledger();

        let a = ledger.add_item(&draft("A", 1000, 5, 2)).unwrap();
        assert_eq!(ledger.get(&a).unwrap().subtotal(), Money::from_cents(10000));
        assert_eq!(ledger.grand_total(), Money::from_cents(10000));

        let b = ledger.add_item(&draft("B", 300, 1, 4)).unwrap();
        assert_eq!(ledger.get(&b).unwrap().subtotal(), Money::from_cents(1200));
        assert_eq!(ledger.grand_total(), Money::from_cents(11200));

        ledger.remove_item(&a);
        assert_eq!(ledger.grand_total(), Money::from_cents(1200));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_append_order_is_display_order() {
        let mut ledger = ledger();
        ledger.add_item(&draft("first", 100, 1, 1)).unwrap();
        ledger.add_item(&draft("second", 100, 1, 1)).unwrap();
        ledger.add_item(&draft("third", 100, 1, 1)).unwrap();

        let names: Vec<_> = ledger.items().iter().map(LineItem::name).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_invalid_draft_leaves_ledger_unchanged() {
        let mut ledger = ledger();
        ledger.add_item(&draft("A", 1000, 5, 2)).unwrap();

        let bad_drafts = [
            draft("", 1000, 5, 2),
            draft("X", 0, 5, 2),
            draft("X", 1000, 0, 2),
            draft("X", 1000, 5, -1),
        ];
        for bad in &bad_drafts {
            let err = ledger.add_item(bad).unwrap_err();
            assert!(matches!(err, ValidationError::IncompleteItem { .. }));
        }

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.grand_total(), Money::from_cents(10000));
    }

    #[test]
    fn test_validation_error_names_the_field() {
        let mut ledger = ledger();
        let err = ledger.add_item(&draft("X", 1000, 5, 0)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::IncompleteItem {
                fields: vec![ItemField::CartonCount]
            }
        );
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut ledger = ledger();
        ledger.add_item(&draft("A", 1000, 5, 2)).unwrap();

        assert!(ledger.remove_item(&ItemId::new("missing")).is_none());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.grand_total(), Money::from_cents(10000));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ledger = ledger();
        let ids: Vec<_> = (0..20)
            .map(|_| ledger.add_item(&draft("A", 100, 1, 1)).unwrap())
            .collect();

        for (i, id) in ids.iter().enumerate() {
            assert!(!ids[i + 1..].contains(id));
        }
    }

    #[test]
    fn test_grand_total_overflow_is_rejected() {
        let mut ledger = ledger();
        let half = i64::MAX / 2 + 1;
        ledger.add_item(&draft("A", half, 1, 1)).unwrap();

        let err = ledger.add_item(&draft("B", half, 1, 1)).unwrap_err();
        assert!(matches!(err, ValidationError::Overflow { .. }));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.grand_total(), Money::from_cents(half));
    }

    #[derive(Debug)]
    struct StuckIds;

    impl IdGenerator for StuckIds {
        fn next_id(&mut self) -> ItemId {
            ItemId::new("same")
        }
    }

    #[test]
    fn test_repeating_generator_is_rejected() {
        let mut ledger = ItemLedger::new(Box::new(StuckIds));
        ledger.add_item(&draft("A", 100, 1, 1)).unwrap();

        let err = ledger.add_item(&draft("B", 100, 1, 1)).unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { .. }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_uuid_ids_parse() {
        let id = UuidIds.next_id();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }
}
