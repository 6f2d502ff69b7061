//! # Session State
//!
//! Holds the one [`ReportState`] a session edits.
//!
//! ## Thread Safety
//! The report is wrapped in `Arc<Mutex<T>>` because commands may run
//! concurrently, and only one of them may edit the report at a time.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Frontend Action        Command                 Report Change           │
//! │  ───────────────        ───────                 ─────────────           │
//! │  Type in a field ─────► dispatch(Set*) ───────► field overwritten      │
//! │  Click "Add" ─────────► dispatch(AddItem) ────► ledger.push, draft ∅   │
//! │  Click "✕" ───────────► dispatch(RemoveItem) ─► ledger.remove          │
//! │  Pick a photo ────────► attach_*_image ───────► preview overwritten    │
//! │  Click Save/Share ────► export_* ─────────────► (read only snapshot)   │
//! │                                                                         │
//! │  NOTE: the lock is released before any .await; exports work on a      │
//! │        snapshot taken up front.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use fatura_core::clock::Clock;
use fatura_core::ledger::{IdGenerator, UuidIds};
use fatura_core::{ReportHeader, ReportState};

use crate::config::FaturaConfig;

/// Shared, lockable report state of one session.
#[derive(Debug, Clone)]
pub struct SessionState {
    report: Arc<Mutex<ReportState>>,
}

impl SessionState {
    /// Starts a session dated `clock.today()` with random item ids.
    pub fn new(config: &FaturaConfig, clock: &dyn Clock) -> Self {
        Self::with_ids(config, clock, Box::new(UuidIds))
    }

    pub fn with_ids(config: &FaturaConfig, clock: &dyn Clock, ids: Box<dyn IdGenerator>) -> Self {
        let header = ReportHeader::new(
            config.office_name.clone(),
            config.currency_symbol.clone(),
            clock.today(),
            config.locale,
        );
        SessionState {
            report: Arc::new(Mutex::new(ReportState::new(header, ids))),
        }
    }

    /// Executes a function with read access to the report.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ReportState) -> R,
    {
        // A panic mid-edit leaves a consistent ReportState: every mutation
        // is validated before it is applied.
        let report = self.report.lock().unwrap_or_else(PoisonError::into_inner);
        f(&report)
    }

    /// Executes a function with write access to the report.
    pub fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ReportState) -> R,
    {
        let mut report = self.report.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fatura_core::clock::FixedClock;
    use fatura_core::naming::Locale;
    use fatura_core::ReportAction;

    #[test]
    fn test_session_uses_config_and_clock() {
        let config = FaturaConfig {
            office_name: "Al Noor".into(),
            locale: Locale::English,
            ..Default::default()
        };
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

        let session = SessionState::new(&config, &clock);
        let snapshot = session.with_state(|s| s.snapshot());

        assert_eq!(snapshot.office_name, "Al Noor");
        assert_eq!(snapshot.currency_symbol, "$");
        assert_eq!(snapshot.date_label, "January 5, 2024");
    }

    #[test]
    fn test_clones_share_state() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        let session = SessionState::new(&FaturaConfig::default(), &clock);
        let other = session.clone();

        other
            .with_state_mut(|s| s.apply(ReportAction::SetCustomerName("Sami".into())))
            .unwrap();

        assert_eq!(session.with_state(|s| s.customer_name().to_string()), "Sami");
    }
}
