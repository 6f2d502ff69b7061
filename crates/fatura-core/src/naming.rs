//! # Naming & Captions
//!
//! Everything textual the export produces besides the picture itself:
//! the session date label, the artefact file name, and the share title
//! and caption.
//!
//! ## Share Payload Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  file:    12_2024-01-05.png            ◄── artifact_file_name()         │
//! │  title:   "Invoice Al Noor"            ◄── share_title()                │
//! │  text:    "Invoice from Al Noor."      ◄── share_caption()              │
//! │           + " for customer: Sami"          (only when not blank)        │
//! │           + " shop number: 12"             (only when not blank)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Locale
// =============================================================================

/// Language of the generated report texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Arabic month names, Latin digits.
    #[default]
    Arabic,
    English,
}

impl Locale {
    pub fn labels(&self) -> &'static ReportLabels {
        match self {
            Locale::Arabic => &ARABIC,
            Locale::English => &ENGLISH,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Arabic => write!(f, "arabic"),
            Locale::English => write!(f, "english"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arabic" | "ar" => Ok(Locale::Arabic),
            "english" | "en" => Ok(Locale::English),
            other => Err(format!("unknown locale: {}", other)),
        }
    }
}

// =============================================================================
// Labels
// =============================================================================

/// Fixed wording used in file names and share payloads.
#[derive(Debug)]
pub struct ReportLabels {
    /// The word for the document itself ("invoice").
    pub report_word: &'static str,
    /// File label when neither customer name nor shop number is set.
    pub default_file_label: &'static str,
    /// Opens the caption, followed by the office name.
    pub caption_from: &'static str,
    pub caption_customer: &'static str,
    pub caption_shop: &'static str,
    months: [&'static str; 12],
}

static ARABIC: ReportLabels = ReportLabels {
    report_word: "فاتورة",
    default_file_label: "فاتورة",
    caption_from: "فاتورة من",
    caption_customer: "للزبون:",
    caption_shop: "محل رقم:",
    months: [
        "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو",
        "يوليو", "أغسطس", "سبتمبر", "أكتوبر", "نوفمبر", "ديسمبر",
    ],
};

static ENGLISH: ReportLabels = ReportLabels {
    report_word: "Invoice",
    default_file_label: "invoice",
    caption_from: "Invoice from",
    caption_customer: "for customer:",
    caption_shop: "shop number:",
    months: [
        "January", "February", "March", "April", "May", "June",
        "July", "August", "September", "October", "November", "December",
    ],
};

// =============================================================================
// Formatting
// =============================================================================

/// Formats the long date shown under the report header.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use fatura_core::naming::{format_long_date, Locale};
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// assert_eq!(format_long_date(date, Locale::Arabic), "5 يناير 2024");
/// assert_eq!(format_long_date(date, Locale::English), "January 5, 2024");
/// ```
pub fn format_long_date(date: NaiveDate, locale: Locale) -> String {
    let month = locale.labels().months[date.month0() as usize];
    match locale {
        Locale::Arabic => format!("{} {} {}", date.day(), month, date.year()),
        Locale::English => format!("{} {}, {}", month, date.day(), date.year()),
    }
}

/// `{label}_{YYYY-MM-DD}.png`
///
/// The label is typed by the user, so it is reduced to a single plain
/// file name first (see [`file_safe_label`]).
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use fatura_core::naming::artifact_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// assert_eq!(artifact_file_name("12", date), "12_2024-01-05.png");
/// assert_eq!(artifact_file_name("Ali/Sons", date), "Ali_Sons_2024-01-05.png");
/// ```
pub fn artifact_file_name(label: &str, date: NaiveDate) -> String {
    format!("{}_{}.png", file_safe_label(label), date.format("%Y-%m-%d"))
}

/// Replaces path separators, control characters and characters Windows
/// forbids in file names with `_`, and drops leading dots.
///
/// The result never contains `/`, `\` or a leading `..`, so it always
/// names a file inside the download directory.
pub fn file_safe_label(label: &str) -> String {
    let replaced: String = label
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = replaced.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Title of the share sheet: report word followed by the office name.
pub fn share_title(labels: &ReportLabels, office_name: &str) -> String {
    format!("{} {}", labels.report_word, office_name)
}

/// Caption sent along with the shared image.
///
/// Customer and shop clauses are trimmed and left out when blank.
pub fn share_caption(
    labels: &ReportLabels,
    office_name: &str,
    customer_name: &str,
    shop_number: &str,
) -> String {
    let mut caption = format!("{} {}.", labels.caption_from, office_name);

    let customer_name = customer_name.trim();
    if !customer_name.is_empty() {
        caption.push_str(&format!(" {} {}", labels.caption_customer, customer_name));
    }

    let shop_number = shop_number.trim();
    if !shop_number.is_empty() {
        caption.push_str(&format!(" {} {}", labels.caption_shop, shop_number));
    }

    caption
}

// =============================================================================
// Unit Tests
// =============================================================================
