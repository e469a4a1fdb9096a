//! Domain model for CMVP modules.
//!
//! A [`Module`] is one cataloged entry from the NIST Cryptographic Module
//! Validation Program dataset. Records are immutable once constructed; the
//! full set is replaced atomically when a load completes, never mutated in
//! place.

use std::fmt;

use chrono::NaiveDate;

use crate::tui::list::RowItem;

/// Validation lifecycle of a CMVP module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleStatus {
    /// Currently validated and listed on the active roster.
    #[default]
    Active,
    /// Formerly validated; moved to the historical list.
    Historical,
    /// Under review; no certificate has been issued yet.
    InProcess,
}

impl ModuleStatus {
    /// Human-readable status name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Historical => "Historical",
            Self::InProcess => "In Process",
        }
    }
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One NIST CMVP cryptographic module record.
///
/// Invariant maintained by the API layer: `certificate_number` is empty if
/// and only if `status == ModuleStatus::InProcess`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    /// Certificate number, e.g. "4782". Empty for in-process modules.
    pub certificate_number: String,
    /// Link to the NIST certificate page. Empty for in-process modules.
    pub certificate_url: String,
    pub vendor_name: String,
    pub module_name: String,
    pub module_type: String,
    /// Date the certificate was issued. `None` is the sentinel for
    /// missing or unparseable dates (always `None` for in-process modules).
    pub validation_date: Option<NaiveDate>,
    pub status: ModuleStatus,

    // Extended fields from certificate detail extraction.
    pub standard: String,
    /// FIPS 140 overall security level, 1-4. Zero means unrated/unknown.
    pub overall_level: u8,
    pub sunset_date: String,
    pub caveat: String,
    pub embodiment: String,
    pub description: String,
    pub lab: String,
    /// Short algorithm category tags, e.g. "AES", "SHS".
    pub algorithms: Vec<String>,
    /// Full per-certificate algorithm strings; may lag behind `algorithms`.
    pub algorithms_detailed: Vec<String>,
    pub security_policy_url: String,
}

impl Module {
    /// Validation date formatted for display, e.g. "March 14, 2023".
    #[must_use]
    pub fn validation_date_display(&self) -> Option<String> {
        self.validation_date
            .map(|d| d.format("%B %-d, %Y").to_string())
    }
}

impl RowItem for Module {
    fn title(&self) -> String {
        if self.certificate_number.is_empty() {
            self.module_name.clone()
        } else {
            format!("[{}] {}", self.certificate_number, self.module_name)
        }
    }

    fn subtitle(&self) -> String {
        format!(
            "{} | {} | {}",
            self.vendor_name, self.module_type, self.status
        )
    }

    /// Composite search string for substring filtering.
    ///
    /// Covers every searchable field: certificate number, name, vendor,
    /// type, standard, lab, description, and algorithm names.
    fn filter_key(&self) -> String {
        let mut parts: Vec<&str> = vec![
            &self.certificate_number,
            &self.module_name,
            &self.vendor_name,
            &self.module_type,
            &self.standard,
            &self.lab,
            &self.description,
        ];
        parts.extend(self.algorithms.iter().map(String::as_str));
        parts.join(" ")
    }
}
