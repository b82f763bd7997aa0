//! Time-index extraction from wide-table column labels.
//!
//! The load-curve and renewable sheets label their value columns `Hour 1` ..
//! `Hour 24`. A label that is selected as a value column but carries no
//! parseable index is a schema problem, so extraction errors instead of
//! skipping the column: a silently skipped hour would leave a hole in every
//! entity's series.

use serde::{Deserialize, Serialize};
use zonal_core::{ZonalError, ZonalResult};

/// Rule that selects value columns and extracts their time index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeLabelRule {
    /// `<prefix><optional whitespace><unsigned integer>`, e.g. `Hour 7`.
    Prefixed(String),
    /// First run of ASCII digits anywhere in the label, e.g. `Hr_07`.
    FirstDigits,
}

impl Default for TimeLabelRule {
    fn default() -> Self {
        TimeLabelRule::hours()
    }
}

impl TimeLabelRule {
    /// The `Hour N` convention of the zonal extracts.
    pub fn hours() -> Self {
        TimeLabelRule::Prefixed("Hour".to_string())
    }

    /// Whether `label` names a value column under this rule.
    pub fn selects(&self, label: &str) -> bool {
        match self {
            TimeLabelRule::Prefixed(prefix) => label.trim_start().starts_with(prefix.as_str()),
            TimeLabelRule::FirstDigits => label.bytes().any(|b| b.is_ascii_digit()),
        }
    }

    /// Extract the integer time index from `label`.
    pub fn extract(&self, label: &str) -> ZonalResult<u32> {
        match self {
            TimeLabelRule::Prefixed(prefix) => {
                let rest = label
                    .trim()
                    .strip_prefix(prefix.as_str())
                    .ok_or_else(|| {
                        ZonalError::malformed_label(label, format!("expected prefix '{prefix}'"))
                    })?
                    .trim_start();
                parse_index(label, rest)
            }
            TimeLabelRule::FirstDigits => {
                let start = label
                    .find(|c: char| c.is_ascii_digit())
                    .ok_or_else(|| ZonalError::malformed_label(label, "no digits in label"))?;
                let digits: String = label[start..]
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect();
                parse_index(label, &digits)
            }
        }
    }
}

fn parse_index(label: &str, digits: &str) -> ZonalResult<u32> {
    let digits = digits.trim_end();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ZonalError::malformed_label(
            label,
            format!("'{digits}' is not an unsigned integer"),
        ));
    }
    digits
        .parse::<u32>()
        .map_err(|err| ZonalError::malformed_label(label, err.to_string()))
}
