//! Diagnostics collected while reshaping and normalizing extracts.
//!
//! The engines never abort a batch over data-quality gaps. Instead they record
//! what they recovered from here so callers can surface it:
//!
//! - a profile table with no value columns (valid, but usually a wrong sheet)
//! - capacity records dropped for blank endpoints or unusable capacity
//! - forward-filled `From` cells
//!
//! # Example
//!
//! ```
//! use zonal_core::diagnostics::Diagnostics;
//!
//! let mut diag = Diagnostics::new();
//! diag.add_warning("reshape", "no value columns matched prefix 'Hour'");
//! diag.add_warning("capacity", "2 record(s) dropped: blank or non-numeric capacity");
//!
//! assert_eq!(diag.warning_count(), 2);
//! assert_eq!(diag.issues_by_category("capacity").count(), 1);
//! ```

use serde::Serialize;

/// A recovered data-quality gap. Output is still complete for what the input
/// holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticIssue {
    /// Category for grouping (e.g. "reshape", "capacity", "endpoint")
    pub category: String,
    pub message: String,
}

impl DiagnosticIssue {
    pub fn new(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[warning:{}] {}", self.category, self.message)
    }
}

/// Collection of diagnostic issues for one transformation
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, category: &str, message: &str) {
        self.issues.push(DiagnosticIssue::new(category, message));
    }

    pub fn warning_count(&self) -> usize {
        self.issues.len()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn issues_by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a DiagnosticIssue> {
        self.issues.iter().filter(move |i| i.category == category)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_category() {
        let mut diag = Diagnostics::new();
        diag.add_warning("capacity", "a");
        diag.add_warning("endpoint", "b");
        diag.add_warning("capacity", "c");

        assert_eq!(diag.warning_count(), 3);
        assert_eq!(diag.issues_by_category("capacity").count(), 2);
        assert_eq!(diag.issues_by_category("reshape").count(), 0);
    }

    #[test]
    fn display_names_category() {
        let issue = DiagnosticIssue::new("endpoint", "1 blank From cell(s) filled from the row above");
        assert_eq!(
            issue.to_string(),
            "[warning:endpoint] 1 blank From cell(s) filled from the row above"
        );
    }

    #[test]
    fn serializes_issues() {
        let mut diag = Diagnostics::new();
        diag.add_warning("reshape", "no value columns");
        let json = serde_json::to_string(&diag).unwrap();
        assert_eq!(
            json,
            r#"{"issues":[{"category":"reshape","message":"no value columns"}]}"#
        );

        let empty = serde_json::to_string(&Diagnostics::new()).unwrap();
        assert_eq!(empty, "{}");
    }
}
