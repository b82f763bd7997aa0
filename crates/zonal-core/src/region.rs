//! Region-of-interest matching.
//!
//! Region ids in the zonal extracts follow an `<ISO>_<zone>` convention
//! (`PJM_WMAC`, `PJM_Dom`, `NY_Z_J`), so the usual way to pick a region of
//! interest is an exact string prefix. [`RegionMatcher`] abstracts over that so
//! callers with overlapping prefixes can pass an explicit [`RegionGroup`]
//! instead.
//!
//! The matcher is always an explicit argument; nothing in the workspace reads a
//! process-wide region setting.

use std::collections::BTreeSet;

use tracing::debug;

use crate::table::Table;

/// Decides whether a region id belongs to the region of interest.
pub trait RegionMatcher {
    fn matches(&self, region: &str) -> bool;

    /// `true` when no filtering was requested. Classification treats every
    /// edge as internal under an unrestricted matcher.
    fn is_unrestricted(&self) -> bool {
        false
    }
}

impl<M: RegionMatcher + ?Sized> RegionMatcher for &M {
    fn matches(&self, region: &str) -> bool {
        (**self).matches(region)
    }

    fn is_unrestricted(&self) -> bool {
        (**self).is_unrestricted()
    }
}

/// Exact, case-sensitive prefix match on the trimmed region id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionPrefix(String);

impl RegionPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into().trim().to_string())
    }

    /// `None` or an empty/whitespace prefix means "all regions".
    pub fn from_option(prefix: Option<&str>) -> Self {
        Self::new(prefix.unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The prefix, or `None` when unrestricted.
    pub fn as_option(&self) -> Option<&str> {
        (!self.0.is_empty()).then_some(self.0.as_str())
    }
}

impl RegionMatcher for RegionPrefix {
    fn matches(&self, region: &str) -> bool {
        let region = region.trim();
        !region.is_empty() && region.starts_with(self.0.as_str())
    }

    fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }
}

/// Explicit membership list for a region of interest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionGroup {
    members: BTreeSet<String>,
}

impl RegionGroup {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            members: members
                .into_iter()
                .map(|m| m.as_ref().trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, region: &str) -> bool {
        self.members.contains(region.trim())
    }
}

impl RegionMatcher for RegionGroup {
    fn matches(&self, region: &str) -> bool {
        self.contains(region)
    }
}

/// Keep the rows of `table` whose `column` value matches.
///
/// Rows with a blank region are dropped. The table comes back unchanged when
/// the matcher is unrestricted or the column is absent; generator and
/// renewable sheets name the column `Region Name`, load curves `Region`, and
/// some sheets carry neither.
pub fn filter_by_region<M: RegionMatcher>(table: &Table, column: &str, matcher: &M) -> Table {
    if matcher.is_unrestricted() {
        return table.clone();
    }
    let Ok(regions) = table.column(column) else {
        debug!(column, "region column absent; skipping region filter");
        return table.clone();
    };
    let filtered = table.filter_rows(|row| {
        regions.cells[row]
            .as_label()
            .is_some_and(|region| matcher.matches(&region))
    });
    debug!(
        column,
        kept = filtered.height(),
        total = table.height(),
        "filtered rows by region"
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Cell, Column};

    #[test]
    fn prefix_is_exact_and_case_sensitive() {
        let pjm = RegionPrefix::new("PJM");
        assert!(pjm.matches("PJM_WMAC"));
        assert!(pjm.matches("  PJM_Dom"));
        assert!(!pjm.matches("pjm_dom"));
        assert!(!pjm.matches("MIS_PJM"));
        assert!(!pjm.matches(""));
        assert!(!pjm.matches("   "));
    }

    #[test]
    fn empty_prefix_is_unrestricted() {
        assert!(RegionPrefix::new("").is_unrestricted());
        assert!(RegionPrefix::from_option(None).is_unrestricted());
        assert!(RegionPrefix::new("  ").is_unrestricted());
        assert_eq!(RegionPrefix::new("PJM").as_option(), Some("PJM"));
    }

    #[test]
    fn group_matches_members_only() {
        let group = RegionGroup::new(["PJM_WMAC", " PJM_Dom ", ""]);
        assert_eq!(group.len(), 2);
        assert!(group.matches("PJM_Dom"));
        assert!(!group.matches("PJM_West"));
        assert!(!group.is_unrestricted());
    }

    #[test]
    fn filter_keeps_matching_rows() {
        let table = Table::new(vec![
            Column::new(
                "Region Name",
                vec![
                    Cell::from("PJM_WMAC"),
                    Cell::Empty,
                    Cell::from("NY_Z_J"),
                    Cell::from("PJM_Dom"),
                ],
            ),
            Column::floats("Capacity", &[1.0, 2.0, 3.0, 4.0]),
        ])
        .unwrap();
        let filtered = filter_by_region(&table, "Region Name", &RegionPrefix::new("PJM"));
        assert_eq!(filtered.height(), 2);
        assert_eq!(
            filtered.column("Capacity").unwrap().cells,
            vec![Cell::Float(1.0), Cell::Float(4.0)]
        );
    }

    #[test]
    fn filter_skips_missing_column_and_unrestricted() {
        let table = Table::new(vec![Column::texts("Plant", &["a", "b"])]).unwrap();
        assert_eq!(
            filter_by_region(&table, "Region Name", &RegionPrefix::new("PJM")),
            table
        );
        let regions = Table::new(vec![Column::texts("Region", &["NY_Z_J"])]).unwrap();
        assert_eq!(
            filter_by_region(&regions, "Region", &RegionPrefix::new("")),
            regions
        );
    }
}
