//! Banner and footnote handling for the raw extract sheets.

use serde::{Deserialize, Serialize};

/// How much non-tabular text surrounds the table in an extract file.
///
/// The modelling-platform exports put a three-line banner above the header
/// and, on some sheets, two footnote lines below the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractLayout {
    /// Lines skipped before the header row
    pub skip_rows: usize,
    /// Data rows dropped from the end
    pub skip_footer: usize,
    /// Drop spreadsheet index columns (blank, `Unnamed...` or reader-generated
    /// `column_N` headers)
    pub drop_unnamed: bool,
}

impl Default for ExtractLayout {
    fn default() -> Self {
        Self::plain()
    }
}

impl ExtractLayout {
    pub const BANNER_ROWS: usize = 3;
    pub const FOOTER_ROWS: usize = 2;

    /// Header on the first line, nothing trailing (generator inventories).
    pub fn plain() -> Self {
        Self {
            skip_rows: 0,
            skip_footer: 0,
            drop_unnamed: true,
        }
    }

    /// Banner above the header (renewable profiles).
    pub fn banner() -> Self {
        Self {
            skip_rows: Self::BANNER_ROWS,
            ..Self::plain()
        }
    }

    /// Banner above and footnotes below (load curves, transfer capability).
    pub fn banner_and_footer() -> Self {
        Self {
            skip_rows: Self::BANNER_ROWS,
            skip_footer: Self::FOOTER_ROWS,
            ..Self::plain()
        }
    }

    pub(crate) fn is_index_column(&self, name: &str) -> bool {
        let name = name.trim();
        let generated = name
            .strip_prefix("column_")
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
        self.drop_unnamed && (name.is_empty() || name.starts_with("Unnamed") || generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(ExtractLayout::plain().skip_rows, 0);
        assert_eq!(ExtractLayout::banner().skip_footer, 0);
        let both = ExtractLayout::banner_and_footer();
        assert_eq!((both.skip_rows, both.skip_footer), (3, 2));
        assert_eq!(ExtractLayout::default(), ExtractLayout::plain());
    }

    #[test]
    fn index_columns() {
        let layout = ExtractLayout::plain();
        assert!(layout.is_index_column("Unnamed: 0"));
        assert!(layout.is_index_column(" "));
        assert!(layout.is_index_column("column_1"));
        assert!(!layout.is_index_column("column_total"));
        assert!(!layout.is_index_column("Region"));
        let keep = ExtractLayout {
            drop_unnamed: false,
            ..layout
        };
        assert!(!keep.is_index_column("Unnamed: 0"));
    }
}
