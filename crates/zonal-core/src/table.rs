//! Generic in-memory tables.
//!
//! A [`Table`] is an ordered sequence of named [`Column`]s, each holding one
//! scalar [`Cell`] per row. It is the exchange format between the file
//! collaborators in `zonal-io` and the reshape/network engines: nothing in
//! here knows about spreadsheets or CSV.
//!
//! Tables are immutable once built. Every derivation (`select`,
//! `filter_rows`, `rename_column`, ...) returns a new table.

use serde::Serialize;
use std::fmt;

use crate::error::{ZonalError, ZonalResult};

/// One scalar value as read from an extract.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Numeric coercion that never fails: anything that is not a finite
    /// number (blank, `n/a`, `NaN`, text) becomes `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Cell::Empty => return None,
            Cell::Int(v) => *v as f64,
            Cell::Float(v) => *v,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Identifier view of the cell. Text is trimmed and blank text counts as
    /// absent; integral floats render without a fractional part so a year
    /// header read as `2028.0` still reads `2028`.
    pub fn as_label(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Int(v) => Some(v.to_string()),
            Cell::Float(v) if !v.is_finite() => None,
            Cell::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                Some((*v as i64).to_string())
            }
            Cell::Float(v) => Some(v.to_string()),
            Cell::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            Cell::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            Cell::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Empty, Into::into)
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn texts(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(name, values.iter().map(|v| Cell::from(*v)).collect())
    }

    pub fn floats(name: impl Into<String>, values: &[f64]) -> Self {
        Self::new(name, values.iter().map(|v| Cell::Float(*v)).collect())
    }

    pub fn ints(name: impl Into<String>, values: &[i64]) -> Self {
        Self::new(name, values.iter().map(|v| Cell::Int(*v)).collect())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Cell> {
        self.cells.get(row)
    }
}

/// Ordered, named, column-major table.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, checking that every column has the same height.
    pub fn new(columns: Vec<Column>) -> ZonalResult<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(ZonalError::ColumnLength {
                    column: bad.name.clone(),
                    expected,
                    found: bad.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// A zero-row table with the given column names.
    pub fn with_schema<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            columns: names
                .iter()
                .map(|n| Column::new(n.as_ref(), Vec::new()))
                .collect(),
        }
    }

    /// Build a table from row-major data.
    pub fn from_rows<S: AsRef<str>>(names: &[S], rows: Vec<Vec<Cell>>) -> ZonalResult<Self> {
        let mut columns: Vec<Column> = names
            .iter()
            .map(|n| Column::new(n.as_ref(), Vec::with_capacity(rows.len())))
            .collect();
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(ZonalError::ColumnLength {
                    column: format!("row {idx}"),
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.cells.push(cell);
            }
        }
        Ok(Self { columns })
    }

    /// Build a table from fixed-width rows. The width is part of the row type,
    /// so every column ends up with the same height.
    pub fn from_fixed_rows<const N: usize>(
        names: [&str; N],
        rows: impl IntoIterator<Item = [Cell; N]>,
    ) -> Self {
        let mut columns = names.map(|name| Column::new(name, Vec::new()));
        for row in rows {
            for (column, cell) in columns.iter_mut().zip(row) {
                column.cells.push(cell);
            }
        }
        Self {
            columns: columns.into(),
        }
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column(&self, name: &str) -> ZonalResult<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ZonalError::MissingColumn(name.to_string()))
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.columns.get(column).and_then(|c| c.get(row))
    }

    /// Cells of one row in column order.
    pub fn row(&self, row: usize) -> Option<Vec<&Cell>> {
        if row >= self.height() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.cells[row]).collect())
    }

    /// Project onto `names`, in the order given.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> ZonalResult<Table> {
        let columns = names
            .iter()
            .map(|n| self.column(n.as_ref()).cloned())
            .collect::<ZonalResult<Vec<_>>>()?;
        Ok(Table { columns })
    }

    /// Drop the named columns; names that are not present are ignored.
    pub fn drop_columns<S: AsRef<str>>(&self, names: &[S]) -> Table {
        let columns = self
            .columns
            .iter()
            .filter(|c| !names.iter().any(|n| n.as_ref() == c.name))
            .cloned()
            .collect();
        Table { columns }
    }

    pub fn rename_column(&self, old: &str, new: &str) -> ZonalResult<Table> {
        let idx = self
            .column_index(old)
            .ok_or_else(|| ZonalError::MissingColumn(old.to_string()))?;
        let mut columns = self.columns.clone();
        columns[idx].name = new.to_string();
        Ok(Table { columns })
    }

    /// Rows at `indices`, in that order.
    pub fn take_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                Column::new(
                    c.name.clone(),
                    indices
                        .iter()
                        .filter_map(|&i| c.cells.get(i).cloned())
                        .collect(),
                )
            })
            .collect();
        Table { columns }
    }

    /// Rows for which `keep(row_index)` holds, in input order.
    pub fn filter_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(usize) -> bool,
    {
        let indices: Vec<usize> = (0..self.height()).filter(|&i| keep(i)).collect();
        self.take_rows(&indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            Column::texts("Region", &["PJM_WMAC", "NY_Z_J", "PJM_Dom"]),
            Column::ints("Month", &[1, 1, 1]),
            Column::floats("Hour 1", &[10.5, 20.0, 30.25]),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::texts("From", &["A", "B"]),
            Column::texts("To", &["C"]),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ZonalError::ColumnLength { expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn numeric_coercion_never_fails() {
        assert_eq!(Cell::text(" 125.5 ").as_f64(), Some(125.5));
        assert_eq!(Cell::text("n/a").as_f64(), None);
        assert_eq!(Cell::Float(f64::NAN).as_f64(), None);
        assert_eq!(Cell::Empty.as_f64(), None);
        assert_eq!(Cell::Int(7).as_f64(), Some(7.0));
    }

    #[test]
    fn labels_trim_and_drop_blank() {
        assert_eq!(Cell::text("  PJM_Dom ").as_label().as_deref(), Some("PJM_Dom"));
        assert_eq!(Cell::text("   ").as_label(), None);
        assert_eq!(Cell::Float(2028.0).as_label().as_deref(), Some("2028"));
        assert_eq!(Cell::Float(1.5).as_label().as_deref(), Some("1.5"));
    }

    #[test]
    fn from_rows_matches_columns() {
        let table = Table::from_rows(
            &["From", "To"],
            vec![
                vec![Cell::from("A1"), Cell::from("B1")],
                vec![Cell::Empty, Cell::from("C1")],
            ],
        )
        .unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.cell(1, 0), Some(&Cell::Empty));
        assert!(Table::from_rows(&["From"], vec![vec![Cell::Empty, Cell::Empty]]).is_err());
    }

    #[test]
    fn fixed_rows_keep_columns_aligned() {
        let table = Table::from_fixed_rows(
            ["From", "To", "MW"],
            [("A1", "B1", 10.0), ("B1", "C1", 20.0)]
                .into_iter()
                .map(|(from, to, mw)| [Cell::from(from), Cell::from(to), Cell::Float(mw)]),
        );
        assert_eq!(table.column_names(), vec!["From", "To", "MW"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.cell(1, 2), Some(&Cell::Float(20.0)));

        let empty = Table::from_fixed_rows(["From", "To"], std::iter::empty());
        assert_eq!(empty.width(), 2);
        assert!(empty.is_empty());
    }

    #[test]
    fn select_and_missing_column() {
        let table = sample();
        let projected = table.select(&["Hour 1", "Region"]).unwrap();
        assert_eq!(projected.column_names(), vec!["Hour 1", "Region"]);
        assert!(matches!(
            table.select(&["Day"]),
            Err(ZonalError::MissingColumn(name)) if name == "Day"
        ));
    }

    #[test]
    fn filter_rows_preserves_order() {
        let table = sample();
        let region = table.column("Region").unwrap().clone();
        let filtered = table.filter_rows(|i| {
            region.cells[i]
                .as_label()
                .is_some_and(|r| r.starts_with("PJM"))
        });
        assert_eq!(filtered.height(), 2);
        assert_eq!(filtered.cell(1, 0), Some(&Cell::from("PJM_Dom")));
    }

    #[test]
    fn schema_only_table_is_empty() {
        let table = Table::with_schema(&["Region", "Hour", "value"]);
        assert_eq!(table.width(), 3);
        assert!(table.is_empty());
        assert!(table.row(0).is_none());
    }

    #[test]
    fn rename_and_drop() {
        let table = sample().rename_column("Hour 1", "H1").unwrap();
        assert!(table.has_column("H1"));
        let dropped = table.drop_columns(&["Month", "absent"]);
        assert_eq!(dropped.column_names(), vec!["Region", "H1"]);
    }
}
