//! Polars <-> [`Table`] boundary.
//!
//! Polars is only used to parse and write files; every transformation runs on
//! the in-memory [`Table`]. Parquet support is gated behind the `parquet`
//! feature.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use polars::prelude::*;
#[cfg(feature = "parquet")]
use polars::prelude::{ParquetReader, ParquetWriter};
use tracing::debug;
use zonal_core::{Cell, Column, Table};

use crate::layout::ExtractLayout;

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

/// Read a CSV or Parquet extract, stripping banner, footnotes and index
/// columns per `layout`.
pub fn read_frame(path: &Path, layout: &ExtractLayout) -> Result<DataFrame> {
    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let df = match extension(path).as_str() {
        #[cfg(feature = "parquet")]
        "parquet" => ParquetReader::new(&mut file)
            .finish()
            .context("reading Parquet file")?,
        #[cfg(not(feature = "parquet"))]
        "parquet" => {
            return Err(anyhow!(
                "parquet support is disabled; rebuild with the 'parquet' feature"
            ))
        }
        "csv" => CsvReader::new(&mut file)
            .has_header(true)
            .with_skip_rows(layout.skip_rows)
            .finish()
            .with_context(|| format!("reading CSV file {}", path.display()))?,
        other => {
            return Err(anyhow!(
                "unsupported file extension '{other}'; use .csv or .parquet"
            ))
        }
    };

    let kept: Vec<Series> = df
        .get_columns()
        .iter()
        .filter(|series| !layout.is_index_column(series.name()))
        .cloned()
        .collect();
    let df = DataFrame::new(kept).context("dropping index columns")?;
    let height = df.height().saturating_sub(layout.skip_footer);
    let df = df.slice(0, height);
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read extract"
    );
    Ok(df)
}

/// Write `df` as CSV or Parquet by extension, creating parent directories.
pub fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match extension(path).as_str() {
        #[cfg(feature = "parquet")]
        "parquet" => ParquetWriter::new(&mut file)
            .finish(df)
            .map(|_| ())
            .context("writing Parquet file")?,
        #[cfg(not(feature = "parquet"))]
        "parquet" => {
            return Err(anyhow!(
                "parquet support is disabled; rebuild with the 'parquet' feature"
            ))
        }
        "csv" => CsvWriter::new(&mut file)
            .finish(df)
            .context("writing CSV file")?,
        other => {
            return Err(anyhow!(
                "unsupported output extension '{other}'; use .csv or .parquet"
            ))
        }
    }
    debug!(path = %path.display(), rows = df.height(), "wrote table");
    Ok(())
}

fn series_cells(series: &Series) -> Result<Vec<Cell>> {
    let cells = match series.dtype() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => {
            let cast = series.cast(&DataType::Int64)?;
            let cells = cast.i64()?.into_iter().map(Cell::from).collect();
            cells
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = series.cast(&DataType::Float64)?;
            let cells = cast.f64()?.into_iter().map(Cell::from).collect();
            cells
        }
        DataType::Null => vec![Cell::Empty; series.len()],
        DataType::Utf8 => retype_text(series.utf8()?.into_iter()),
        _ => {
            let cast = series.cast(&DataType::Utf8)?;
            let cells = retype_text(cast.utf8()?.into_iter());
            cells
        }
    };
    Ok(cells)
}

/// A string column whose every non-blank value is numeric becomes numeric.
///
/// Footnote rows force the CSV reader to infer strings for numeric columns;
/// once the footer is cut the column is read back as numbers.
fn retype_text<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<Cell> {
    let cells: Vec<Cell> = values
        .map(|value| match value {
            Some(s) if !s.trim().is_empty() => Cell::text(s),
            _ => Cell::Empty,
        })
        .collect();
    let present = || cells.iter().filter_map(|cell| match cell {
        Cell::Text(s) => Some(s.trim()),
        _ => None,
    });
    if present().next().is_none() {
        return cells;
    }
    if present().all(|s| s.parse::<i64>().is_ok()) {
        return cells
            .iter()
            .map(|cell| cell.as_i64().map_or(Cell::Empty, Cell::Int))
            .collect();
    }
    if present().all(|s| s.parse::<f64>().is_ok()) {
        return cells
            .iter()
            .map(|cell| cell.as_f64().map_or(Cell::Empty, Cell::Float))
            .collect();
    }
    cells
}

pub fn frame_to_table(df: &DataFrame) -> Result<Table> {
    let columns = df
        .get_columns()
        .iter()
        .map(|series| Ok(Column::new(series.name(), series_cells(series)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Table::new(columns)?)
}

enum Kind {
    Int,
    Float,
    Text,
}

fn column_kind(column: &Column) -> Kind {
    let mut kind = Kind::Int;
    for cell in &column.cells {
        match cell {
            Cell::Empty | Cell::Int(_) => {}
            Cell::Float(_) => kind = Kind::Float,
            Cell::Text(_) => return Kind::Text,
        }
    }
    kind
}

fn column_series(column: &Column) -> Series {
    let name = column.name.as_str();
    match column_kind(column) {
        Kind::Int => {
            let values: Vec<Option<i64>> = column.cells.iter().map(Cell::as_i64).collect();
            Series::new(name, values)
        }
        Kind::Float => {
            let values: Vec<Option<f64>> = column.cells.iter().map(Cell::as_f64).collect();
            Series::new(name, values)
        }
        Kind::Text => {
            let values: Vec<Option<String>> = column
                .cells
                .iter()
                .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                .collect();
            Series::new(name, values)
        }
    }
}

pub fn table_to_frame(table: &Table) -> Result<DataFrame> {
    let series: Vec<Series> = table.columns().iter().map(column_series).collect();
    DataFrame::new(series).context("building data frame from table")
}

pub fn read_table(path: &Path, layout: &ExtractLayout) -> Result<Table> {
    let df = read_frame(path, layout)?;
    frame_to_table(&df).with_context(|| format!("converting {}", path.display()))
}

pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let mut df = table_to_frame(table)?;
    write_frame(&mut df, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_round_trip_keeps_kinds() {
        let table = Table::new(vec![
            Column::texts("Region", &["PJM_WMAC", "PJM_Dom"]),
            Column::ints("Hour", &[1, 2]),
            Column::new("MW", vec![Cell::Float(1.5), Cell::Empty]),
        ])
        .unwrap();
        let df = table_to_frame(&table).unwrap();
        assert_eq!(df.column("Hour").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("MW").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Region").unwrap().dtype(), &DataType::Utf8);
        assert_eq!(frame_to_table(&df).unwrap(), table);
    }

    #[test]
    fn mixed_int_and_float_become_float() {
        let column = Column::new("MW", vec![Cell::Int(1), Cell::Float(2.5)]);
        let series = column_series(&column);
        assert_eq!(series.dtype(), &DataType::Float64);
    }

    #[test]
    fn numeric_text_is_retyped() {
        let cells = retype_text(vec![Some("1"), None, Some(" 3 ")].into_iter());
        assert_eq!(cells, vec![Cell::Int(1), Cell::Empty, Cell::Int(3)]);
        let cells = retype_text(vec![Some("1.5"), Some("2")].into_iter());
        assert_eq!(cells, vec![Cell::Float(1.5), Cell::Float(2.0)]);
        let cells = retype_text(vec![Some("1"), Some("n/a")].into_iter());
        assert_eq!(cells, vec![Cell::from("1"), Cell::from("n/a")]);
    }
}
