//! Directional transfer-capability records.
//!
//! The transmission sheet lists one row per (From, To) direction with one
//! capacity column per snapshot year. Two formatting habits of the raw
//! extract matter here:
//!
//! - `From` is written once per block and left blank on the following rows
//!   (merged cells). It has to be forward-filled in input order before the
//!   rows are looked at individually, or every continuation row is lost.
//! - Capacity cells hold footnote markers, dashes and blanks next to numbers.
//!   Those are coerced to "absent" and the record is dropped, never the batch.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};
use zonal_core::{Cell, Diagnostics, Megawatts, RegionGroup, Table, ZonalResult};

/// A capacity row as read from the extract, before any cleaning.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawCapacityRecord {
    pub from: Cell,
    pub to: Cell,
    pub capacity: Cell,
}

impl RawCapacityRecord {
    pub fn new(from: impl Into<Cell>, to: impl Into<Cell>, capacity: impl Into<Cell>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            capacity: capacity.into(),
        }
    }

    /// Swap the two endpoints, keeping the capacity.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            capacity: self.capacity.clone(),
        }
    }
}

/// A cleaned record with both endpoints and a positive capacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionalRecord {
    pub from: String,
    pub to: String,
    pub capacity: Megawatts,
}

impl DirectionalRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, capacity: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            capacity: Megawatts(capacity),
        }
    }

    /// `From-To`, the line label used in the cleaned transmission table.
    pub fn line_label(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

/// Column names of the From/To/capacity triple in a transmission table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityColumns {
    pub from: String,
    pub to: String,
    pub capacity: String,
}

impl CapacityColumns {
    pub fn new(capacity: impl Into<String>) -> Self {
        Self {
            from: "From".to_string(),
            to: "To".to_string(),
            capacity: capacity.into(),
        }
    }

    /// The raw sheet labels its capacity columns with snapshot years.
    pub fn for_year(year: u16) -> Self {
        Self::new(year.to_string())
    }
}

/// Name of the capacity column in cleaned outputs, e.g. `TTC_Capacity_2028`.
pub fn capacity_column_name(year: u16) -> String {
    format!("TTC_Capacity_{year}")
}

/// Read the From/To/capacity triple of every row, in order.
pub fn raw_records(table: &Table, columns: &CapacityColumns) -> ZonalResult<Vec<RawCapacityRecord>> {
    let from = table.column(&columns.from)?;
    let to = table.column(&columns.to)?;
    let capacity = table.column(&columns.capacity)?;
    Ok((0..table.height())
        .map(|row| RawCapacityRecord {
            from: from.cells[row].clone(),
            to: to.cells[row].clone(),
            capacity: capacity.cells[row].clone(),
        })
        .collect())
}

/// Cleaned records plus what was dropped or filled on the way.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub records: Vec<DirectionalRecord>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DropReason {
    MissingEndpoint,
    UnusableCapacity,
    NonPositiveCapacity,
}

impl DropReason {
    fn describe(self) -> &'static str {
        match self {
            DropReason::MissingEndpoint => "missing From or To region",
            DropReason::UnusableCapacity => "blank or non-numeric capacity",
            DropReason::NonPositiveCapacity => "zero or negative capacity",
        }
    }
}

/// Forward-fill blank `From` cells, coerce capacities and keep the
/// determinate, positive records in input order.
///
/// Rows with both endpoints blank are spacer rows and are skipped before the
/// fill. A blank `From` inherits the last non-blank `From` seen above it,
/// whether or not that earlier row survives cleaning itself.
pub fn normalize_records(raw: &[RawCapacityRecord]) -> Normalized {
    let mut carry: Option<String> = None;
    let mut filled = 0usize;
    let mut dropped: BTreeMap<DropReason, usize> = BTreeMap::new();
    let mut records = Vec::with_capacity(raw.len());

    for record in raw {
        let from = record.from.as_label();
        let to = record.to.as_label();
        if from.is_none() && to.is_none() {
            continue;
        }
        let from = match from {
            Some(from) => {
                carry = Some(from.clone());
                Some(from)
            }
            None => {
                if carry.is_some() {
                    filled += 1;
                }
                carry.clone()
            }
        };
        let (Some(from), Some(to)) = (from, to) else {
            *dropped.entry(DropReason::MissingEndpoint).or_default() += 1;
            continue;
        };
        let Some(capacity) = record.capacity.as_f64() else {
            *dropped.entry(DropReason::UnusableCapacity).or_default() += 1;
            continue;
        };
        let capacity = Megawatts(capacity);
        if !capacity.is_positive() {
            *dropped.entry(DropReason::NonPositiveCapacity).or_default() += 1;
            continue;
        }
        records.push(DirectionalRecord { from, to, capacity });
    }

    let mut diagnostics = Diagnostics::new();
    if filled > 0 {
        debug!(filled, "forward-filled blank From cells");
        diagnostics.add_warning(
            "endpoint",
            &format!("{filled} blank From cell(s) filled from the row above"),
        );
    }
    for (reason, count) in dropped {
        warn!(count, reason = reason.describe(), "dropped capacity records");
        diagnostics.add_warning(
            "capacity",
            &format!("{count} record(s) dropped: {}", reason.describe()),
        );
    }
    debug!(kept = records.len(), total = raw.len(), "normalized capacity records");
    Normalized {
        records,
        diagnostics,
    }
}

/// The cleaned transmission table: `Line, From, To, <capacity_column>`.
pub fn records_table(records: &[DirectionalRecord], capacity_column: &str) -> Table {
    Table::from_fixed_rows(
        ["Line", "From", "To", capacity_column],
        records.iter().map(|r| {
            [
                Cell::Text(r.line_label()),
                Cell::Text(r.from.clone()),
                Cell::Text(r.to.clone()),
                Cell::Float(r.capacity.value()),
            ]
        }),
    )
}

/// Keep records whose two endpoints are both known regions.
pub fn restrict_to_regions(records: &[DirectionalRecord], known: &RegionGroup) -> Vec<DirectionalRecord> {
    let kept: Vec<DirectionalRecord> = records
        .iter()
        .filter(|r| known.contains(&r.from) && known.contains(&r.to))
        .cloned()
        .collect();
    debug!(
        kept = kept.len(),
        total = records.len(),
        "restricted capacity records to known regions"
    );
    kept
}
