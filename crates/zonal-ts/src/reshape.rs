//! Wide-to-long reshaping of per-hour tables.
//!
//! A wide table has one row per entity (region, generator, resource site) and
//! one value column per time slot. The long form has one row per
//! (entity, time slot):
//!
//! ```text
//! Region Name | State | Hour 1 | Hour 2         Region Name | State | Hour | value
//! ------------+-------+--------+-------   ──▶  ------------+-------+------+------
//! PJM_WMAC    | MD    | 0.41   | 0.39          PJM_WMAC    | MD    | 1    | 0.41
//!                                              PJM_WMAC    | MD    | 2    | 0.39
//! ```
//!
//! Output rows are grouped by input row order and, within a row, ordered by
//! ascending time index (value columns that share an index keep their column
//! order). Duplicate entities are reshaped independently.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zonal_core::{Cell, Column, Diagnostics, Table, ZonalError, ZonalResult};

use crate::label::TimeLabelRule;

/// Which columns identify an entity and which carry per-slot values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WideLayout {
    pub id_columns: Vec<String>,
    pub value_columns: Vec<String>,
}

impl WideLayout {
    pub fn new<I, V, S, T>(id_columns: I, value_columns: V) -> Self
    where
        I: IntoIterator<Item = S>,
        V: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            id_columns: id_columns.into_iter().map(Into::into).collect(),
            value_columns: value_columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Value columns are the ones `rule` selects; every other column, in table
    /// order, identifies the entity.
    pub fn infer(table: &Table, rule: &TimeLabelRule) -> Self {
        let (value_columns, id_columns): (Vec<String>, Vec<String>) = table
            .column_names()
            .into_iter()
            .map(str::to_string)
            .partition(|name| rule.selects(name));
        Self {
            id_columns,
            value_columns,
        }
    }
}

/// Naming and label parsing for the long output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReshapeSpec {
    pub rule: TimeLabelRule,
    pub time_column: String,
    pub value_column: String,
}

impl Default for ReshapeSpec {
    fn default() -> Self {
        Self {
            rule: TimeLabelRule::hours(),
            time_column: "Hour".to_string(),
            value_column: "value".to_string(),
        }
    }
}

impl ReshapeSpec {
    pub fn with_value_column(mut self, name: impl Into<String>) -> Self {
        self.value_column = name.into();
        self
    }

    pub fn with_time_column(mut self, name: impl Into<String>) -> Self {
        self.time_column = name.into();
        self
    }

    pub fn with_rule(mut self, rule: TimeLabelRule) -> Self {
        self.rule = rule;
        self
    }
}

/// A reshaped table plus anything recovered along the way.
#[derive(Debug, Clone)]
pub struct Reshaped {
    pub table: Table,
    pub diagnostics: Diagnostics,
}

/// A value column resolved against the input, with its extracted time index.
pub(crate) struct SlotColumn<'a> {
    pub index: u32,
    pub column: &'a Column,
}

/// Resolve and order the value columns. Every label is parsed before any
/// output exists, so a malformed label yields no partial table.
pub(crate) fn resolve_slots<'a, S: AsRef<str>>(
    table: &'a Table,
    names: &[S],
    rule: &TimeLabelRule,
) -> ZonalResult<Vec<SlotColumn<'a>>> {
    let mut slots = names
        .iter()
        .map(|name| {
            let column = table.column(name.as_ref())?;
            let index = rule.extract(&column.name)?;
            Ok(SlotColumn { index, column })
        })
        .collect::<ZonalResult<Vec<_>>>()?;
    slots.sort_by_key(|slot| slot.index);
    Ok(slots)
}

pub(crate) fn check_output_names<S: AsRef<str>>(
    id_columns: &[S],
    generated: &[&str],
) -> ZonalResult<()> {
    for name in generated {
        if id_columns.iter().any(|id| id.as_ref() == *name) {
            return Err(ZonalError::Validation(format!(
                "output column '{name}' collides with an identifying column"
            )));
        }
    }
    Ok(())
}

/// Reshape `table` from one-column-per-slot to one-row-per-slot.
///
/// Produces exactly `rows × value columns` records. An empty input gives an
/// empty table with the output schema; a layout with no value columns does the
/// same and records a `reshape` warning.
pub fn reshape_wide_to_long(
    table: &Table,
    layout: &WideLayout,
    spec: &ReshapeSpec,
) -> ZonalResult<Reshaped> {
    check_output_names(
        &layout.id_columns,
        &[spec.time_column.as_str(), spec.value_column.as_str()],
    )?;
    let ids = layout
        .id_columns
        .iter()
        .map(|name| table.column(name))
        .collect::<ZonalResult<Vec<_>>>()?;
    let slots = resolve_slots(table, &layout.value_columns, &spec.rule)?;

    let mut schema: Vec<&str> = layout.id_columns.iter().map(String::as_str).collect();
    schema.push(&spec.time_column);
    schema.push(&spec.value_column);

    let mut diagnostics = Diagnostics::new();
    if slots.is_empty() {
        let message = format!("no value columns selected for '{}'", spec.value_column);
        warn!("{message}");
        diagnostics.add_warning("reshape", &message);
        return Ok(Reshaped {
            table: Table::with_schema(&schema),
            diagnostics,
        });
    }

    let height = table.height();
    let per_row = slots.len();
    let mut columns: Vec<Column> = ids
        .iter()
        .map(|id| {
            let cells = id
                .cells
                .iter()
                .flat_map(|cell| std::iter::repeat(cell.clone()).take(per_row))
                .collect();
            Column::new(id.name.clone(), cells)
        })
        .collect();

    let time_cells = (0..height)
        .flat_map(|_| slots.iter().map(|slot| Cell::Int(i64::from(slot.index))))
        .collect();
    let value_cells = (0..height)
        .flat_map(|row| slots.iter().map(move |slot| slot.column.cells[row].clone()))
        .collect();
    columns.push(Column::new(spec.time_column.clone(), time_cells));
    columns.push(Column::new(spec.value_column.clone(), value_cells));

    let table = Table::new(columns)?;
    debug!(
        entities = height,
        slots = per_row,
        rows = table.height(),
        "reshaped wide table to long form"
    );
    Ok(Reshaped { table, diagnostics })
}
