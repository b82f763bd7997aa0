//! Hourly load curves with a synthesized global hour axis.
//!
//! Load-curve sheets carry one row per region per calendar day and 24 hourly
//! columns. Downstream consumers index the result by a global hour ordinal as
//! an implicit array position, so the ordinal has to be a pure function of
//! the day position and the hour:
//!
//! ```text
//! Time = day_position * hours_per_day + (Hour - 1)
//! ```
//!
//! which only holds if every day carries exactly the hours `1..=hours_per_day`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zonal_core::{Cell, Column, Diagnostics, Table, ZonalError, ZonalResult};

use crate::reshape::{check_output_names, resolve_slots, ReshapeSpec, Reshaped};

/// Column roles of a day-grouped hourly table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyLayout {
    pub entity_columns: Vec<String>,
    pub day_columns: Vec<String>,
    pub ordinal_column: String,
    pub hours_per_day: u32,
}

impl Default for HourlyLayout {
    fn default() -> Self {
        Self {
            entity_columns: vec!["Region".to_string()],
            day_columns: vec!["Month".to_string(), "Day".to_string()],
            ordinal_column: "Time".to_string(),
            hours_per_day: 24,
        }
    }
}

impl HourlyLayout {
    fn grouping_columns(&self) -> Vec<&str> {
        self.entity_columns
            .iter()
            .chain(self.day_columns.iter())
            .map(String::as_str)
            .collect()
    }
}

type EntityKey = Vec<Option<String>>;

fn entity_key(table_columns: &[&Column], row: usize) -> EntityKey {
    table_columns
        .iter()
        .map(|column| column.cells[row].as_label())
        .collect()
}

/// Rows grouped by entity, entities in first-appearance order, rows in input
/// order within each entity.
fn group_rows(entity_columns: &[&Column], height: usize) -> Vec<(EntityKey, Vec<usize>)> {
    let mut groups: Vec<(EntityKey, Vec<usize>)> = Vec::new();
    let mut positions: HashMap<EntityKey, usize> = HashMap::new();
    for row in 0..height {
        let key = entity_key(entity_columns, row);
        match positions.get(&key) {
            Some(&idx) => groups[idx].1.push(row),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push((key, vec![row]));
            }
        }
    }
    groups
}

/// Reshape a day-grouped hourly table into long form with a global ordinal.
///
/// Output columns: entity columns, day columns, the hour column
/// (`spec.time_column`), the ordinal column and the value column. Entities
/// appear in first-appearance order; each entity's days keep their input
/// order and cycle through hours `1..=hours_per_day`.
pub fn synthesize_hour_axis(
    table: &Table,
    layout: &HourlyLayout,
    spec: &ReshapeSpec,
) -> ZonalResult<Reshaped> {
    let grouping = layout.grouping_columns();
    check_output_names(
        &grouping,
        &[
            spec.time_column.as_str(),
            layout.ordinal_column.as_str(),
            spec.value_column.as_str(),
        ],
    )?;
    if layout.hours_per_day == 0 {
        return Err(ZonalError::HourAxis("hours_per_day must be positive".into()));
    }

    let entity_columns = layout
        .entity_columns
        .iter()
        .map(|name| table.column(name))
        .collect::<ZonalResult<Vec<_>>>()?;
    let day_columns = layout
        .day_columns
        .iter()
        .map(|name| table.column(name))
        .collect::<ZonalResult<Vec<_>>>()?;

    let value_names: Vec<&str> = table
        .column_names()
        .into_iter()
        .filter(|name| !grouping.contains(name) && spec.rule.selects(name))
        .collect();
    let slots = resolve_slots(table, &value_names, &spec.rule)?;

    let mut schema = grouping.clone();
    schema.extend([
        spec.time_column.as_str(),
        layout.ordinal_column.as_str(),
        spec.value_column.as_str(),
    ]);

    let mut diagnostics = Diagnostics::new();
    if slots.is_empty() {
        let message = format!("no hourly columns selected for '{}'", spec.value_column);
        warn!("{message}");
        diagnostics.add_warning("reshape", &message);
        return Ok(Reshaped {
            table: Table::with_schema(&schema),
            diagnostics,
        });
    }

    let hours: Vec<u32> = slots.iter().map(|slot| slot.index).collect();
    let expected: Vec<u32> = (1..=layout.hours_per_day).collect();
    if hours != expected {
        return Err(ZonalError::HourAxis(format!(
            "expected hourly columns 1..={}, found {:?}",
            layout.hours_per_day, hours
        )));
    }

    let groups = group_rows(&entity_columns, table.height());
    let per_day = slots.len();
    let mut rows: Vec<(usize, usize, &Cell)> = Vec::with_capacity(table.height() * per_day);
    for (_, members) in &groups {
        for (day_position, &row) in members.iter().enumerate() {
            for (hour_offset, slot) in slots.iter().enumerate() {
                let ordinal = day_position * per_day + hour_offset;
                rows.push((row, ordinal, &slot.column.cells[row]));
            }
        }
    }

    let mut columns: Vec<Column> = entity_columns
        .iter()
        .chain(day_columns.iter())
        .map(|source| {
            let cells = rows
                .iter()
                .map(|(row, _, _)| source.cells[*row].clone())
                .collect();
            Column::new(source.name.clone(), cells)
        })
        .collect();
    let hour_cells = rows
        .iter()
        .map(|(_, ordinal, _)| Cell::Int((ordinal % per_day) as i64 + 1))
        .collect();
    let ordinal_cells = rows
        .iter()
        .map(|(_, ordinal, _)| Cell::Int(*ordinal as i64))
        .collect();
    let value_cells = rows.iter().map(|(_, _, value)| (*value).clone()).collect();
    columns.push(Column::new(spec.time_column.clone(), hour_cells));
    columns.push(Column::new(layout.ordinal_column.clone(), ordinal_cells));
    columns.push(Column::new(spec.value_column.clone(), value_cells));

    let table = Table::new(columns)?;
    debug!(
        entities = groups.len(),
        rows = table.height(),
        "synthesized hour axis"
    );
    Ok(Reshaped { table, diagnostics })
}

fn entity_label(key: &EntityKey) -> String {
    key.iter()
        .map(|part| part.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Pivot a long hourly table into one value column per entity.
///
/// Layout: ordinal column, day columns, hour column, then one column per
/// entity with entities sorted by label. The calendar (day and hour columns)
/// is taken from the first entity in that order; every entity must cover the
/// same ordinals `0..n` in order.
pub fn entity_matrix(
    long: &Table,
    layout: &HourlyLayout,
    spec: &ReshapeSpec,
) -> ZonalResult<Table> {
    let entity_columns = layout
        .entity_columns
        .iter()
        .map(|name| long.column(name))
        .collect::<ZonalResult<Vec<_>>>()?;
    let day_columns = layout
        .day_columns
        .iter()
        .map(|name| long.column(name))
        .collect::<ZonalResult<Vec<_>>>()?;
    let hour = long.column(&spec.time_column)?;
    let ordinal = long.column(&layout.ordinal_column)?;
    let values = long.column(&spec.value_column)?;

    let mut groups: Vec<(String, Vec<usize>)> = group_rows(&entity_columns, long.height())
        .into_iter()
        .map(|(key, rows)| (entity_label(&key), rows))
        .collect();
    groups.sort_by(|a, b| a.0.cmp(&b.0));

    let mut calendar_names: Vec<String> = vec![layout.ordinal_column.clone()];
    calendar_names.extend(layout.day_columns.iter().cloned());
    calendar_names.push(spec.time_column.clone());

    let Some((_, first_rows)) = groups.first() else {
        return Ok(Table::with_schema(&calendar_names));
    };
    let length = first_rows.len();

    for (label, rows) in &groups {
        // A blank header reads back as an index column and would be dropped.
        if label.trim().is_empty() {
            return Err(ZonalError::Validation(format!(
                "{} row(s) have no entity label for a matrix column",
                rows.len()
            )));
        }
        if rows.len() != length {
            return Err(ZonalError::HourAxis(format!(
                "entity '{label}' covers {} hours, expected {length}",
                rows.len()
            )));
        }
        for (position, &row) in rows.iter().enumerate() {
            if ordinal.cells[row].as_i64() != Some(position as i64) {
                return Err(ZonalError::HourAxis(format!(
                    "entity '{label}' has ordinal {} at position {position}",
                    ordinal.cells[row]
                )));
            }
        }
    }

    let pick = |source: &Column| -> Vec<Cell> {
        first_rows
            .iter()
            .map(|&row| source.cells[row].clone())
            .collect()
    };
    let mut columns = vec![Column::new(layout.ordinal_column.clone(), pick(ordinal))];
    for day in &day_columns {
        columns.push(Column::new(day.name.clone(), pick(day)));
    }
    columns.push(Column::new(spec.time_column.clone(), pick(hour)));
    for (label, rows) in &groups {
        if calendar_names.contains(label) {
            return Err(ZonalError::Validation(format!(
                "entity '{label}' collides with a calendar column"
            )));
        }
        let cells = rows.iter().map(|&row| values.cells[row].clone()).collect();
        columns.push(Column::new(label.clone(), cells));
    }
    Table::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_curves(hours: u32) -> Table {
        let mut columns = vec![
            Column::texts("Region", &["PJM_WMAC", "PJM_Dom", "PJM_WMAC", "PJM_Dom"]),
            Column::ints("Month", &[1, 1, 1, 1]),
            Column::ints("Day", &[1, 1, 2, 2]),
        ];
        for h in 1..=hours {
            let base = f64::from(h);
            columns.push(Column::floats(
                format!("Hour {h}"),
                &[base, base + 100.0, base + 1000.0, base + 1100.0],
            ));
        }
        Table::new(columns).unwrap()
    }

    fn small_layout() -> HourlyLayout {
        HourlyLayout {
            hours_per_day: 3,
            ..HourlyLayout::default()
        }
    }

    #[test]
    fn groups_entities_and_cycles_hours() {
        let table = load_curves(3);
        let spec = ReshapeSpec::default().with_value_column("Load");
        let out = synthesize_hour_axis(&table, &small_layout(), &spec).unwrap();
        let long = out.table;
        assert_eq!(
            long.column_names(),
            vec!["Region", "Month", "Day", "Hour", "Time", "Load"]
        );
        assert_eq!(long.height(), 12);

        let regions: Vec<String> = long
            .column("Region")
            .unwrap()
            .cells
            .iter()
            .filter_map(Cell::as_label)
            .collect();
        assert!(regions[..6].iter().all(|r| r == "PJM_WMAC"));
        assert!(regions[6..].iter().all(|r| r == "PJM_Dom"));

        let hours: Vec<i64> = long
            .column("Hour")
            .unwrap()
            .cells
            .iter()
            .filter_map(Cell::as_i64)
            .collect();
        assert_eq!(hours, vec![1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3]);

        let ordinals: Vec<i64> = long
            .column("Time")
            .unwrap()
            .cells
            .iter()
            .filter_map(Cell::as_i64)
            .collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3, 4, 5, 0, 1, 2, 3, 4, 5]);

        // PJM_WMAC day 2, hour 1
        assert_eq!(long.column("Load").unwrap().cells[3], Cell::Float(1001.0));
        assert_eq!(long.column("Day").unwrap().cells[3], Cell::Int(2));
    }

    #[test]
    fn rejects_hour_gaps() {
        let table = load_curves(3).drop_columns(&["Hour 2"]);
        let err = synthesize_hour_axis(&table, &small_layout(), &ReshapeSpec::default())
            .unwrap_err();
        assert!(matches!(err, ZonalError::HourAxis(_)));
    }

    #[test]
    fn rejects_malformed_labels() {
        let table = load_curves(3);
        let mut columns = table.into_columns();
        columns.push(Column::floats("Hour avg", &[0.0; 4]));
        let table = Table::new(columns).unwrap();
        let err = synthesize_hour_axis(&table, &small_layout(), &ReshapeSpec::default())
            .unwrap_err();
        assert!(matches!(err, ZonalError::MalformedTimeLabel { .. }));
    }

    #[test]
    fn matrix_has_one_column_per_entity() {
        let table = load_curves(3);
        let spec = ReshapeSpec::default().with_value_column("Load");
        let layout = small_layout();
        let long = synthesize_hour_axis(&table, &layout, &spec).unwrap().table;
        let matrix = entity_matrix(&long, &layout, &spec).unwrap();
        assert_eq!(
            matrix.column_names(),
            vec!["Time", "Month", "Day", "Hour", "PJM_Dom", "PJM_WMAC"]
        );
        assert_eq!(matrix.height(), 6);
        assert_eq!(matrix.column("PJM_Dom").unwrap().cells[0], Cell::Float(101.0));
        assert_eq!(matrix.column("PJM_WMAC").unwrap().cells[5], Cell::Float(1003.0));
    }

    #[test]
    fn matrix_rejects_uneven_entities() {
        let mut table = load_curves(3);
        table = table.filter_rows(|row| row != 3);
        let spec = ReshapeSpec::default();
        let layout = small_layout();
        let long = synthesize_hour_axis(&table, &layout, &spec).unwrap().table;
        assert!(matches!(
            entity_matrix(&long, &layout, &spec),
            Err(ZonalError::HourAxis(_))
        ));
    }

    #[test]
    fn matrix_rejects_blank_entity() {
        let table = load_curves(3);
        let region = Column::new(
            "Region",
            vec![
                Cell::from("PJM_WMAC"),
                Cell::Empty,
                Cell::from("PJM_WMAC"),
                Cell::text("  "),
            ],
        );
        let mut columns = table.into_columns();
        columns[0] = region;
        let table = Table::new(columns).unwrap();
        let spec = ReshapeSpec::default();
        let layout = small_layout();
        let long = synthesize_hour_axis(&table, &layout, &spec).unwrap().table;
        let err = entity_matrix(&long, &layout, &spec).unwrap_err();
        assert!(matches!(err, ZonalError::Validation(ref msg) if msg.contains("no entity label")));
    }

    #[test]
    fn empty_table() {
        let table = Table::with_schema(&["Region", "Month", "Day", "Hour 1", "Hour 2", "Hour 3"]);
        let spec = ReshapeSpec::default();
        let layout = small_layout();
        let long = synthesize_hour_axis(&table, &layout, &spec).unwrap().table;
        assert!(long.is_empty());
        let matrix = entity_matrix(&long, &layout, &spec).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(matrix.column_names(), vec!["Time", "Month", "Day", "Hour"]);
    }
}
