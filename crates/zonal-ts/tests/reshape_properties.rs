//! Row-count and ordering properties of the reshape engine

use proptest::prelude::*;
use zonal_core::{Cell, Column, Table};
use zonal_ts::{
    reshape_wide_to_long, synthesize_hour_axis, HourlyLayout, ReshapeSpec, TimeLabelRule,
    WideLayout,
};

/// Wide table with `entities` rows and the given hour indices as columns,
/// laid out in the order given (not necessarily sorted).
fn wide_table(entities: usize, hours: &[u32]) -> Table {
    let names: Vec<String> = (0..entities).map(|i| format!("PJM_{i}")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut columns = vec![Column::texts("Region Name", &name_refs)];
    for &h in hours {
        let values: Vec<f64> = (0..entities).map(|e| (e * 100) as f64 + f64::from(h)).collect();
        columns.push(Column::floats(format!("Hour {h}"), &values));
    }
    Table::new(columns).unwrap()
}

fn distinct_hours() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::btree_set(1u32..=48, 0..12)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn produces_entities_times_slots(entities in 0usize..20, hours in distinct_hours()) {
        let table = wide_table(entities, &hours);
        let layout = WideLayout::infer(&table, &TimeLabelRule::hours());
        let out = reshape_wide_to_long(&table, &layout, &ReshapeSpec::default()).unwrap();
        prop_assert_eq!(out.table.height(), entities * hours.len());
    }

    #[test]
    fn hours_ascend_within_each_entity(entities in 1usize..10, hours in distinct_hours()) {
        prop_assume!(!hours.is_empty());
        let table = wide_table(entities, &hours);
        let layout = WideLayout::infer(&table, &TimeLabelRule::hours());
        let long = reshape_wide_to_long(&table, &layout, &ReshapeSpec::default()).unwrap().table;

        let mut sorted = hours.clone();
        sorted.sort_unstable();
        let hour_col = long.column("Hour").unwrap();
        let region_col = long.column("Region Name").unwrap();
        for (chunk_idx, chunk) in hour_col.cells.chunks(hours.len()).enumerate() {
            let got: Vec<i64> = chunk.iter().filter_map(Cell::as_i64).collect();
            let want: Vec<i64> = sorted.iter().map(|h| i64::from(*h)).collect();
            prop_assert_eq!(got, want);
            let expected_region = format!("PJM_{chunk_idx}");
            let first = chunk_idx * hours.len();
            prop_assert_eq!(
                region_col.cells[first].as_label(),
                Some(expected_region)
            );
        }
    }
}

#[test]
fn full_year_of_load_curves() {
    let days = 365;
    let mut regions = Vec::new();
    let mut months = Vec::new();
    let mut day_numbers = Vec::new();
    for region in ["PJM_WMAC", "PJM_Dom"] {
        for day in 0..days {
            regions.push(region);
            months.push(1 + day / 31);
            day_numbers.push(1 + day % 31);
        }
    }
    let mut columns = vec![
        Column::texts("Region", &regions),
        Column::ints("Month", &months),
        Column::ints("Day", &day_numbers),
    ];
    for h in 1..=24 {
        columns.push(Column::floats(
            format!("Hour {h}"),
            &vec![f64::from(h); regions.len()],
        ));
    }
    let table = Table::new(columns).unwrap();

    let spec = ReshapeSpec::default().with_value_column("Load");
    let long = synthesize_hour_axis(&table, &HourlyLayout::default(), &spec)
        .unwrap()
        .table;
    assert_eq!(long.height(), 2 * 24 * 365);

    let hours = &long.column("Hour").unwrap().cells;
    let ordinals = &long.column("Time").unwrap().cells;
    for (i, (hour, ordinal)) in hours.iter().zip(ordinals).enumerate() {
        let within_entity = (i % (24 * 365)) as i64;
        assert_eq!(ordinal.as_i64(), Some(within_entity));
        assert_eq!(hour.as_i64(), Some(within_entity % 24 + 1));
    }
}
