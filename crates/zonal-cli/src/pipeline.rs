//! Stages shared by the single-purpose commands and `zonal run`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};
use zonal_core::{filter_by_region, Diagnostics, RegionGroup, RegionPrefix, Table};
use zonal_io::{read_table, write_role_splits, write_table, ExtractLayout};
use zonal_net::{
    capacity_column_name, classify, normalize_records, partition_by_role, raw_records,
    records_table, restrict_to_regions, symmetrize_records, CapacityColumns, CapacityGraph,
    DirectionalRecord, GraphSummary,
};
use zonal_ts::{
    entity_matrix, reshape_wide_to_long, synthesize_hour_axis, HourlyLayout, ReshapeSpec,
    TimeLabelRule, WideLayout,
};

pub const LOAD_REGION_COLUMN: &str = "Region";
pub const SITE_REGION_COLUMN: &str = "Region Name";
pub const LOAD_VALUE_COLUMN: &str = "Load";
pub const PROFILE_VALUE_COLUMN: &str = "kWh of Generation per MW of Capacity";
/// Stem of the cleaned all-regions transmission table, always under `out_dir`.
pub const TRANSMISSION_ALL_STEM: &str = "transport_cap_all";

fn report(stage: &str, diagnostics: &Diagnostics) {
    for issue in diagnostics.warnings() {
        warn!(stage, "{issue}");
    }
}

/// Load curves, region-filtered, as a long series or a per-region matrix.
pub fn load_curves(input: &Path, prefix: &RegionPrefix, matrix: bool) -> Result<Table> {
    let raw = read_table(input, &ExtractLayout::banner_and_footer())?;
    let filtered = filter_by_region(&raw, LOAD_REGION_COLUMN, prefix);
    let layout = HourlyLayout::default();
    let spec = ReshapeSpec::default().with_value_column(LOAD_VALUE_COLUMN);
    let long = synthesize_hour_axis(&filtered, &layout, &spec)
        .with_context(|| format!("reshaping load curves from {}", input.display()))?;
    report("load", &long.diagnostics);
    if matrix {
        Ok(entity_matrix(&long.table, &layout, &spec)?)
    } else {
        Ok(long.table)
    }
}

/// Per-site hourly profiles in long form.
pub fn profiles(
    input: &Path,
    layout: &ExtractLayout,
    prefix: &RegionPrefix,
    region_column: &str,
    label_prefix: &str,
    value_name: &str,
) -> Result<Table> {
    let raw = read_table(input, layout)?;
    let filtered = filter_by_region(&raw, region_column, prefix);
    let rule = TimeLabelRule::Prefixed(label_prefix.to_string());
    let wide = WideLayout::infer(&filtered, &rule);
    let spec = ReshapeSpec::default()
        .with_rule(rule)
        .with_value_column(value_name);
    let long = reshape_wide_to_long(&filtered, &wide, &spec)
        .with_context(|| format!("reshaping profiles from {}", input.display()))?;
    report("profiles", &long.diagnostics);
    Ok(long.table)
}

pub fn generators(
    input: &Path,
    layout: &ExtractLayout,
    prefix: &RegionPrefix,
    region_column: &str,
) -> Result<Table> {
    let raw = read_table(input, layout)?;
    Ok(filter_by_region(&raw, region_column, prefix))
}

/// Cleaned directional capacity records for one snapshot year.
pub fn transmission_records(
    input: &Path,
    year: u16,
    known: Option<&RegionGroup>,
) -> Result<Vec<DirectionalRecord>> {
    let table = read_table(input, &ExtractLayout::banner_and_footer())?;
    let raw = raw_records(&table, &CapacityColumns::for_year(year))
        .with_context(|| format!("reading {year} capacities from {}", input.display()))?;
    let normalized = normalize_records(&raw);
    report("transmission", &normalized.diagnostics);
    Ok(match known {
        Some(known) => restrict_to_regions(&normalized.records, known),
        None => normalized.records,
    })
}

/// Write `transport_cap_all.csv` and, for a restricted prefix, the three role
/// splits under `<out_dir>/<prefix>/`.
pub fn write_transmission(
    records: &[DirectionalRecord],
    year: u16,
    out_dir: &Path,
    prefix: &RegionPrefix,
) -> Result<Vec<PathBuf>> {
    let capacity_column = capacity_column_name(year);
    let all = out_dir.join(format!("{TRANSMISSION_ALL_STEM}.csv"));
    write_table(&records_table(records, &capacity_column), &all)?;
    let mut written = vec![all];
    if prefix.as_option().is_some() {
        let split = partition_by_role(records, prefix);
        info!(
            lines = split.lines.len(),
            generator_interface = split.generator_interface.len(),
            load_interface = split.load_interface.len(),
            "split transmission by role"
        );
        written.extend(write_role_splits(&split, out_dir, prefix, &capacity_column)?);
    }
    Ok(written)
}

/// Symmetrized edges tagged against `prefix`, plus the capacity graph summary.
pub fn classified_edges(
    records: &[DirectionalRecord],
    year: u16,
    prefix: &RegionPrefix,
) -> (Table, GraphSummary, CapacityGraph) {
    let edges = symmetrize_records(records);
    let classified = classify(&edges, prefix);
    let graph = CapacityGraph::from_edges(&edges);
    let summary = graph.summary();
    if prefix.as_option().is_some() {
        let neighbors = classified.external_neighbors(prefix);
        info!(prefix = prefix.as_str(), neighbors = ?neighbors, "interface neighbours");
    }
    (
        classified.to_table(&capacity_column_name(year)),
        summary,
        graph,
    )
}
