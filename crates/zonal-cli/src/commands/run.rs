use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use zonal_cli::config::{load_config, LayoutPreset};
use zonal_cli::pipeline::{self, PROFILE_VALUE_COLUMN, SITE_REGION_COLUMN};
use zonal_io::{output_path, write_table};

pub fn handle(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let prefix = config.prefix();
    let out_dir = config.out_dir.as_path();
    info!(
        prefix = prefix.as_option().unwrap_or("none"),
        out_dir = %out_dir.display(),
        "running pipeline"
    );
    let mut outputs = 0usize;

    if let Some(load) = &config.load {
        let table = pipeline::load_curves(&config.source_path(load), &prefix, config.load_matrix)
            .context("load stage")?;
        let path = output_path(out_dir, "load", &prefix)?;
        write_table(&table, &path)?;
        info!(path = %path.display(), rows = table.height(), "wrote load");
        outputs += 1;
    }

    if let Some(transmission) = &config.transmission {
        let known = config.known_regions();
        let records = pipeline::transmission_records(
            &config.source_path(transmission),
            config.snapshot_year,
            known.as_ref(),
        )
        .context("transmission stage")?;
        let written =
            pipeline::write_transmission(&records, config.snapshot_year, out_dir, &prefix)?;
        outputs += written.len();
    }

    for source in &config.generators {
        let name = source.name.as_deref().unwrap_or_default();
        let table = pipeline::generators(
            &config.source_path(source),
            &source.layout_or(LayoutPreset::Plain),
            &prefix,
            source.region_column_or(SITE_REGION_COLUMN),
        )
        .with_context(|| format!("generator stage '{name}'"))?;
        let path = output_path(out_dir, name, &prefix)?;
        write_table(&table, &path)?;
        info!(path = %path.display(), rows = table.height(), "wrote {name}");
        outputs += 1;
    }

    for source in &config.profiles {
        let name = source.name.as_deref().unwrap_or_default();
        let table = pipeline::profiles(
            &config.source_path(source),
            &source.layout_or(LayoutPreset::Banner),
            &prefix,
            source.region_column_or(SITE_REGION_COLUMN),
            "Hour",
            source.value_name.as_deref().unwrap_or(PROFILE_VALUE_COLUMN),
        )
        .with_context(|| format!("profile stage '{name}'"))?;
        let path = output_path(out_dir, name, &prefix)?;
        write_table(&table, &path)?;
        info!(path = %path.display(), rows = table.height(), "wrote {name}");
        outputs += 1;
    }

    println!("Processing complete: {outputs} file(s) written to {}", out_dir.display());
    Ok(())
}
