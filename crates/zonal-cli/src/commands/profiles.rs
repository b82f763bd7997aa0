use anyhow::{bail, Result};
use tracing::info;
use zonal_cli::pipeline;
use zonal_cli::Commands;
use zonal_core::RegionPrefix;
use zonal_io::{write_table, ExtractLayout};

pub fn handle(command: &Commands) -> Result<()> {
    let Commands::Profiles {
        input,
        out,
        region_prefix,
        region_column,
        label_prefix,
        value_name,
    } = command
    else {
        bail!("profiles handler called with another command");
    };
    let prefix = RegionPrefix::from_option(region_prefix.as_deref());
    info!(input = %input.display(), prefix = prefix.as_str(), "reshaping profiles");
    let table = pipeline::profiles(
        input,
        &ExtractLayout::banner(),
        &prefix,
        region_column,
        label_prefix,
        value_name,
    )?;
    write_table(&table, out)?;
    println!("Wrote {} profile rows to {}", table.height(), out.display());
    Ok(())
}
