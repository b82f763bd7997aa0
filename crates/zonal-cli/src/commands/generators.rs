use anyhow::{bail, Result};
use tracing::info;
use zonal_cli::pipeline;
use zonal_cli::Commands;
use zonal_core::RegionPrefix;
use zonal_io::{write_table, ExtractLayout};

pub fn handle(command: &Commands) -> Result<()> {
    let Commands::Generators {
        input,
        out,
        region_prefix,
        region_column,
    } = command
    else {
        bail!("generators handler called with another command");
    };
    let prefix = RegionPrefix::from_option(region_prefix.as_deref());
    info!(input = %input.display(), prefix = prefix.as_str(), "filtering generators");
    let table = pipeline::generators(input, &ExtractLayout::plain(), &prefix, region_column)?;
    write_table(&table, out)?;
    println!("Wrote {} generators to {}", table.height(), out.display());
    Ok(())
}
