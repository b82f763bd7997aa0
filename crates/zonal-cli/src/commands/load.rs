use anyhow::{bail, Result};
use tracing::info;
use zonal_cli::pipeline::load_curves;
use zonal_cli::Commands;
use zonal_core::RegionPrefix;
use zonal_io::write_table;

pub fn handle(command: &Commands) -> Result<()> {
    let Commands::Load {
        input,
        out,
        region_prefix,
        matrix,
    } = command
    else {
        bail!("load handler called with another command");
    };
    let prefix = RegionPrefix::from_option(region_prefix.as_deref());
    info!(input = %input.display(), prefix = prefix.as_str(), "reshaping load curves");
    let table = load_curves(input, &prefix, *matrix)?;
    write_table(&table, out)?;
    println!("Wrote {} load rows to {}", table.height(), out.display());
    Ok(())
}
