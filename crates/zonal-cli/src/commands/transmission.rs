use std::fs;

use anyhow::{bail, Context, Result};
use tracing::info;
use zonal_cli::pipeline::{classified_edges, transmission_records, write_transmission};
use zonal_cli::Commands;
use zonal_core::RegionPrefix;
use zonal_io::write_table;

pub fn handle(command: &Commands) -> Result<()> {
    match command {
        Commands::Transmission {
            input,
            year,
            out_dir,
            region_prefix,
        } => {
            let prefix = RegionPrefix::from_option(region_prefix.as_deref());
            let records = transmission_records(input, *year, None)?;
            let written = write_transmission(&records, *year, out_dir, &prefix)?;
            for path in &written {
                info!(path = %path.display(), "wrote transmission table");
            }
            println!(
                "Cleaned {} capacity records into {} file(s) under {}",
                records.len(),
                written.len(),
                out_dir.display()
            );
            Ok(())
        }
        Commands::Edges {
            input,
            year,
            out,
            region_prefix,
            dot,
        } => {
            let prefix = RegionPrefix::from_option(region_prefix.as_deref());
            let records = transmission_records(input, *year, None)?;
            let (table, summary, graph) = classified_edges(&records, *year, &prefix);
            write_table(&table, out)?;
            if let Some(dot) = dot {
                fs::write(dot, graph.to_dot())
                    .with_context(|| format!("writing {}", dot.display()))?;
            }
            println!("Capacity graph for {}:", input.display());
            println!("  Regions       : {}", summary.regions);
            println!("  Edges         : {}", summary.edges);
            println!("  Islands       : {}", summary.islands);
            if let Some(max) = summary.max_capacity {
                println!("  Max capacity  : {max}");
            }
            println!("  Total capacity: {}", summary.total_capacity);
            Ok(())
        }
        _ => bail!("transmission handler called with another command"),
    }
}
