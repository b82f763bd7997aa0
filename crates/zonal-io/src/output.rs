//! Output file naming for per-region results.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use zonal_core::RegionPrefix;
use zonal_net::RolePartition;

use crate::frame::write_table;

/// Directory for outputs of one region of interest: `<dir>/<prefix>` when a
/// prefix is set, `dir` itself otherwise. The directory is created.
pub fn region_dir(dir: &Path, prefix: &RegionPrefix) -> Result<PathBuf> {
    let out = match prefix.as_option() {
        Some(prefix) => dir.join(prefix),
        None => dir.to_path_buf(),
    };
    fs::create_dir_all(&out).with_context(|| format!("creating directory {}", out.display()))?;
    Ok(out)
}

/// `<dir>/<prefix>/<base>.csv`, or `<dir>/<base>.csv` without a prefix.
pub fn output_path(dir: &Path, base: &str, prefix: &RegionPrefix) -> Result<PathBuf> {
    Ok(region_dir(dir, prefix)?.join(format!("{base}.csv")))
}

/// Write the three directional role sets as `lines.csv`,
/// `generators_interface.csv` and `load_interface.csv`.
pub fn write_role_splits(
    partition: &RolePartition,
    out_dir: &Path,
    prefix: &RegionPrefix,
    capacity_column: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (name, table) in partition.role_tables(capacity_column) {
        let path = output_path(out_dir, name, prefix)?;
        write_table(&table, &path)?;
        info!(path = %path.display(), rows = table.height(), "wrote {name}");
        written.push(path);
    }
    Ok(written)
}
