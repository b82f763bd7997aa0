//! Pipeline configuration for `zonal run`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use zonal_core::{RegionGroup, RegionPrefix, ZonalError};
use zonal_io::ExtractLayout;
use zonal_net::ROLE_STEMS;

use crate::pipeline::TRANSMISSION_ALL_STEM;

/// Named presets for [`ExtractLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPreset {
    Plain,
    Banner,
    BannerAndFooter,
}

impl From<LayoutPreset> for ExtractLayout {
    fn from(preset: LayoutPreset) -> Self {
        match preset {
            LayoutPreset::Plain => ExtractLayout::plain(),
            LayoutPreset::Banner => ExtractLayout::banner(),
            LayoutPreset::BannerAndFooter => ExtractLayout::banner_and_footer(),
        }
    }
}

/// One input extract and how to read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Output file stem; required for generator and profile sources
    #[serde(default)]
    pub name: Option<String>,
    /// Path relative to `raw_dir`
    pub file: PathBuf,
    #[serde(default)]
    pub region_column: Option<String>,
    #[serde(default)]
    pub layout: Option<LayoutPreset>,
    /// Value column name for profile sources
    #[serde(default)]
    pub value_name: Option<String>,
}

impl SourceConfig {
    pub fn layout_or(&self, fallback: LayoutPreset) -> ExtractLayout {
        self.layout.unwrap_or(fallback).into()
    }

    pub fn region_column_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.region_column.as_deref().unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub raw_dir: PathBuf,
    pub out_dir: PathBuf,
    /// Region of interest; empty or absent means all regions
    #[serde(default)]
    pub region_prefix: Option<String>,
    #[serde(default = "default_snapshot_year")]
    pub snapshot_year: u16,
    /// Restrict transmission records to these regions when set
    #[serde(default)]
    pub known_regions: Option<Vec<String>>,
    #[serde(default)]
    pub load: Option<SourceConfig>,
    /// Write the load curves as one column per region
    #[serde(default = "default_true")]
    pub load_matrix: bool,
    #[serde(default)]
    pub transmission: Option<SourceConfig>,
    #[serde(default)]
    pub generators: Vec<SourceConfig>,
    #[serde(default)]
    pub profiles: Vec<SourceConfig>,
}

fn default_snapshot_year() -> u16 {
    2028
}

fn default_true() -> bool {
    true
}

impl PipelineConfig {
    pub fn prefix(&self) -> RegionPrefix {
        RegionPrefix::from_option(self.region_prefix.as_deref())
    }

    pub fn known_regions(&self) -> Option<RegionGroup> {
        self.known_regions.as_ref().map(RegionGroup::new)
    }

    pub fn source_path(&self, source: &SourceConfig) -> PathBuf {
        self.raw_dir.join(&source.file)
    }

    /// Stems of the outputs that land in the region directory, in run order.
    /// `transport_cap_all` is written to `out_dir` itself, so it only shares a
    /// directory with the other outputs when no prefix is set.
    pub fn output_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        if self.load.is_some() {
            names.push("load");
        }
        if self.transmission.is_some() {
            if self.prefix().as_option().is_some() {
                names.extend(ROLE_STEMS);
            } else {
                names.push(TRANSMISSION_ALL_STEM);
            }
        }
        names.extend(
            self.generators
                .iter()
                .chain(self.profiles.iter())
                .map(|source| source.name.as_deref().unwrap_or("")),
        );
        names
    }

    pub fn validate(&self) -> Result<(), ZonalError> {
        let mut seen = HashSet::new();
        for name in self.output_names() {
            if name.trim().is_empty() {
                return Err(ZonalError::Config(
                    "generator and profile sources need a non-empty name".into(),
                ));
            }
            if !seen.insert(name) {
                return Err(ZonalError::Config(format!("duplicate output name '{name}'")));
            }
        }
        Ok(())
    }
}

/// Parse a pipeline config by extension (`.toml`, `.yaml`/`.yml`, `.json`);
/// other extensions try each format in turn.
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading pipeline config '{}'", path.display()))?;
    let config: PipelineConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => {
            toml::from_str(&data).context("parsing pipeline config toml")?
        }
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            serde_yaml::from_str(&data).context("parsing pipeline config yaml")?
        }
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            serde_json::from_str(&data).context("parsing pipeline config json")?
        }
        _ => toml::from_str(&data)
            .ok()
            .or_else(|| serde_yaml::from_str(&data).ok())
            .or_else(|| serde_json::from_str(&data).ok())
            .context("parsing pipeline config")?,
    };
    config.validate()?;
    Ok(config)
}
