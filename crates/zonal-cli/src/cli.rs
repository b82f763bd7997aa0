use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Reshape zonal grid-model extracts", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Day-grouped hourly load curves to a long series with a global hour index
    Load {
        /// Load-curve extract (banner and footnotes are stripped)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Output file (.csv or .parquet)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: PathBuf,
        /// Keep only regions whose id starts with this prefix
        #[arg(long)]
        region_prefix: Option<String>,
        /// Pivot to one column per region instead of one row per region-hour
        #[arg(long)]
        matrix: bool,
    },
    /// Renewable generation profiles (one column per hour) to long form
    Profiles {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: PathBuf,
        #[arg(long)]
        region_prefix: Option<String>,
        /// Column holding the region id
        #[arg(long, default_value = "Region Name")]
        region_column: String,
        /// Label prefix of the hourly value columns
        #[arg(long, default_value = "Hour")]
        label_prefix: String,
        /// Name of the value column in the output
        #[arg(long, default_value = "kWh of Generation per MW of Capacity")]
        value_name: String,
    },
    /// Region-filtered generator inventory
    Generators {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: PathBuf,
        #[arg(long)]
        region_prefix: Option<String>,
        #[arg(long, default_value = "Region Name")]
        region_column: String,
    },
    /// Clean directional transfer capabilities and split them by role
    Transmission {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Snapshot year whose capacity column is used
        #[arg(long)]
        year: u16,
        /// Output directory (transport_cap_all.csv plus per-prefix splits)
        #[arg(long, value_hint = ValueHint::DirPath)]
        out_dir: PathBuf,
        #[arg(long)]
        region_prefix: Option<String>,
    },
    /// Undirected, classified edge list with averaged capacities
    Edges {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        #[arg(long)]
        year: u16,
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: PathBuf,
        #[arg(long)]
        region_prefix: Option<String>,
        /// Also write a Graphviz rendering of the capacity graph
        #[arg(long, value_hint = ValueHint::FilePath)]
        dot: Option<PathBuf>,
    },
    /// Run every stage described in a pipeline config (TOML, YAML or JSON)
    Run {
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: PathBuf,
    },
}
