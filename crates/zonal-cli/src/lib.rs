pub mod cli;
pub mod config;
pub mod pipeline;

pub use cli::{Cli, Commands};
pub use config::{load_config, LayoutPreset, PipelineConfig, SourceConfig};
