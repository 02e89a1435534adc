//! Configuration for the voxwrite generators.
//!
//! Settings persist to disk as `config.ron` and can be overridden from the
//! command line via clap. Unknown or missing fields fall back to defaults so
//! older config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, GridConfig, PaletteConfig, PaletteOverride, Pattern, RandomWalkConfig,
    WaveConfig, default_config_dir,
};
pub use error::ConfigError;
