//! Configuration for the sky engine and its host.
//!
//! Settings persist to disk as RON, accept CLI overrides via clap, support
//! hot-reload detection, and tolerate missing or unknown fields.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, DisplayConfig, ObserverConfig, PickingConfig, TargetingConfig, ViewConfig,
    default_config_dir,
};
pub use error::ConfigError;
