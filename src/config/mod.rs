//! Configuration management for gtask.
//!
//! This module handles loading and saving configuration from `~/.gt/`
//! (or `$GT_HOME`).

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, StorageConfig};
