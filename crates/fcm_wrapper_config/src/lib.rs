//! Configuration for the FCM wrapper.
//!
//! Every value is supplied explicitly by the caller, either by building an
//! [`FcmConfig`] in code or by pointing [`load_config`] at a file. Missing
//! keys fall back to the public FCM defaults.

use config::{Config, File};
use std::path::Path;

pub mod models;

pub use config::{ConfigError, FileFormat};
pub use models::*;

/// Loads an [`FcmConfig`] from a TOML, JSON or YAML file.
///
/// The format is picked from the file extension.
pub fn load_config(path: impl AsRef<Path>) -> Result<FcmConfig, ConfigError> {
    let path = path.as_ref();
    tracing::debug!("loading FCM config from {}", path.display());

    let config: FcmConfig = Config::builder()
        .add_source(File::from(path).required(true))
        .build()?
        .try_deserialize()?;
    Ok(config)
}

/// Loads an [`FcmConfig`] from in-memory text, e.g. a config embedded with `include_str!`.
pub fn load_config_from_str(text: &str, format: FileFormat) -> Result<FcmConfig, ConfigError> {
    let config: FcmConfig = Config::builder()
        .add_source(File::from_str(text, format))
        .build()?
        .try_deserialize()?;
    Ok(config)
}
