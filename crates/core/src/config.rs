//! Application configuration.

use std::{fs, path::PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::FleetError,
    logger::{ConsoleStream, LoggerKind},
};

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "fleetview";

/// Prefix for environment overrides, e.g. `FLEETVIEW_LOGGER=file`.
pub const ENV_PREFIX: &str = "FLEETVIEW";

const DEFAULT_CONFIG: &str = r#"# fleetview configuration

# Where fleet activity messages go: console, file, tracing or memory.
logger = "console"

# Stream used by the console logger: stdout or stderr.
console_stream = "stdout"

# Target of the file logger.
log_file = "fleet.log"

# Open the interactive browser instead of printing the report.
interactive = false
"#;

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sink used for fleet activity messages.
    pub logger: LoggerKind,
    /// Stream written by [`LoggerKind::Console`].
    pub console_stream: ConsoleStream,
    /// File written by [`LoggerKind::File`].
    pub log_file: PathBuf,
    /// Start the interactive browser.
    pub interactive: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logger: LoggerKind::Console,
            console_stream: ConsoleStream::Stdout,
            log_file: PathBuf::from("fleet.log"),
            interactive: false,
        }
    }
}

impl AppConfig {
    /// Load from the default config file (if present) and the environment.
    pub fn load() -> Result<Self, FleetError> {
        Self::load_from(config_path())
    }

    /// Load from `path` (optional on disk) overlaid by `FLEETVIEW_*` variables.
    pub fn load_from(path: Option<PathBuf>) -> Result<Self, FleetError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

/// Path of the default config file, if a config directory exists.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join("config.toml"))
}

/// Write a commented default config file when none exists yet.
pub fn ensure_default_config() -> Result<(), FleetError> {
    let Some(path) = config_path() else {
        return Ok(());
    };
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| FleetError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, DEFAULT_CONFIG).map_err(|source| FleetError::Io {
        path: path.clone(),
        source,
    })?;
    info!("wrote default config to {}", path.display());
    Ok(())
}
