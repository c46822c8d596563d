//! Loading the storage config the `column-type` command reports on.

use std::path::{Path, PathBuf};

use hierarchy_id::{Dialect, StorageConfig, StorageError};
use thiserror::Error;

/// Name of the config file looked for in the working directory
pub const CONFIG_FILE_NAME: &str = "hid.yaml";

#[allow(missing_docs)]
pub type CliConfigResult<T> = Result<T, CliConfigError>;

#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum CliConfigError {
    #[error("No hid config found at this path: {0}")]
    ConfigMissing(PathBuf),

    #[error("Config deserialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    #[error("Error while reading the hid config: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Read a [`StorageConfig`] from YAML.
///
/// With an explicit path the file must exist. Without one, `hid.yaml` in the
/// working directory is used if present, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> CliConfigResult<StorageConfig> {
    let path = match path {
        Some(p) if !p.exists() => return Err(CliConfigError::ConfigMissing(p.to_owned())),
        Some(p) => p.to_owned(),
        None => {
            let default = PathBuf::from(CONFIG_FILE_NAME);
            if !default.exists() {
                tracing::debug!(
                    "no {} found, using default storage config",
                    CONFIG_FILE_NAME
                );
                return Ok(StorageConfig::default());
            }
            default
        }
    };
    tracing::debug!(?path, "loading storage config");
    let yaml = std::fs::read_to_string(&path)?;
    let config: StorageConfig = serde_yaml::from_str(&yaml)?;
    config.validate()?;
    Ok(config)
}

/// Apply a `--dialect` flag on top of a loaded config.
pub fn with_dialect(
    mut config: StorageConfig,
    dialect: Option<&str>,
) -> CliConfigResult<StorageConfig> {
    if let Some(d) = dialect {
        config.dialect = d.parse::<Dialect>()?;
    }
    Ok(config)
}
