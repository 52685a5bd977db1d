use std::env;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, FileConfig};

/// Locate the settings file, if any. Precedence: the `--config` flag, then
/// the `DEPICT_CONFIG` environment variable, then `./depict.toml`. An
/// explicitly named file must exist; the implicit one may be absent.
pub fn resolve_config_path(flag: Option<PathBuf>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = flag {
        if !path.is_file() {
            return Err(ConfigError::ConfigNotFound(path));
        }
        return Ok(Some(path));
    }

    if let Ok(path) = env::var("DEPICT_CONFIG") {
        let path = PathBuf::from(path);
        if !path.is_file() {
            return Err(ConfigError::ConfigNotFound(path));
        }
        return Ok(Some(path));
    }

    let implicit = PathBuf::from("depict.toml");
    if implicit.is_file() {
        return Ok(Some(implicit));
    }

    Ok(None)
}

pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}
