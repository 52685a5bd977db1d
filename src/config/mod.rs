pub mod resolve;

pub use resolve::{load_file_config, resolve_config_path};

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config at {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Optional settings file (`depict.toml`); CLI flags override anything set
/// here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub defaults: Option<DefaultsConfig>,
    #[serde(default)]
    pub tools: Option<ToolsConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub graphviz: Option<String>,
    #[serde(default)]
    pub pip: Option<String>,
    #[serde(default)]
    pub apt_cache: Option<String>,
}

#[cfg(test)]
mod tests {
    use crate::config::FileConfig;

    #[test]
    fn parses_full_config() {
        let config: FileConfig = toml::from_str(
            r#"
[defaults]
source = "apt"
max_depth = 5
format = "svg"

[tools]
graphviz = "/usr/bin/dot"
apt_cache = "/usr/bin/apt-cache"
"#,
        )
        .expect("parse config");

        let defaults = config.defaults.expect("defaults section");
        assert_eq!(defaults.source.as_deref(), Some("apt"));
        assert_eq!(defaults.max_depth, Some(5));
        assert_eq!(defaults.format.as_deref(), Some("svg"));

        let tools = config.tools.expect("tools section");
        assert_eq!(tools.graphviz.as_deref(), Some("/usr/bin/dot"));
        assert_eq!(tools.apt_cache.as_deref(), Some("/usr/bin/apt-cache"));
        assert!(tools.pip.is_none());
    }

    #[test]
    fn empty_config_is_valid() {
        let config: FileConfig = toml::from_str("").expect("parse empty config");
        assert!(config.defaults.is_none());
        assert!(config.tools.is_none());
    }
}
