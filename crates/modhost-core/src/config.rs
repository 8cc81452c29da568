//! Host configuration.
//!
//! Static TOML config: which mods to load (declared names, a directory to
//! scan, or both fields present with the directory taking precedence) and
//! where the persisted log file lives.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::loader::ModSources;

/// Configuration for the mod host.
///
/// ```toml
/// mods = ["examplemod", "minimapmod"]
/// log_file = "modhost.log"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Declared mod source identifiers, loaded as-is.
    #[serde(default)]
    pub mods: Vec<String>,

    /// Directory to scan for mod sources instead of using `mods`.
    #[serde(default)]
    pub mod_dir: Option<PathBuf>,

    /// Append-only log file. Console logging works without it.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl HostConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("invalid modhost config")
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// The candidate sources the loader should discover.
    pub fn sources(&self) -> ModSources {
        match &self.mod_dir {
            Some(dir) => ModSources::Dir(dir.clone()),
            None => ModSources::List(self.mods.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = HostConfig::from_toml_str(
            r#"
mods = ["examplemod"]
log_file = "modhost.log"
"#,
        )
        .unwrap();
        assert_eq!(config.mods, ["examplemod"]);
        assert_eq!(config.log_file.as_deref(), Some(Path::new("modhost.log")));
        assert!(matches!(config.sources(), ModSources::List(names) if names == ["examplemod"]));
    }

    #[test]
    fn test_empty_config_defaults() {
        let config = HostConfig::from_toml_str("").unwrap();
        assert!(config.mods.is_empty());
        assert!(config.mod_dir.is_none());
        assert!(config.log_file.is_none());
        assert!(matches!(config.sources(), ModSources::List(names) if names.is_empty()));
    }

    #[test]
    fn test_mod_dir_takes_precedence() {
        let config = HostConfig::from_toml_str(
            r#"
mods = ["ignored"]
mod_dir = "mods"
"#,
        )
        .unwrap();
        assert!(matches!(config.sources(), ModSources::Dir(dir) if dir == Path::new("mods")));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(HostConfig::from_toml_str("mods = 3").is_err());
    }
}
