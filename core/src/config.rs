use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "channel-desk.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeskConfig {
    /// Directory holding one CSV file per collection. Created on first run.
    pub data_dir: PathBuf,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Title shown in the page header and browser tab.
    pub title: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            bind_addr: "127.0.0.1:8501".to_string(),
            title: "Channel Management System".to_string(),
        }
    }
}

impl DeskConfig {
    /// Load from a JSON config file.
    /// An absent file yields the defaults; keys missing from the file
    /// fall back to their defaults too.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("config: {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: DeskConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Defaults pointed at a specific data directory (used in tests).
    pub fn for_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DeskConfig::load(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DeskConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "bind_addr": "0.0.0.0:9000" }"#).unwrap();

        let config = DeskConfig::load(&path).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.title, "Channel Management System");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "not json").unwrap();
        assert!(DeskConfig::load(&path).is_err());
    }
}
