//! Habit tracker configuration stored in `habits.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::io::store::JsonFileStore;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "habits.toml";

/// What to do when the habit file exists but cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptDataPolicy {
    /// Log a warning and continue with an empty collection.
    #[default]
    Reset,
    /// Fail the load; the file is left untouched.
    Reject,
}

/// Habit tracker configuration (TOML).
///
/// Missing fields take their defaults, so an empty file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HabitsConfig {
    /// Path of the JSON habit file, relative to the working directory.
    pub data_file: PathBuf,

    pub corrupt_data: CorruptDataPolicy,

    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for HabitsConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data.json"),
            corrupt_data: CorruptDataPolicy::default(),
            server: ServerConfig::default(),
        }
    }
}

impl HabitsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(anyhow!("data_file must not be empty"));
        }
        if self.server.bind.trim().is_empty() {
            return Err(anyhow!("server.bind must not be empty"));
        }
        Ok(())
    }

    /// Store backed by the configured data file.
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.data_file, self.corrupt_data)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `HabitsConfig::default()`.
pub fn load_config(path: &Path) -> Result<HabitsConfig> {
    if !path.exists() {
        let cfg = HabitsConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HabitsConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, HabitsConfig::default());
        assert_eq!(cfg.corrupt_data, CorruptDataPolicy::Reset);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("habits.toml");
        fs::write(
            &path,
            "data_file = \"state/habits.json\"\ncorrupt_data = \"reject\"\n\n[server]\nport = 8080\n",
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.data_file, PathBuf::from("state/habits.json"));
        assert_eq!(cfg.corrupt_data, CorruptDataPolicy::Reject);
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.bind, "127.0.0.1");
    }

    #[test]
    fn empty_data_file_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("habits.toml");
        fs::write(&path, "data_file = \"\"\n").expect("write");

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("data_file"));
    }

    #[test]
    fn unknown_policy_fails_to_parse() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("habits.toml");
        fs::write(&path, "corrupt_data = \"shrug\"\n").expect("write");

        assert!(load_config(&path).is_err());
    }
}
