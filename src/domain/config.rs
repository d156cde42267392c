use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::Threshold;

/// Configuration for plant bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The number of days a plant may go without water before it is
    /// reported as needing water.
    ///
    /// Always at least 1.
    threshold_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold_days: default_threshold_days(),
        }
    }
}

impl Config {
    /// The name of the configuration file within the store root.
    pub const FILE_NAME: &'static str = "config.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration from the store root.
    ///
    /// Returns `Ok(None)` if there is no configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from_root(root: &Path) -> Result<Option<Self>, String> {
        let path = root.join(Self::FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Loads the configuration from the store root, falling back to the
    /// defaults if it is missing or unreadable.
    ///
    /// A file that exists but cannot be loaded is reported as a warning.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        match Self::load_from_root(root) {
            Ok(Some(config)) => config,
            Ok(None) => {
                tracing::debug!("No config file in {}, using defaults", root.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the staleness threshold in days.
    #[must_use]
    pub const fn threshold_days(&self) -> u32 {
        self.threshold_days
    }

    /// Returns the staleness threshold.
    #[must_use]
    pub fn threshold(&self) -> Threshold {
        Threshold::days(self.threshold_days)
    }

    /// Sets the staleness threshold in days.
    ///
    /// # Errors
    ///
    /// Returns an error if `days` is zero.
    pub fn set_threshold_days(&mut self, days: u32) -> Result<(), String> {
        if days == 0 {
            return Err("threshold_days must be at least 1".to_string());
        }
        self.threshold_days = days;
        Ok(())
    }
}

const fn default_threshold_days() -> u32 {
    Threshold::DEFAULT_DAYS
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_threshold_days")]
        threshold_days: u32,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { threshold_days } => Self {
                // A zero threshold in a hand-edited file falls back to the default
                threshold_days: if threshold_days == 0 {
                    default_threshold_days()
                } else {
                    threshold_days
                },
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            threshold_days: config.threshold_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nthreshold_days = 10\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.threshold_days(), 10);
        assert_eq!(config.threshold(), Threshold::days(10));
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nthreshold_days = \"seven\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.threshold_days(), 7);
    }

    #[test]
    fn zero_threshold_in_file_falls_back_to_default() {
        let actual: Config = toml::from_str("_version = \"1\"\nthreshold_days = 0\n").unwrap();
        assert_eq!(actual, Config::default());
    }

    #[test]
    fn missing_file_in_root_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_from_root(tmp.path()), Ok(None));
    }

    #[test]
    fn malformed_file_in_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(Config::FILE_NAME),
            "_version = \"1\"\nthreshold_days = \"seven\"\n",
        )
        .unwrap();

        let error = Config::load_from_root(tmp.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
        assert_eq!(Config::load_or_default(tmp.path()), Config::default());
    }

    #[test]
    fn valid_file_in_root_is_loaded() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.set_threshold_days(4).unwrap();
        config.save(&tmp.path().join(Config::FILE_NAME)).unwrap();

        assert_eq!(Config::load_from_root(tmp.path()), Ok(Some(config.clone())));
        assert_eq!(Config::load_or_default(tmp.path()), config);
    }

    #[test]
    fn load_or_default_without_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_or_default(tmp.path()), Config::default());
    }

    #[test]
    fn set_threshold_rejects_zero() {
        let mut config = Config::default();
        assert!(config.set_threshold_days(0).is_err());
        assert_eq!(config.threshold_days(), 7);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(Config::FILE_NAME);
        let mut config = Config::default();
        config.set_threshold_days(3).unwrap();

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
