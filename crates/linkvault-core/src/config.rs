//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/linkvault/config.toml)
//! 3. Environment variables (LINKVAULT_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::repository::ImportPolicy;

/// Environment variable prefix
const ENV_PREFIX: &str = "LINKVAULT";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the link store
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Write logs to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Policy used by `import` when no flag is given
    #[serde(default)]
    pub import_policy: ImportPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_file: None,
            import_policy: ImportPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (LINKVAULT_DATA_DIR, LINKVAULT_LOG_FILE, LINKVAULT_IMPORT_POLICY)
    /// 2. Config file (~/.config/linkvault/config.toml or LINKVAULT_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring an explicit path (e.g. `--config`)
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// An unrecognised `LINKVAULT_IMPORT_POLICY` is an error.
    fn apply_env_overrides(&mut self) -> Result<()> {
        // LINKVAULT_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // LINKVAULT_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        // LINKVAULT_IMPORT_POLICY
        if let Ok(val) = std::env::var(format!("{}_IMPORT_POLICY", ENV_PREFIX)) {
            self.import_policy = val
                .parse()
                .map_err(|e| anyhow!("Invalid {}_IMPORT_POLICY: {}", ENV_PREFIX, e))?;
        }

        Ok(())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with LINKVAULT_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("linkvault")
            .join("config.toml")
    }

    /// Get the path to the key-value store file
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("linkvault")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    pub(crate) struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        pub(crate) fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            // Clear all the vars
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    pub(crate) const ENV_VARS: &[&str] = &[
        "LINKVAULT_DATA_DIR",
        "LINKVAULT_LOG_FILE",
        "LINKVAULT_IMPORT_POLICY",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.log_file.is_none());
        assert_eq!(config.import_policy, ImportPolicy::Merge);
        assert!(config.data_dir.ends_with("linkvault"));
    }

    #[test]
    fn test_storage_path() {
        let config = Config::default();
        assert!(config.storage_path().ends_with("storage.json"));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LINKVAULT_DATA_DIR", "/tmp/linkvault-test");
        config.apply_env_overrides().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/linkvault-test"));
    }

    #[test]
    fn test_env_override_log_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LINKVAULT_LOG_FILE", "/tmp/linkvault.log");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/linkvault.log")));

        // Empty string clears it
        env::set_var("LINKVAULT_LOG_FILE", "");
        config.apply_env_overrides().unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_env_override_import_policy() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LINKVAULT_IMPORT_POLICY", "replace");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.import_policy, ImportPolicy::Replace);

        // Invalid values are rejected and leave the policy alone
        env::set_var("LINKVAULT_IMPORT_POLICY", "sometimes");
        let err = config.apply_env_overrides().unwrap_err();
        assert!(err.to_string().contains("LINKVAULT_IMPORT_POLICY"));
        assert_eq!(config.import_policy, ImportPolicy::Replace);
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/linkvault"),
            log_file: Some(PathBuf::from("/var/log/linkvault.log")),
            import_policy: ImportPolicy::Replace,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("import_policy = \"replace\""));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.log_file, config.log_file);
        assert_eq!(parsed.import_policy, config.import_policy);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            import_policy = "replace"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.import_policy, ImportPolicy::Replace);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.import_policy, ImportPolicy::Merge);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            log_file: None,
            import_policy: ImportPolicy::Replace,
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_with_cli_override(Some(&path)).unwrap();
        assert_eq!(loaded.data_dir, config.data_dir);
        assert_eq!(loaded.import_policy, ImportPolicy::Replace);
    }
}
