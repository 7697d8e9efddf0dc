use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::version::bounds::SearchBounds;
use crate::version::error::ConfigError;
use crate::version::strategy::{Resolver, Strategy};

/// File name looked up inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Resolver configuration structure
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Strategy used when the caller does not pick one
    pub strategy: Strategy,
    /// Search space for range boundaries and overlaps
    pub bounds: SearchBounds,
}

impl ResolverConfig {
    /// Read a configuration file; every field is optional.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` when given, else the default config file if it
    /// exists, else defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let path = default_config_path();
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.bounds)
    }
}

/// Returns the path to the config directory for hclsemver.
/// Uses $XDG_CONFIG_HOME/hclsemver if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/hclsemver,
/// or ./hclsemver if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("hclsemver")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn resolver_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<ResolverConfig>(json!({
            "bounds": {
                "maxMajor": 40
            }
        }))
        .unwrap();

        assert_eq!(result.strategy, Strategy::Dynamic);
        assert_eq!(result.bounds, SearchBounds::new(40, 50, 50));
    }

    #[test]
    fn resolver_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<ResolverConfig>(json!({
            "strategy": "range",
            "bounds": {
                "maxMajor": 10,
                "maxMinor": 20,
                "maxPatch": 30
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            ResolverConfig {
                strategy: Strategy::Range,
                bounds: SearchBounds::new(10, 20, 30),
            }
        );
    }

    #[test]
    fn resolver_config_rejects_unknown_strategy() {
        let result = serde_json::from_value::<ResolverConfig>(json!({ "strategy": "latest" }));
        assert!(result.is_err());
    }

    #[test]
    fn load_reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "strategy": "exact" }}"#).unwrap();

        let config = ResolverConfig::load(file.path()).unwrap();

        assert_eq!(config.strategy, Strategy::Exact);
        assert_eq!(config.bounds, SearchBounds::default());
    }

    #[test]
    fn load_reports_invalid_json_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = ResolverConfig::load(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Json { ref path, .. } if path == file.path()));
    }

    #[test]
    fn load_or_default_fails_for_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");

        let err = ResolverConfig::load_or_default(Some(&missing)).unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn config_dir_with_env_uses_xdg_config_home_when_set() {
        let path = config_dir_with_env(
            Some("/tmp/test-config".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-config/hclsemver"));
    }

    #[test]
    fn config_dir_with_env_ignores_empty_xdg_config_home() {
        let path = config_dir_with_env(Some(String::new()), Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.config/hclsemver"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_home_config() {
        let path = config_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.config/hclsemver"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = config_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./hclsemver"));
    }
}
