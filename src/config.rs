use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load config from `config_path` if given (or `<data_dir>/config.toml`
    /// when present), falling back to defaults. Unset paths are resolved
    /// relative to the data directory.
    pub fn load(config_path: Option<&Path>, data_dir: Option<&Path>) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(data_dir);
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        if config.database.path.is_none() {
            config.database.path = Some(data_dir.join("localfeed.db"));
        }

        Ok(config)
    }

    pub fn data_dir(override_dir: Option<&Path>) -> PathBuf {
        override_dir.map(Path::to_path_buf).unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".localfeed")
        })
    }

    pub fn db_path(&self) -> &PathBuf {
        self.database.path.as_ref().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_resolves_db_under_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load(None, Some(tmp.path())).unwrap();
        assert_eq!(config.db_path(), &tmp.path().join("localfeed.db"));
    }

    #[test]
    fn config_file_overrides_db_path() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[database]\npath = \"/tmp/custom.db\"\n").unwrap();

        let config = Config::load(Some(&config_path), Some(tmp.path())).unwrap();
        assert_eq!(config.db_path(), &PathBuf::from("/tmp/custom.db"));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&tmp.path().join("absent.toml")), Some(tmp.path())).unwrap();
        assert!(config.db_path().starts_with(tmp.path()));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "not valid toml [[").unwrap();
        assert!(Config::load(Some(&config_path), Some(tmp.path())).is_err());
    }
}
