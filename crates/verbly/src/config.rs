use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::debug;
use verbly_core::{
    db::Database,
    error::{Error, ErrorClass, ErrorOrigin},
};

const DEFAULT_DATABASE: &str = "verbly.sqlite3";

///
/// ConfigError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConfigError {
    #[error("cannot read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("query.default_limit must be positive")]
    ZeroLimit,
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorClass::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// Config
///
/// Contents of `verbly.toml`. Every table and key is optional.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database: DatabaseConfig,
    pub query: QueryConfig,
}

///
/// DatabaseConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub path: PathBuf,

    /// Log every prepared statement at `info`.
    pub debug: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE),
            debug: false,
        }
    }
}

///
/// QueryConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    pub default_limit: Option<u32>,
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(source).map_err(|err| ConfigError::Parse(err.message().to_string()))?;

        if config.query.default_limit == Some(0) {
            return Err(ConfigError::ZeroLimit);
        }

        Ok(config)
    }

    /// Read and parse `path`. A relative database path is resolved against
    /// the directory holding the config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

        let mut config = Self::from_toml_str(&source)?;
        if config.database.path.is_relative()
            && let Some(dir) = path.parent()
        {
            config.database.path = dir.join(&config.database.path);
        }
        debug!(config = %path.display(), database = %config.database.path.display(), "loaded config");

        Ok(config)
    }

    pub fn open_database(&self) -> Result<Database, Error> {
        Ok(Database::open(&self.database.path)?.with_debug(self.database.debug))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.database.path, PathBuf::from("verbly.sqlite3"));
        assert!(!config.database.debug);
        assert_eq!(config.query.default_limit, None);
    }

    #[test]
    fn full_source_parses() {
        let config = Config::from_toml_str(
            r#"
            [database]
            path = "/data/verbly.sqlite3"
            debug = true

            [query]
            default_limit = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/data/verbly.sqlite3"));
        assert!(config.database.debug);
        assert_eq!(config.query.default_limit, Some(25));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("[database]\nfile = \"x\"\n").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = Config::from_toml_str("[query]\ndefault_limit = 0\n").unwrap_err();

        assert_eq!(err, ConfigError::ZeroLimit);
    }

    #[test]
    fn missing_file_folds_into_config_error() {
        let err: Error = Config::load("/nonexistent/verbly.toml").unwrap_err().into();

        assert_eq!(err.class, ErrorClass::Config);
        assert_eq!(err.origin, ErrorOrigin::Config);
        assert!(err.message.starts_with("cannot read config /nonexistent/verbly.toml"));
    }

    #[test]
    fn relative_database_path_follows_config_dir() {
        let dir = std::env::temp_dir().join(format!("verbly-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("verbly.toml");
        fs::write(&file, "[database]\npath = \"words.sqlite3\"\n").unwrap();

        let config = Config::load(&file).unwrap();
        assert_eq!(config.database.path, dir.join("words.sqlite3"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn opening_a_missing_database_is_a_database_error() {
        let config = Config::from_toml_str("[database]\npath = \"/nonexistent/x.sqlite3\"\n").unwrap();
        let err = config.open_database().unwrap_err();

        assert_eq!(err.class, ErrorClass::Database);
    }
}
