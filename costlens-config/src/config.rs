use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use costlens_base_schema::AggBy;
use costlens_filter::QueryFilters;
use costlens_log::LogConfig;
use serde::{Deserialize, Serialize};

/// Defines the source of a config error.
#[derive(Debug, Default)]
enum ConfigErrorSource {
    /// An error occurring independently.
    #[default]
    None,
    /// An error originating from a configuration file.
    File(PathBuf),
    /// An error originating from an invalid field value.
    Field(&'static str),
}

/// Indicates config related errors.
#[derive(Debug)]
pub struct ConfigError {
    source: ConfigErrorSource,
    kind: ConfigErrorKind,
    inner: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl ConfigError {
    #[inline]
    fn new(kind: ConfigErrorKind) -> Self {
        Self {
            source: ConfigErrorSource::None,
            kind,
            inner: None,
        }
    }

    #[inline]
    fn wrap<E>(inner: E, kind: ConfigErrorKind) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            source: ConfigErrorSource::None,
            kind,
            inner: Some(Box::new(inner)),
        }
    }

    #[inline]
    fn file(mut self, p: impl AsRef<Path>) -> Self {
        self.source = ConfigErrorSource::File(p.as_ref().to_path_buf());
        self
    }

    #[inline]
    fn field(mut self, name: &'static str) -> Self {
        self.source = ConfigErrorSource::Field(name);
        self
    }

    /// Returns the error kind of the error.
    pub fn kind(&self) -> ConfigErrorKind {
        self.kind
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            ConfigErrorSource::None => fmt::Display::fmt(&self.kind, f),
            ConfigErrorSource::File(file_name) => {
                write!(f, "{} (file {})", self.kind, file_name.display())
            }
            ConfigErrorSource::Field(name) => write!(f, "{} (field {})", self.kind, name),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner
            .as_deref()
            .map(|inner| inner as &(dyn Error + 'static))
    }
}

/// Indicates config related errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigErrorKind {
    /// Failed to open the file.
    #[error("could not open config file")]
    CouldNotOpenFile,
    /// Failed to serialize the configuration.
    #[error("could not write config file")]
    CouldNotWriteFile,
    /// Parsing YAML failed.
    #[error("could not parse yaml config file")]
    BadYaml,
    /// Parsing JSON failed.
    #[error("could not parse json config file")]
    BadJson,
    /// Invalid config value.
    #[error("invalid config value")]
    InvalidValue,
}

/// The largest accepted lookback, about one hundred years.
pub const MAX_LOOKBACK_DAYS: u32 = 36_500;

fn default_lookback_days() -> u32 {
    30
}

/// Defaults of the events explorer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// The bucket granularity a new explorer starts with.
    pub agg_by: AggBy,
    /// The number of days before now that a new explorer shows.
    ///
    /// Must be greater than zero and at most [`MAX_LOOKBACK_DAYS`].
    pub lookback_days: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            agg_by: AggBy::default(),
            lookback_days: default_lookback_days(),
        }
    }
}

impl ExplorerConfig {
    /// Returns the initial date range and granularity, ending at `now`.
    ///
    /// A lookback reaching before the earliest representable date starts the range there.
    pub fn query_filters(&self, now: DateTime<Utc>) -> QueryFilters {
        let from = Duration::try_days(i64::from(self.lookback_days))
            .and_then(|lookback| now.checked_sub_signed(lookback))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        QueryFilters {
            from,
            to: now,
            agg_by: self.agg_by,
        }
    }
}

/// The values of a configuration file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct ConfigValues {
    logging: LogConfig,
    explorer: ExplorerConfig,
}

impl ConfigValues {
    fn validate(&self) -> Result<(), ConfigError> {
        let lookback_days = self.explorer.lookback_days;
        if lookback_days == 0 || lookback_days > MAX_LOOKBACK_DAYS {
            return Err(
                ConfigError::new(ConfigErrorKind::InvalidValue).field("explorer.lookback_days")
            );
        }

        Ok(())
    }
}

/// Config struct.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    values: ConfigValues,
}

impl Config {
    /// Loads a config from a YAML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let file = fs::File::open(path)
            .map_err(|e| ConfigError::wrap(e, ConfigErrorKind::CouldNotOpenFile).file(path))?;
        let values: ConfigValues = serde_yaml::from_reader(io::BufReader::new(file))
            .map_err(|e| ConfigError::wrap(e, ConfigErrorKind::BadYaml).file(path))?;

        values.validate().map_err(|e| e.file(path))?;
        Ok(Config { values })
    }

    /// Creates a config from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Config, ConfigError> {
        let values: ConfigValues = serde_yaml::from_str(yaml)
            .map_err(|e| ConfigError::wrap(e, ConfigErrorKind::BadYaml))?;

        values.validate()?;
        Ok(Config { values })
    }

    /// Creates a config from a JSON value.
    ///
    /// This is mostly useful for tests.
    pub fn from_json_value(value: serde_json::Value) -> Result<Config, ConfigError> {
        let values: ConfigValues = serde_json::from_value(value)
            .map_err(|e| ConfigError::wrap(e, ConfigErrorKind::BadJson))?;

        values.validate()?;
        Ok(Config { values })
    }

    /// Serializes the config into a YAML string.
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(&self.values)
            .map_err(|e| ConfigError::wrap(e, ConfigErrorKind::CouldNotWriteFile))
    }

    /// Returns the logging configuration.
    pub fn logging(&self) -> &LogConfig {
        &self.values.logging
    }

    /// Returns the explorer defaults.
    pub fn explorer(&self) -> &ExplorerConfig {
        &self.values.explorer
    }
}
