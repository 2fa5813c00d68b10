//! Store application configuration that gets read from disk
use crate::average::{ElevationPolicy, LengthPolicy, TrackAverager};
use crate::services::{new_track_writer, TrackWriter};
use crate::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::Value;
use simplelog::LevelFilter;
use std::collections::HashMap;
use std::io::prelude::*;
use std::iter::Iterator;
use std::path::PathBuf;
use std::str::FromStr;

static CONFIG_DIR_NAME: &str = "track-averager";
static CONFIG_FILE_NAME: &str = "config.yml";

/// Defines the allowed keys under the services map
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Output,
}

/// Type alias for clarity
pub type ServiceParameters = HashMap<String, Value>;

/// Configuration options for a single service of any type
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    handler: String,
    #[serde(default)]
    configuration: ServiceParameters,
}

impl ServiceConfig {
    pub fn new(handler: &str) -> Self {
        ServiceConfig {
            handler: handler.to_string(),
            configuration: HashMap::new(),
        }
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn parameters(&self) -> impl Iterator<Item = &String> + '_ {
        self.configuration.keys()
    }

    pub fn get_parameter_as_string(&self, key: &str) -> Option<Result<String, Error>> {
        self.configuration.get(key).map(|value| {
            value
                .as_str()
                .ok_or_else(|| {
                    Error::InvalidConfigurationValue(format!(
                        "invalid value for {}.{}, expected a string: {:?}",
                        &self.handler, key, value
                    ))
                })
                .map(|v| v.to_string())
        })
    }

    pub fn get_parameter_as_i64(&self, key: &str) -> Option<Result<i64, Error>> {
        self.configuration.get(key).map(|value| {
            value.as_i64().ok_or_else(|| {
                Error::InvalidConfigurationValue(format!(
                    "invalid value for {}.{}, expected an integer: {:?}",
                    &self.handler, key, value
                ))
            })
        })
    }
}

/// Build a service instance from its handler parameters
pub trait FromServiceConfig: Sized {
    fn from_config(config: &ServiceConfig) -> Result<Self, Error>;
}

/// Set a string parameter on the service instance from a ServiceConfig instance
#[macro_export]
macro_rules! set_string_param_from_config {
    ($b:expr, $k:ident, $c:expr) => {
        if let Some(val) = $c.get_parameter_as_string(stringify!($k)) {
            $b.$k = val?
        }
    };
}

/// Set an optional string parameter on the service instance from a ServiceConfig instance
#[macro_export]
macro_rules! set_opt_string_param_from_config {
    ($b:expr, $k:ident, $c:expr) => {
        if let Some(val) = $c.get_parameter_as_string(stringify!($k)) {
            $b.$k = Some(val?)
        }
    };
}

/// Set an integer parameter on the service instance, failing if it doesn't fit the field type
#[macro_export]
macro_rules! set_int_param_from_config {
    ($b:expr, $k:ident, $c:expr, $o:ident) => {
        if let Some(val) = $c.get_parameter_as_i64(stringify!($k)) {
            let val = val?;
            $b.$k = <$o as std::convert::TryFrom<i64>>::try_from(val).map_err(|_| {
                $crate::Error::InvalidConfigurationValue(format!(
                    "invalid value for {}.{}, out of range: {}",
                    $c.handler(),
                    stringify!($k),
                    val
                ))
            })?
        }
    };
}

/// Default averaging behavior, command line flags take precedence
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AveragingConfig {
    length_policy: LengthPolicy,
    missing_elevation: ElevationPolicy,
    validate_coordinates: bool,
}

impl AveragingConfig {
    pub fn length_policy(&self) -> LengthPolicy {
        self.length_policy
    }

    pub fn missing_elevation(&self) -> ElevationPolicy {
        self.missing_elevation
    }

    pub fn validate_coordinates(&self) -> bool {
        self.validate_coordinates
    }

    /// Build an averager using the configured policies
    pub fn averager(&self) -> TrackAverager {
        TrackAverager::new()
            .length_policy(self.length_policy)
            .elevation_policy(self.missing_elevation)
            .validate_coordinates(self.validate_coordinates)
    }
}

/// Configuration struct that we can create from the config file used
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(
        deserialize_with = "deserialize_level_filter",
        serialize_with = "serialize_level_filter"
    )]
    log_level: LevelFilter,
    averaging: AveragingConfig,
    services: HashMap<ServiceType, ServiceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: default_level_filter(),
            averaging: AveragingConfig::default(),
            services: HashMap::new(),
        }
    }
}

impl Config {
    pub fn load<T: Read>(source: &mut T) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(source)
    }

    /// Location of the config file in the user's configuration directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn averaging(&self) -> &AveragingConfig {
        &self.averaging
    }

    /// Return the configured output writer, `handler` replaces the configured handler name
    /// when provided. Parameters are only carried over if the handler names match.
    pub fn get_track_writer(&self, handler: Option<&str>) -> Result<Box<dyn TrackWriter>, Error> {
        let configured = self.services.get(&ServiceType::Output);
        match (configured, handler) {
            (Some(cfg), Some(name)) if cfg.handler() != name => {
                new_track_writer(&ServiceConfig::new(name))
            }
            (Some(cfg), _) => new_track_writer(cfg),
            (None, Some(name)) => new_track_writer(&ServiceConfig::new(name)),
            // GPX is the default output since it can be loaded back into any mapping tool
            (None, None) => new_track_writer(&ServiceConfig::new("gpx")),
        }
    }
}

fn deserialize_level_filter<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
where
    D: Deserializer<'de>,
{
    let buf = String::deserialize(deserializer)?;
    LevelFilter::from_str(&buf)
        .map_err(|_| serde::de::Error::custom(format!("invalid level value: {}", buf)))
}

fn serialize_level_filter<S>(level: &LevelFilter, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&level.to_string())
}

fn default_level_filter() -> LevelFilter {
    LevelFilter::Info
}
