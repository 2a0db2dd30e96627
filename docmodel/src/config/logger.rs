use std::{error::Error, fmt};

use config::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use super::{Config, ConfigPrefix};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub level: LogLevel,
}

impl LoggerConfig {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.get()
    }

    /// Installs a global fmt subscriber at the configured level.
    ///
    /// Fails when a global subscriber is already set.
    pub fn init_logger(&self) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
        tracing_subscriber::fmt()
            .with_max_level(self.level.as_tracing_level_filter())
            .try_init()
    }
}

impl ConfigPrefix for LoggerConfig {
    const PREFIX: &'static str = "logger";
}

#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> Option<tracing::Level> {
        match self {
            LogLevel::Trace => Some(tracing::Level::TRACE),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Off => None,
        }
    }

    pub fn as_tracing_level_filter(&self) -> LevelFilter {
        match self.as_tracing_level() {
            Some(level) => LevelFilter::from_level(level),
            None => LevelFilter::OFF,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            LogLevel::Trace => "Trace",
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Warn => "Warn",
            LogLevel::Error => "Error",
            LogLevel::Off => "Off",
        };

        f.write_str(level)
    }
}
