use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::errors::{ImscError, ImscResult};
use crate::ttml::time::TimeCodeFormat;

/// Application configuration module
/// This module handles the converter configuration: loading, validating
/// and providing defaults for the IMSC writer and the CLI.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// IMSC writer/reader settings
    #[serde(default)]
    pub imsc: ImscConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings that shape the generated document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImscConfig {
    /// Value of the root `xml:lang` attribute
    #[serde(default = "default_language")]
    pub default_language: String,

    /// How `begin`/`end` are rendered
    #[serde(default)]
    pub time_code_format: TimeCodeFormat,

    /// Frames per second for frame-based time expressions
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Ticks per second for tick-based time expressions
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u64,

    /// Whether unknown legacy regions get a default `region` declaration
    #[serde(default = "default_true")]
    pub inject_default_regions: bool,
}

impl Default for ImscConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            time_code_format: TimeCodeFormat::default(),
            frame_rate: default_frame_rate(),
            tick_rate: default_tick_rate(),
            inject_default_regions: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Maps to the `log` crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_frame_rate() -> u32 {
    25
}

fn default_tick_rate() -> u64 {
    10_000_000
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.imsc.validate()?;
        Ok(())
    }
}

impl ImscConfig {
    /// Validate the writer settings
    pub fn validate(&self) -> ImscResult<()> {
        // An empty language is legal TTML (xml:lang="")
        if !self.default_language.is_empty() {
            crate::language_utils::validate_language_code(&self.default_language)
                .map_err(|e| ImscError::Config(e.to_string()))?;
        }

        if self.frame_rate == 0 {
            return Err(ImscError::Config("Frame rate must be greater than zero".to_string()));
        }

        if self.tick_rate == 0 {
            return Err(ImscError::Config("Tick rate must be greater than zero".to_string()));
        }

        Ok(())
    }
}
