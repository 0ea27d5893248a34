//! Settings struct with TOML-based sections.
//!
//! Rational and coded values are stored in their canonical text forms,
//! e.g. `edit_rate = "30000/1001"` and `pulldown_direction = "TapeToFilmSpeed"`.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::{PulldownDirectionType, PulldownKindType, Rational};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Default values applied to new media descriptions.
    #[serde(default)]
    pub defaults: DefaultSettings,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level when RUST_LOG is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Defaults for newly described tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultSettings {
    /// Edit rate for new tracks.
    #[serde(default = "default_edit_rate")]
    pub edit_rate: Rational,

    /// Display aspect ratio for new pictures.
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: Rational,

    /// Pulldown direction for film/video conversions.
    #[serde(default = "default_pulldown_direction")]
    pub pulldown_direction: PulldownDirectionType,

    /// Pulldown cadence for film/video conversions.
    #[serde(default = "default_pulldown_kind")]
    pub pulldown_kind: PulldownKindType,
}

fn default_edit_rate() -> Rational {
    Rational::PAL_25
}

fn default_aspect_ratio() -> Rational {
    Rational::new(16, 9)
}

fn default_pulldown_direction() -> PulldownDirectionType {
    PulldownDirectionType::TapeToFilmSpeed
}

fn default_pulldown_kind() -> PulldownKindType {
    PulldownKindType::TwoThreePD
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            edit_rate: default_edit_rate(),
            aspect_ratio: default_aspect_ratio(),
            pulldown_direction: default_pulldown_direction(),
            pulldown_kind: default_pulldown_kind(),
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Logging,
    Defaults,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 2] = [ConfigSection::Logging, ConfigSection::Defaults];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Logging => "logging",
            ConfigSection::Defaults => "defaults",
        }
    }

    /// Comment written above the section in generated files.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigSection::Logging => "Logging configuration",
            ConfigSection::Defaults => "Defaults for new tracks (rationals as \"N/D\")",
        }
    }
}
