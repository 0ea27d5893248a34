//! Configuration management for media value defaults.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use media_values::config::{ConfigManager, ConfigSection};
//! use media_values::Rational;
//!
//! let mut config = ConfigManager::new(".config/media_values.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Edit rate: {}", config.settings().defaults.edit_rate);
//!
//! config.settings_mut().defaults.edit_rate = Rational::NTSC_29_97;
//! config.update_section(ConfigSection::Defaults).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ConfigSection, DefaultSettings, LoggingSettings, Settings};
