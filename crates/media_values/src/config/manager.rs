//! Config manager for loading, saving, and atomic updates.
//!
//! Key features:
//! - Atomic writes (write to temp file, then rename)
//! - Section-level updates (only modified section is changed)
//! - Validation on load (undefined rationals are rejected)
//! - Preserves comments and formatting with toml_edit

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::{DocumentMut, Item};

use super::settings::{ConfigSection, Settings};

/// Failures loading, validating, or writing the media values config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to parse config for editing: {0}")]
    EditParseError(#[from] toml_edit::TomlError),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result of a [`ConfigManager`] operation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Owns the TOML file holding logging level and default track values.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Manager for `config_path`, starting from built-in defaults until loaded.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// File this manager reads and writes.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Settings as last loaded or edited.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// In-memory edits; persisted by `save()` or `update_section()`.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Load config from file.
    ///
    /// Returns error if file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = parse_and_validate(&content)?;
        tracing::info!(path = %self.config_path.display(), "Loaded config");
        Ok(())
    }

    /// Load config from file, creating with defaults if it doesn't exist.
    ///
    /// Rewrites the file when it had unknown sections, unknown keys, or
    /// missing keys. Values under unknown keys are dropped with a warning.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            let (settings, was_modified) = parse_validate_and_clean(&content)?;
            self.settings = settings;

            if was_modified {
                tracing::debug!(path = %self.config_path.display(), "Normalizing config file");
                self.save()?;
            }
        } else {
            tracing::info!(path = %self.config_path.display(), "Creating default config");
            self.settings = Settings::default();
            self.save()?;
        }
        Ok(())
    }

    /// Save the entire config atomically.
    pub fn save(&self) -> ConfigResult<()> {
        validate(&self.settings)?;
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    /// Update a specific section atomically.
    ///
    /// Re-reads the file from disk and replaces only the given table, so
    /// hand edits in other sections survive.
    pub fn update_section(&mut self, section: ConfigSection) -> ConfigResult<()> {
        validate(&self.settings)?;

        let current_content = if self.config_path.exists() {
            fs::read_to_string(&self.config_path)?
        } else {
            String::new()
        };

        let mut doc: DocumentMut = if current_content.is_empty() {
            DocumentMut::new()
        } else {
            current_content.parse()?
        };

        let section_doc: DocumentMut = self.section_toml(section)?.parse()?;
        doc[section.table_name()] = Item::Table(section_doc.as_table().clone());

        self.atomic_write(&doc.to_string())?;
        tracing::debug!(section = section.table_name(), "Updated config section");

        Ok(())
    }

    fn section_toml(&self, section: ConfigSection) -> ConfigResult<String> {
        let text = match section {
            ConfigSection::Logging => toml::to_string_pretty(&self.settings.logging)?,
            ConfigSection::Defaults => toml::to_string_pretty(&self.settings.defaults)?,
        };
        Ok(text)
    }

    /// Generate config content with a comment above each section.
    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::new();

        output.push_str("# Media Values Configuration\n");
        output.push_str(
            "# This file is auto-generated. Comments may be preserved on section updates.\n",
        );

        for section in ConfigSection::ALL {
            output.push('\n');
            output.push_str(&format!("# {}\n", section.description()));
            output.push_str(&format!("[{}]\n", section.table_name()));
            for line in self.section_toml(section)?.lines() {
                output.push_str(line);
                output.push('\n');
            }
        }

        Ok(output)
    }

    /// Replace the config file via a sibling `.toml.tmp` and a rename, so
    /// readers never see a half-written file.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Same directory, so the rename stays on one filesystem
        let temp_path = self.config_path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}

/// Parse and validate config content.
fn parse_and_validate(content: &str) -> ConfigResult<Settings> {
    let settings: Settings = toml::from_str(content)?;
    validate(&settings)?;
    Ok(settings)
}

/// Parse, validate, and report whether the file needs rewriting.
///
/// A file needs rewriting when its sections or the keys inside them differ
/// from what the parsed settings serialize to. That catches unknown
/// sections, misspelled keys, and keys filled in from defaults.
fn parse_validate_and_clean(content: &str) -> ConfigResult<(Settings, bool)> {
    let doc: DocumentMut = content.parse()?;
    let settings = parse_and_validate(content)?;
    let canonical: DocumentMut = toml::to_string_pretty(&settings)?.parse()?;

    let has_unknown_section = doc
        .iter()
        .any(|(key, _)| !ConfigSection::ALL.iter().any(|s| s.table_name() == key));

    let mut keys_differ = false;
    for section in ConfigSection::ALL {
        let name = section.table_name();
        let found = table_keys(doc.get(name));
        let expected = table_keys(canonical.get(name));
        if found == expected {
            continue;
        }
        keys_differ = true;
        if let (Some(found), Some(expected)) = (&found, &expected) {
            for key in found.difference(expected) {
                tracing::warn!(section = name, key = %key, "Dropping unknown config key");
            }
        }
    }

    Ok((settings, has_unknown_section || keys_differ))
}

/// Key names of a TOML table, or `None` when the item is absent or not a table.
fn table_keys(item: Option<&Item>) -> Option<BTreeSet<String>> {
    item.and_then(Item::as_table)
        .map(|table| table.iter().map(|(key, _)| key.to_string()).collect())
}

fn validate(settings: &Settings) -> ConfigResult<()> {
    let defaults = &settings.defaults;
    for (key, value) in [
        ("defaults.edit_rate", defaults.edit_rate),
        ("defaults.aspect_ratio", defaults.aspect_ratio),
    ] {
        if value.is_undefined() {
            return Err(ConfigError::InvalidValue {
                key,
                message: format!("{value} has a zero denominator"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use crate::models::{PulldownDirectionType, Rational};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_or_create_creates_default() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".config").join("media_values.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert!(config_path.exists());
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[logging]"));
        assert!(content.contains("[defaults]"));
        assert!(content.contains("edit_rate = \"25/1\""));
    }

    #[test]
    fn load_or_create_preserves_existing() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("media_values.toml");

        fs::write(
            &config_path,
            "[defaults]\nedit_rate = \"24000/1001\"\npulldown_direction = \"FilmToTapeSpeed\"\n",
        )
        .unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        let defaults = &manager.settings().defaults;
        assert_eq!(defaults.edit_rate, Rational::FILM_23_976);
        assert_eq!(
            defaults.pulldown_direction,
            PulldownDirectionType::FilmToTapeSpeed
        );

        // Missing keys were filled in on disk
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("aspect_ratio = \"16/9\""));
        assert!(content.contains("[logging]"));
    }

    #[test]
    fn load_or_create_normalizes_misspelled_key() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("media_values.toml");

        fs::write(
            &config_path,
            "[logging]\nlevel = \"info\"\n\n[defaults]\nedit_rat = \"30000/1001\"\n\
             aspect_ratio = \"4/3\"\npulldown_direction = \"FilmToTapeSpeed\"\n\
             pulldown_kind = \"PALPD\"\n",
        )
        .unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        let defaults = &manager.settings().defaults;
        assert_eq!(defaults.edit_rate, Rational::PAL_25);
        assert_eq!(defaults.aspect_ratio, Rational::new(4, 3));

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(!content.contains("edit_rat ="));
        assert!(content.contains("edit_rate = \"25/1\""));
        assert!(content.contains("aspect_ratio = \"4/3\""));
    }

    #[test]
    fn load_or_create_leaves_complete_file_alone() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("media_values.toml");

        let complete = "# hand-written\n[logging]\nlevel = \"warn\"\n\n[defaults]\n\
                        edit_rate = \"24/1\"\naspect_ratio = \"16/9\"\n\
                        pulldown_direction = \"TapeToFilmSpeed\"\npulldown_kind = \"TwoThreePD\"\n";
        fs::write(&config_path, complete).unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert_eq!(manager.settings().logging.level, LogLevel::Warn);
        assert_eq!(fs::read_to_string(&config_path).unwrap(), complete);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("absent.toml"));
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn load_rejects_malformed_rational() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("media_values.toml");
        fs::write(&config_path, "[defaults]\nedit_rate = \"25 / 1\"\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        assert!(matches!(manager.load(), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn load_rejects_undefined_edit_rate() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("media_values.toml");
        fs::write(&config_path, "[defaults]\nedit_rate = \"25/0\"\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        match manager.load() {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "defaults.edit_rate"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn update_section_only_changes_target() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("media_values.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        // Hand edit to the defaults section must survive a logging update
        let content = fs::read_to_string(&config_path).unwrap();
        fs::write(
            &config_path,
            content.replace("edit_rate = \"25/1\"", "edit_rate = \"60000/1001\""),
        )
        .unwrap();

        manager.settings_mut().logging.level = LogLevel::Debug;
        manager.update_section(ConfigSection::Logging).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("level = \"debug\""));
        assert!(content.contains("edit_rate = \"60000/1001\""));

        let mut reloaded = ConfigManager::new(&config_path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings().defaults.edit_rate, Rational::HD_59_94);
        assert_eq!(reloaded.settings().logging.level, LogLevel::Debug);
    }

    #[test]
    fn save_refuses_undefined_aspect_ratio() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("media_values.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.settings_mut().defaults.aspect_ratio.set_denominator(0);
        assert!(matches!(
            manager.save(),
            Err(ConfigError::InvalidValue { key: "defaults.aspect_ratio", .. })
        ));
        assert!(!config_path.exists());
    }

    #[test]
    fn atomic_write_creates_no_temp_on_success() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("media_values.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        let temp_path = config_path.with_extension("toml.tmp");
        assert!(!temp_path.exists());
    }
}
