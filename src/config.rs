//! Settings store for the redshift configuration file.
//!
//! redshift reads an INI-style file, by default
//! `$XDG_CONFIG_HOME/redshift/redshift.conf`. This module reads it back into
//! plain section/key/value mappings and writes the two sections this tool
//! owns:
//!
//! ```ini
//! ; Configuration generated by redshiftctl
//! [redshift]
//! temp-day = 6500
//! temp-night = 4500
//! brightness-day = 1.0
//! brightness-night = 1.0
//! gamma = 1.00:1.00:1.00
//! location-provider = manual
//!
//! [manual]
//! lat = 50.06
//! lon = 19.94
//! ```
//!
//! ## Loading
//!
//! A missing file is the normal first-run state and yields `None`. A file
//! that cannot be read or parsed is reported as a warning and also yields
//! `None`, so callers fall back to built-in defaults.
//!
//! ## Saving
//!
//! Saving replaces the whole file. Sections or keys added by hand (for
//! example `adjustment-method`) are not preserved.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::*;
use crate::error::ControlError;
use crate::logger::Log;
use crate::validation::GammaTriple;

/// Syntax errors in a configuration file. Line numbers are 1-based.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigParseError {
    #[error("line {line}: setting found before any [section] header")]
    MissingSectionHeader { line: usize },

    #[error("line {line}: malformed section header")]
    MalformedSection { line: usize },

    #[error("line {line}: expected 'key = value'")]
    MissingDelimiter { line: usize },

    #[error("line {line}: section [{name}] appears more than once")]
    DuplicateSection { line: usize, name: String },

    #[error("line {line}: key '{key}' appears more than once in [{section}]")]
    DuplicateKey {
        line: usize,
        section: String,
        key: String,
    },
}

/// Parsed contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSections {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl ConfigSections {
    /// Parse INI text.
    ///
    /// Full-line comments start with `;` or `#`. Keys are split from values
    /// at the first `=` or `:` and lower-cased; both sides are trimmed.
    /// Indented lines continue the previous value.
    pub fn parse(content: &str) -> Result<Self, ConfigParseError> {
        let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        let mut current_section: Option<String> = None;
        let mut current_key: Option<String> = None;

        for (index, raw_line) in content.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();

            if line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            // Continuation of a multi-line value, blank indented lines included
            if raw_line.starts_with(char::is_whitespace) {
                if let (Some(section), Some(key)) = (&current_section, &current_key) {
                    if let Some(value) = sections.get_mut(section).and_then(|s| s.get_mut(key)) {
                        value.push('\n');
                        value.push_str(line);
                        continue;
                    }
                }
            }

            if line.is_empty() {
                current_key = None;
                continue;
            }

            if line.starts_with('[') {
                let name = line
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .ok_or(ConfigParseError::MalformedSection { line: line_number })?;

                if sections.contains_key(name) {
                    return Err(ConfigParseError::DuplicateSection {
                        line: line_number,
                        name: name.to_string(),
                    });
                }
                sections.insert(name.to_string(), BTreeMap::new());
                current_section = Some(name.to_string());
                current_key = None;
                continue;
            }

            let Some(section) = current_section.as_ref() else {
                return Err(ConfigParseError::MissingSectionHeader { line: line_number });
            };

            let Some(split_at) = line.find(['=', ':']) else {
                return Err(ConfigParseError::MissingDelimiter { line: line_number });
            };
            let key = line[..split_at].trim().to_lowercase();
            let value = line[split_at + 1..].trim().to_string();
            if key.is_empty() {
                return Err(ConfigParseError::MissingDelimiter { line: line_number });
            }

            let entries = sections.entry(section.clone()).or_default();
            if entries.contains_key(&key) {
                return Err(ConfigParseError::DuplicateKey {
                    line: line_number,
                    section: section.clone(),
                    key,
                });
            }
            entries.insert(key.clone(), value);
            current_key = Some(key);
        }

        // Indented blank lines at the end of a value are padding
        for value in sections.values_mut().flat_map(BTreeMap::values_mut) {
            let trimmed_len = value.trim_end_matches('\n').len();
            value.truncate(trimmed_len);
        }

        Ok(Self { sections })
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Look up a value. Keys are matched case-insensitively.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)?
            .get(&key.to_lowercase())
            .map(String::as_str)
    }
}

/// Values written to the `[redshift]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct RedshiftSection {
    pub temp_day: String,
    pub temp_night: String,
    pub brightness_day: String,
    pub brightness_night: String,
    pub gamma: GammaTriple,
}

/// Values written to the `[manual]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualSection {
    pub lat: String,
    pub lon: String,
}

/// Render both sections as configuration file text.
pub fn render_config(redshift: &RedshiftSection, manual: &ManualSection) -> String {
    ConfigBuilder::new(CONFIG_HEADER)
        .add_section(REDSHIFT_SECTION)
        .add_setting("temp-day", &redshift.temp_day)
        .add_setting("temp-night", &redshift.temp_night)
        .add_setting("brightness-day", &redshift.brightness_day)
        .add_setting("brightness-night", &redshift.brightness_night)
        .add_setting("gamma", &redshift.gamma.to_string())
        .add_setting("location-provider", LOCATION_PROVIDER)
        .add_section(MANUAL_SECTION)
        .add_setting("lat", &manual.lat)
        .add_setting("lon", &manual.lon)
        .build()
}

/// Reads and writes one configuration file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location redshift itself reads: `<config dir>/redshift/redshift.conf`.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file, or `None` when it is absent or unusable.
    pub fn load(&self) -> Option<ConfigSections> {
        if !self.path.exists() {
            return None;
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                Log::log_warning(&format!(
                    "Failed to read configuration {}: {}",
                    path_for_display(&self.path),
                    e
                ));
                return None;
            }
        };

        match ConfigSections::parse(&content) {
            Ok(sections) => Some(sections),
            Err(e) => {
                Log::log_warning(&format!(
                    "Failed to parse configuration {}: {}",
                    path_for_display(&self.path),
                    e
                ));
                None
            }
        }
    }

    /// Overwrite the file with both sections, creating its directory first.
    pub fn save(
        &self,
        redshift: &RedshiftSection,
        manual: &ManualSection,
    ) -> Result<(), ControlError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ControlError::FileAccess {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, render_config(redshift, manual)).map_err(|source| {
            ControlError::FileAccess {
                path: self.path.clone(),
                source,
            }
        })
    }
}

/// Replace the home directory prefix with `~` for display.
pub fn path_for_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

/// Builder for configuration file text.
///
/// Produces a leading comment, then each section as a `[name]` header, its
/// `key = value` lines and a trailing blank line.
struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Comment(String),
    Section(String),
    Setting { key: String, value: String },
}

impl ConfigBuilder {
    fn new(header: &str) -> Self {
        Self {
            entries: vec![ConfigEntry::Comment(header.to_string())],
        }
    }

    fn add_section(mut self, name: &str) -> Self {
        self.entries.push(ConfigEntry::Section(name.to_string()));
        self
    }

    fn add_setting(mut self, key: &str, value: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            key: key.to_string(),
            value: value.to_string(),
        });
        self
    }

    fn build(self) -> String {
        let mut out = String::new();
        let mut in_section = false;

        for entry in self.entries {
            match entry {
                ConfigEntry::Comment(text) => {
                    out.push_str(&text);
                    out.push('\n');
                }
                ConfigEntry::Section(name) => {
                    if in_section {
                        out.push('\n');
                    }
                    out.push_str(&format!("[{}]\n", name));
                    in_section = true;
                }
                ConfigEntry::Setting { key, value } => {
                    // Indent continuation lines so multi-line values read back intact
                    out.push_str(&format!("{} = {}\n", key, value.replace('\n', "\n\t")));
                }
            }
        }

        if in_section {
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_sections() -> (RedshiftSection, ManualSection) {
        (
            RedshiftSection {
                temp_day: "6500".to_string(),
                temp_night: "4500".to_string(),
                brightness_day: "1.0".to_string(),
                brightness_night: "0.85".to_string(),
                gamma: GammaTriple::new(0.9, 1.0, 1.1),
            },
            ManualSection {
                lat: "50.06".to_string(),
                lon: "19.94".to_string(),
            },
        )
    }

    #[test]
    fn test_render_config_layout() {
        let (redshift, manual) = sample_sections();
        let expected = "; Configuration generated by redshiftctl\n\
                        [redshift]\n\
                        temp-day = 6500\n\
                        temp-night = 4500\n\
                        brightness-day = 1.0\n\
                        brightness-night = 0.85\n\
                        gamma = 0.90:1.00:1.10\n\
                        location-provider = manual\n\
                        \n\
                        [manual]\n\
                        lat = 50.06\n\
                        lon = 19.94\n\
                        \n";
        assert_eq!(render_config(&redshift, &manual), expected);
    }

    #[test]
    fn test_parse_redshift_style_file() {
        let content = "; Global settings for redshift\n\
                       [redshift]\n\
                       temp-day=5700\n\
                       Temp-Night: 3500\n\
                       # comment\n\
                       gamma=0.8:0.7:0.8\n\
                       \n\
                       [manual]\n\
                       lat=48.1\n\
                       lon=11.6\n";
        let sections = ConfigSections::parse(content).unwrap();
        assert_eq!(sections.get("redshift", "temp-day"), Some("5700"));
        assert_eq!(sections.get("redshift", "temp-night"), Some("3500"));
        assert_eq!(sections.get("redshift", "gamma"), Some("0.8:0.7:0.8"));
        assert_eq!(sections.get("manual", "LAT"), Some("48.1"));
        assert!(sections.has_section("manual"));
        assert!(!sections.has_section("randr"));
    }

    #[test]
    fn test_value_keeps_colons_after_first_delimiter() {
        let sections = ConfigSections::parse("[redshift]\ngamma = 1.00:1.00:1.00\n").unwrap();
        assert_eq!(sections.get("redshift", "gamma"), Some("1.00:1.00:1.00"));
    }

    #[test]
    fn test_continuation_lines() {
        let sections = ConfigSections::parse("[a]\nkey = first\n  second\n").unwrap();
        assert_eq!(sections.get("a", "key"), Some("first\nsecond"));
    }

    #[test]
    fn test_indented_blank_line_stays_in_value() {
        let sections =
            ConfigSections::parse("[a]\nkey = first\n\t\n\tthird\nnext = 1\n").unwrap();
        assert_eq!(sections.get("a", "key"), Some("first\n\nthird"));
        assert_eq!(sections.get("a", "next"), Some("1"));
    }

    #[test]
    fn test_trailing_indented_blank_lines_are_dropped() {
        let sections = ConfigSections::parse("[a]\nkey = value\n   \n\n[b]\n").unwrap();
        assert_eq!(sections.get("a", "key"), Some("value"));
        assert!(sections.has_section("b"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ConfigSections::parse("temp-day = 6500\n"),
            Err(ConfigParseError::MissingSectionHeader { line: 1 })
        );
        assert_eq!(
            ConfigSections::parse("[redshift\n"),
            Err(ConfigParseError::MalformedSection { line: 1 })
        );
        assert_eq!(
            ConfigSections::parse("[redshift]\njust-a-word\n"),
            Err(ConfigParseError::MissingDelimiter { line: 2 })
        );
        assert!(matches!(
            ConfigSections::parse("[a]\n[a]\n"),
            Err(ConfigParseError::DuplicateSection { line: 2, .. })
        ));
        assert!(matches!(
            ConfigSections::parse("[a]\nx = 1\nX = 2\n"),
            Err(ConfigParseError::DuplicateKey { line: 3, .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("absent.conf"));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_load_malformed_file_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("redshift.conf");
        fs::write(&path, "no section here = 1\n").unwrap();
        assert!(ConfigStore::new(&path).load().is_none());
    }

    #[test]
    fn test_save_creates_parent_and_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("redshift").join("redshift.conf");
        let store = ConfigStore::new(&path);

        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[randr]\nscreen = 1\n").unwrap();

        let (redshift, manual) = sample_sections();
        store.save(&redshift, &manual).unwrap();

        let loaded = store.load().unwrap();
        assert!(!loaded.has_section("randr"));
        assert_eq!(loaded.get("redshift", "location-provider"), Some("manual"));
        assert_eq!(loaded.get("manual", "lon"), Some("19.94"));
    }

    #[test]
    fn test_save_into_unwritable_location_is_file_access_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        // Parent "directory" is a regular file
        let store = ConfigStore::new(blocker.join("redshift.conf"));

        let (redshift, manual) = sample_sections();
        let err = store.save(&redshift, &manual).unwrap_err();
        assert!(matches!(err, ControlError::FileAccess { .. }));
    }

    #[test]
    fn test_multiline_value_round_trips() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("redshift.conf"));
        let (redshift, mut manual) = sample_sections();
        manual.lat = "50.06\nnorth".to_string();

        store.save(&redshift, &manual).unwrap();
        assert_eq!(
            store.load().unwrap().get("manual", "lat"),
            Some("50.06\nnorth")
        );
    }

    #[test]
    fn test_value_with_blank_line_round_trips() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("redshift.conf"));
        let (redshift, mut manual) = sample_sections();
        manual.lat = "50.06\n\nnorth".to_string();

        store.save(&redshift, &manual).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.get("manual", "lat"), Some("50.06\n\nnorth"));
        assert_eq!(loaded.get("manual", "lon"), Some("19.94"));
    }
}
