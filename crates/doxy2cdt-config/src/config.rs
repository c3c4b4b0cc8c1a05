use std::{fs, path::Path};

use doxy2cdt_convert::{ConvertOptions, DEFAULT_INDENT, WriteOptions};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Title written on the generated `<index>` element by default.
pub const DEFAULT_TITLE: &str = "MoSync API Reference";

/// CDT help type written on the generated `<index>` element by default.
pub const DEFAULT_INDEX_TYPE: &str = "HELP_TYPE_CPP";

/// Largest accepted indentation width.
pub const MAX_INDENT: usize = 16;

/// Configuration for a doxy2cdt run.
///
/// [`Config`] holds everything about the output that is not a path: the
/// index title and type, the indentation width, and which Doxygen entries
/// become topics. Values come from the defaults, then config files, then
/// `KEY=VALUE` overrides, then explicit CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Value of the `title` attribute of the index.
  pub title: String,

  /// Value of the `type` attribute of the index.
  #[serde(rename = "type", alias = "index_type")]
  pub index_type: String,

  /// Spaces per nesting level in the written XML.
  pub indent: usize,

  /// Whether compound members become nested topics.
  pub include_members: bool,

  /// Doxygen kinds to leave out of the index.
  pub exclude_kinds: Vec<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      title:           DEFAULT_TITLE.to_string(),
      index_type:      DEFAULT_INDEX_TYPE.to_string(),
      indent:          DEFAULT_INDENT,
      include_members: true,
      exclude_kinds:   Vec::new(),
    }
  }
}

/// A config file's contents: only the keys the file actually sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
  pub title:           Option<String>,
  #[serde(rename = "type", alias = "index_type")]
  pub index_type:      Option<String>,
  pub indent:          Option<usize>,
  pub include_members: Option<bool>,
  pub exclude_kinds:   Vec<String>,
}

impl PartialConfig {
  /// Load a partial configuration from a file (TOML or JSON).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    match extension.as_deref() {
      Some("json") => Ok(serde_json::from_str(&content)?),
      Some("toml") => Ok(toml::from_str(&content)?),
      Some(_) => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }
}

impl Config {
  /// Load a complete configuration from a single file.
  ///
  /// Keys the file does not set keep their defaults.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let mut config = Self::default();
    config.merge(PartialConfig::from_file(path)?);
    Ok(config)
  }

  /// Build the configuration from config files and `KEY=VALUE` overrides.
  ///
  /// Files are merged in order, then overrides are applied, then the result
  /// is validated.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded, an override is invalid, or
  /// the final configuration fails [`Config::validate`].
  pub fn load<P: AsRef<Path>>(
    config_files: &[P],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = Self::default();

    for config_path in config_files {
      let config_path = config_path.as_ref();
      let layer = PartialConfig::from_file(config_path).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to load config from {}: {}",
          config_path.display(),
          e
        ))
      })?;
      config.merge(layer);
    }

    if config_files.len() > 1 {
      log::info!("Loaded and merged {} config files", config_files.len());
    }

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    config.validate()?;
    Ok(config)
  }

  /// Merge a config file's contents into this configuration.
  ///
  /// # Merge Rules
  ///
  /// - Keys the file sets replace the current value
  /// - `exclude_kinds` is appended to, skipping kinds already present
  pub fn merge(&mut self, other: PartialConfig) {
    if let Some(title) = other.title {
      self.title = title;
    }
    if let Some(index_type) = other.index_type {
      self.index_type = index_type;
    }
    if let Some(indent) = other.indent {
      self.indent = indent;
    }
    if let Some(include_members) = other.include_members {
      self.include_members = include_members;
    }
    self.extend_exclude_kinds(other.exclude_kinds);
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  ///
  /// - An override string is not in KEY=VALUE format
  /// - A key is not recognized
  /// - A value cannot be parsed as the expected type
  ///
  /// # Example
  ///
  /// ```rust, ignore
  /// config.apply_overrides(&vec![
  ///     "include_members=false".to_string(),
  ///     "title=My API".to_string(),
  /// ])?;
  /// ```
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
      "title" => self.title = value.to_string(),
      "type" | "index_type" => self.index_type = value.to_string(),
      "indent" => {
        self.indent = value.parse().map_err(|e| {
          ConfigError::Config(format!(
            "Invalid value for 'indent': '{value}' ({e})"
          ))
        })?;
      },
      "include_members" => self.include_members = parse_bool(key, value)?,
      "exclude_kinds" => {
        // An empty value clears the list.
        self.exclude_kinds.clear();
        self.extend_exclude_kinds(
          value
            .split(',')
            .map(str::trim)
            .filter(|kind| !kind.is_empty())
            .map(str::to_string),
        );
      },
      _ => {
        return Err(ConfigError::Config(format!(
          "Unknown configuration key: '{key}'"
        )));
      },
    }
    Ok(())
  }

  /// Add kinds to [`Config::exclude_kinds`], ignoring ones already listed.
  pub fn extend_exclude_kinds<I: IntoIterator<Item = String>>(
    &mut self,
    kinds: I,
  ) {
    for kind in kinds {
      if !self.exclude_kinds.contains(&kind) {
        self.exclude_kinds.push(kind);
      }
    }
  }

  /// Check that the configuration describes a writable index.
  ///
  /// # Errors
  ///
  /// Returns an error if the index type is empty or the indentation width
  /// exceeds [`MAX_INDENT`].
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.index_type.trim().is_empty() {
      return Err(ConfigError::Config(
        "Index type must not be empty".to_string(),
      ));
    }
    if self.indent > MAX_INDENT {
      return Err(ConfigError::Config(format!(
        "Indentation width {} exceeds the maximum of {MAX_INDENT}",
        self.indent
      )));
    }
    Ok(())
  }

  /// Traversal options for the converter.
  #[must_use]
  pub fn convert_options(&self) -> ConvertOptions {
    ConvertOptions {
      include_members: self.include_members,
      exclude_kinds:   self.exclude_kinds.clone(),
    }
  }

  /// Serialization options for the writer.
  #[must_use]
  pub const fn write_options(&self) -> WriteOptions {
    WriteOptions {
      indent: self.indent,
    }
  }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "on" | "1" => Ok(true),
    "false" | "no" | "off" | "0" => Ok(false),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid boolean value for '{key}': '{value}'"
      )))
    },
  }
}
