use std::path::PathBuf;

use clap::Parser;
use doxy2cdt_config::{Config, ConfigError};

/// Command line interface for doxy2cdt
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Convert a Doxygen XML index into an Eclipse CDT dynamic help index"
)]
pub struct Cli {
  /// The `index.xml` Doxygen writes when `GENERATE_XML = YES` is set.
  #[arg(value_name = "DOXYGEN_INPUT_XML")]
  pub doxygen_input_xml: PathBuf,

  /// URL or path prefix of the Doxygen HTML pages, as Eclipse should see
  /// them (e.g. `/help/topic/com.example.doc/html`).
  #[arg(value_name = "ECLIPSE_BASE_PATH")]
  pub eclipse_base_path: String,

  /// Where to write the CDT help index.
  #[arg(value_name = "CDT_OUTPUT_XML")]
  pub cdt_output_xml: PathBuf,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Files are merged in order, with later files overriding earlier
  /// ones
  #[arg(short = 'c', long = "config-file", action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,

  /// Title of the help index.
  #[arg(short = 'T', long)]
  pub title: Option<String>,

  /// CDT help type of the index.
  #[arg(long = "index-type")]
  pub index_type: Option<String>,

  /// Spaces per indentation level in the written XML.
  #[arg(long, value_parser = clap::value_parser!(usize))]
  pub indent: Option<usize>,

  /// Only emit topics for compounds, not for their members.
  #[arg(long = "no-members", action = clap::ArgAction::SetTrue)]
  pub no_members: bool,

  /// Doxygen kind to leave out of the index, e.g. `file` or `dir` (can be
  /// specified multiple times)
  #[arg(short = 'x', long = "exclude-kind", action = clap::ArgAction::Append)]
  pub exclude_kinds: Vec<String>,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Resolve the run configuration.
  ///
  /// Config files and `--config` overrides are applied first; explicit flags
  /// such as `--title` win over both.
  ///
  /// # Errors
  ///
  /// Returns an error if a config file or override is invalid, or if the
  /// final configuration does not validate.
  pub fn config(&self) -> Result<Config, ConfigError> {
    let mut config = Config::load(&self.config_files, &self.config_overrides)?;

    if let Some(title) = &self.title {
      config.title.clone_from(title);
    }
    if let Some(index_type) = &self.index_type {
      config.index_type.clone_from(index_type);
    }
    if let Some(indent) = self.indent {
      config.indent = indent;
    }
    if self.no_members {
      config.include_members = false;
    }
    config.extend_exclude_kinds(self.exclude_kinds.iter().cloned());

    config.validate()?;
    Ok(config)
  }
}
