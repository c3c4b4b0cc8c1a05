use color_eyre::eyre::{Context, Result};
use doxy2cdt_convert::{
  CdtDocument,
  ConversionStats,
  DoxyConverter,
  load_index,
  save_document,
};
use log::info;

use crate::cli::Cli;

/// Convert the Doxygen index named on the command line and write the CDT
/// help index.
///
/// The output file is only written once the whole document has been built
/// and rendered.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the input cannot be read
/// or is not a Doxygen index, or the output cannot be written.
pub fn generate_index(cli: &Cli) -> Result<ConversionStats> {
  let config = cli
    .config()
    .wrap_err("Failed to resolve configuration")?;

  info!("Reading Doxygen index: {}", cli.doxygen_input_xml.display());
  let source = load_index(&cli.doxygen_input_xml)?;

  let converter = DoxyConverter::new(cli.eclipse_base_path.as_str())
    .with_options(config.convert_options());

  let mut target = CdtDocument::new();
  let stats = converter
    .convert(&source, &mut target, &config.title, &config.index_type)
    .wrap_err_with(|| {
      format!("Failed to convert {}", cli.doxygen_input_xml.display())
    })?;

  save_document(&target, &cli.cdt_output_xml, config.write_options())?;

  info!(
    "Wrote {} topics to {}",
    stats.topics(),
    cli.cdt_output_xml.display()
  );

  Ok(stats)
}
