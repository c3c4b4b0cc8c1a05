use color_eyre::eyre::Result;
use doxy2cdt::{cli::Cli, generate_index};
use log::LevelFilter;

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Auto)
    .init();

  generate_index(&cli)?;
  Ok(())
}
