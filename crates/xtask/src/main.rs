use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;
use doxy2cdt::cli::Cli;

const BIN_NAME: &str = "doxy2cdt";

#[derive(Parser)]
#[command(author, version, about)]
struct Xtask {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Write shell completions and the manpage for the doxy2cdt CLI
  Dist {
    /// Output directory for generated files.
    #[arg(short, long, default_value = "dist")]
    output_dir: PathBuf,
  },

  /// Write shell completions only
  Completions {
    /// Output directory for the completion scripts.
    #[arg(short, long, default_value = "dist/completions")]
    output_dir: PathBuf,

    /// Shell to generate for. All supported shells if omitted.
    #[arg(short, long, value_enum)]
    shell: Option<Shell>,
  },

  /// Write the manpage only
  Manpage {
    /// Output directory for `doxy2cdt.1`.
    #[arg(short, long, default_value = "dist/man")]
    output_dir: PathBuf,
  },
}

fn main() -> Result<()> {
  match Xtask::parse().command {
    Commands::Dist { output_dir } => {
      generate_completions(&output_dir.join("completions"), Shell::value_variants())?;
      generate_manpage(&output_dir.join("man"))?;
    },
    Commands::Completions { output_dir, shell } => {
      match shell {
        Some(shell) => generate_completions(&output_dir, &[shell])?,
        None => generate_completions(&output_dir, Shell::value_variants())?,
      }
    },
    Commands::Manpage { output_dir } => generate_manpage(&output_dir)?,
  }

  Ok(())
}

fn generate_completions(dir: &Path, shells: &[Shell]) -> Result<()> {
  fs::create_dir_all(dir)
    .with_context(|| format!("Failed to create {}", dir.display()))?;

  let mut cmd = Cli::command();
  for &shell in shells {
    let path = generate_to(shell, &mut cmd, BIN_NAME, dir)
      .with_context(|| format!("Failed to write {shell} completions"))?;
    println!("Wrote {}", path.display());
  }
  Ok(())
}

fn generate_manpage(dir: &Path) -> Result<()> {
  fs::create_dir_all(dir)
    .with_context(|| format!("Failed to create {}", dir.display()))?;

  let path = dir.join(format!("{BIN_NAME}.1"));
  let mut file = fs::File::create(&path)
    .with_context(|| format!("Failed to create {}", path.display()))?;
  Man::new(Cli::command())
    .render(&mut file)
    .context("Failed to render manpage")?;
  println!("Wrote {}", path.display());
  Ok(())
}
