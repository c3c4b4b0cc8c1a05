//! Expose doxy2cdt's driver for use in integration tests. The conversion
//! itself lives in `doxy2cdt-convert`; this crate only wires the command line,
//! configuration and file I/O around it.
pub mod cli;
pub mod generate;

pub use generate::generate_index;
