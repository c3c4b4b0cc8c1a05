//! `doxy2cdt-convert`.
//!
//! Turns the `index.xml` that Doxygen writes with `GENERATE_XML = YES` into
//! an index for the Eclipse CDT dynamic help system. Every compound becomes
//! a `<topic>` whose `href` points at the Doxygen HTML page for it, and
//! every member becomes a `<topic>` nested inside its compound's, pointing
//! at the member's anchor on that page.
//!
//! # Example
//!
//! ```no_run
//! use doxy2cdt_convert::{
//!   CdtDocument,
//!   DoxyConverter,
//!   WriteOptions,
//!   load_index,
//!   save_document,
//! };
//!
//! let source = load_index("xml/index.xml").unwrap();
//! let mut target = CdtDocument::new();
//! DoxyConverter::new("/docs")
//!   .convert(&source, &mut target, "My API", "HELP_TYPE_CPP")
//!   .unwrap();
//! save_document(&target, "cdt.xml".as_ref(), WriteOptions::default())
//!   .unwrap();
//! ```

pub mod cdt;
mod convert;
pub mod doxygen;
pub mod error;
mod writer;

use std::{fs::File, io::BufReader, path::Path};

pub use cdt::CdtDocument;
pub use convert::{ConversionStats, ConvertOptions, DoxyConverter};
pub use error::ConvertError;
pub use writer::{
  DEFAULT_INDENT,
  WriteOptions,
  XML_DECLARATION,
  render_document,
  save_document,
};
pub use xmltree::Element;

/// Read and parse a Doxygen index file.
///
/// Only well-formedness is checked here; the root element is validated by
/// [`DoxyConverter::convert`].
///
/// # Errors
///
/// Returns [`ConvertError::Io`] if the file cannot be opened and
/// [`ConvertError::ParseXml`] if it is not well-formed XML.
pub fn load_index(path: impl AsRef<Path>) -> Result<Element, ConvertError> {
  let path = path.as_ref();
  let file = File::open(path).map_err(|source| {
    ConvertError::Io {
      path: path.to_path_buf(),
      source,
    }
  })?;

  Element::parse(BufReader::new(file)).map_err(|source| {
    ConvertError::ParseXml {
      path: path.to_path_buf(),
      source,
    }
  })
}
