//! Pretty-printing and saving of CDT help index documents.
use std::{fs, path::Path};

use xmltree::EmitterConfig;

use crate::{cdt::CdtDocument, error::ConvertError};

/// Declaration written at the top of every output file.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Default number of spaces per indentation level.
pub const DEFAULT_INDENT: usize = 4;

/// Serialization settings for [`render_document`] and [`save_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
  /// Spaces per nesting level.
  pub indent: usize,
}

impl Default for WriteOptions {
  fn default() -> Self {
    Self {
      indent: DEFAULT_INDENT,
    }
  }
}

impl WriteOptions {
  fn emitter_config(self) -> EmitterConfig {
    EmitterConfig::new()
      .perform_indent(true)
      .indent_string(" ".repeat(self.indent))
      .write_document_declaration(false)
      .normalize_empty_elements(true)
      .pad_self_closing(false)
  }
}

/// Render `doc` as a complete XML file, declaration included.
///
/// # Errors
///
/// Returns [`ConvertError::EmptyDocument`] if `doc` has no root and
/// [`ConvertError::Serialize`] if the emitter fails.
pub fn render_document(
  doc: &CdtDocument,
  options: WriteOptions,
) -> Result<String, ConvertError> {
  let root = doc.root().ok_or(ConvertError::EmptyDocument)?;

  let mut buf = Vec::new();
  buf.extend_from_slice(XML_DECLARATION.as_bytes());
  buf.push(b'\n');
  root
    .write_with_config(&mut buf, options.emitter_config())
    .map_err(|e| ConvertError::Serialize(e.to_string()))?;
  buf.push(b'\n');

  String::from_utf8(buf).map_err(|e| ConvertError::Serialize(e.to_string()))
}

/// Render `doc` and write it to `path` in one go.
///
/// Nothing is written if rendering fails.
///
/// # Errors
///
/// Returns the errors of [`render_document`], or [`ConvertError::Io`] if the
/// file cannot be written.
pub fn save_document(
  doc: &CdtDocument,
  path: &Path,
  options: WriteOptions,
) -> Result<(), ConvertError> {
  let rendered = render_document(doc, options)?;
  fs::write(path, rendered).map_err(|source| {
    ConvertError::Io {
      path: path.to_path_buf(),
      source,
    }
  })
}
