use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, converting or writing an index.
#[derive(Debug, Error)]
pub enum ConvertError {
  /// A file could not be read from or written to disk.
  #[error("I/O error on `{path}`: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The input could not be parsed as XML at all.
  #[error("failed to parse `{path}` as XML: {source}")]
  ParseXml {
    path:   PathBuf,
    #[source]
    source: xmltree::ParseError,
  },

  /// The input parsed as XML but is not a Doxygen index.
  #[error("malformed Doxygen index: expected root element <{expected}>, found <{found}>")]
  MalformedInput { expected: &'static str, found: String },

  /// The conversion target already holds a root element.
  #[error("target document already has a root element <{0}>")]
  TargetNotEmpty(String),

  /// There is nothing to write.
  #[error("cannot serialize an empty document")]
  EmptyDocument,

  /// The XML emitter rejected the document.
  #[error("failed to serialize XML: {0}")]
  Serialize(String),
}
