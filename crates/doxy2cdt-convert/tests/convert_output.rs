#![allow(clippy::expect_used, reason = "Expect is acceptable in tests")]

use std::fs;

use doxy2cdt_convert::{
  CdtDocument,
  ConvertError,
  DoxyConverter,
  Element,
  WriteOptions,
  load_index,
  render_document,
  save_document,
};
use tempfile::tempdir;

const TITLE: &str = "MoSync API Reference";
const TYPE: &str = "HELP_TYPE_CPP";

fn convert_str(xml: &str, base_path: &str) -> String {
  let source = Element::parse(xml.as_bytes()).expect("parse input");
  let mut target = CdtDocument::new();
  DoxyConverter::new(base_path)
    .convert(&source, &mut target, TITLE, TYPE)
    .expect("convert");
  render_document(&target, WriteOptions::default()).expect("render")
}

#[test]
fn test_single_compound_end_to_end() {
  let output = convert_str(
    r#"<doxygenindex><compound refid="classFoo" kind="class"><name>Foo</name></compound></doxygenindex>"#,
    "/docs",
  );

  assert_eq!(
    output,
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<index title=\"MoSync API \
     Reference\" type=\"HELP_TYPE_CPP\">\n    <topic label=\"Foo\" \
     href=\"/docs/classFoo.html\"/>\n</index>\n"
  );
}

#[test]
fn test_conversion_is_idempotent() {
  let input = r#"<doxygenindex version="1.9.8">
  <compound refid="classFoo" kind="class"><name>Foo</name>
    <member refid="classFoo_1a9" kind="function"><name>run</name></member>
  </compound>
  <compound refid="ma_8h" kind="file"><name>ma.h</name></compound>
</doxygenindex>"#;

  let first = convert_str(input, "http://docs.example.com/api");
  let second = convert_str(input, "http://docs.example.com/api");
  assert_eq!(first, second);
}

#[test]
fn test_topic_count_matches_compounds_with_refid() {
  let input = r#"<doxygenindex>
  <compound refid="classA" kind="class"><name>A</name></compound>
  <compound kind="class"><name>NoRef</name></compound>
  <compound refid="" kind="class"><name>EmptyRef</name></compound>
  <compound refid="classB" kind="class"><name>B</name></compound>
</doxygenindex>"#;

  let source = Element::parse(input.as_bytes()).expect("parse input");
  let mut target = CdtDocument::new();
  let stats = DoxyConverter::new("/docs")
    .convert(&source, &mut target, TITLE, TYPE)
    .expect("convert");

  assert_eq!(target.topics().count(), 2);
  assert_eq!(stats.compounds, 2);
  assert_eq!(stats.skipped, 2);

  let labels: Vec<_> = target
    .topics()
    .filter_map(|t| t.attributes.get("label").cloned())
    .collect();
  assert_eq!(labels, vec!["A", "B"]);
}

#[test]
fn test_members_are_written_nested() {
  let output = convert_str(
    r#"<doxygenindex>
  <compound refid="classFoo" kind="class"><name>Foo</name>
    <member refid="classFoo_1a9" kind="function"><name>run</name></member>
  </compound>
</doxygenindex>"#,
    "/docs",
  );

  assert!(output.contains(
    "    <topic label=\"Foo\" href=\"/docs/classFoo.html\">\n        <topic \
     label=\"run\" href=\"/docs/classFoo.html#a9\"/>\n    </topic>"
  ));
}

#[test]
fn test_file_round_trip() {
  let temp_dir = tempdir().expect("tempdir");
  let input_path = temp_dir.path().join("index.xml");
  let output_path = temp_dir.path().join("cdt.xml");

  fs::write(
    &input_path,
    r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygenindex version="1.9.8">
  <compound refid="structMAPoint2d" kind="struct"><name>MAPoint2d</name></compound>
</doxygenindex>"#,
  )
  .expect("write input");

  let source = load_index(&input_path).expect("load index");
  let mut target = CdtDocument::new();
  DoxyConverter::new("/help/topic/com.mosync.doc/api")
    .convert(&source, &mut target, TITLE, TYPE)
    .expect("convert");
  save_document(&target, &output_path, WriteOptions::default()).expect("save");

  let written = fs::read_to_string(&output_path).expect("read output");
  assert!(written.contains(
    r#"<topic label="MAPoint2d" href="/help/topic/com.mosync.doc/api/structMAPoint2d.html"/>"#
  ));

  // The written file must itself be a well-formed document.
  let reparsed = load_index(&output_path).expect("reparse output");
  assert_eq!(reparsed.name, "index");
}

#[test]
fn test_missing_input_is_io_error() {
  let temp_dir = tempdir().expect("tempdir");
  let err = load_index(temp_dir.path().join("missing.xml"))
    .expect_err("missing file");
  assert!(matches!(err, ConvertError::Io { .. }));
}

#[test]
fn test_garbage_input_is_parse_error() {
  let temp_dir = tempdir().expect("tempdir");
  let input_path = temp_dir.path().join("index.xml");
  fs::write(&input_path, "<doxygenindex><compound>").expect("write input");

  let err = load_index(&input_path).expect_err("truncated XML");
  assert!(matches!(err, ConvertError::ParseXml { .. }));
}

#[test]
fn test_unwritable_output_is_io_error() {
  let temp_dir = tempdir().expect("tempdir");
  let source = Element::parse(&b"<doxygenindex/>"[..]).expect("parse input");
  let mut target = CdtDocument::new();
  DoxyConverter::new("/docs")
    .convert(&source, &mut target, TITLE, TYPE)
    .expect("convert");

  let output_path = temp_dir.path().join("no-such-dir").join("cdt.xml");
  let err = save_document(&target, &output_path, WriteOptions::default())
    .expect_err("parent directory does not exist");
  assert!(matches!(err, ConvertError::Io { .. }));
  assert!(!output_path.exists());
}
