//! Typed read access to a Doxygen `index.xml` tree.
//!
//! Doxygen's index is a flat manifest: a `<doxygenindex>` root holding one
//! `<compound>` per documented entity, each listing its `<member>`s. Every
//! entry carries a `refid` and a `kind` attribute and a `<name>` child. The
//! accessors here never fail on a missing attribute; they return [`None`]
//! (or an empty name) and leave the policy to the converter.
use std::borrow::Cow;

use xmltree::{Element, XMLNode};

use crate::error::ConvertError;

/// Name of the root element of a Doxygen index.
pub const INDEX_ROOT: &str = "doxygenindex";

const COMPOUND: &str = "compound";
const MEMBER: &str = "member";

/// Separator Doxygen places between a page refid and a member anchor.
///
/// Literal underscores in identifiers are escaped as `__` in refids, so `_1`
/// never occurs inside a name.
const ANCHOR_SEPARATOR: &str = "_1";

/// A validated view over the root of a Doxygen index document.
#[derive(Debug, Clone, Copy)]
pub struct DoxygenIndex<'a> {
  root: &'a Element,
}

impl<'a> DoxygenIndex<'a> {
  /// Wrap `root`, checking that it is a `<doxygenindex>` element.
  ///
  /// # Errors
  ///
  /// Returns [`ConvertError::MalformedInput`] if the root element has any
  /// other name.
  pub fn new(root: &'a Element) -> Result<Self, ConvertError> {
    if root.name != INDEX_ROOT {
      return Err(ConvertError::MalformedInput {
        expected: INDEX_ROOT,
        found:    root.name.clone(),
      });
    }
    Ok(Self { root })
  }

  /// Doxygen version that generated the index, if recorded.
  #[must_use]
  pub fn version(self) -> Option<&'a str> {
    attribute(self.root, "version")
  }

  /// All compounds, in document order.
  pub fn compounds(self) -> impl Iterator<Item = Compound<'a>> {
    child_elements(self.root, COMPOUND).map(|element| Compound { element })
  }
}

/// A `<compound>` entry: a class, struct, file, namespace, group or page.
#[derive(Debug, Clone, Copy)]
pub struct Compound<'a> {
  element: &'a Element,
}

impl<'a> Compound<'a> {
  /// The compound's reference id, which is also its HTML file stem.
  ///
  /// Absent and blank ids are both reported as [`None`].
  #[must_use]
  pub fn refid(self) -> Option<&'a str> {
    non_blank_attribute(self.element, "refid")
  }

  #[must_use]
  pub fn kind(self) -> Option<&'a str> {
    attribute(self.element, "kind")
  }

  /// Display name, empty if the entry has none.
  #[must_use]
  pub fn name(self) -> Cow<'a, str> {
    display_name(self.element)
  }

  /// Members listed under this compound, in document order.
  pub fn members(self) -> impl Iterator<Item = Member<'a>> {
    let compound_refid = self.refid();
    child_elements(self.element, MEMBER).map(move |element| {
      Member {
        element,
        compound_refid,
      }
    })
  }
}

/// A `<member>` entry nested in a compound.
#[derive(Debug, Clone, Copy)]
pub struct Member<'a> {
  element:        &'a Element,
  compound_refid: Option<&'a str>,
}

impl<'a> Member<'a> {
  #[must_use]
  pub fn refid(self) -> Option<&'a str> {
    non_blank_attribute(self.element, "refid")
  }

  #[must_use]
  pub fn kind(self) -> Option<&'a str> {
    attribute(self.element, "kind")
  }

  #[must_use]
  pub fn name(self) -> Cow<'a, str> {
    display_name(self.element)
  }

  /// The page stem and in-page anchor this member links to.
  ///
  /// Returns [`None`] when the member has no refid.
  #[must_use]
  pub fn location(self) -> Option<MemberLocation<'a>> {
    let refid = self.refid()?;
    Some(member_location(refid, self.compound_refid))
  }
}

/// Where a member is rendered: `<page>.html#<anchor>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberLocation<'a> {
  pub page:   &'a str,
  pub anchor: &'a str,
}

/// Split a member refid into the page it lives on and its anchor.
///
/// Doxygen builds member refids as `<page refid>_1<anchor>`. The page is
/// usually the enclosing compound, but members listed under a file can be
/// documented on a group or namespace page, in which case the refid prefix
/// names that page instead. A refid without any separator is treated as an
/// anchor on the enclosing compound's page.
fn member_location<'a>(
  member_refid: &'a str,
  compound_refid: Option<&'a str>,
) -> MemberLocation<'a> {
  if let Some(page) = compound_refid
    && let Some(anchor) = member_refid
      .strip_prefix(page)
      .and_then(|rest| rest.strip_prefix(ANCHOR_SEPARATOR))
    && !anchor.is_empty()
  {
    return MemberLocation { page, anchor };
  }

  match member_refid.rsplit_once(ANCHOR_SEPARATOR) {
    Some((page, anchor)) if !page.is_empty() && !anchor.is_empty() => {
      MemberLocation { page, anchor }
    },
    _ => {
      MemberLocation {
        page:   compound_refid.unwrap_or(member_refid),
        anchor: member_refid,
      }
    },
  }
}

fn child_elements<'a>(
  parent: &'a Element,
  name: &'static str,
) -> impl Iterator<Item = &'a Element> {
  parent
    .children
    .iter()
    .filter_map(|node| {
      match node {
        XMLNode::Element(element) => Some(element),
        _ => None,
      }
    })
    .filter(move |element| element.name == name)
}

fn attribute<'a>(element: &'a Element, key: &str) -> Option<&'a str> {
  element.attributes.get(key).map(String::as_str)
}

fn non_blank_attribute<'a>(element: &'a Element, key: &str) -> Option<&'a str> {
  attribute(element, key)
    .map(str::trim)
    .filter(|value| !value.is_empty())
}

/// The `<name>` child's text, falling back to a `name` attribute.
fn display_name(element: &Element) -> Cow<'_, str> {
  element
    .get_child("name")
    .and_then(Element::get_text)
    .or_else(|| attribute(element, "name").map(Cow::Borrowed))
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]

  use super::*;

  fn parse(xml: &str) -> Element {
    Element::parse(xml.as_bytes()).expect("valid test XML")
  }

  #[test]
  fn test_rejects_foreign_root() {
    let root = parse("<doxygen><compound refid=\"a\"/></doxygen>");
    let err = DoxygenIndex::new(&root).expect_err("wrong root must fail");
    assert!(matches!(
      err,
      ConvertError::MalformedInput { found, .. } if found == "doxygen"
    ));
  }

  #[test]
  fn test_compounds_in_document_order() {
    let root = parse(
      r#"<doxygenindex version="1.9.8">
  <compound refid="classB" kind="class"><name>B</name></compound>
  <compound refid="classA" kind="class"><name>A</name></compound>
  <compound refid="file_8h" kind="file"><name>file.h</name></compound>
</doxygenindex>"#,
    );
    let index = DoxygenIndex::new(&root).expect("doxygen index");
    assert_eq!(index.version(), Some("1.9.8"));

    let names: Vec<_> = index.compounds().map(|c| c.name()).collect();
    assert_eq!(names, vec!["B", "A", "file.h"]);

    let kinds: Vec<_> = index.compounds().filter_map(Compound::kind).collect();
    assert_eq!(kinds, vec!["class", "class", "file"]);
  }

  #[test]
  fn test_blank_refid_is_missing() {
    let root = parse(
      r#"<doxygenindex>
  <compound refid="  " kind="class"><name>Blank</name></compound>
  <compound kind="class"><name>Absent</name></compound>
</doxygenindex>"#,
    );
    let index = DoxygenIndex::new(&root).expect("doxygen index");
    assert!(index.compounds().all(|c| c.refid().is_none()));
  }

  #[test]
  fn test_name_falls_back_to_attribute() {
    let root = parse(
      r#"<doxygenindex>
  <compound refid="classFoo" name="Foo" kind="class"/>
  <compound refid="classBar" kind="class"/>
</doxygenindex>"#,
    );
    let index = DoxygenIndex::new(&root).expect("doxygen index");
    let names: Vec<_> = index.compounds().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Foo", ""]);
  }

  #[test]
  fn test_member_location_on_compound_page() {
    let root = parse(
      r#"<doxygenindex>
  <compound refid="classFoo" kind="class"><name>Foo</name>
    <member refid="classFoo_1a2f3c" kind="function"><name>bar</name></member>
  </compound>
</doxygenindex>"#,
    );
    let index = DoxygenIndex::new(&root).expect("doxygen index");
    let compound = index.compounds().next().expect("one compound");
    let member = compound.members().next().expect("one member");

    assert_eq!(member.name(), "bar");
    assert_eq!(member.kind(), Some("function"));
    assert_eq!(
      member.location(),
      Some(MemberLocation {
        page:   "classFoo",
        anchor: "a2f3c",
      })
    );
  }

  #[test]
  fn test_member_location_on_foreign_page() {
    // A function declared in a header but documented in a group.
    let location = member_location("group__maapi_1ga9d1f", Some("maapi_8h"));
    assert_eq!(location.page, "group__maapi");
    assert_eq!(location.anchor, "ga9d1f");
  }

  #[test]
  fn test_member_location_with_escaped_underscores() {
    let location = member_location("classa__1b_1a77", Some("classa__1b"));
    assert_eq!(location.page, "classa__1b");
    assert_eq!(location.anchor, "a77");
  }

  #[test]
  fn test_member_location_without_separator() {
    let location = member_location("plainanchor", Some("classFoo"));
    assert_eq!(location.page, "classFoo");
    assert_eq!(location.anchor, "plainanchor");
  }
}
