//! The Eclipse CDT dynamic help index document.
use xmltree::{Element, XMLNode};

/// Root element of a CDT help index.
pub const INDEX_ELEMENT: &str = "index";

/// Element for a single help topic.
pub const TOPIC_ELEMENT: &str = "topic";

/// An in-memory CDT help index, empty until a converter fills it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CdtDocument {
  root: Option<Element>,
}

impl CdtDocument {
  /// Create an empty document.
  #[must_use]
  pub const fn new() -> Self {
    Self { root: None }
  }

  /// The `<index>` element, once populated.
  #[must_use]
  pub const fn root(&self) -> Option<&Element> {
    self.root.as_ref()
  }

  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.root.is_none()
  }

  /// Top-level `<topic>` elements, in document order.
  pub fn topics(&self) -> impl Iterator<Item = &Element> {
    self.root.iter().flat_map(child_topics)
  }

  pub(crate) fn set_root(&mut self, root: Element) {
    self.root = Some(root);
  }
}

/// Nested `<topic>` elements of `parent`, in document order.
pub fn child_topics(parent: &Element) -> impl Iterator<Item = &Element> {
  parent.children.iter().filter_map(|node| {
    match node {
      XMLNode::Element(element) if element.name == TOPIC_ELEMENT => {
        Some(element)
      },
      _ => None,
    }
  })
}

/// Build an `<index title=".." type="..">` element with no topics yet.
#[must_use]
pub fn index_element(title: &str, index_type: &str) -> Element {
  let mut index = Element::new(INDEX_ELEMENT);
  index.attributes.insert("title".to_owned(), title.to_owned());
  index.attributes.insert("type".to_owned(), index_type.to_owned());
  index
}

/// Build a `<topic label=".." href=".."/>` element.
#[must_use]
pub fn topic_element(label: &str, href: String) -> Element {
  let mut topic = Element::new(TOPIC_ELEMENT);
  topic.attributes.insert("label".to_owned(), label.to_owned());
  topic.attributes.insert("href".to_owned(), href);
  topic
}

/// Append `child` as the last child of `parent`.
pub fn append(parent: &mut Element, child: Element) {
  parent.children.push(XMLNode::Element(child));
}

/// Build the `href` of a topic: `<base>/<page>.html[#<anchor>]`.
///
/// Backslashes in `base_path` are turned into forward slashes and trailing
/// slashes are dropped, so a Windows-style or slash-terminated base never
/// yields a doubled separator.
#[must_use]
pub fn topic_href(base_path: &str, page: &str, anchor: Option<&str>) -> String {
  let base = base_path.replace('\\', "/");
  let base = base.trim_end_matches('/');

  let mut href = format!("{base}/{page}.html");
  if let Some(anchor) = anchor {
    href.push('#');
    href.push_str(anchor);
  }
  href
}
