//! Doxygen index to CDT help index conversion.
use log::{debug, info};
use xmltree::Element;

use crate::{
  cdt::{self, CdtDocument},
  doxygen::{Compound, DoxygenIndex, Member},
  error::ConvertError,
};

/// Traversal options for [`DoxyConverter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
  /// Emit a nested topic for every member of a compound.
  pub include_members: bool,

  /// Compound and member kinds (`file`, `dir`, `define`, ...) to leave out.
  pub exclude_kinds: Vec<String>,
}

impl Default for ConvertOptions {
  fn default() -> Self {
    Self {
      include_members: true,
      exclude_kinds:   Vec::new(),
    }
  }
}

/// Counters collected during a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
  /// Top-level topics emitted, one per compound.
  pub compounds: usize,
  /// Nested topics emitted, one per member.
  pub members:   usize,
  /// Entries dropped because they had no refid.
  pub skipped:   usize,
  /// Entries dropped because their kind is excluded.
  pub filtered:  usize,
}

impl ConversionStats {
  /// Total number of `<topic>` elements written.
  #[must_use]
  pub const fn topics(&self) -> usize {
    self.compounds + self.members
  }
}

/// Converts a Doxygen index into a CDT help index, rewriting every refid
/// into an `href` below a fixed base path.
#[derive(Debug, Clone)]
pub struct DoxyConverter {
  base_path: String,
  options:   ConvertOptions,
}

impl DoxyConverter {
  /// Create a converter that prefixes every `href` with `base_path`.
  #[must_use]
  pub fn new(base_path: impl Into<String>) -> Self {
    Self {
      base_path: base_path.into(),
      options:   ConvertOptions::default(),
    }
  }

  #[must_use]
  pub fn with_options(mut self, options: ConvertOptions) -> Self {
    self.options = options;
    self
  }

  #[must_use]
  pub fn base_path(&self) -> &str {
    &self.base_path
  }

  #[must_use]
  pub const fn options(&self) -> &ConvertOptions {
    &self.options
  }

  /// Populate `target` with an `<index>` built from `source`.
  ///
  /// Compounds become top-level topics and their members become topics
  /// nested inside them, both in document order. Entries without a refid
  /// are skipped; entries without a name get an empty label.
  ///
  /// # Errors
  ///
  /// Returns [`ConvertError::MalformedInput`] if `source` is not a
  /// `<doxygenindex>` element and [`ConvertError::TargetNotEmpty`] if
  /// `target` already has a root. `target` is left untouched on error.
  pub fn convert(
    &self,
    source: &Element,
    target: &mut CdtDocument,
    index_title: &str,
    index_type: &str,
  ) -> Result<ConversionStats, ConvertError> {
    let index = DoxygenIndex::new(source)?;
    if let Some(root) = target.root() {
      return Err(ConvertError::TargetNotEmpty(root.name.clone()));
    }

    if let Some(version) = index.version() {
      debug!("Converting index generated by Doxygen {version}");
    }

    let mut root = cdt::index_element(index_title, index_type);
    let mut stats = ConversionStats::default();

    for compound in index.compounds() {
      if let Some(topic) = self.compound_topic(compound, &mut stats) {
        cdt::append(&mut root, topic);
      }
    }

    target.set_root(root);

    info!(
      "Converted {} compounds and {} members ({} skipped without refid, {} \
       filtered by kind)",
      stats.compounds, stats.members, stats.skipped, stats.filtered
    );

    Ok(stats)
  }

  fn compound_topic(
    &self,
    compound: Compound<'_>,
    stats: &mut ConversionStats,
  ) -> Option<Element> {
    if self.is_excluded(compound.kind()) {
      debug!(
        "Filtering {} compound `{}`",
        compound.kind().unwrap_or_default(),
        compound.name()
      );
      stats.filtered += 1;
      return None;
    }

    let Some(refid) = compound.refid() else {
      debug!("Skipping compound `{}` without refid", compound.name());
      stats.skipped += 1;
      return None;
    };

    let href = cdt::topic_href(&self.base_path, refid, None);
    let mut topic = cdt::topic_element(&compound.name(), href);
    stats.compounds += 1;

    if self.options.include_members {
      for member in compound.members() {
        if let Some(child) = self.member_topic(member, stats) {
          cdt::append(&mut topic, child);
        }
      }
    }

    Some(topic)
  }

  fn member_topic(
    &self,
    member: Member<'_>,
    stats: &mut ConversionStats,
  ) -> Option<Element> {
    if self.is_excluded(member.kind()) {
      stats.filtered += 1;
      return None;
    }

    let Some(location) = member.location() else {
      debug!("Skipping member `{}` without refid", member.name());
      stats.skipped += 1;
      return None;
    };

    let href =
      cdt::topic_href(&self.base_path, location.page, Some(location.anchor));
    stats.members += 1;
    Some(cdt::topic_element(&member.name(), href))
  }

  fn is_excluded(&self, kind: Option<&str>) -> bool {
    kind.is_some_and(|kind| {
      self.options.exclude_kinds.iter().any(|excluded| excluded == kind)
    })
  }
}
