//! Rendering options supplied by the embedder.

use serde::{Deserialize, Serialize};

/// Enumerated configuration for a [`Processor`](crate::engine::Processor).
///
/// Quote substitutions are off (`None`) by default; an embedder that wants
/// typographic output opts in with all four strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Add `target="_blank"` to links marked external by their resolved
    /// definition, or whose inline href carries an explicit http(s) scheme.
    pub external_links: bool,
    pub left_single_quote: Option<String>,
    pub right_single_quote: Option<String>,
    pub left_double_quote: Option<String>,
    pub right_double_quote: Option<String>,
    /// Drop characters that are not valid in XML 1.0 documents.
    pub strip_invalid_xml_chars: bool,
    /// Emit `data-src="<start>-<end>"` byte-offset attributes on elements.
    pub source_indices: bool,
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_external_links(mut self, on: bool) -> Self {
        self.external_links = on;
        self
    }

    /// Set all four typographic quote substitutions at once.
    #[must_use]
    pub fn with_quotes(
        mut self,
        left_single: impl Into<String>,
        right_single: impl Into<String>,
        left_double: impl Into<String>,
        right_double: impl Into<String>,
    ) -> Self {
        self.left_single_quote = Some(left_single.into());
        self.right_single_quote = Some(right_single.into());
        self.left_double_quote = Some(left_double.into());
        self.right_double_quote = Some(right_double.into());
        self
    }

    #[must_use]
    pub fn with_strip_invalid_xml_chars(mut self, on: bool) -> Self {
        self.strip_invalid_xml_chars = on;
        self
    }

    #[must_use]
    pub fn with_source_indices(mut self, on: bool) -> Self {
        self.source_indices = on;
        self
    }

    pub(crate) fn substitutes_quotes(&self) -> bool {
        self.left_single_quote.is_some()
            || self.right_single_quote.is_some()
            || self.left_double_quote.is_some()
            || self.right_double_quote.is_some()
    }
}
