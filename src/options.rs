//! Parse options shared by the tree tokenizer, the leaf tokenizer and the
//! serializer.

use serde::{Deserialize, Serialize};

/// Delimiters used when none are configured, in priority order.
pub const DEFAULT_DELIMITERS: [&str; 3] = [".", ":", "@"];

/// Markers and delimiters of the notation.
///
/// Every field has a default, so a partial JSON object only overrides what
/// it names:
///
/// ```
/// use argtree::ParseOptions;
///
/// let options = ParseOptions::from_json(r##"{"delimiters": ["#", "."]}"##).unwrap();
/// assert_eq!(options.children_start, '{');
/// assert_eq!(options.delimiters, vec!["#", "."]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub children_start: char,
    pub children_end: char,
    pub quote_start: char,
    pub quote_end: char,
    /// Tried in order; the first delimiter matching at a position wins.
    pub delimiters: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            children_start: '{',
            children_end: '}',
            quote_start: '`',
            quote_end: '`',
            delimiters: DEFAULT_DELIMITERS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delimiters = delimiters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_quotes(mut self, start: char, end: char) -> Self {
        self.quote_start = start;
        self.quote_end = end;
        self
    }

    pub fn with_children(mut self, start: char, end: char) -> Self {
        self.children_start = start;
        self.children_end = end;
        self
    }

    /// Configured delimiters in priority order. Empty strings can never
    /// separate anything and are skipped.
    pub fn delimiters(&self) -> impl Iterator<Item = &str> {
        self.delimiters
            .iter()
            .map(String::as_str)
            .filter(|d| !d.is_empty())
    }

    /// Delimiter used by `Arg` operations that don't name one.
    pub fn default_delimiter(&self) -> &str {
        self.delimiters().next().unwrap_or(DEFAULT_DELIMITERS[0])
    }

    pub(crate) fn is_group_marker(&self, ch: char) -> bool {
        ch == self.children_start || ch == self.children_end
    }
}
