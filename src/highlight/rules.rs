//! Pattern rules for syntax highlighting
//!
//! A rule pairs a compiled regex with the style it paints. Rules live in an
//! ordered table; application order is the only precedence there is.

use regex::Regex;

use super::style::Style;

/// What a rule recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// A single reserved word, whole-word bounded
    Keyword,
    /// A double-quoted string literal
    StringLit,
    /// A `//` comment running to end of block
    LineComment,
    /// A `/* ... */` comment closed within the same block
    BlockComment,
}

/// A single highlighting rule
///
/// Immutable after construction. Later rules in a table overwrite the
/// styles painted by earlier ones wherever their matches overlap.
pub struct HighlightRule {
    /// Rule category
    pub kind: RuleKind,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Style painted over every match
    pub style: Style,
}

impl HighlightRule {
    /// Create a new rule
    ///
    /// Returns None if the pattern does not compile.
    pub fn new(kind: RuleKind, pattern: &str, style: Style) -> Option<Self> {
        Regex::new(pattern).ok().map(|regex| Self {
            kind,
            pattern: regex,
            style,
        })
    }

    /// Find all non-overlapping matches in left-to-right order
    pub fn find_all(&self, text: &str) -> Vec<(usize, usize)> {
        self.pattern
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect()
    }
}
