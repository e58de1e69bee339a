//! Block highlighter
//!
//! Applies a rule table to one block (line) of text and produces style
//! spans. Every rule is applied in table order and every match paints its
//! range destructively, so a later rule's style wins wherever matches
//! overlap. The pass is stateless: nothing carries over between blocks or
//! between calls, and the same input always yields the same spans.

use super::rules::HighlightRule;
use super::style::{Span, Style};

/// Highlight one block of text against an ordered rule table
///
/// Returns coalesced spans in ascending byte order. Unstyled gaps produce
/// no span. Span boundaries are match boundaries and therefore always
/// valid char boundaries.
pub fn highlight_block(text: &str, rules: &[HighlightRule]) -> Vec<Span> {
    if text.is_empty() {
        return Vec::new();
    }

    // Per-byte style slots; later writes overwrite earlier ones.
    let mut slots: Vec<Option<Style>> = vec![None; text.len()];
    for rule in rules {
        for (start, end) in rule.find_all(text) {
            for slot in &mut slots[start..end] {
                *slot = Some(rule.style);
            }
        }
    }

    coalesce(&slots)
}

/// Collapse per-byte slots into maximal runs of equal style
fn coalesce(slots: &[Option<Style>]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut run: Option<(usize, Style)> = None;

    for (i, slot) in slots.iter().enumerate() {
        match (run, slot) {
            (Some((_, style)), Some(s)) if *s == style => {}
            (Some((start, style)), Some(s)) => {
                spans.push(Span::new(start, i, style));
                run = Some((i, *s));
            }
            (Some((start, style)), None) => {
                spans.push(Span::new(start, i, style));
                run = None;
            }
            (None, Some(s)) => {
                run = Some((i, *s));
            }
            (None, None) => {}
        }
    }

    if let Some((start, style)) = run {
        spans.push(Span::new(start, slots.len(), style));
    }

    spans
}
