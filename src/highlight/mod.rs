//! Syntax highlighting
//!
//! An ordered rule table applied per block of text. Rules are built once
//! per editor tab and applied sequentially; later rules overwrite earlier
//! ones wherever matches overlap.

mod block;
pub mod cpp;
mod rules;
mod style;

pub use block::highlight_block;
pub use rules::{HighlightRule, RuleKind};
pub use style::{Color, Span, Style};
