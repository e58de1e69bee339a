//! The fixed C/C++ rule table
//!
//! Builds the ordered rule sequence applied to every editor tab: one
//! whole-word rule per reserved word, then the string rule, then the two
//! comment rules. Order is significant: the comment rules run last so
//! their styles win over keyword and string matches inside a comment.

use crate::theme;

use super::rules::{HighlightRule, RuleKind};

/// The closed set of recognized reserved words
pub const KEYWORDS: [&str; 40] = [
    "char", "class", "const", "double", "enum", "explicit", "export", "extern", "float", "for",
    "if", "inline", "int", "long", "namespace", "operator", "private", "protected", "public",
    "short", "signals", "signed", "slots", "static", "struct", "template", "typedef", "typename",
    "union", "unsigned", "virtual", "void", "volatile", "while", "return", "switch", "case",
    "default", "do", "goto",
];

/// Build the rule table for one editor view
///
/// The table always has `KEYWORDS.len() + 3` entries. All patterns are
/// fixed literals, so construction never drops a rule in practice.
///
/// The string rule is greedy and escape-naive: on a block containing two
/// quoted literals it matches from the first quote to the last. The block
/// comment rule matches only when `*/` appears in the same block as `/*`;
/// an unclosed `/*` paints nothing.
pub fn rule_table() -> Vec<HighlightRule> {
    let mut rules = Vec::with_capacity(KEYWORDS.len() + 3);

    for keyword in KEYWORDS {
        let pattern = format!(r"\b{}\b", keyword);
        if let Some(rule) = HighlightRule::new(RuleKind::Keyword, &pattern, theme::KEYWORD) {
            rules.push(rule);
        }
    }

    if let Some(rule) = HighlightRule::new(RuleKind::StringLit, r#"".+""#, theme::STRING) {
        rules.push(rule);
    }

    if let Some(rule) = HighlightRule::new(RuleKind::LineComment, r"//[^\n]*", theme::COMMENT) {
        rules.push(rule);
    }

    if let Some(rule) = HighlightRule::new(RuleKind::BlockComment, r"/\*.*\*/", theme::COMMENT) {
        rules.push(rule);
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert_eq!(rule_table().len(), KEYWORDS.len() + 3);
    }

    #[test]
    fn test_table_order() {
        let rules = rule_table();
        for rule in &rules[..KEYWORDS.len()] {
            assert_eq!(rule.kind, RuleKind::Keyword);
        }
        assert_eq!(rules[KEYWORDS.len()].kind, RuleKind::StringLit);
        assert_eq!(rules[KEYWORDS.len() + 1].kind, RuleKind::LineComment);
        assert_eq!(rules[KEYWORDS.len() + 2].kind, RuleKind::BlockComment);
    }

    #[test]
    fn test_keyword_rules_are_whole_word() {
        let rules = rule_table();
        // "int" is in the keyword set, "intimate" must not match it
        let int_rule = rules
            .iter()
            .find(|r| r.pattern.as_str() == r"\bint\b")
            .unwrap();
        assert_eq!(int_rule.find_all("int x;"), vec![(0, 3)]);
        assert!(int_rule.find_all("intimate").is_empty());
    }

    #[test]
    fn test_keyword_style() {
        let rules = rule_table();
        assert_eq!(rules[0].style, theme::KEYWORD);
        assert!(rules[0].style.bold);
    }
}
