//! Block classification: exactly one category per line.

use std::sync::LazyLock;

use regex::Regex;

use super::indent;

static RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").expect("rule regex should compile"));

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(#{1,6}) (.*)$").expect("header regex should compile"));

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?: {4})*|\t+)([-+*]|\d+\.) (.*)$").expect("list item regex should compile")
});

/// Category tag without payload, used for spacing decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Header,
    Rule,
    ListItem,
    Blank,
    Paragraph,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem<'a> {
    pub level: usize,
    pub ordered: bool,
    /// Source marker without the trailing space (`-`, `+`, `*`, `12.`).
    pub marker: &'a str,
    pub text: &'a str,
}

/// What a single line is, with the text it contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockCategory<'a> {
    Header { level: u8, text: &'a str },
    Rule,
    ListItem(ListItem<'a>),
    Blank,
    Paragraph(&'a str),
}

impl BlockCategory<'_> {
    pub const fn kind(&self) -> BlockKind {
        match self {
            Self::Header { .. } => BlockKind::Header,
            Self::Rule => BlockKind::Rule,
            Self::ListItem(_) => BlockKind::ListItem,
            Self::Blank => BlockKind::Blank,
            Self::Paragraph(_) => BlockKind::Paragraph,
        }
    }
}

/// List state the classifier needs to validate indentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListContext {
    /// Whether the line before this one was a list item.
    pub in_list: bool,
    pub level: usize,
}

/// Classify one line.
///
/// `raw` is the source line and `formatted` the same line after inline
/// formatting. Blank and rule detection look at `raw` so emphasis can never
/// hide a rule; everything else looks at `formatted`. A list item with
/// invalid indentation is demoted to a paragraph.
pub fn classify<'a>(raw: &str, formatted: &'a str, list: ListContext) -> BlockCategory<'a> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return BlockCategory::Blank;
    }
    if RULE.is_match(trimmed) {
        return BlockCategory::Rule;
    }

    if let Some(caps) = HEADER.captures(formatted) {
        let hashes = caps.get(1).map_or("", |m| m.as_str());
        let text = caps.get(2).map_or("", |m| m.as_str());
        return BlockCategory::Header {
            level: u8::try_from(hashes.len()).unwrap_or(6),
            text,
        };
    }

    if let Some(caps) = LIST_ITEM.captures(formatted) {
        let indent_text = caps.get(1).map_or("", |m| m.as_str());
        let marker = caps.get(2).map_or("", |m| m.as_str());
        let text = caps.get(3).map_or("", |m| m.as_str());
        let indent = indent::measure(indent_text, list.level, list.in_list);
        if indent.valid {
            return BlockCategory::ListItem(ListItem {
                level: indent.level,
                ordered: marker.ends_with('.'),
                marker,
                text,
            });
        }
        tracing::trace!(
            level = indent.level,
            previous = list.level,
            "list item indentation invalid, treating as paragraph"
        );
    }

    BlockCategory::Paragraph(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &str) -> BlockCategory<'_> {
        classify(line, line, ListContext::default())
    }

    fn continuing(line: &str, level: usize) -> BlockCategory<'_> {
        classify(line, line, ListContext { in_list: true, level })
    }

    #[test]
    fn test_header_levels_one_through_six() {
        for level in 1..=6u8 {
            let line = format!("{} Title", "#".repeat(level as usize));
            assert_eq!(plain(&line), BlockCategory::Header { level, text: "Title" });
        }
    }

    #[test]
    fn test_seven_hashes_is_paragraph() {
        assert_eq!(plain("####### Too deep"), BlockCategory::Paragraph("####### Too deep"));
    }

    #[test]
    fn test_header_needs_space_and_allows_leading_whitespace() {
        assert_eq!(plain("#NoSpace"), BlockCategory::Paragraph("#NoSpace"));
        assert_eq!(plain("  ## Indented"), BlockCategory::Header { level: 2, text: "Indented" });
    }

    #[test]
    fn test_rules_need_three_identical_chars() {
        for line in ["---", "***", "___", "----------"] {
            assert_eq!(plain(line), BlockCategory::Rule);
        }
        assert_eq!(plain("_*-"), BlockCategory::Paragraph("_*-"));
        assert_eq!(plain("--"), BlockCategory::Paragraph("--"));
        assert_eq!(plain("-*-*"), BlockCategory::Paragraph("-*-*"));
    }

    #[test]
    fn test_rule_ignores_formatted_text() {
        assert_eq!(classify("***", "\x1b[3m*\x1b[0m", ListContext::default()), BlockCategory::Rule);
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(plain(""), BlockCategory::Blank);
        assert_eq!(plain("   \t "), BlockCategory::Blank);
    }

    #[test]
    fn test_unordered_markers() {
        for marker in ["-", "+", "*"] {
            let line = format!("{marker} item");
            let BlockCategory::ListItem(item) = plain(&line) else {
                panic!("expected list item for {marker}");
            };
            assert_eq!(item.level, 0);
            assert!(!item.ordered);
            assert_eq!(item.marker, marker);
            assert_eq!(item.text, "item");
        }
    }

    #[test]
    fn test_ordered_marker() {
        let BlockCategory::ListItem(item) = plain("12. twelve") else {
            panic!("expected list item");
        };
        assert!(item.ordered);
        assert_eq!(item.marker, "12.");
        assert_eq!(item.text, "twelve");
    }

    #[test]
    fn test_nested_item_with_spaces_and_tabs() {
        let BlockCategory::ListItem(item) = continuing("    - nested", 0) else {
            panic!("expected nested list item");
        };
        assert_eq!(item.level, 1);
        let BlockCategory::ListItem(item) = continuing("\t\t1. deeper", 1) else {
            panic!("expected tab-nested list item");
        };
        assert_eq!(item.level, 2);
    }

    #[test]
    fn test_invalid_indent_demotes_to_paragraph() {
        assert_eq!(continuing("        - jump", 0), BlockCategory::Paragraph("        - jump"));
        assert_eq!(plain("    - opening"), BlockCategory::Paragraph("    - opening"));
    }

    #[test]
    fn test_marker_without_space_is_paragraph() {
        assert_eq!(plain("-dash"), BlockCategory::Paragraph("-dash"));
        assert_eq!(plain("1.one"), BlockCategory::Paragraph("1.one"));
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(plain("# h").kind(), BlockKind::Header);
        assert_eq!(plain("---").kind(), BlockKind::Rule);
        assert_eq!(plain("- i").kind(), BlockKind::ListItem);
        assert_eq!(plain("").kind(), BlockKind::Blank);
        assert_eq!(plain("text").kind(), BlockKind::Paragraph);
    }
}
