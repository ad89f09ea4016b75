//! List indentation levels.

/// Spaces that make up one indentation level.
pub const INDENT_SPACES: usize = 4;

/// Nesting level of a list item and whether it may be rendered as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    pub level: usize,
    pub valid: bool,
}

/// Measure the leading whitespace of a list item.
///
/// Tabs win over spaces: if any tab is present the level is the tab count,
/// otherwise it is the space count divided by [`INDENT_SPACES`]. An item
/// opening a list must sit at level 0; an item continuing a list may go at
/// most one level deeper than `previous_level`.
pub fn measure(indent: &str, previous_level: usize, continues_list: bool) -> Indent {
    let tabs = indent.chars().filter(|&c| c == '\t').count();
    let level = if tabs > 0 {
        tabs
    } else {
        indent.chars().filter(|&c| c == ' ').count() / INDENT_SPACES
    };

    let valid = if continues_list {
        level <= previous_level + 1
    } else {
        level == 0
    };

    Indent { level, valid }
}
