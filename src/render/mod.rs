//! Markdown to ANSI terminal text.
//!
//! This module handles:
//! - Inline emphasis (code, bold, italic, strikethrough)
//! - Classifying each line as a header, rule, list item, blank or paragraph
//! - List nesting and ordered numbering
//! - Spacing between blocks and paragraph word wrapping
//!
//! Rendering is a single pass over the lines. It performs no I/O and keeps
//! no state between calls.

pub mod ansi;
mod block;
mod counter;
mod indent;
mod inline;
mod paragraph;
mod spacing;
mod state;


pub use block::{BlockCategory, BlockKind, ListContext, ListItem, classify};
pub use counter::OrderedCounter;
pub use indent::{INDENT_SPACES, Indent, measure as measure_indent};
pub use inline::format_inline;
pub use paragraph::{ParagraphBuffer, wrap, wrap_hanging};
pub use spacing::SpacingController;
pub use state::RenderState;

use ansi::{BOLD, BULLET, RESET, RULE_CHAR, UNDERLINE};

/// Width used when none is known.
pub const DEFAULT_WIDTH: usize = 80;

/// How headers are decorated.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Bold; level 1 is also underlined.
    #[default]
    Underline,
    /// Bold, flanked by one `─` per level on each side.
    Flanked,
}

/// Blank lines between a paragraph and a list that follows it.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListGap {
    /// Keep exactly one blank line if the source had any.
    #[default]
    Preserve,
    /// Start the list on the line after the paragraph.
    Collapse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Output width in columns, used for rules and wrapping.
    pub width: usize,
    pub header_style: HeaderStyle,
    pub list_gap: ListGap,
    /// Wrap list item text with a hanging indent.
    pub wrap_list_items: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::with_width(DEFAULT_WIDTH)
    }
}

impl RenderOptions {
    pub const fn with_width(width: usize) -> Self {
        Self {
            width,
            header_style: HeaderStyle::Underline,
            list_gap: ListGap::Preserve,
            wrap_list_items: false,
        }
    }

    #[must_use]
    pub const fn header_style(mut self, style: HeaderStyle) -> Self {
        self.header_style = style;
        self
    }

    #[must_use]
    pub const fn list_gap(mut self, gap: ListGap) -> Self {
        self.list_gap = gap;
        self
    }

    #[must_use]
    pub const fn wrap_list_items(mut self, enabled: bool) -> Self {
        self.wrap_list_items = enabled;
        self
    }
}

/// One source line and its 0-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Renders whole documents with a fixed set of options.
///
/// # Example
///
/// ```
/// use bean::render::{RenderOptions, Renderer};
///
/// let renderer = Renderer::new(RenderOptions::with_width(40));
/// let out = renderer.render(&["# Title", "Some *text*."]);
/// assert_eq!(out, "\x1b[1m\x1b[4mTitle\x1b[0m\n\nSome \x1b[3mtext\x1b[0m.");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn width(&self) -> usize {
        self.options.width.max(1)
    }

    /// Render `lines` into a single string of text and escape sequences.
    pub fn render<S: AsRef<str>>(&self, lines: &[S]) -> String {
        let mut state = RenderState::new();
        for (number, text) in lines.iter().enumerate() {
            self.render_line(
                &mut state,
                Line {
                    number,
                    text: text.as_ref(),
                },
            );
        }
        state.finish(self.width())
    }

    fn render_line(&self, state: &mut RenderState, line: Line<'_>) {
        let formatted = format_inline(line.text);
        let category = classify(line.text, &formatted, state.list_context());
        let kind = category.kind();
        tracing::trace!(line = line.number, ?kind, "classified line");

        match category {
            BlockCategory::Blank => {
                state.flush_paragraph(self.width());
                state.reset_list();
            }
            BlockCategory::Header { level, text } => {
                self.open_block(state, kind);
                state.reset_list();
                let header = self.header(level, text);
                state.push_str(&header);
            }
            BlockCategory::Rule => {
                self.open_block(state, kind);
                state.reset_list();
                let rule = RULE_CHAR.to_string().repeat(self.width());
                state.push_str(&rule);
                state.push_breaks(2);
            }
            BlockCategory::ListItem(item) => {
                self.open_block(state, kind);
                let prefix = list_prefix(state, &item);
                let rendered = if self.options.wrap_list_items {
                    wrap_hanging(&prefix, item.text, self.width())
                } else {
                    format!("{prefix}{}", item.text)
                };
                state.push_str(&rendered);
                state.push_breaks(1);
            }
            BlockCategory::Paragraph(text) => {
                if state.paragraph.is_empty() {
                    let breaks = state.spacing.breaks_before(kind, self.options.list_gap);
                    state.push_breaks(breaks);
                }
                state.reset_list();
                state.paragraph.push_line(text);
            }
        }

        state.spacing.record(kind);
    }

    /// Flush any open paragraph and write the leading breaks for `kind`.
    fn open_block(&self, state: &mut RenderState, kind: BlockKind) {
        state.flush_paragraph(self.width());
        let breaks = state.spacing.breaks_before(kind, self.options.list_gap);
        state.push_breaks(breaks);
    }

    fn header(&self, level: u8, text: &str) -> String {
        match self.options.header_style {
            HeaderStyle::Underline if level == 1 => format!("{BOLD}{UNDERLINE}{text}{RESET}\n"),
            HeaderStyle::Underline => format!("{BOLD}{text}{RESET}\n"),
            HeaderStyle::Flanked => {
                let flank = RULE_CHAR.to_string().repeat(usize::from(level));
                format!("{BOLD}{flank}{text}{flank}{RESET}\n")
            }
        }
    }
}

/// Indentation plus bullet or number for a list item.
fn list_prefix(state: &mut RenderState, item: &ListItem<'_>) -> String {
    let indent = " ".repeat(item.level * INDENT_SPACES);
    match state.list.advance(item.level, item.ordered) {
        Some(number) => format!("{indent}{number}. "),
        None => format!("{indent}{BULLET}"),
    }
}

/// Render `lines` at `width` columns with default options.
///
/// ```
/// let out = bean::render::render(&["- one", "    - two"], 80);
/// assert_eq!(out, "• one\n    • two\n");
/// ```
pub fn render<S: AsRef<str>>(lines: &[S], width: usize) -> String {
    Renderer::new(RenderOptions::with_width(width)).render(lines)
}
