//! Paragraph accumulation and word wrapping.

use std::mem;

use super::ansi::{Token, char_width, tokens, visible_width};

const BREAK_TAG: &str = "<br>";

/// Text of the paragraph currently being built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphBuffer {
    text: String,
}

impl ParagraphBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append one source line.
    ///
    /// Lines are joined with a single space unless the line ends in two or
    /// more spaces or a `<br>` tag, which is replaced by a hard newline.
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim_start();
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push(' ');
        }

        if let Some(before) = line.strip_suffix(BREAK_TAG) {
            self.text.push_str(before.trim_end());
            self.text.push('\n');
        } else if line.ends_with("  ") {
            self.text.push_str(line.trim_end());
            self.text.push('\n');
        } else {
            self.text.push_str(line.trim_end());
        }
    }

    /// Take the finished paragraph, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        let text = mem::take(&mut self.text);
        text.trim_end().to_string()
    }
}

/// Wrap `text` to `width` visible columns.
///
/// Existing newlines are kept. Lines break at whitespace; a word wider
/// than `width` on its own is split at the width boundary. Escape
/// sequences take up no columns.
pub fn wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    text.split('\n')
        .map(|segment| wrap_segment(segment, width).join("\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap `text` after `prefix`, aligning continuation lines under the
/// first character following the prefix.
pub fn wrap_hanging(prefix: &str, text: &str, width: usize) -> String {
    let indent_width = visible_width(prefix);
    let available = width.saturating_sub(indent_width).max(1);
    let indent = " ".repeat(indent_width);

    let mut out = String::with_capacity(prefix.len() + text.len());
    for (idx, line) in wrap(text, available).split('\n').enumerate() {
        if idx == 0 {
            out.push_str(prefix);
        } else {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    out
}

// Whitespace inside a line is kept as written; only the gap at a wrap
// point is dropped.
fn wrap_segment(segment: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for (gap, word) in words_with_gaps(segment) {
        let word_width = visible_width(word);
        if !current.is_empty() {
            let gap_width = visible_width(gap).max(1);
            if current_width + gap_width + word_width <= width {
                current.push_str(gap);
                current.push_str(word);
                current_width += gap_width + word_width;
                continue;
            }
            lines.push(mem::take(&mut current));
        }

        if word_width <= width {
            current = word.to_string();
            current_width = word_width;
        } else {
            let mut pieces = split_word(word, width);
            current = pieces.pop().unwrap_or_default();
            current_width = visible_width(&current);
            lines.extend(pieces);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Each word of `segment` with the whitespace that precedes it.
fn words_with_gaps(segment: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut rest = segment;
    std::iter::from_fn(move || {
        let start = rest.find(|c: char| !c.is_whitespace())?;
        let (gap, tail) = rest.split_at(start);
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let (word, after) = tail.split_at(end);
        rest = after;
        Some((gap, word))
    })
}

/// Split a single over-long word into pieces at most `width` columns wide.
fn split_word(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0usize;

    for token in tokens(word) {
        match token {
            Token::Escape(seq) => piece.push_str(seq),
            Token::Char(c) => {
                let w = char_width(c);
                if piece_width > 0 && piece_width + w > width {
                    pieces.push(mem::take(&mut piece));
                    piece_width = 0;
                }
                piece.push(c);
                piece_width += w;
            }
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
