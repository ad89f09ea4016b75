//! SGR escape sequences and visible-width helpers.
//!
//! Everything the renderer emits is plain text interleaved with these
//! sequences. Wrapping measures text with the sequences removed.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const BOLD: &str = "\x1b[1m";
pub const ITALIC: &str = "\x1b[3m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const STRIKETHROUGH: &str = "\x1b[9m";
/// Grey background, red foreground.
pub const CODE: &str = "\x1b[48;5;238;38;5;1m";
pub const RESET: &str = "\x1b[0m";

/// Box-drawing character used for rules and flanked headers.
pub const RULE_CHAR: char = '─';
pub const BULLET: &str = "• ";

/// A piece of text that is either an escape sequence or a single visible char.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Escape(&'a str),
    Char(char),
}

/// Split `text` into escape sequences and visible characters.
///
/// An escape is `ESC [` followed by parameter bytes and one final byte in
/// `@..=~`. A lone `ESC` without `[` is treated as a visible (zero-width) char.
pub fn tokens(text: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut iter = text.char_indices().peekable();
    while let Some((start, ch)) = iter.next() {
        if ch == '\x1b' && iter.peek().is_some_and(|&(_, next)| next == '[') {
            iter.next();
            let mut end = text.len();
            for (idx, c) in iter.by_ref() {
                if ('@'..='~').contains(&c) {
                    end = idx + c.len_utf8();
                    break;
                }
            }
            out.push(Token::Escape(&text[start..end]));
        } else {
            out.push(Token::Char(ch));
        }
    }
    out
}

/// Remove all escape sequences from `text`.
pub fn strip(text: &str) -> String {
    tokens(text)
        .into_iter()
        .filter_map(|token| match token {
            Token::Char(c) => Some(c),
            Token::Escape(_) => None,
        })
        .collect()
}

/// Terminal columns occupied by `text` once escapes are interpreted.
pub fn visible_width(text: &str) -> usize {
    if !text.contains('\x1b') {
        return UnicodeWidthStr::width(text);
    }
    tokens(text)
        .into_iter()
        .map(|token| match token {
            Token::Char(c) => char_width(c),
            Token::Escape(_) => 0,
        })
        .sum()
}

pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Wrap `text` in `style` ... `RESET`.
pub fn styled(style: &str, text: &str) -> String {
    format!("{style}{text}{RESET}")
}
