//! Inline emphasis: code, bold, italic and strikethrough spans.
//!
//! Spans are resolved one kind at a time, leftmost match first, re-scanning
//! the rewritten text until nothing matches. Code spans are swapped out for
//! indexed placeholders before any emphasis runs so their contents stay
//! literal, then restored at the very end.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::ansi::{BOLD, CODE, ITALIC, STRIKETHROUGH, styled};

const PLACEHOLDER: char = '\x1f';

// A backtick pair, or a code span this module already rendered.
static CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`([^`]+)`|\x1b\[48;5;238;38;5;1m.*?\x1b\[0m").expect("code span regex should compile")
});

// Content may not start or end with whitespace.
static BOLD_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(\S(?:.*?\S)?)\*\*|__(\S(?:.*?\S)?)__").expect("bold span regex should compile")
});

static ITALIC_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*(\S(?:.*?\S)?)\*|_(\S(?:.*?\S)?)_").expect("italic span regex should compile")
});

static STRIKE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~(.+?)~~").expect("strikethrough regex should compile"));

static SHIELDED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1f(\d+)\x1f").expect("placeholder regex should compile"));

/// Rewrite every emphasis span in `text` into its escape-wrapped form.
///
/// Unterminated markers are left alone. A line made of a single repeated
/// character (`---`, `***`, `___`) is returned untouched so it can still be
/// recognised as a rule.
///
/// ```
/// use bean::render::format_inline;
///
/// assert_eq!(format_inline("**bold**"), "\x1b[1mbold\x1b[0m");
/// assert_eq!(format_inline("**open"), "**open");
/// ```
pub fn format_inline(text: &str) -> String {
    if is_single_repeated_char(text.trim()) {
        return text.to_string();
    }

    let mut shielded = Vec::new();
    let text = replace_each(text, &CODE_SPAN, |caps| {
        let rendered = caps
            .get(1)
            .map_or_else(|| caps[0].to_string(), |code| styled(CODE, code.as_str()));
        shielded.push(rendered);
        format!("{PLACEHOLDER}{}{PLACEHOLDER}", shielded.len() - 1)
    });

    let text = replace_each(&text, &BOLD_SPAN, |caps| styled(BOLD, span_content(caps)));
    let text = replace_each(&text, &ITALIC_SPAN, |caps| styled(ITALIC, span_content(caps)));
    let text = replace_each(&text, &STRIKE_SPAN, |caps| styled(STRIKETHROUGH, span_content(caps)));

    if shielded.is_empty() {
        return text;
    }
    SHIELDED
        .replace_all(&text, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|idx| shielded.get(idx))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Replace the leftmost match of `re` until none remain.
///
/// Every replacement removes marker characters that escapes never
/// reintroduce, so the loop terminates.
fn replace_each(text: &str, re: &Regex, mut render: impl FnMut(&Captures<'_>) -> String) -> String {
    let mut text = text.to_string();
    loop {
        let (range, replacement) = match re.captures(&text) {
            Some(caps) => (caps.get(0).map_or(0..0, |m| m.range()), render(&caps)),
            None => break,
        };
        text.replace_range(range, &replacement);
    }
    text
}

// First participating group; the alternations put the content in 1 or 2.
fn span_content<'t>(caps: &Captures<'t>) -> &'t str {
    caps.iter()
        .skip(1)
        .flatten()
        .next()
        .map_or("", |m| m.as_str())
}

fn is_single_repeated_char(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|first| chars.all(|c| c == first))
}
