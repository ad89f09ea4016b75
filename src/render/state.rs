//! Per-call render state.

use super::block::{BlockKind, ListContext};
use super::counter::OrderedCounter;
use super::paragraph::{ParagraphBuffer, wrap};
use super::spacing::SpacingController;

/// Everything carried from one line to the next during a single render.
///
/// Built fresh for every document and consumed by [`RenderState::finish`],
/// so nothing leaks between documents.
#[derive(Debug, Default)]
pub struct RenderState {
    pub spacing: SpacingController,
    pub list: OrderedCounter,
    pub paragraph: ParagraphBuffer,
    output: String,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_context(&self) -> ListContext {
        ListContext {
            in_list: self.spacing.last() == Some(BlockKind::ListItem),
            level: self.list.level(),
        }
    }

    pub fn push_breaks(&mut self, count: usize) {
        for _ in 0..count {
            self.output.push('\n');
        }
    }

    pub fn push_str(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Wrap any pending paragraph into the output.
    pub fn flush_paragraph(&mut self, width: usize) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self.paragraph.take();
        self.output.push_str(&wrap(&text, width));
    }

    pub fn reset_list(&mut self) {
        self.list.reset();
    }

    /// Flush and hand back the rendered document.
    pub fn finish(mut self, width: usize) -> String {
        self.flush_paragraph(width);
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_empties_buffer() {
        let mut state = RenderState::new();
        state.paragraph.push_line("hello");
        state.flush_paragraph(80);
        assert!(state.paragraph.is_empty());
        assert_eq!(state.finish(80), "hello");
    }

    #[test]
    fn test_list_context_follows_last_category() {
        let mut state = RenderState::new();
        assert!(!state.list_context().in_list);
        state.list.advance(0, false);
        state.spacing.record(BlockKind::ListItem);
        let context = state.list_context();
        assert!(context.in_list);
        assert_eq!(context.level, 0);
        state.spacing.record(BlockKind::Blank);
        assert!(!state.list_context().in_list);
    }
}
