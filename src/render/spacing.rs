//! Line breaks between block elements.
//!
//! Headers and list items end in one newline, rules in two, paragraphs in
//! none. The number of breaks written before an element depends on what
//! came before it, looking through blank lines to the last real element.

use super::ListGap;
use super::block::BlockKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpacingController {
    last: Option<BlockKind>,
    last_distinct: Option<BlockKind>,
}

impl SpacingController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the category of the line just handled.
    pub fn record(&mut self, kind: BlockKind) {
        if self.last != Some(kind) {
            self.last_distinct = self.last;
            self.last = Some(kind);
        }
    }

    pub const fn last(&self) -> Option<BlockKind> {
        self.last
    }

    pub const fn last_distinct(&self) -> Option<BlockKind> {
        self.last_distinct
    }

    /// Whether one or more blank lines were just seen.
    pub fn after_gap(&self) -> bool {
        self.last == Some(BlockKind::Blank)
    }

    /// The element spacing is measured against: the last one, or the one
    /// before the blank lines if the last line was blank.
    pub fn previous_element(&self) -> Option<BlockKind> {
        if self.after_gap() { self.last_distinct } else { self.last }
    }

    /// Line breaks to write before an element of `kind`.
    ///
    /// For paragraphs this is only meaningful when a new paragraph starts;
    /// a continuation line joins the open one instead.
    pub fn breaks_before(&self, kind: BlockKind, list_gap: ListGap) -> usize {
        use BlockKind::{Blank, Header, ListItem, Paragraph, Rule};

        let gap = self.after_gap();
        match (kind, self.previous_element()) {
            (Blank, _) | (_, None | Some(Rule | Blank)) => 0,
            (Header | Rule | Paragraph, Some(Header | ListItem)) => 1,
            // A list sits directly under its header.
            (ListItem, Some(Header)) => 0,
            (Header | Rule, Some(Paragraph)) => 2,
            (ListItem, Some(ListItem)) => usize::from(gap),
            (ListItem, Some(Paragraph)) => match list_gap {
                ListGap::Preserve if gap => 2,
                _ => 1,
            },
            (Paragraph, Some(Paragraph)) => {
                if gap {
                    2
                } else {
                    0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BlockKind::{Blank, Header, ListItem, Paragraph, Rule};

    fn after(kinds: &[BlockKind]) -> SpacingController {
        let mut spacing = SpacingController::new();
        for &kind in kinds {
            spacing.record(kind);
        }
        spacing
    }

    #[test]
    fn test_first_element_has_no_breaks() {
        let spacing = SpacingController::new();
        for kind in [Header, Rule, ListItem, Paragraph] {
            assert_eq!(spacing.breaks_before(kind, ListGap::Preserve), 0);
        }
    }

    #[test]
    fn test_leading_blank_lines_do_not_add_breaks() {
        let spacing = after(&[Blank]);
        assert_eq!(spacing.breaks_before(Header, ListGap::Preserve), 0);
    }

    #[test]
    fn test_header_breaks_by_previous_element() {
        assert_eq!(after(&[Rule]).breaks_before(Header, ListGap::Preserve), 0);
        assert_eq!(after(&[Header]).breaks_before(Header, ListGap::Preserve), 1);
        assert_eq!(after(&[ListItem]).breaks_before(Header, ListGap::Preserve), 1);
        assert_eq!(after(&[Paragraph]).breaks_before(Header, ListGap::Preserve), 2);
    }

    #[test]
    fn test_blank_lines_are_seen_through() {
        assert_eq!(after(&[Rule, Blank]).breaks_before(Header, ListGap::Preserve), 0);
        assert_eq!(after(&[Paragraph, Blank]).breaks_before(Rule, ListGap::Preserve), 2);
        assert_eq!(after(&[ListItem, Blank]).breaks_before(Header, ListGap::Preserve), 1);
    }

    #[test]
    fn test_repeated_blank_keeps_distinct() {
        let mut spacing = after(&[Paragraph, Blank]);
        spacing.record(Blank);
        assert_eq!(spacing.last(), Some(Blank));
        assert_eq!(spacing.last_distinct(), Some(Paragraph));
    }

    #[test]
    fn test_list_after_paragraph_honours_gap_setting() {
        assert_eq!(after(&[Paragraph]).breaks_before(ListItem, ListGap::Preserve), 1);
        assert_eq!(after(&[Paragraph, Blank]).breaks_before(ListItem, ListGap::Preserve), 2);
        assert_eq!(after(&[Paragraph, Blank]).breaks_before(ListItem, ListGap::Collapse), 1);
    }

    #[test]
    fn test_separate_lists_get_a_blank_line() {
        assert_eq!(after(&[ListItem]).breaks_before(ListItem, ListGap::Preserve), 0);
        assert_eq!(after(&[ListItem, Blank]).breaks_before(ListItem, ListGap::Preserve), 1);
    }

    #[test]
    fn test_list_starts_right_under_header() {
        assert_eq!(after(&[Header]).breaks_before(ListItem, ListGap::Preserve), 0);
        assert_eq!(after(&[Header, Blank]).breaks_before(ListItem, ListGap::Preserve), 0);
        assert_eq!(after(&[Header, Blank]).breaks_before(ListItem, ListGap::Collapse), 0);
    }

    #[test]
    fn test_new_paragraph_spacing() {
        assert_eq!(after(&[Header]).breaks_before(Paragraph, ListGap::Preserve), 1);
        assert_eq!(after(&[ListItem]).breaks_before(Paragraph, ListGap::Preserve), 1);
        assert_eq!(after(&[Paragraph, Blank]).breaks_before(Paragraph, ListGap::Preserve), 2);
        assert_eq!(after(&[Rule, Blank]).breaks_before(Paragraph, ListGap::Preserve), 0);
    }
}
