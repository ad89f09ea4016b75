//! Ordered list numbering across nesting levels.

/// Numbering state for the list currently being rendered.
///
/// `stack` holds one saved number per level above 0, so its length always
/// equals `level`. Indenting in saves the outer number and restarts at 1;
/// indenting out pops and resumes at the saved number plus one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedCounter {
    level: usize,
    current: usize,
    stack: Vec<usize>,
    last_was_ordered: bool,
}

impl Default for OrderedCounter {
    fn default() -> Self {
        Self {
            level: 0,
            current: 1,
            stack: Vec::new(),
            last_was_ordered: false,
        }
    }
}

impl OrderedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level of the most recent list item.
    pub const fn level(&self) -> usize {
        self.level
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Forget the current list entirely.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record an item at `level`, returning its number if it is ordered.
    pub fn advance(&mut self, level: usize, ordered: bool) -> Option<usize> {
        let number = if ordered {
            if level == self.level {
                self.current = if self.last_was_ordered { self.current + 1 } else { 1 };
            } else {
                self.shift(level);
            }
            Some(self.current)
        } else {
            if level == 0 {
                self.current = 1;
                self.stack.clear();
            } else if level != self.level {
                self.shift(level);
            }
            None
        };

        self.level = level;
        self.last_was_ordered = ordered;
        number
    }

    fn shift(&mut self, level: usize) {
        if level > self.level {
            // An unordered parent saves 0 so an ordered sibling resumes at 1.
            let saved = if self.last_was_ordered { self.current } else { 0 };
            for _ in self.level..level {
                self.stack.push(saved);
            }
            self.current = 1;
        } else {
            let keep = self.stack.len().saturating_sub(self.level - level);
            self.current = self.stack.get(keep).map_or(1, |saved| saved + 1);
            self.stack.truncate(keep);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_level_ordered_items_count_up() {
        let mut counter = OrderedCounter::new();
        assert_eq!(counter.advance(0, true), Some(1));
        assert_eq!(counter.advance(0, true), Some(2));
        assert_eq!(counter.advance(0, true), Some(3));
    }

    #[test]
    fn test_indent_in_restarts_and_out_resumes() {
        let mut counter = OrderedCounter::new();
        assert_eq!(counter.advance(0, true), Some(1));
        assert_eq!(counter.advance(1, true), Some(1));
        assert_eq!(counter.advance(1, true), Some(2));
        assert_eq!(counter.depth(), 1);
        assert_eq!(counter.advance(0, true), Some(2));
        assert_eq!(counter.depth(), 0);
    }

    #[test]
    fn test_outdent_several_levels() {
        let mut counter = OrderedCounter::new();
        counter.advance(0, true);
        counter.advance(0, true);
        counter.advance(1, true);
        counter.advance(2, true);
        assert_eq!(counter.depth(), 2);
        assert_eq!(counter.advance(0, true), Some(3));
        assert_eq!(counter.depth(), 0);
    }

    #[test]
    fn test_unordered_sibling_breaks_sequence() {
        let mut counter = OrderedCounter::new();
        counter.advance(1, false);
        counter.reset();
        assert_eq!(counter.advance(0, true), Some(1));
        assert_eq!(counter.advance(0, true), Some(2));
        assert_eq!(counter.advance(0, false), None);
        assert_eq!(counter.advance(0, true), Some(1));
    }

    #[test]
    fn test_unordered_children_keep_parent_number() {
        let mut counter = OrderedCounter::new();
        assert_eq!(counter.advance(0, true), Some(1));
        assert_eq!(counter.advance(1, false), None);
        assert_eq!(counter.advance(1, false), None);
        assert_eq!(counter.advance(0, true), Some(2));
    }

    #[test]
    fn test_ordered_after_unordered_parent_starts_at_one() {
        let mut counter = OrderedCounter::new();
        counter.advance(0, false);
        counter.advance(1, false);
        assert_eq!(counter.advance(0, true), Some(1));
    }

    #[test]
    fn test_unordered_root_clears_history() {
        let mut counter = OrderedCounter::new();
        counter.advance(0, true);
        counter.advance(1, true);
        counter.advance(2, false);
        assert_eq!(counter.depth(), 2);
        counter.advance(0, false);
        assert_eq!(counter.depth(), 0);
        assert_eq!(counter.advance(1, true), Some(1));
        assert_eq!(counter.depth(), 1);
    }

    #[test]
    fn test_stack_depth_tracks_level() {
        let mut counter = OrderedCounter::new();
        for (level, ordered) in [(0, true), (1, false), (2, true), (1, true), (2, false), (0, false)] {
            counter.advance(level, ordered);
            assert_eq!(counter.depth(), counter.level());
        }
    }
}
