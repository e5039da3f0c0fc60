//! Lesson walkthrough navigation

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStep {
    /// The current lesson changed
    Moved,
    /// Already at a boundary; nothing changed
    Unchanged,
    /// "Next" on the last lesson: the walkthrough is done
    Finished,
}

/// Position within an ordered, non-empty list of lessons
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Walkthrough {
    /// Zero-based index of the lesson on screen
    current: usize,
    /// Number of lessons
    total: usize,
    /// Scroll offset within the current lesson (lines from top)
    pub scroll: u16,
}

impl Walkthrough {
    pub fn new(total: usize) -> Self {
        Self { current: 0, total, scroll: 0 }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.total
    }

    /// Advance one lesson, or report completion from the last one
    pub fn next(&mut self) -> WalkStep {
        if self.is_last() {
            return WalkStep::Finished;
        }
        self.current += 1;
        self.scroll = 0;
        WalkStep::Moved
    }

    /// Go back one lesson; a no-op on the first
    pub fn previous(&mut self) -> WalkStep {
        if self.is_first() {
            return WalkStep::Unchanged;
        }
        self.current -= 1;
        self.scroll = 0;
        WalkStep::Moved
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Keep the scroll offset within rendered content
    pub fn clamp_scroll(&mut self, max: u16) {
        self.scroll = self.scroll.min(max);
    }

    /// Fraction of lessons reached, 1-based (first lesson of four = 0.25)
    pub fn progress(&self) -> f64 {
        if self.total == 0 { 0.0 } else { (self.current + 1) as f64 / self.total as f64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn previous_at_start_is_noop() {
        let mut walk = Walkthrough::new(3);
        assert_eq!(walk.previous(), WalkStep::Unchanged);
        assert_eq!(walk.current(), 0);
    }

    #[test]
    fn next_on_last_finishes_without_moving() {
        let mut walk = Walkthrough::new(2);
        assert_eq!(walk.next(), WalkStep::Moved);
        assert_eq!(walk.next(), WalkStep::Finished);
        assert_eq!(walk.current(), 1);
    }

    #[test]
    fn single_lesson_finishes_immediately() {
        let mut walk = Walkthrough::new(1);
        assert!(walk.is_first() && walk.is_last());
        assert_eq!(walk.next(), WalkStep::Finished);
    }

    #[test]
    fn moving_resets_scroll() {
        let mut walk = Walkthrough::new(3);
        walk.scroll_down(12);
        walk.next();
        assert_eq!(walk.scroll, 0);
        walk.scroll_down(5);
        walk.previous();
        assert_eq!(walk.scroll, 0);
    }

    #[test]
    fn scroll_saturates_and_clamps() {
        let mut walk = Walkthrough::new(1);
        walk.scroll_up(3);
        assert_eq!(walk.scroll, 0);
        walk.scroll_down(40);
        walk.clamp_scroll(10);
        assert_eq!(walk.scroll, 10);
    }

    #[test]
    fn progress_is_one_based() {
        let mut walk = Walkthrough::new(4);
        assert_eq!(walk.progress(), 0.25);
        walk.next();
        assert_eq!(walk.progress(), 0.5);
    }

    proptest! {
        #[test]
        fn n_minus_one_nexts_reach_last(n in 1usize..50) {
            let mut walk = Walkthrough::new(n);
            for _ in 0..n - 1 {
                prop_assert_eq!(walk.next(), WalkStep::Moved);
            }
            prop_assert!(walk.is_last());
            prop_assert_eq!(walk.current(), n - 1);
            prop_assert_eq!(walk.next(), WalkStep::Finished);
        }

        #[test]
        fn index_stays_in_bounds(n in 1usize..20, moves in proptest::collection::vec(any::<bool>(), 0..60)) {
            let mut walk = Walkthrough::new(n);
            for forward in moves {
                if forward { walk.next(); } else { walk.previous(); }
                prop_assert!(walk.current() < n);
            }
        }
    }
}
