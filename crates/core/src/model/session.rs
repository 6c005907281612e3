use std::collections::HashSet;

use crate::model::ids::ItemId;

/// Tracks one pass through a deck: cursor position, which items have been
/// seen/flipped/answered, and the running quiz score.
///
/// Pure value object with idempotent mutators; mutated only by the session
/// controller, never by the presentation layer. Marking an item twice is a
/// no-op, and the score grows by at most one point per distinct item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    current: usize,
    seen: HashSet<ItemId>,
    flipped: HashSet<ItemId>,
    answered: HashSet<ItemId>,
    score: u32,
    finished: bool,
    wrap_on_advance: bool,
}

impl SessionState {
    /// Creates a fresh state at index 0 in non-wrapping mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: 0,
            seen: HashSet::new(),
            flipped: HashSet::new(),
            answered: HashSet::new(),
            score: 0,
            finished: false,
            wrap_on_advance: false,
        }
    }

    /// Selects the advance policy: wrap back to index 0 past the last item
    /// (flashcard "next card") instead of finishing the session.
    #[must_use]
    pub fn with_wrap_on_advance(mut self, wrap: bool) -> Self {
        self.wrap_on_advance = wrap;
        self
    }

    // Accessors
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn wrap_on_advance(&self) -> bool {
        self.wrap_on_advance
    }

    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answered.len()
    }

    #[must_use]
    pub fn has_answered(&self, id: &ItemId) -> bool {
        self.answered.contains(id)
    }

    /// Marks an item as seen. Returns true only the first time.
    pub fn mark_seen(&mut self, id: &ItemId) -> bool {
        Self::mark(&mut self.seen, id)
    }

    /// Marks a flashcard as flipped. Returns true only the first time.
    pub fn mark_flipped(&mut self, id: &ItemId) -> bool {
        Self::mark(&mut self.flipped, id)
    }

    /// Marks a quiz question as answered. Returns true only the first time.
    pub fn mark_answered(&mut self, id: &ItemId) -> bool {
        Self::mark(&mut self.answered, id)
    }

    fn mark(set: &mut HashSet<ItemId>, id: &ItemId) -> bool {
        if set.contains(id) {
            return false;
        }
        set.insert(id.clone())
    }

    /// Records an answer for a question, scoring one point iff correct.
    ///
    /// No-op when the question was already answered: the score never moves
    /// twice for the same item, however often this is called. Returns true
    /// when the answer was recorded.
    pub fn record_answer(&mut self, id: &ItemId, is_correct: bool) -> bool {
        if !self.mark_answered(id) {
            return false;
        }
        if is_correct {
            self.score += 1;
        }
        true
    }

    /// Moves the cursor forward by one.
    ///
    /// Non-wrapping mode finishes the session when the cursor would pass the
    /// last item; wrapping mode goes back to index 0 and never finishes
    /// implicitly. No-op once finished or when `deck_len` is 0.
    pub fn advance(&mut self, deck_len: usize) {
        if self.finished || deck_len == 0 {
            return;
        }

        if self.current + 1 >= deck_len {
            if self.wrap_on_advance {
                self.current = 0;
            } else {
                self.finished = true;
            }
        } else {
            self.current += 1;
        }
    }

    /// Moves the cursor back by one. Silently does nothing at index 0 or
    /// once finished; callers gate the control with `is_at_start()`.
    pub fn retreat(&mut self) {
        if self.finished || self.current == 0 {
            return;
        }
        self.current -= 1;
    }

    /// Explicit terminal transition (quiz finish path). Idempotent.
    pub fn finish(&mut self) {
        self.finished = true;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn n_advances_complete_a_deck_of_n() {
        for n in 1..=5 {
            let mut state = SessionState::new();
            for step in 0..n {
                assert!(!state.is_complete(), "deck of {n} finished early at {step}");
                state.advance(n);
            }
            assert!(state.is_complete(), "deck of {n} not finished after {n} advances");
        }
    }

    #[test]
    fn advance_is_noop_once_complete() {
        let mut state = SessionState::new();
        state.advance(1);
        assert!(state.is_complete());

        state.advance(1);
        assert!(state.is_complete());
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn wrap_mode_cycles_without_finishing() {
        let mut state = SessionState::new().with_wrap_on_advance(true);
        state.advance(3);
        state.advance(3);
        assert_eq!(state.current_index(), 2);

        state.advance(3);
        assert_eq!(state.current_index(), 0);
        assert!(!state.is_complete());
    }

    #[test]
    fn retreat_stops_at_start() {
        let mut state = SessionState::new();
        assert!(state.is_at_start());
        state.retreat();
        assert_eq!(state.current_index(), 0);

        state.advance(3);
        assert!(!state.is_at_start());
        state.retreat();
        assert!(state.is_at_start());
    }

    #[test]
    fn mark_seen_is_idempotent() {
        let mut state = SessionState::new();
        let id = ItemId::new("a");

        assert!(state.mark_seen(&id));
        assert!(!state.mark_seen(&id));
        assert_eq!(state.seen_count(), 1);
    }

    #[test]
    fn mark_flipped_is_idempotent() {
        let mut state = SessionState::new();
        let id = ItemId::new("a");

        assert!(state.mark_flipped(&id));
        assert!(!state.mark_flipped(&id));
    }

    #[test]
    fn record_answer_scores_once_per_item() {
        let mut state = SessionState::new();
        let id = ItemId::new("q1");

        assert!(state.record_answer(&id, true));
        assert_eq!(state.score(), 1);

        // Repeated answers never move the score, correct or not.
        assert!(!state.record_answer(&id, true));
        assert!(!state.record_answer(&id, false));
        assert_eq!(state.score(), 1);
        assert_eq!(state.answered_count(), 1);
    }

    #[test]
    fn record_answer_skips_score_on_wrong_answer() {
        let mut state = SessionState::new();
        assert!(state.record_answer(&ItemId::new("q1"), false));
        assert_eq!(state.score(), 0);
        assert!(state.has_answered(&ItemId::new("q1")));
    }

    #[test]
    fn finish_is_idempotent() {
        let mut state = SessionState::new();
        state.finish();
        state.finish();
        assert!(state.is_complete());
    }
}
