use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use study_core::Clock;
use study_core::model::{ItemDeck, ItemId, SessionState, SetId, StudyItem};

use super::view::{ItemView, SessionPhase, SessionView};
use crate::dispatcher::RewardDispatcher;
use crate::error::SessionError;
use crate::scorer::{AnswerCheck, QuizScorer};

/// How a deck is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyMode {
    /// Question/answer cards; "next" wraps past the last card.
    Flashcards,
    /// Multiple-choice run; "next" from the last question finishes.
    Quiz,
}

#[derive(Debug, Clone)]
struct QuizAnswer {
    chosen: String,
    check: AnswerCheck,
}

/// Drives one pass through a deck.
///
/// Owns the deck, the session state, and the reward dispatcher; the
/// presentation layer calls the operations below and re-renders from
/// [`SessionController::view`]. Operations run to completion on the calling
/// task — the only asynchronous boundary is the dispatcher's outbound send,
/// which is never awaited here.
pub struct SessionController {
    set_id: SetId,
    deck: ItemDeck,
    mode: StudyMode,
    state: SessionState,
    dispatcher: RewardDispatcher,
    answers: HashMap<ItemId, QuizAnswer>,
    revealed: bool,
    clock: Clock,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl SessionController {
    /// Creates a session over a loaded deck, positioned at item 0 (which is
    /// immediately marked seen).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotQuizDeck` when quiz mode is requested for
    /// a deck whose items lack choice blocks.
    pub fn new(
        set_id: SetId,
        deck: ItemDeck,
        mode: StudyMode,
        dispatcher: RewardDispatcher,
        clock: Clock,
    ) -> Result<Self, SessionError> {
        if mode == StudyMode::Quiz && !deck.is_quiz_ready() {
            return Err(SessionError::NotQuizDeck);
        }

        let state = SessionState::new().with_wrap_on_advance(mode == StudyMode::Flashcards);
        let mut controller = Self {
            set_id,
            deck,
            mode,
            state,
            dispatcher,
            answers: HashMap::new(),
            revealed: false,
            clock,
            started_at: clock.now(),
            completed_at: None,
        };
        controller.mark_current_seen()?;
        Ok(controller)
    }

    // Accessors
    #[must_use]
    pub fn set_id(&self) -> &SetId {
        &self.set_id
    }

    #[must_use]
    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    #[must_use]
    pub fn deck(&self) -> &ItemDeck {
        &self.deck
    }

    #[must_use]
    pub fn dispatcher(&self) -> &RewardDispatcher {
        &self.dispatcher
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.state.score()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&StudyItem> {
        self.deck.items().get(self.state.current_index())
    }

    /// Moves to the next item; in quiz mode, advancing past the last
    /// question completes the session. No-op once complete.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Deck` only on a cursor bug.
    pub fn next(&mut self) -> Result<(), SessionError> {
        if self.state.is_complete() {
            return Ok(());
        }

        self.revealed = false;
        self.state.advance(self.deck.len());

        if self.state.is_complete() {
            self.complete();
            return Ok(());
        }
        self.mark_current_seen()
    }

    /// Moves back one item. Silently stays put at the first item and once
    /// complete; the presentation layer disables the control via
    /// `is_at_start` on the view.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Deck` only on a cursor bug.
    pub fn previous(&mut self) -> Result<(), SessionError> {
        if self.state.is_complete() || self.state.is_at_start() {
            return Ok(());
        }

        self.revealed = false;
        self.state.retreat();
        self.mark_current_seen()
    }

    /// Toggles the current flashcard between question and answer face.
    /// The first flip of each card emits one Flipped reward event; further
    /// flips of the same card never re-credit. No-op in quiz mode and once
    /// complete.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Deck` only on a cursor bug.
    pub fn flip(&mut self) -> Result<(), SessionError> {
        if self.mode != StudyMode::Flashcards || self.state.is_complete() {
            return Ok(());
        }

        self.revealed = !self.revealed;
        if self.revealed {
            let id = self.current_id()?;
            if self.state.mark_flipped(&id) {
                let _ = self.dispatcher.notify_flipped(&id);
            }
        }
        Ok(())
    }

    /// Commits an answer for the current quiz question. The first commit is
    /// scored and locked in; repeats (including a double-click on another
    /// option) are ignored. No-op in flashcard mode and once complete.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Deck` on a cursor bug; quiz-readiness is
    /// checked at construction, so scoring itself cannot fail here.
    pub fn select_option(&mut self, chosen: &str) -> Result<(), SessionError> {
        if self.mode != StudyMode::Quiz || self.state.is_complete() {
            return Ok(());
        }

        let item = self.deck.item_at(self.state.current_index())?;
        let id = item.id().clone();
        if self.state.has_answered(&id) {
            return Ok(());
        }

        let check = QuizScorer::check_answer(item, chosen)?;
        self.state.record_answer(&id, check.is_correct);
        self.answers.insert(
            id,
            QuizAnswer {
                chosen: chosen.to_owned(),
                check,
            },
        );
        Ok(())
    }

    /// Explicitly ends the session (the quiz "Finish" button). Completing a
    /// quiz emits a single QuizComplete event; calling this twice, or after
    /// `next` already completed the run, changes nothing.
    pub fn finish(&mut self) {
        if self.state.is_complete() {
            return;
        }
        self.state.finish();
        self.complete();
    }

    /// Builds the read-only view model for rendering.
    #[must_use]
    pub fn view(&self) -> SessionView {
        let index = self.state.current_index();
        let item = self.current_item().map(|item| {
            let answer = self.answers.get(item.id());
            ItemView {
                id: item.id().clone(),
                question: item.question().to_owned(),
                answer: item.answer().to_owned(),
                revealed: self.revealed,
                options: item
                    .choices()
                    .map(|choices| choices.options().to_vec())
                    .unwrap_or_default(),
                chosen: answer.map(|a| a.chosen.clone()),
                check: answer.map(|a| a.check.clone()),
            }
        });

        let phase = if self.state.is_complete() {
            SessionPhase::Complete
        } else {
            SessionPhase::Active
        };
        let total = self.deck.len();
        let final_percentage = (self.mode == StudyMode::Quiz && self.state.is_complete())
            .then(|| {
                let total = u32::try_from(total).unwrap_or(u32::MAX);
                QuizScorer::final_percentage(self.state.score(), total).ok()
            })
            .flatten();

        SessionView {
            phase,
            mode: self.mode,
            title: self.deck.title().to_owned(),
            index,
            total,
            item,
            score: self.state.score(),
            final_percentage,
            is_at_start: self.state.is_at_start(),
            is_at_end: index + 1 == total,
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }

    fn current_id(&self) -> Result<ItemId, SessionError> {
        Ok(self.deck.item_at(self.state.current_index())?.id().clone())
    }

    fn mark_current_seen(&mut self) -> Result<(), SessionError> {
        let id = self.current_id()?;
        if self.state.mark_seen(&id) {
            let _ = self.dispatcher.notify_seen(&id);
        }
        Ok(())
    }

    fn complete(&mut self) {
        if self.completed_at.is_none() {
            self.completed_at = Some(self.clock.now());
        }
        if self.mode == StudyMode::Quiz {
            let _ = self
                .dispatcher
                .notify_quiz_complete(&self.set_id, self.state.score());
        }
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("set_id", &self.set_id)
            .field("mode", &self.mode)
            .field("deck_len", &self.deck.len())
            .field("index", &self.state.current_index())
            .field("score", &self.state.score())
            .field("complete", &self.state.is_complete())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use remote::api::RecordingRewards;
    use study_core::model::{ChoiceSet, RewardSchedule, UserId};
    use study_core::time::fixed_now;

    fn flashcard_deck(n: usize) -> ItemDeck {
        let items = (1..=n)
            .map(|i| {
                StudyItem::flashcard(ItemId::new(format!("card-{i}")), format!("Q{i}"), format!("A{i}"))
                    .unwrap()
            })
            .collect();
        ItemDeck::new("Flashcards", items).unwrap()
    }

    fn quiz_deck(n: usize) -> ItemDeck {
        let items = (1..=n)
            .map(|i| {
                let correct = format!("A{i}");
                let choices =
                    ChoiceSet::new(vec![correct.clone(), "wrong".into()], correct.clone()).unwrap();
                StudyItem::quiz(ItemId::new(format!("q-{i}")), format!("Q{i}"), correct, choices)
                    .unwrap()
            })
            .collect();
        ItemDeck::new("Quiz", items).unwrap()
    }

    fn controller(deck: ItemDeck, mode: StudyMode, rewards: &RecordingRewards) -> SessionController {
        let dispatcher = RewardDispatcher::new(
            UserId::new("u1"),
            RewardSchedule::default(),
            Arc::new(rewards.clone()),
        );
        SessionController::new(
            SetId::new("set-1"),
            deck,
            mode,
            dispatcher,
            Clock::fixed(fixed_now()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn quiz_mode_rejects_flashcard_deck() {
        let rewards = RecordingRewards::new();
        let dispatcher = RewardDispatcher::new(
            UserId::new("u1"),
            RewardSchedule::default(),
            Arc::new(rewards),
        );
        let err = SessionController::new(
            SetId::new("set-1"),
            flashcard_deck(2),
            StudyMode::Quiz,
            dispatcher,
            Clock::fixed(fixed_now()),
        )
        .unwrap_err();

        assert!(matches!(err, SessionError::NotQuizDeck));
    }

    #[tokio::test]
    async fn flashcards_wrap_and_stay_active() {
        let rewards = RecordingRewards::new();
        let mut session = controller(flashcard_deck(3), StudyMode::Flashcards, &rewards);

        session.next().unwrap();
        session.next().unwrap();
        assert_eq!(session.view().index, 2);

        session.next().unwrap();
        assert_eq!(session.view().index, 0);
        assert!(!session.is_complete());
        assert_eq!(session.view().phase, SessionPhase::Active);
    }

    #[tokio::test]
    async fn quiz_completes_after_exactly_n_nexts() {
        let rewards = RecordingRewards::new();
        let mut session = controller(quiz_deck(3), StudyMode::Quiz, &rewards);

        session.next().unwrap();
        session.next().unwrap();
        assert!(!session.is_complete());

        session.next().unwrap();
        assert!(session.is_complete());
        assert_eq!(session.view().phase, SessionPhase::Complete);
        assert_eq!(session.completed_at(), Some(fixed_now()));

        // Terminal: further navigation changes nothing.
        session.next().unwrap();
        session.previous().unwrap();
        assert!(session.is_complete());
    }

    #[tokio::test]
    async fn double_flip_records_one_flipped_event() {
        let rewards = RecordingRewards::new();
        let mut session = controller(flashcard_deck(3), StudyMode::Flashcards, &rewards);

        // Seen(card-1) recorded at construction.
        assert_eq!(session.dispatcher().recorded(), 1);

        session.flip().unwrap();
        session.flip().unwrap();
        session.flip().unwrap();

        // One Flipped entry for card-1 no matter how often it toggles.
        assert_eq!(session.dispatcher().recorded(), 2);
        assert!(session.view().item.unwrap().revealed);
    }

    #[tokio::test]
    async fn navigation_marks_each_item_seen_once() {
        let rewards = RecordingRewards::new();
        let mut session = controller(flashcard_deck(2), StudyMode::Flashcards, &rewards);

        session.next().unwrap();
        session.previous().unwrap();
        session.next().unwrap();
        session.next().unwrap(); // wraps to card-1

        // Two Seen entries total, one per card.
        assert_eq!(session.dispatcher().recorded(), 2);
    }

    #[tokio::test]
    async fn previous_is_a_noop_at_the_first_item() {
        let rewards = RecordingRewards::new();
        let mut session = controller(flashcard_deck(2), StudyMode::Flashcards, &rewards);

        assert!(session.view().is_at_start);
        session.previous().unwrap();
        assert_eq!(session.view().index, 0);
    }

    #[tokio::test]
    async fn select_option_locks_in_the_first_answer() {
        let rewards = RecordingRewards::new();
        let mut session = controller(quiz_deck(2), StudyMode::Quiz, &rewards);

        session.select_option("A1").unwrap();
        assert_eq!(session.score(), 1);

        // Re-answering, right or wrong, is ignored.
        session.select_option("wrong").unwrap();
        session.select_option("A1").unwrap();
        assert_eq!(session.score(), 1);

        let item = session.view().item.unwrap();
        assert_eq!(item.chosen.as_deref(), Some("A1"));
        assert!(item.check.unwrap().is_correct);
    }

    #[tokio::test]
    async fn finish_twice_records_one_quiz_complete() {
        let rewards = RecordingRewards::new();
        let mut session = controller(quiz_deck(2), StudyMode::Quiz, &rewards);

        session.select_option("A1").unwrap();
        session.next().unwrap();
        session.select_option("A2").unwrap();

        session.finish();
        let recorded = session.dispatcher().recorded();
        session.finish();

        assert!(session.is_complete());
        assert_eq!(session.dispatcher().recorded(), recorded);
        assert_eq!(session.view().final_percentage, Some(100));
    }

    #[tokio::test]
    async fn flip_is_ignored_in_quiz_mode() {
        let rewards = RecordingRewards::new();
        let mut session = controller(quiz_deck(2), StudyMode::Quiz, &rewards);

        session.flip().unwrap();
        assert!(!session.view().item.unwrap().revealed);
    }

    #[tokio::test]
    async fn view_reflects_quiz_progress() {
        let rewards = RecordingRewards::new();
        let mut session = controller(quiz_deck(2), StudyMode::Quiz, &rewards);

        let view = session.view();
        assert_eq!(view.title, "Quiz");
        assert_eq!(view.total, 2);
        assert_eq!(view.index, 0);
        assert!(!view.is_at_end);
        assert_eq!(view.final_percentage, None);

        session.select_option("wrong").unwrap();
        session.next().unwrap();
        assert!(session.view().is_at_end);

        session.select_option("A2").unwrap();
        session.next().unwrap();

        let view = session.view();
        assert_eq!(view.score, 1);
        assert_eq!(view.final_percentage, Some(50));
    }
}
