use std::fmt;

use crate::model::ids::UserId;

//
// ─── EVENT KINDS ───────────────────────────────────────────────────────────────
//

/// The session transitions that earn points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewardEventKind {
    /// An item was shown to the user for the first time.
    Seen,
    /// A flashcard was flipped to its answer for the first time.
    Flipped,
    /// A quiz run reached its end.
    QuizComplete,
}

impl fmt::Display for RewardEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RewardEventKind::Seen => "seen",
            RewardEventKind::Flipped => "flipped",
            RewardEventKind::QuizComplete => "quiz-complete",
        };
        write!(f, "{name}")
    }
}

//
// ─── EVENTS ────────────────────────────────────────────────────────────────────
//

/// A pending point credit for one user action.
///
/// The subject is the item id for `Seen`/`Flipped` and the set id for
/// `QuizComplete`; together with the user and kind it forms the dedup key
/// a dispatcher uses to send each credit at most once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardEvent {
    pub user_id: UserId,
    pub kind: RewardEventKind,
    pub subject_id: String,
    pub points: u32,
}

impl RewardEvent {
    #[must_use]
    pub fn new(
        user_id: UserId,
        kind: RewardEventKind,
        subject_id: impl Into<String>,
        points: u32,
    ) -> Self {
        Self {
            user_id,
            kind,
            subject_id: subject_id.into(),
            points,
        }
    }
}

//
// ─── SCHEDULE ──────────────────────────────────────────────────────────────────
//

/// Point economy for a session, supplied at dispatcher construction so the
/// values can be tuned without touching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardSchedule {
    pub seen: u32,
    pub flipped: u32,
    pub quiz_complete_per_correct: u32,
}

impl RewardSchedule {
    /// Points for finishing a quiz with `correct` right answers.
    #[must_use]
    pub fn quiz_complete(&self, correct: u32) -> u32 {
        self.quiz_complete_per_correct.saturating_mul(correct)
    }
}

impl Default for RewardSchedule {
    /// The upstream client's economy: 1 for seeing a card, 2 for flipping
    /// it, 10 per correct answer on quiz completion.
    fn default() -> Self {
        Self {
            seen: 1,
            flipped: 2,
            quiz_complete_per_correct: 10,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
