use chrono::{DateTime, Utc};

use study_core::model::ItemId;

use super::controller::StudyMode;
use crate::scorer::AnswerCheck;

/// Where the session stands from the presentation layer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    Complete,
}

/// Snapshot of the item under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: ItemId,
    pub question: String,
    pub answer: String,
    /// Whether the answer face is currently showing (flashcard flip).
    pub revealed: bool,
    /// Multiple-choice options; empty for plain flashcards.
    pub options: Vec<String>,
    /// The option the user committed to, if any.
    pub chosen: Option<String>,
    /// Evaluation of the committed option, for painting right/wrong.
    pub check: Option<AnswerCheck>,
}

/// Read-only view of a running session, rebuilt after every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub mode: StudyMode,
    pub title: String,
    pub index: usize,
    pub total: usize,
    pub item: Option<ItemView>,
    pub score: u32,
    /// Rounded final score; present once a quiz completes.
    pub final_percentage: Option<u32>,
    /// Gates the "previous" control at the first item.
    pub is_at_start: bool,
    /// True on the last item, where quiz UIs show "Finish" instead of "Next".
    pub is_at_end: bool,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
