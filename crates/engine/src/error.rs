//! Shared error types for the engine crate.

use thiserror::Error;

use remote::api::ProviderError;
use study_core::model::DeckError;

/// Errors emitted by `QuizScorer`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("item has no multiple-choice options")]
    NotMultipleChoice,

    #[error("cannot score a quiz with zero questions")]
    EmptyQuiz,
}

/// Errors emitted by the session controller and workflow.
///
/// Deck and provider failures are fatal to session start; the presentation
/// layer renders them as its error state. Reward delivery failures never
/// appear here — the dispatcher swallows them by contract.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session already completed")]
    Completed,

    #[error("deck is missing multiple-choice options and cannot be played as a quiz")]
    NotQuizDeck,

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Model(#[from] study_core::Error),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Score(#[from] ScoreError),
}
