use thiserror::Error;

use crate::model::ids::ItemId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudyItemError {
    #[error("question cannot be empty")]
    EmptyQuestion,

    #[error("answer cannot be empty")]
    EmptyAnswer,

    #[error("multiple-choice items need at least 2 options, got {0}")]
    TooFewOptions(usize),

    #[error("correct answer is not one of the options")]
    CorrectAnswerNotAnOption,
}

//
// ─── CHOICES ───────────────────────────────────────────────────────────────────
//

/// Multiple-choice block of a quiz item: the presented options and which of
/// them is the correct one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSet {
    options: Vec<String>,
    correct_answer: String,
}

impl ChoiceSet {
    /// Creates a validated choice set.
    ///
    /// # Errors
    ///
    /// Returns `StudyItemError::TooFewOptions` for fewer than 2 options and
    /// `StudyItemError::CorrectAnswerNotAnOption` when the marked answer is
    /// missing from the options.
    pub fn new(
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, StudyItemError> {
        if options.len() < 2 {
            return Err(StudyItemError::TooFewOptions(options.len()));
        }
        let correct_answer = correct_answer.into();
        if !options.contains(&correct_answer) {
            return Err(StudyItemError::CorrectAnswerNotAnOption);
        }

        Ok(Self {
            options,
            correct_answer,
        })
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Returns true when `chosen` matches the correct option exactly.
    #[must_use]
    pub fn is_correct(&self, chosen: &str) -> bool {
        self.correct_answer == chosen
    }
}

//
// ─── STUDY ITEM ────────────────────────────────────────────────────────────────
//

/// One question/answer unit of a study set.
///
/// Immutable once constructed; owned by the deck for the whole session.
/// Items generated for quiz play additionally carry a [`ChoiceSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyItem {
    id: ItemId,
    question: String,
    answer: String,
    choices: Option<ChoiceSet>,
}

impl StudyItem {
    /// Creates a plain flashcard item.
    ///
    /// # Errors
    ///
    /// Returns `StudyItemError` if question or answer is empty or
    /// whitespace-only.
    pub fn flashcard(
        id: ItemId,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, StudyItemError> {
        Self::build(id, question.into(), answer.into(), None)
    }

    /// Creates a multiple-choice quiz item.
    ///
    /// # Errors
    ///
    /// Returns `StudyItemError` for blank text or an invalid choice set.
    pub fn quiz(
        id: ItemId,
        question: impl Into<String>,
        answer: impl Into<String>,
        choices: ChoiceSet,
    ) -> Result<Self, StudyItemError> {
        Self::build(id, question.into(), answer.into(), Some(choices))
    }

    fn build(
        id: ItemId,
        question: String,
        answer: String,
        choices: Option<ChoiceSet>,
    ) -> Result<Self, StudyItemError> {
        if question.trim().is_empty() {
            return Err(StudyItemError::EmptyQuestion);
        }
        if answer.trim().is_empty() {
            return Err(StudyItemError::EmptyAnswer);
        }

        Ok(Self {
            id,
            question: question.trim().to_owned(),
            answer: answer.trim().to_owned(),
            choices,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn choices(&self) -> Option<&ChoiceSet> {
        self.choices.as_ref()
    }

    /// Returns true when this item can be played in quiz mode.
    #[must_use]
    pub fn is_quiz_item(&self) -> bool {
        self.choices.is_some()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
