use study_core::model::StudyItem;

use crate::error::ScoreError;

/// Outcome of checking one chosen option, with the correct option included
/// so the presentation layer can paint both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerCheck {
    pub is_correct: bool,
    pub correct_answer: String,
}

/// Stateless answer evaluation and final-score arithmetic.
///
/// Pure functions; the controller decides whether a check feeds
/// `SessionState::record_answer`.
pub struct QuizScorer;

impl QuizScorer {
    /// Evaluates a chosen option against an item's choice set.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::NotMultipleChoice` for an item without options.
    pub fn check_answer(item: &StudyItem, chosen: &str) -> Result<AnswerCheck, ScoreError> {
        let choices = item.choices().ok_or(ScoreError::NotMultipleChoice)?;
        Ok(AnswerCheck {
            is_correct: choices.is_correct(chosen),
            correct_answer: choices.correct_answer().to_owned(),
        })
    }

    /// Final score as a percentage, rounded to the nearest integer.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::EmptyQuiz` when `total` is 0. Deck construction
    /// rejects empty decks, so a controller never reaches this case.
    pub fn final_percentage(score: u32, total: u32) -> Result<u32, ScoreError> {
        if total == 0 {
            return Err(ScoreError::EmptyQuiz);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = (f64::from(score) / f64::from(total) * 100.0).round() as u32;
        Ok(pct)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::{ChoiceSet, ItemId};

    fn quiz_item() -> StudyItem {
        let choices =
            ChoiceSet::new(vec!["Mitochondria".into(), "Nucleus".into()], "Mitochondria").unwrap();
        StudyItem::quiz(
            ItemId::new("q1"),
            "Powerhouse of the cell?",
            "Mitochondria",
            choices,
        )
        .unwrap()
    }

    #[test]
    fn check_answer_flags_correct_choice() {
        let item = quiz_item();

        let check = QuizScorer::check_answer(&item, "Mitochondria").unwrap();
        assert!(check.is_correct);

        let check = QuizScorer::check_answer(&item, "Nucleus").unwrap();
        assert!(!check.is_correct);
        assert_eq!(check.correct_answer, "Mitochondria");
    }

    #[test]
    fn check_answer_rejects_flashcard() {
        let item = StudyItem::flashcard(ItemId::new("f1"), "Q", "A").unwrap();
        let err = QuizScorer::check_answer(&item, "A").unwrap_err();
        assert_eq!(err, ScoreError::NotMultipleChoice);
    }

    #[test]
    fn final_percentage_rounds_to_nearest() {
        assert_eq!(QuizScorer::final_percentage(3, 4).unwrap(), 75);
        assert_eq!(QuizScorer::final_percentage(1, 3).unwrap(), 33);
        assert_eq!(QuizScorer::final_percentage(2, 3).unwrap(), 67);
        assert_eq!(QuizScorer::final_percentage(0, 5).unwrap(), 0);
        assert_eq!(QuizScorer::final_percentage(5, 5).unwrap(), 100);
    }

    #[test]
    fn final_percentage_rejects_empty_quiz() {
        let err = QuizScorer::final_percentage(0, 0).unwrap_err();
        assert_eq!(err, ScoreError::EmptyQuiz);
    }
}
