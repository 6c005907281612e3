use std::collections::HashSet;
use thiserror::Error;

use crate::model::item::StudyItem;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck title cannot be empty")]
    EmptyTitle,

    #[error("deck has no study items")]
    Empty,

    #[error("duplicate item id in deck: {0}")]
    DuplicateItem(String),

    #[error("index {index} out of range for deck of {len} items")]
    OutOfRange { index: usize, len: usize },
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

/// Ordered collection of study items for one study set.
///
/// Insertion order is the study order. Built once when a study set finishes
/// loading and read-only for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDeck {
    title: String,
    items: Vec<StudyItem>,
}

impl ItemDeck {
    /// Creates a deck from a fetched study set.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::Empty` for an empty item list,
    /// `DeckError::DuplicateItem` when two items share an id, and
    /// `DeckError::EmptyTitle` for a blank title.
    pub fn new(title: impl Into<String>, items: Vec<StudyItem>) -> Result<Self, DeckError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DeckError::EmptyTitle);
        }
        if items.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(DeckError::DuplicateItem(item.id().to_string()));
            }
        }

        Ok(Self {
            title: title.trim().to_owned(),
            items,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of items in this deck. Always ≥ 1 once constructed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bounds-checked access to the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::OutOfRange` outside `[0, len)`. Valid controller
    /// use never hits this; it signals a cursor bug, not a user condition.
    pub fn item_at(&self, index: usize) -> Result<&StudyItem, DeckError> {
        self.items.get(index).ok_or(DeckError::OutOfRange {
            index,
            len: self.items.len(),
        })
    }

    #[must_use]
    pub fn items(&self) -> &[StudyItem] {
        &self.items
    }

    /// Returns true when every item carries a multiple-choice block, i.e.
    /// the deck can be played in quiz mode.
    #[must_use]
    pub fn is_quiz_ready(&self) -> bool {
        self.items.iter().all(StudyItem::is_quiz_item)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
