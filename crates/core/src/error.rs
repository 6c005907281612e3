use thiserror::Error;

use crate::model::DeckError;
use crate::model::StudyItemError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Item(#[from] StudyItemError),
}
