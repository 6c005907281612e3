mod deck;
mod ids;
mod item;
mod reward;
mod session;

pub use ids::{ItemId, SetId, UserId};

pub use deck::{DeckError, ItemDeck};
pub use item::{ChoiceSet, StudyItem, StudyItemError};
pub use reward::{RewardEvent, RewardEventKind, RewardSchedule};
pub use session::SessionState;
