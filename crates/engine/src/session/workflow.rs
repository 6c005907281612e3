use std::sync::Arc;

use remote::api::{RewardService, StudySetProvider};
use study_core::Clock;
use study_core::model::{RewardSchedule, SetId, UserId};

use super::controller::{SessionController, StudyMode};
use crate::dispatcher::RewardDispatcher;
use crate::error::SessionError;

/// Orchestrates session start: fetches the study set, builds the deck, and
/// wires up a controller with its reward dispatcher.
///
/// An `Err` from the start methods is the presentation layer's
/// loading-failed state; the error's `Display` is the message to show.
#[derive(Clone)]
pub struct SessionWorkflow {
    provider: Arc<dyn StudySetProvider>,
    rewards: Arc<dyn RewardService>,
    schedule: RewardSchedule,
    clock: Clock,
}

impl SessionWorkflow {
    #[must_use]
    pub fn new(provider: Arc<dyn StudySetProvider>, rewards: Arc<dyn RewardService>) -> Self {
        Self {
            provider,
            rewards,
            schedule: RewardSchedule::default(),
            clock: Clock::default(),
        }
    }

    /// Overrides the default point economy.
    #[must_use]
    pub fn with_schedule(mut self, schedule: RewardSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Pins the clock, for deterministic session timestamps in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Starts a flashcard session over the given study set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Provider` when the fetch fails and
    /// `SessionError::Model` for an empty or malformed set.
    pub async fn start_flashcards(
        &self,
        set_id: &SetId,
        user_id: &UserId,
    ) -> Result<SessionController, SessionError> {
        self.start(set_id, user_id, StudyMode::Flashcards).await
    }

    /// Starts a quiz session over the given study set.
    ///
    /// # Errors
    ///
    /// As [`Self::start_flashcards`], plus `SessionError::NotQuizDeck` when
    /// items lack multiple-choice options.
    pub async fn start_quiz(
        &self,
        set_id: &SetId,
        user_id: &UserId,
    ) -> Result<SessionController, SessionError> {
        self.start(set_id, user_id, StudyMode::Quiz).await
    }

    async fn start(
        &self,
        set_id: &SetId,
        user_id: &UserId,
        mode: StudyMode,
    ) -> Result<SessionController, SessionError> {
        let record = self.provider.fetch(set_id).await?;
        let deck = record.into_deck()?;
        let dispatcher =
            RewardDispatcher::new(user_id.clone(), self.schedule, Arc::clone(&self.rewards));
        SessionController::new(set_id.clone(), deck, mode, dispatcher, self.clock)
    }
}
