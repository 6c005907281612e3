use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use study_core::model::{ChoiceSet, ItemDeck, ItemId, SetId, StudyItem, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors surfaced when fetching a study set from the remote API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("study set not found")]
    NotFound,

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

/// Errors surfaced when submitting a point award.
///
/// By engine contract these never reach the user; the dispatcher logs and
/// drops them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RewardError {
    #[error("award request rejected with status {0}")]
    Rejected(u16),

    #[error("network error: {0}")]
    Network(String),
}

//
// ─── WIRE RECORDS ──────────────────────────────────────────────────────────────
//

/// Study set header as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySetInfo {
    pub id: SetId,
    pub title: String,
}

/// One study item as returned by the API.
///
/// Quiz endpoints include `options` and `correct_answer`; the plain study-set
/// endpoint omits both. Mirrors the domain `StudyItem` so the adapter can
/// deserialize responses without leaking wire concerns into the domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyItemRecord {
    pub id: ItemId,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

impl StudyItemRecord {
    /// Convert the record into a domain `StudyItem`.
    ///
    /// A record carrying both `options` and `correct_answer` becomes a quiz
    /// item; anything else becomes a flashcard.
    ///
    /// # Errors
    ///
    /// Returns `study_core::Error` if the text or choice set fails
    /// validation.
    pub fn into_item(self) -> Result<StudyItem, study_core::Error> {
        let item = match (self.options, self.correct_answer) {
            (Some(options), Some(correct)) => {
                let choices = ChoiceSet::new(options, correct)?;
                StudyItem::quiz(self.id, self.question, self.answer, choices)?
            }
            _ => StudyItem::flashcard(self.id, self.question, self.answer)?,
        };
        Ok(item)
    }
}

/// Full study-set response: `{study_set, study_items}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySetRecord {
    #[serde(rename = "study_set")]
    pub set: StudySetInfo,
    #[serde(rename = "study_items")]
    pub items: Vec<StudyItemRecord>,
}

impl StudySetRecord {
    /// Convert the response into a validated `ItemDeck`.
    ///
    /// # Errors
    ///
    /// Returns `study_core::Error` for an empty set, duplicate item ids, or
    /// invalid item content.
    pub fn into_deck(self) -> Result<ItemDeck, study_core::Error> {
        let items = self
            .items
            .into_iter()
            .map(StudyItemRecord::into_item)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ItemDeck::new(self.set.title, items)?)
    }
}

//
// ─── COLLABORATOR CONTRACTS ────────────────────────────────────────────────────
//

/// Source of study sets for the engine.
#[async_trait]
pub trait StudySetProvider: Send + Sync {
    /// Fetch a study set with its items.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotFound` for an unknown id, or other
    /// provider errors.
    async fn fetch(&self, set_id: &SetId) -> Result<StudySetRecord, ProviderError>;
}

/// Sink for point credits.
#[async_trait]
pub trait RewardService: Send + Sync {
    /// Credit `points` to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RewardError` on rejection or transport failure. Callers in
    /// the engine treat failure as final; there is no retry.
    async fn award(&self, user_id: &UserId, points: u32) -> Result<(), RewardError>;
}

//
// ─── IN-MEMORY IMPLEMENTATIONS ─────────────────────────────────────────────────
//

/// In-memory study-set source for tests and local development.
#[derive(Clone, Default)]
pub struct InMemoryStudySets {
    sets: Arc<Mutex<HashMap<SetId, StudySetRecord>>>,
}

impl InMemoryStudySets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a study set, replacing any previous one with the same id.
    pub fn insert(&self, record: StudySetRecord) {
        let mut sets = self.sets.lock().expect("study set lock poisoned");
        sets.insert(record.set.id.clone(), record);
    }
}

#[async_trait]
impl StudySetProvider for InMemoryStudySets {
    async fn fetch(&self, set_id: &SetId) -> Result<StudySetRecord, ProviderError> {
        let sets = self.sets.lock().expect("study set lock poisoned");
        sets.get(set_id).cloned().ok_or(ProviderError::NotFound)
    }
}

/// Reward sink that records every award attempt, optionally failing them
/// all. Lets tests assert outbound-call counts and the engine's tolerance
/// of delivery failure.
#[derive(Clone, Default)]
pub struct RecordingRewards {
    calls: Arc<Mutex<Vec<(UserId, u32)>>>,
    fail_all: bool,
}

impl RecordingRewards {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every `award` call fails after being recorded.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_all: true,
        }
    }

    /// All award attempts seen so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<(UserId, u32)> {
        self.calls.lock().expect("reward lock poisoned").clone()
    }

    /// Sum of points across recorded attempts.
    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.calls
            .lock()
            .expect("reward lock poisoned")
            .iter()
            .map(|(_, points)| points)
            .sum()
    }
}

#[async_trait]
impl RewardService for RecordingRewards {
    async fn award(&self, user_id: &UserId, points: u32) -> Result<(), RewardError> {
        self.calls
            .lock()
            .expect("reward lock poisoned")
            .push((user_id.clone(), points));

        if self.fail_all {
            return Err(RewardError::Network("simulated outage".into()));
        }
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
