use std::collections::HashSet;
use std::sync::Arc;

use log::warn;
use tokio::task::JoinHandle;

use remote::api::RewardService;
use study_core::model::{ItemId, RewardEvent, RewardEventKind, RewardSchedule, SetId, UserId};

/// Turns qualifying session transitions into point credits, sending each at
/// most once per session.
///
/// The dedup set is inserted into synchronously, before the network call is
/// spawned — two rapid triggers of the same event can never both pass the
/// check, even though the sends themselves are unordered. The set is owned
/// here, not by `SessionState`: the marks there drive the UI, this one
/// drives network idempotence and survives a state reset.
///
/// Delivery is fire-and-forget. A failed send is logged and dropped; the
/// dedup entry is not rolled back, so the client under-credits rather than
/// risking a duplicate on retry. In-flight sends may outlive the session
/// view.
pub struct RewardDispatcher {
    user_id: UserId,
    schedule: RewardSchedule,
    service: Arc<dyn RewardService>,
    // Keyed by (kind, subject); the user is fixed for the dispatcher's
    // lifetime, so the (user, kind, subject) triple collapses to this pair.
    sent: HashSet<(RewardEventKind, String)>,
}

impl RewardDispatcher {
    #[must_use]
    pub fn new(user_id: UserId, schedule: RewardSchedule, service: Arc<dyn RewardService>) -> Self {
        Self {
            user_id,
            schedule,
            service,
            sent: HashSet::new(),
        }
    }

    #[must_use]
    pub fn schedule(&self) -> &RewardSchedule {
        &self.schedule
    }

    /// Number of distinct events recorded so far (sent or zero-point).
    #[must_use]
    pub fn recorded(&self) -> usize {
        self.sent.len()
    }

    /// Submits an event, deduplicated per (kind, subject) for this session.
    ///
    /// Returns the spawned send's handle so tests can await delivery;
    /// production callers drop it. `None` means nothing was sent: the event
    /// was a duplicate or worth zero points (zero-point events are still
    /// recorded, matching the upstream client's `points > 0` guard).
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn notify(&mut self, event: RewardEvent) -> Option<JoinHandle<()>> {
        let key = (event.kind, event.subject_id.clone());
        if !self.sent.insert(key) {
            return None;
        }
        if event.points == 0 {
            return None;
        }

        let service = Arc::clone(&self.service);
        Some(tokio::spawn(async move {
            if let Err(err) = service.award(&event.user_id, event.points).await {
                warn!(
                    "dropping failed {} award for {}: {err}",
                    event.kind, event.subject_id
                );
            }
        }))
    }

    /// Credits the first sighting of an item.
    pub fn notify_seen(&mut self, item_id: &ItemId) -> Option<JoinHandle<()>> {
        self.notify(RewardEvent::new(
            self.user_id.clone(),
            RewardEventKind::Seen,
            item_id.as_str(),
            self.schedule.seen,
        ))
    }

    /// Credits the first flip of a flashcard.
    pub fn notify_flipped(&mut self, item_id: &ItemId) -> Option<JoinHandle<()>> {
        self.notify(RewardEvent::new(
            self.user_id.clone(),
            RewardEventKind::Flipped,
            item_id.as_str(),
            self.schedule.flipped,
        ))
    }

    /// Credits a finished quiz: per-correct points times `correct`.
    pub fn notify_quiz_complete(
        &mut self,
        set_id: &SetId,
        correct: u32,
    ) -> Option<JoinHandle<()>> {
        self.notify(RewardEvent::new(
            self.user_id.clone(),
            RewardEventKind::QuizComplete,
            set_id.as_str(),
            self.schedule.quiz_complete(correct),
        ))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
