//! Outbound results and state-change notifications.
//!
//! The [`PetEngine`](super::service::PetEngine) answers every care action
//! with an [`ActionOutcome`] and broadcasts a [`PetState`] snapshot to
//! its [`Observers`] after each change.  Presentation layers on the other
//! side decide what to do with them.

use crate::error::Rejection;
use crate::pet::{PetAction, PetState};

/// Result of a care action, shown verbatim to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
}

impl ActionOutcome {
    pub fn accepted(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }

    pub fn rejected(reason: Rejection, name: &str) -> Self {
        Self {
            success: false,
            message: reason.message(name),
        }
    }
}

/// A scheduled "go back to idle" for a transient action.
///
/// Only honoured while `generation` matches the engine's current action
/// generation; any later write of the current action makes it stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertTicket {
    pub action: PetAction,
    pub generation: u64,
    pub delay_ms: u64,
}

// ───────────────────────────────────────────────────────────────
// Observer registry
// ───────────────────────────────────────────────────────────────

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&PetState)>;

/// Publish/subscribe list of state-change callbacks.
#[derive(Default)]
pub struct Observers {
    entries: Vec<(SubscriptionId, Callback)>,
    next_id: u64,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&PetState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription.  Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Hand `snapshot` to every subscriber in subscription order.
    pub fn notify(&mut self, snapshot: &PetState) {
        for (_, callback) in &mut self.entries {
            callback(snapshot);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl core::fmt::Debug for Observers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.entries.len())
            .finish()
    }
}
