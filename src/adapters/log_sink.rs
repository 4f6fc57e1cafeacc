//! Log-based observer.
//!
//! Subscribes to the engine like any UI surface would and writes every
//! snapshot to the `log` facade.  A webview or status-bar adapter would
//! subscribe the same way.

use log::{debug, warn};

use crate::pet::{Mood, PetState};

/// Observer that logs each state change, warning once when the pet dies.
#[derive(Debug, Default)]
pub struct LogObserver {
    last_mood: Option<Mood>,
}

impl LogObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one snapshot.
    pub fn observe(&mut self, state: &PetState) {
        debug!("STATE | {}", state);

        if state.mood != Mood::Dead {
            self.last_mood = Some(state.mood);
            return;
        }
        if self.last_mood != Some(Mood::Dead) {
            warn!(
                "STATE | {} has passed away at age {} ({})",
                state.name, state.stats.age, state.stats.stage
            );
        }
        self.last_mood = Some(Mood::Dead);
    }

    /// Wrap into a callback suitable for
    /// [`PetEngine::subscribe`](crate::app::service::PetEngine::subscribe).
    pub fn into_callback(mut self) -> impl FnMut(&PetState) + 'static {
        move |state: &PetState| self.observe(state)
    }
}
