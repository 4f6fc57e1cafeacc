//! Pet engine: the hexagonal core.
//!
//! [`PetEngine`] owns the pet, the care-action table, and the observer
//! list.  It exposes a small imperative API (tick, four care actions,
//! reset, rename).  All I/O flows through the [`PetStore`] and [`Clock`]
//! ports, making the whole engine testable with in-memory adapters.
//!
//! ```text
//!     Ticker ──▶ ┌────────────────────────┐ ──▶ PetStore.save()
//!                │       PetEngine        │
//! Dispatcher ──▶ │ rules · action table   │ ──▶ Observers.notify()
//!                └────────────────────────┘
//! ```
//!
//! Every successful mutation follows the same path: mutate, recompute
//! the derived fields, persist, notify.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{Rejection, Result};
use crate::pet::actions::{ActionDescriptor, CareAction, build_action_table};
use crate::pet::rules::{
    apply_live_decay, apply_offline_decay, derive_mood, normalize, recalculate_health,
    stage_for_age,
};
use crate::pet::{PetAction, PetState};

use super::events::{ActionOutcome, Observers, RevertTicket, SubscriptionId};
use super::ports::{Clock, PetStore};

// ───────────────────────────────────────────────────────────────
// PetEngine
// ───────────────────────────────────────────────────────────────

/// The single mutable pet, with its persistence and subscribers.
pub struct PetEngine<S: PetStore, C: Clock> {
    state: PetState,
    store: S,
    clock: C,
    observers: Observers,
    actions: [ActionDescriptor; CareAction::COUNT],
    /// Name used when a new egg hatches.
    default_name: String,
    /// Bumped on every write of `current_action`; stale revert tickets
    /// carry an older value.
    action_generation: u64,
    /// Revert requested by the last successful transient action, waiting
    /// to be picked up by the scheduler.
    pending_revert: Option<RevertTicket>,
}

impl<S: PetStore, C: Clock> PetEngine<S, C> {
    /// Load the saved pet (applying offline catch-up) or hatch a new one.
    ///
    /// A store that cannot be read is fatal: there is no retry policy.
    pub fn new(config: &EngineConfig, store: S, clock: C) -> Result<Self> {
        let now = clock.now();

        let state = match store.load()? {
            Some(mut saved) => {
                normalize(&mut saved);
                let ticks = catch_up(&mut saved, now, config.offline_tick_ms);
                info!(
                    "PetEngine: restored '{}' ({}, age {}), {} offline tick(s) applied",
                    saved.name, saved.stats.stage, saved.stats.age, ticks
                );
                saved
            }
            None => {
                info!("PetEngine: no saved pet, hatching '{}'", config.pet_name);
                PetState::hatch(config.pet_name.clone(), now)
            }
        };

        Ok(Self {
            state,
            store,
            clock,
            observers: Observers::new(),
            actions: build_action_table(),
            default_name: config.pet_name.clone(),
            action_generation: 0,
            pending_revert: None,
        })
    }

    // ── Queries ───────────────────────────────────────────────

    /// Borrow the live state.
    pub fn state(&self) -> &PetState {
        &self.state
    }

    /// Owned copy of the live state.
    pub fn snapshot(&self) -> PetState {
        self.state.clone()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ── Observers ─────────────────────────────────────────────

    /// Register a callback that receives a snapshot after every change.
    pub fn subscribe(&mut self, callback: impl FnMut(&PetState) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ── Simulation ────────────────────────────────────────────

    /// Advance the pet by one live tick.  No-op once the pet has died.
    pub fn tick(&mut self) {
        if !self.state.stats.is_alive {
            return;
        }

        let prev_action = self.state.current_action;
        let prev_stage = self.state.stats.stage;

        // 1–2. Decay, then sleep recovery or awake drain
        if apply_live_decay(&mut self.state) {
            info!("{} woke up fully rested", self.state.name);
        }

        // 3. Age and evolve
        let stats = &mut self.state.stats;
        stats.age = stats.age.saturating_add(1);
        stats.stage = stage_for_age(stats.age);
        if stats.stage != prev_stage {
            info!(
                "{} evolved: {} -> {} at age {}",
                self.state.name, prev_stage, stats.stage, stats.age
            );
        }

        // 4. Derived fields
        if recalculate_health(&mut self.state.stats) {
            warn!(
                "{} has died at age {}",
                self.state.name, self.state.stats.age
            );
        }
        self.refresh_mood();

        // 5. A tick overrides any transient animation still showing
        if self.state.current_action.is_transient() {
            self.state.current_action = PetAction::Idle;
        }
        if self.state.current_action != prev_action {
            self.invalidate_reverts();
        }

        debug!("tick: {}", self.state);

        // 6.
        self.commit();
    }

    // ── Care actions ──────────────────────────────────────────

    pub fn feed(&mut self) -> ActionOutcome {
        self.perform(CareAction::Feed)
    }

    pub fn play(&mut self) -> ActionOutcome {
        self.perform(CareAction::Play)
    }

    /// Put the pet to sleep, or wake it if it is already asleep.
    pub fn sleep(&mut self) -> ActionOutcome {
        self.perform(CareAction::Sleep)
    }

    pub fn clean(&mut self) -> ActionOutcome {
        self.perform(CareAction::Clean)
    }

    /// Run one care action through the shared refusals and its table row.
    pub fn perform(&mut self, action: CareAction) -> ActionOutcome {
        if !self.state.stats.is_alive {
            return self.reject(action, Rejection::Dead);
        }

        if self.state.is_sleeping() {
            if action == CareAction::Sleep {
                return self.wake();
            }
            return self.reject(action, Rejection::Sleeping);
        }

        let row = self.actions[action as usize];
        if let Some(reason) = (row.guard)(&self.state.stats) {
            return self.reject(action, reason);
        }

        (row.effect)(&mut self.state.stats);
        self.set_action(row.transient);
        self.refresh_mood();
        self.commit();

        if let Some(delay_ms) = row.revert_after_ms {
            self.pending_revert = Some(RevertTicket {
                action: row.transient,
                generation: self.action_generation,
                delay_ms,
            });
        }

        info!("{}: {} accepted", self.state.name, action);
        ActionOutcome::accepted(row.success_message(&self.state.name))
    }

    /// Take the revert requested by the last successful transient action.
    pub fn take_pending_revert(&mut self) -> Option<RevertTicket> {
        self.pending_revert.take()
    }

    /// Return a transient action to idle once its delay has elapsed.
    ///
    /// Ignored (returns `false`) if anything has written the current
    /// action since the ticket was issued.
    pub fn revert_transient(&mut self, ticket: RevertTicket) -> bool {
        if ticket.generation != self.action_generation
            || self.state.current_action != ticket.action
        {
            debug!(
                "revert of {} ignored: superseded (gen {} != {})",
                ticket.action, ticket.generation, self.action_generation
            );
            return false;
        }

        self.set_action(PetAction::Idle);
        self.refresh_mood();
        self.commit();
        true
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Discard the pet and hatch a new egg.  The only way to revive.
    pub fn reset(&mut self) {
        let now = self.clock.now();
        info!(
            "{} reset (was {}, age {})",
            self.state.name, self.state.mood, self.state.stats.age
        );
        self.state = PetState::hatch(self.default_name.clone(), now);
        self.invalidate_reverts();
        self.commit();
    }

    /// Change the pet's name.  Stats are untouched.
    pub fn rename(&mut self, name: impl Into<String>) {
        let name = name.into();
        info!("{} renamed to {}", self.state.name, name);
        self.state.name = name;
        self.commit();
    }

    /// Name given to the next egg hatched by [`reset`](Self::reset).
    pub fn set_default_name(&mut self, name: impl Into<String>) {
        self.default_name = name.into();
    }

    /// Stamp `last_update` and write the pet to the store.
    ///
    /// Store failures are logged, never surfaced: callers of the care
    /// actions have no failure path.
    pub fn persist(&mut self) {
        self.state.last_update = self.clock.now();
        if let Err(e) = self.store.save(&self.state) {
            warn!("PetEngine: save failed: {}", e);
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn wake(&mut self) -> ActionOutcome {
        self.set_action(PetAction::Idle);
        self.refresh_mood();
        self.commit();
        info!("{} woke up", self.state.name);
        ActionOutcome::accepted(format!("{} woke up! ☀️", self.state.name))
    }

    fn reject(&self, action: CareAction, reason: Rejection) -> ActionOutcome {
        debug!("{}: {} rejected ({:?})", self.state.name, action, reason);
        ActionOutcome::rejected(reason, &self.state.name)
    }

    fn set_action(&mut self, action: PetAction) {
        self.state.current_action = action;
        self.invalidate_reverts();
    }

    fn invalidate_reverts(&mut self) {
        self.action_generation += 1;
        self.pending_revert = None;
    }

    fn refresh_mood(&mut self) {
        self.state.mood = derive_mood(&self.state);
    }

    fn commit(&mut self) {
        self.persist();
        self.observers.notify(&self.state);
    }
}

// ───────────────────────────────────────────────────────────────
// Offline catch-up
// ───────────────────────────────────────────────────────────────

/// Whole offline ticks between `last_update` and `now`.  A clock that
/// moved backwards yields zero.
pub fn offline_ticks(last_update: DateTime<Utc>, now: DateTime<Utc>, tick_ms: u64) -> u64 {
    let elapsed_ms = (now - last_update).num_milliseconds();
    if elapsed_ms <= 0 || tick_ms == 0 {
        return 0;
    }
    elapsed_ms as u64 / tick_ms
}

/// Apply reduced-rate decay for the time the host was not running.
///
/// Returns the number of ticks applied (zero for a dead pet).
pub fn catch_up(state: &mut PetState, now: DateTime<Utc>, tick_ms: u64) -> u64 {
    let ticks = offline_ticks(state.last_update, now, tick_ms);
    if ticks == 0 || !state.stats.is_alive {
        return 0;
    }

    apply_offline_decay(&mut state.stats, ticks);
    state.last_update = now;
    if recalculate_health(&mut state.stats) {
        warn!("{} died while you were away", state.name);
    }
    state.mood = derive_mood(state);
    ticks
}
