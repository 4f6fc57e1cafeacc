//! Timer engine for the live simulation.
//!
//! Owns two kinds of timer and notifies a [`SchedulerDelegate`] when they
//! fire; the runtime implements the delegate by calling into the engine.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     Timer sources                       │
//! │                                                         │
//! │  ┌───────────────────┐        ┌───────────────────────┐ │
//! │  │ Periodic tick     │        │ One-shot revert       │ │
//! │  │ (tick_interval)   │        │ (at most one pending) │ │
//! │  └─────────┬─────────┘        └───────────┬───────────┘ │
//! │            ▼                              ▼             │
//! │  ┌───────────────────────────────────────────────────┐  │
//! │  │                SchedulerDelegate                  │  │
//! │  └─────────────────────────┬─────────────────────────┘  │
//! │                            ▼                            │
//! │          PetEngine.tick() / revert_transient()          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Time is supplied by the caller as monotonic milliseconds, so the
//! scheduler never reads a clock and is fully deterministic under test.

use log::{debug, info};

use crate::app::events::RevertTicket;
use crate::app::ports::{ScheduleFired, SchedulerDelegate};

/// A revert waiting for its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingRevert {
    ticket: RevertTicket,
    due_ms: u64,
}

/// The scheduler engine.
#[derive(Debug)]
pub struct Scheduler {
    tick_interval_ms: u64,
    next_tick_ms: u64,
    /// Arming a new revert replaces this one.
    revert: Option<PendingRevert>,
    /// Global enable flag.
    enabled: bool,
}

impl Scheduler {
    /// Start ticking every `tick_interval_ms`, first tick one interval
    /// after `now_ms`.
    pub fn new(tick_interval_ms: u64, now_ms: u64) -> Self {
        let tick_interval_ms = tick_interval_ms.max(1);
        Self {
            tick_interval_ms,
            next_tick_ms: now_ms.saturating_add(tick_interval_ms),
            revert: None,
            enabled: true,
        }
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    /// Cancel the running tick timer and reschedule at the new interval.
    pub fn set_tick_interval(&mut self, tick_interval_ms: u64, now_ms: u64) {
        self.tick_interval_ms = tick_interval_ms.max(1);
        self.next_tick_ms = now_ms.saturating_add(self.tick_interval_ms);
        info!("Scheduler: tick interval now {} ms", self.tick_interval_ms);
    }

    /// Schedule `ticket` to fire after its delay, cancelling any revert
    /// that is still pending.
    pub fn arm_revert(&mut self, ticket: RevertTicket, now_ms: u64) {
        if let Some(old) = self.revert {
            debug!("Scheduler: revert of {} superseded", old.ticket.action);
        }
        self.revert = Some(PendingRevert {
            ticket,
            due_ms: now_ms.saturating_add(ticket.delay_ms),
        });
    }

    pub fn cancel_revert(&mut self) {
        self.revert = None;
    }

    pub fn has_pending_revert(&self) -> bool {
        self.revert.is_some()
    }

    /// Enable or disable every timer.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        if !self.enabled {
            return None;
        }
        let tick = self.next_tick_ms;
        Some(self.revert.map_or(tick, |r| r.due_ms.min(tick)))
    }

    /// Fire every timer due at `now_ms`, earliest deadline first.
    ///
    /// The tick fires at most once per poll; periods missed while the
    /// caller was not polling are skipped rather than replayed.
    /// Returns the number of notifications delivered.
    pub fn poll(&mut self, now_ms: u64, delegate: &mut dyn SchedulerDelegate) -> usize {
        if !self.enabled {
            return 0;
        }

        let revert_due = self.revert.filter(|r| r.due_ms <= now_ms);
        let tick_due = self.next_tick_ms <= now_ms;

        let mut fired = 0;
        let revert_first = revert_due.is_some_and(|r| r.due_ms <= self.next_tick_ms);

        if revert_first {
            fired += self.fire_revert(delegate);
        }
        if tick_due {
            self.advance_tick(now_ms);
            delegate.on_schedule_fired(ScheduleFired::Tick);
            fired += 1;
        }
        if revert_due.is_some() && !revert_first {
            fired += self.fire_revert(delegate);
        }
        fired
    }

    fn fire_revert(&mut self, delegate: &mut dyn SchedulerDelegate) -> usize {
        match self.revert.take() {
            Some(pending) => {
                delegate.on_schedule_fired(ScheduleFired::Revert(pending.ticket));
                1
            }
            None => 0,
        }
    }

    fn advance_tick(&mut self, now_ms: u64) {
        let missed = (now_ms - self.next_tick_ms) / self.tick_interval_ms;
        if missed > 0 {
            debug!("Scheduler: skipped {} missed tick(s)", missed);
        }
        self.next_tick_ms += (missed + 1) * self.tick_interval_ms;
    }
}
