//! Care-action table.
//!
//! Each care action is one row of plain `fn` pointers, the same shape as a
//! state table: a guard that may refuse the action, an effect on the
//! meters, and the transient animation it starts.
//!
//! ```text
//! ┌────────┬──────────────────────┬──────────────────────────┬───────────┬─────────┐
//! │ Action │ guard (refuse if)    │ effect                   │ transient │ revert  │
//! ├────────┼──────────────────────┼──────────────────────────┼───────────┼─────────┤
//! │ Feed   │ hunger ≥ 95          │ hunger+25 happiness+5    │ Eating    │ 2000 ms │
//! │ Play   │ energy < 20          │ happy+20 energy−15 hun−5 │ Playing   │ 2500 ms │
//! │ Sleep  │ energy ≥ 95          │ —                        │ Sleeping  │ never   │
//! │ Clean  │ cleanliness ≥ 95     │ clean+30 happiness+5     │ Cleaning  │ 2000 ms │
//! └────────┴──────────────────────┴──────────────────────────┴───────────┴─────────┘
//! ```
//!
//! The shared "dead" and "sleeping" refusals, and waking a sleeping pet,
//! are handled by the engine before a row is consulted.

use core::fmt;

use super::rules::clamp_stat;
use super::{PetAction, PetStats};
use crate::error::Rejection;

/// The four user-initiated care actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CareAction {
    Feed = 0,
    Play = 1,
    Sleep = 2,
    Clean = 3,
}

impl CareAction {
    /// Number of rows in the action table.
    pub const COUNT: usize = 4;

    pub const ALL: [CareAction; Self::COUNT] = [Self::Feed, Self::Play, Self::Sleep, Self::Clean];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Sleep => "sleep",
            Self::Clean => "clean",
        }
    }
}

impl fmt::Display for CareAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the refusal reason, or `None` if the action may proceed.
pub type ActionGuardFn = fn(&PetStats) -> Option<Rejection>;

/// Mutates the meters on success.  Must leave every meter clamped.
pub type ActionEffectFn = fn(&mut PetStats);

/// One row of the action table.
#[derive(Clone, Copy)]
pub struct ActionDescriptor {
    pub action: CareAction,
    pub guard: ActionGuardFn,
    pub effect: ActionEffectFn,
    /// Action the pet switches to on success.
    pub transient: PetAction,
    /// Delay before reverting to idle; `None` for actions that persist.
    pub revert_after_ms: Option<u64>,
    /// Success message, appended to the pet's name.
    pub success: &'static str,
}

impl ActionDescriptor {
    pub fn success_message(&self, name: &str) -> String {
        format!("{} {}", name, self.success)
    }
}

/// Build the action table, indexed by `CareAction as usize`.
pub fn build_action_table() -> [ActionDescriptor; CareAction::COUNT] {
    [
        ActionDescriptor {
            action: CareAction::Feed,
            guard: feed_guard,
            effect: feed_effect,
            transient: PetAction::Eating,
            revert_after_ms: Some(2000),
            success: "enjoyed the meal! 🍖",
        },
        ActionDescriptor {
            action: CareAction::Play,
            guard: play_guard,
            effect: play_effect,
            transient: PetAction::Playing,
            revert_after_ms: Some(2500),
            success: "had fun playing! 🎾",
        },
        ActionDescriptor {
            action: CareAction::Sleep,
            guard: sleep_guard,
            effect: sleep_effect,
            transient: PetAction::Sleeping,
            revert_after_ms: None,
            success: "is now sleeping... 💤",
        },
        ActionDescriptor {
            action: CareAction::Clean,
            guard: clean_guard,
            effect: clean_effect,
            transient: PetAction::Cleaning,
            revert_after_ms: Some(2000),
            success: "is squeaky clean! 🛁",
        },
    ]
}

const SATIATED: f64 = 95.0;
const EXHAUSTED: f64 = 20.0;
const RESTED: f64 = 95.0;
const SPOTLESS: f64 = 95.0;

// ── Feed ──────────────────────────────────────────────────────

fn feed_guard(stats: &PetStats) -> Option<Rejection> {
    (stats.hunger >= SATIATED).then_some(Rejection::TooFull)
}

fn feed_effect(stats: &mut PetStats) {
    stats.hunger = clamp_stat(stats.hunger + 25.0);
    stats.happiness = clamp_stat(stats.happiness + 5.0);
}

// ── Play ──────────────────────────────────────────────────────

fn play_guard(stats: &PetStats) -> Option<Rejection> {
    (stats.energy < EXHAUSTED).then_some(Rejection::TooTired)
}

fn play_effect(stats: &mut PetStats) {
    stats.happiness = clamp_stat(stats.happiness + 20.0);
    stats.energy = clamp_stat(stats.energy - 15.0);
    stats.hunger = clamp_stat(stats.hunger - 5.0);
}

// ── Sleep ─────────────────────────────────────────────────────

fn sleep_guard(stats: &PetStats) -> Option<Rejection> {
    (stats.energy >= RESTED).then_some(Rejection::NotTired)
}

fn sleep_effect(_stats: &mut PetStats) {}

// ── Clean ─────────────────────────────────────────────────────

fn clean_guard(stats: &PetStats) -> Option<Rejection> {
    (stats.cleanliness >= SPOTLESS).then_some(Rejection::AlreadyClean)
}

fn clean_effect(stats: &mut PetStats) {
    stats.cleanliness = clamp_stat(stats.cleanliness + 30.0);
    stats.happiness = clamp_stat(stats.happiness + 5.0);
}
