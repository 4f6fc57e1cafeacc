//! Pet data model and the pure rules that drive it.
//!
//! ```text
//!  ┌──────────────────────────────────────────────────────────┐
//!  │  PetState                                                │
//!  │  ┌───────────┐  name · birth_date · last_update          │
//!  │  │ PetStats  │  current_action (transient)               │
//!  │  │ 5 meters  │  mood (derived from stats + action)       │
//!  │  │ age·stage │                                           │
//!  │  └───────────┘                                           │
//!  └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything in this module is plain data plus pure functions: no
//! clock, no storage, no observers.  The [`rules`] submodule holds the
//! decay/health/mood arithmetic and [`actions`] holds the care-action
//! table consumed by [`PetEngine`](crate::app::service::PetEngine).

pub mod actions;
pub mod rules;

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Life stage
// ---------------------------------------------------------------------------

/// Life-cycle phase, derived purely from the tick counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Egg,
    Baby,
    Child,
    Teen,
    Adult,
}

impl Stage {
    /// All stages in ascending age order.
    pub const ALL: [Stage; 5] = [
        Stage::Egg,
        Stage::Baby,
        Stage::Child,
        Stage::Teen,
        Stage::Adult,
    ];

    /// Minimum age (in ticks) at which this stage begins.
    pub const fn threshold(self) -> u64 {
        match self {
            Self::Egg => 0,
            Self::Baby => 10,
            Self::Child => 50,
            Self::Teen => 150,
            Self::Adult => 300,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Egg => "egg",
            Self::Baby => "baby",
            Self::Child => "child",
            Self::Teen => "teen",
            Self::Adult => "adult",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// Derived emotional summary.  Never set independently of stats/action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Sleeping,
    Sick,
    Dead,
}

impl Mood {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
            Self::Sleeping => "sleeping",
            Self::Sick => "sick",
            Self::Dead => "dead",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Current action
// ---------------------------------------------------------------------------

/// What the pet is doing right now.
///
/// Everything except `Idle` and `Sleeping` is transient and reverts to
/// `Idle` shortly after it starts.  `Celebrating` is part of the snapshot
/// shape for presentation layers; no care action produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetAction {
    Idle,
    Eating,
    Playing,
    Sleeping,
    Cleaning,
    Celebrating,
}

impl PetAction {
    /// `true` for actions that auto-revert to `Idle`.
    pub const fn is_transient(self) -> bool {
        !matches!(self, Self::Idle | Self::Sleeping)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Eating => "eating",
            Self::Playing => "playing",
            Self::Sleeping => "sleeping",
            Self::Cleaning => "cleaning",
            Self::Celebrating => "celebrating",
        }
    }
}

impl fmt::Display for PetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Stats and state
// ---------------------------------------------------------------------------

/// The pet's meters.  Every meter stays within
/// [`STAT_MIN`](rules::STAT_MIN)..=[`STAT_MAX`](rules::STAT_MAX).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetStats {
    /// 0 = starving.
    pub hunger: f64,
    /// 0 = depressed.
    pub happiness: f64,
    /// 0 = exhausted.
    pub energy: f64,
    /// 0 = dead.
    pub health: f64,
    /// 0 = filthy.
    pub cleanliness: f64,
    /// Live ticks survived.
    pub age: u64,
    pub stage: Stage,
    pub is_alive: bool,
}

impl PetStats {
    /// Meters of a freshly hatched egg.
    pub fn newborn() -> Self {
        Self {
            hunger: 80.0,
            happiness: 80.0,
            energy: 100.0,
            health: 100.0,
            cleanliness: 100.0,
            age: 0,
            stage: Stage::Egg,
            is_alive: true,
        }
    }
}

/// Root aggregate persisted to the store and handed to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetState {
    pub stats: PetStats,
    pub name: String,
    pub birth_date: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub current_action: PetAction,
    pub mood: Mood,
}

impl PetState {
    /// A brand-new pet born at `now`.
    pub fn hatch(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            stats: PetStats::newborn(),
            name: name.into(),
            birth_date: now,
            last_update: now,
            current_action: PetAction::Idle,
            mood: Mood::Happy,
        }
    }

    pub fn is_sleeping(&self) -> bool {
        self.current_action == PetAction::Sleeping
    }
}

impl fmt::Display for PetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.stats;
        write!(
            f,
            "{} the {} | mood={} action={} | hunger={:.1} happy={:.1} energy={:.1} \
             health={:.1} clean={:.1} | age={}",
            self.name,
            s.stage,
            self.mood,
            self.current_action,
            s.hunger,
            s.happiness,
            s.energy,
            s.health,
            s.cleanliness,
            s.age,
        )
    }
}
