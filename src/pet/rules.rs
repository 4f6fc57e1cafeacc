//! Stat arithmetic: decay, recovery, health, mood, and stage.
//!
//! Two decay schedules exist side by side:
//!
//! | Meter        | Live tick | Offline tick |
//! |--------------|-----------|--------------|
//! | hunger       | −1.0      | −0.5         |
//! | happiness    | −0.5      | −0.3         |
//! | cleanliness  | −0.3      | −0.2         |
//! | energy awake | −0.5      | +0.2         |
//! | age          | +1        | unchanged    |
//!
//! Offline catch-up deliberately neither ages the pet nor uses the live
//! rates.

use super::{Mood, PetAction, PetState, PetStats, Stage};

pub const STAT_MIN: f64 = 0.0;
pub const STAT_MAX: f64 = 100.0;

// ── Live tick rates ───────────────────────────────────────────
const LIVE_HUNGER_DECAY: f64 = 1.0;
const LIVE_HAPPINESS_DECAY: f64 = 0.5;
const LIVE_CLEANLINESS_DECAY: f64 = 0.3;
const LIVE_ENERGY_DRAIN: f64 = 0.5;
const SLEEP_ENERGY_GAIN: f64 = 5.0;

// ── Offline catch-up rates ────────────────────────────────────
const OFFLINE_HUNGER_DECAY: f64 = 0.5;
const OFFLINE_HAPPINESS_DECAY: f64 = 0.3;
const OFFLINE_CLEANLINESS_DECAY: f64 = 0.2;
const OFFLINE_ENERGY_GAIN: f64 = 0.2;

// ── Health thresholds ─────────────────────────────────────────
const LOW_HUNGER: f64 = 20.0;
const LOW_HAPPINESS: f64 = 20.0;
const LOW_CLEANLINESS: f64 = 20.0;
const LOW_ENERGY: f64 = 10.0;
const THRIVING: f64 = 60.0;
const SICK_HEALTH: f64 = 30.0;

// ── Mood bands (average of the four care meters) ─────────────
const HAPPY_AVERAGE: f64 = 70.0;
const NEUTRAL_AVERAGE: f64 = 40.0;

/// Clamp a meter into `[STAT_MIN, STAT_MAX]`.
pub fn clamp_stat(value: f64) -> f64 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Stage for a given age: the highest threshold not above `age` wins.
pub fn stage_for_age(age: u64) -> Stage {
    Stage::ALL
        .iter()
        .rev()
        .copied()
        .find(|stage| age >= stage.threshold())
        .unwrap_or(Stage::Egg)
}

/// Net health change implied by the current meters.
pub fn health_delta(stats: &PetStats) -> f64 {
    let mut delta = 0.0;

    if stats.hunger < LOW_HUNGER {
        delta -= 2.0;
    }
    if stats.happiness < LOW_HAPPINESS {
        delta -= 1.0;
    }
    if stats.cleanliness < LOW_CLEANLINESS {
        delta -= 1.0;
    }
    if stats.energy < LOW_ENERGY {
        delta -= 1.0;
    }

    if stats.hunger > THRIVING && stats.happiness > THRIVING && stats.cleanliness > THRIVING {
        delta += 0.5;
    }

    delta
}

/// Apply [`health_delta`] and mark the pet dead once health bottoms out.
///
/// Returns `true` if this call killed the pet.
pub fn recalculate_health(stats: &mut PetStats) -> bool {
    stats.health = clamp_stat(stats.health + health_delta(stats));

    if stats.health <= STAT_MIN && stats.is_alive {
        stats.is_alive = false;
        return true;
    }
    false
}

/// Mood derived from the state.  Precedence: dead > sleeping > sick > average.
pub fn derive_mood(state: &PetState) -> Mood {
    let stats = &state.stats;

    if !stats.is_alive {
        return Mood::Dead;
    }
    if state.current_action == PetAction::Sleeping {
        return Mood::Sleeping;
    }
    if stats.health < SICK_HEALTH {
        return Mood::Sick;
    }

    let average = (stats.hunger + stats.happiness + stats.energy + stats.cleanliness) / 4.0;
    if average >= HAPPY_AVERAGE {
        Mood::Happy
    } else if average >= NEUTRAL_AVERAGE {
        Mood::Neutral
    } else {
        Mood::Sad
    }
}

/// Decay and energy step of a live tick (steps 1 and 2).
///
/// Wakes the pet when sleep restores energy to full.  Returns `true` if
/// the pet woke up.
pub fn apply_live_decay(state: &mut PetState) -> bool {
    let stats = &mut state.stats;
    stats.hunger = clamp_stat(stats.hunger - LIVE_HUNGER_DECAY);
    stats.happiness = clamp_stat(stats.happiness - LIVE_HAPPINESS_DECAY);
    stats.cleanliness = clamp_stat(stats.cleanliness - LIVE_CLEANLINESS_DECAY);

    if state.current_action == PetAction::Sleeping {
        stats.energy = clamp_stat(stats.energy + SLEEP_ENERGY_GAIN);
        if stats.energy >= STAT_MAX {
            state.current_action = PetAction::Idle;
            return true;
        }
    } else {
        stats.energy = clamp_stat(stats.energy - LIVE_ENERGY_DRAIN);
    }
    false
}

/// Catch-up decay for `ticks` missed offline ticks.  Age is untouched.
pub fn apply_offline_decay(stats: &mut PetStats, ticks: u64) {
    let n = ticks as f64;
    stats.hunger = clamp_stat(stats.hunger - OFFLINE_HUNGER_DECAY * n);
    stats.happiness = clamp_stat(stats.happiness - OFFLINE_HAPPINESS_DECAY * n);
    stats.cleanliness = clamp_stat(stats.cleanliness - OFFLINE_CLEANLINESS_DECAY * n);
    stats.energy = clamp_stat(stats.energy + OFFLINE_ENERGY_GAIN * n);
}

/// Re-derive everything a restored state could have wrong: meters back
/// in range, death at zero health, stage from age, mood from the rest.
pub fn normalize(state: &mut PetState) {
    let stats = &mut state.stats;
    for meter in [
        &mut stats.hunger,
        &mut stats.happiness,
        &mut stats.energy,
        &mut stats.health,
        &mut stats.cleanliness,
    ] {
        *meter = clamp_stat(*meter);
    }
    if stats.health <= STAT_MIN {
        stats.is_alive = false;
    }
    stats.stage = stage_for_age(stats.age);
    state.mood = derive_mood(state);
}
