//! Integration tests for the PetEngine: care actions, ticks, lifecycle
//! and persistence, driven through the mock store and a manual clock.

use chrono::Duration;
use tamagotchi::Error;
use tamagotchi::adapters::time::ManualClock;
use tamagotchi::app::ports::StoreError;
use tamagotchi::app::service::PetEngine;
use tamagotchi::config::EngineConfig;
use tamagotchi::pet::{Mood, PetAction, PetState, Stage};

use crate::mocks::{MockStore, Recorder, assert_close, make_engine, t0};

// ── Care actions ──────────────────────────────────────────────

#[test]
fn feeding_a_fresh_pet_fills_it_up() {
    let (mut engine, _, _) = make_engine();

    let outcome = engine.feed();

    assert!(outcome.success);
    assert!(outcome.message.contains("enjoyed the meal"), "{}", outcome.message);
    let state = engine.state();
    assert_close(state.stats.hunger, 100.0);
    assert_close(state.stats.happiness, 85.0);
    assert_eq!(state.current_action, PetAction::Eating);
}

#[test]
fn feeding_a_full_pet_is_refused() {
    let (mut engine, _, _) = make_engine();
    engine.feed();
    let before = engine.snapshot();

    let outcome = engine.feed();

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Tama is too full to eat!");
    assert_eq!(engine.state().stats, before.stats);
}

#[test]
fn playing_drains_energy_until_too_tired() {
    let (mut engine, _, _) = make_engine();

    for expected in [85.0, 70.0, 55.0, 40.0, 25.0, 10.0] {
        assert!(engine.play().success);
        assert_close(engine.state().stats.energy, expected);
    }

    let outcome = engine.play();
    assert!(!outcome.success);
    assert!(outcome.message.contains("too tired"), "{}", outcome.message);
    assert_close(engine.state().stats.energy, 10.0);
}

#[test]
fn sleep_toggles_between_sleeping_and_awake() {
    let (mut engine, _, _) = make_engine();
    engine.play();

    let outcome = engine.sleep();
    assert!(outcome.success);
    assert_eq!(engine.state().current_action, PetAction::Sleeping);
    assert_eq!(engine.state().mood, Mood::Sleeping);

    let outcome = engine.sleep();
    assert!(outcome.success);
    assert!(outcome.message.contains("woke up"), "{}", outcome.message);
    assert_eq!(engine.state().current_action, PetAction::Idle);
    assert_ne!(engine.state().mood, Mood::Sleeping);
}

#[test]
fn rested_pet_refuses_to_sleep() {
    let (mut engine, _, _) = make_engine();
    let outcome = engine.sleep();
    assert!(!outcome.success);
    assert_eq!(outcome.message, "Tama isn't tired!");
}

#[test]
fn sleeping_pet_rejects_other_actions() {
    let (mut engine, _, _) = make_engine();
    engine.play();
    engine.sleep();

    for outcome in [engine.feed(), engine.play(), engine.clean()] {
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Tama is sleeping!");
    }
    assert_eq!(engine.state().current_action, PetAction::Sleeping);
}

#[test]
fn cleaning_needs_some_dirt() {
    let (mut engine, _, _) = make_engine();
    let outcome = engine.clean();
    assert!(!outcome.success);
    assert!(outcome.message.contains("already clean"), "{}", outcome.message);

    for _ in 0..20 {
        engine.tick();
    }
    assert_close(engine.state().stats.cleanliness, 94.0);

    let outcome = engine.clean();
    assert!(outcome.success);
    assert_close(engine.state().stats.cleanliness, 100.0);
    assert_eq!(engine.state().current_action, PetAction::Cleaning);
}

// ── Ticks ─────────────────────────────────────────────────────

#[test]
fn sleeping_pet_wakes_at_full_energy() {
    let (mut engine, _, _) = make_engine();
    engine.play();
    engine.play();
    engine.sleep();

    // 70 + 5 per tick reaches 100 after six ticks.
    for _ in 0..5 {
        engine.tick();
        assert_eq!(engine.state().current_action, PetAction::Sleeping);
    }
    engine.tick();
    assert_close(engine.state().stats.energy, 100.0);
    assert_eq!(engine.state().current_action, PetAction::Idle);
    assert_ne!(engine.state().mood, Mood::Sleeping);
}

#[test]
fn well_kept_pet_grows_through_every_stage() {
    let (mut engine, _, _) = make_engine();
    let mut stages = vec![engine.state().stats.stage];

    for _ in 0..300 {
        let stats = engine.state().stats.clone();
        if stats.hunger < 90.0 {
            engine.feed();
        }
        if stats.cleanliness < 90.0 {
            engine.clean();
        }
        if stats.happiness < 60.0 && stats.energy >= 40.0 {
            engine.play();
        }
        if stats.energy < 30.0 && !engine.state().is_sleeping() {
            engine.sleep();
        }
        engine.tick();

        let stage = engine.state().stats.stage;
        if stages.last() != Some(&stage) {
            stages.push(stage);
        }
    }

    let state = engine.state();
    assert!(state.stats.is_alive);
    assert_eq!(state.stats.age, 300);
    assert_eq!(stages, Stage::ALL.to_vec());
}

#[test]
fn stage_changes_at_thresholds() {
    let (mut engine, _, _) = make_engine();
    for _ in 0..9 {
        engine.tick();
    }
    assert_eq!(engine.state().stats.stage, Stage::Egg);
    engine.tick();
    assert_eq!(engine.state().stats.stage, Stage::Baby);
}

#[test]
fn neglected_pet_dies_and_only_reset_revives() {
    let (mut engine, _, _) = make_engine();

    let mut died_at = None;
    for tick in 1..=200 {
        engine.tick();
        if !engine.state().stats.is_alive {
            died_at = Some(tick);
            break;
        }
    }
    assert!(died_at.is_some(), "pet should die within 200 ticks");
    assert_eq!(engine.state().mood, Mood::Dead);

    for outcome in [engine.feed(), engine.play(), engine.sleep(), engine.clean()] {
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Tama has passed away...");
    }

    let frozen = engine.snapshot();
    engine.tick();
    assert_eq!(engine.state().stats, frozen.stats);

    engine.reset();
    let state = engine.state();
    assert!(state.stats.is_alive);
    assert_eq!(state.stats.age, 0);
    assert_eq!(state.stats.stage, Stage::Egg);
    assert_eq!(state.mood, Mood::Happy);
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn rename_keeps_stats() {
    let (mut engine, store, _) = make_engine();
    engine.play();
    let before = engine.snapshot();

    engine.rename("Mochi");

    assert_eq!(engine.state().name, "Mochi");
    assert_eq!(engine.state().stats, before.stats);
    assert_eq!(store.saved().unwrap().name, "Mochi");
}

#[test]
fn reset_uses_default_name() {
    let (mut engine, _, clock) = make_engine();
    engine.rename("Mochi");
    clock.advance(Duration::hours(1));

    engine.reset();

    assert_eq!(engine.state().name, "Tama");
    assert_eq!(engine.state().birth_date, t0() + Duration::hours(1));
}

// ── Observers ─────────────────────────────────────────────────

#[test]
fn observers_see_every_change_until_unsubscribed() {
    let (mut engine, _, _) = make_engine();
    let recorder = Recorder::new();
    let id = engine.subscribe(recorder.callback());

    engine.feed();
    engine.tick();
    assert_eq!(recorder.count(), 2);
    assert_eq!(recorder.last().unwrap(), engine.snapshot());

    engine.feed(); // rejected: too full
    assert_eq!(recorder.count(), 2);

    assert!(engine.unsubscribe(id));
    engine.tick();
    assert_eq!(recorder.count(), 2);
    assert!(!engine.unsubscribe(id));
}

// ── Persistence ───────────────────────────────────────────────

#[test]
fn every_change_is_saved() {
    let (mut engine, store, _) = make_engine();
    engine.feed();
    engine.tick();
    assert_eq!(store.save_count(), 2);
    assert_eq!(store.saved().unwrap(), engine.snapshot());
}

#[test]
fn save_failure_does_not_fail_the_action() {
    let (mut engine, store, _) = make_engine();
    store.set_fail_save(true);

    let outcome = engine.feed();

    assert!(outcome.success);
    assert_eq!(engine.state().current_action, PetAction::Eating);
    assert!(store.saved().is_none());
}

#[test]
fn reload_without_elapsed_time_restores_identical_state() {
    let (mut engine, store, clock) = make_engine();
    engine.play();
    engine.tick();
    let saved = engine.snapshot();

    let reloaded = PetEngine::new(&EngineConfig::default(), store, clock).unwrap();

    assert_eq!(reloaded.snapshot(), saved);
}

#[test]
fn offline_time_applies_reduced_decay() {
    let saved = PetState::hatch("Tama", t0());
    let store = MockStore::with_state(saved);
    let clock = ManualClock::new(t0() + Duration::minutes(10));

    let engine = PetEngine::new(&EngineConfig::default(), store, clock).unwrap();

    let stats = &engine.state().stats;
    assert_close(stats.hunger, 75.0);
    assert_close(stats.happiness, 77.0);
    assert_close(stats.cleanliness, 98.0);
    assert_close(stats.energy, 100.0);
    assert_eq!(stats.age, 0);
    assert_eq!(engine.state().last_update, t0() + Duration::minutes(10));
}

#[test]
fn clock_behind_last_update_applies_nothing() {
    let saved = PetState::hatch("Tama", t0());
    let store = MockStore::with_state(saved.clone());
    let clock = ManualClock::new(t0() - Duration::hours(3));

    let engine = PetEngine::new(&EngineConfig::default(), store, clock).unwrap();

    assert_eq!(engine.state().stats, saved.stats);
}

#[test]
fn long_absence_empties_meters_but_health_drops_once() {
    let saved = PetState::hatch("Tama", t0());
    let store = MockStore::with_state(saved);
    let clock = ManualClock::new(t0() + Duration::days(30));

    let engine = PetEngine::new(&EngineConfig::default(), store, clock).unwrap();

    let stats = &engine.state().stats;
    assert_close(stats.hunger, 0.0);
    assert_close(stats.happiness, 0.0);
    assert_close(stats.cleanliness, 0.0);
    assert_close(stats.health, 96.0);
    assert_eq!(stats.age, 0);
    assert!(stats.is_alive);
    assert_eq!(engine.state().mood, Mood::Sad);
}

#[test]
fn unreadable_store_is_fatal() {
    let store = MockStore::failing_load(StoreError::Corrupted);
    let result = PetEngine::new(&EngineConfig::default(), store, ManualClock::new(t0()));
    assert!(matches!(result, Err(Error::Store(StoreError::Corrupted))));
}

#[test]
fn restored_state_is_rederived_without_elapsed_time() {
    let mut saved = PetState::hatch("Tama", t0());
    saved.stats.is_alive = false;
    saved.stats.age = 160;
    saved.stats.cleanliness = 120.0;
    let store = MockStore::with_state(saved);

    let engine = PetEngine::new(&EngineConfig::default(), store, ManualClock::new(t0())).unwrap();

    let state = engine.state();
    assert_eq!(state.mood, Mood::Dead);
    assert_eq!(state.stats.stage, Stage::Teen);
    assert_close(state.stats.cleanliness, 100.0);
}

#[test]
fn care_actions_leave_health_for_the_next_tick() {
    let mut saved = PetState::hatch("Tama", t0());
    saved.stats.hunger = 10.0;
    saved.stats.health = 50.0;
    let store = MockStore::with_state(saved);
    let mut engine =
        PetEngine::new(&EngineConfig::default(), store, ManualClock::new(t0())).unwrap();

    assert!(engine.feed().success);
    assert_close(engine.state().stats.health, 50.0);

    // Hunger is back above the low threshold, so the tick changes nothing.
    engine.tick();
    assert_close(engine.state().stats.health, 50.0);
}
