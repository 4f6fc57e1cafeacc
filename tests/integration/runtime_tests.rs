//! Integration tests for the Runtime: console lines in, replies out,
//! with the scheduler driven by explicit millisecond timestamps.

use tamagotchi::adapters::time::ManualClock;
use tamagotchi::app::commands::Command;
use tamagotchi::app::service::PetEngine;
use tamagotchi::config::EngineConfig;
use tamagotchi::pet::{Mood, PetAction, PetState};
use tamagotchi::runtime::{RESET_MESSAGE, Runtime};

use crate::mocks::{MockStore, Recorder, t0};

fn make_runtime(tick_interval_ms: u64) -> (Runtime<MockStore, ManualClock>, MockStore) {
    let config = EngineConfig {
        tick_interval_ms,
        ..EngineConfig::default()
    };
    let store = MockStore::new();
    let engine = PetEngine::new(&config, store.clone(), ManualClock::new(t0())).unwrap();
    (Runtime::new(engine, config, 0), store)
}

fn run(rt: &mut Runtime<MockStore, ManualClock>, line: &str, now_ms: u64) -> String {
    let command: Command = line.parse().expect("valid command");
    rt.handle(command, now_ms)
}

#[test]
fn console_session_plays_out() {
    let (mut rt, _) = make_runtime(30_000);

    assert_eq!(run(&mut rt, "feed", 0), "Tama enjoyed the meal! 🍖");
    assert_eq!(run(&mut rt, "feed", 100), "Tama is too full to eat!");
    assert_eq!(run(&mut rt, "clean", 200), "Tama is already clean!");
    assert_eq!(run(&mut rt, "play", 300), "Tama had fun playing! 🎾");
    assert_eq!(run(&mut rt, "sleep", 400), "Tama is now sleeping... 💤");
    assert_eq!(run(&mut rt, "play", 500), "Tama is sleeping!");
    assert_eq!(run(&mut rt, "wake", 600), "Tama woke up! ☀️");

    let status = run(&mut rt, "status", 700);
    assert!(status.starts_with("Tama the egg"), "{}", status);
}

#[test]
fn transient_action_returns_to_idle_via_scheduler() {
    let (mut rt, _) = make_runtime(30_000);
    let recorder = Recorder::new();
    rt.engine_mut().subscribe(recorder.callback());

    run(&mut rt, "play", 1_000);
    assert_eq!(rt.next_deadline(), Some(3_500));
    assert_eq!(rt.poll(3_499), 0);
    assert_eq!(rt.engine().state().current_action, PetAction::Playing);

    assert_eq!(rt.poll(3_500), 1);
    assert_eq!(rt.engine().state().current_action, PetAction::Idle);
    assert_eq!(recorder.count(), 2);
    assert_eq!(recorder.last().unwrap().current_action, PetAction::Idle);
}

#[test]
fn sleep_is_not_reverted_by_the_scheduler() {
    let (mut rt, _) = make_runtime(30_000);
    run(&mut rt, "play", 0);
    run(&mut rt, "sleep", 100);

    rt.poll(10_000);
    assert_eq!(rt.engine().state().current_action, PetAction::Sleeping);
    assert_eq!(rt.engine().state().mood, Mood::Sleeping);
}

#[test]
fn scheduler_ticks_age_the_pet() {
    let (mut rt, store) = make_runtime(1_000);
    for now in (1_000..=10_000).step_by(1_000) {
        rt.poll(now);
    }
    assert_eq!(rt.engine().state().stats.age, 10);
    assert_eq!(store.saved().unwrap().stats.age, 10);
}

#[test]
fn interval_command_changes_the_tick_rate() {
    let (mut rt, _) = make_runtime(30_000);
    assert_eq!(run(&mut rt, "interval 2000", 0), "Ticking every 2000 ms.");
    rt.poll(2_000);
    rt.poll(4_000);
    assert_eq!(rt.engine().state().stats.age, 2);
}

#[test]
fn reset_command_hatches_a_new_egg() {
    let (mut rt, _) = make_runtime(1_000);
    for now in (1_000..=15_000).step_by(1_000) {
        rt.poll(now);
    }
    assert_eq!(run(&mut rt, "reset", 15_500), RESET_MESSAGE);
    assert_eq!(rt.engine().state().stats.age, 0);
}

#[test]
fn rename_command_updates_config() {
    let (mut rt, store) = make_runtime(30_000);
    assert_eq!(run(&mut rt, "rename Pixel", 0), "Your pet is now called Pixel.");
    assert_eq!(rt.config().pet_name, "Pixel");
    assert!(rt.is_config_dirty());
    assert_eq!(store.saved().unwrap().name, "Pixel");
}

#[test]
fn overlong_name_is_refused() {
    let (mut rt, _) = make_runtime(30_000);
    let reply = run(&mut rt, &format!("rename {}", "x".repeat(40)), 0);
    assert!(reply.starts_with("Cannot rename"), "{}", reply);
    assert_eq!(rt.engine().state().name, "Tama");
}

#[test]
fn quit_saves_and_stops() {
    let (mut rt, store) = make_runtime(30_000);
    let saves = store.save_count();
    assert_eq!(run(&mut rt, "quit", 0), "Tama is saved. Bye!");
    assert!(!rt.is_running());
    assert_eq!(store.save_count(), saves + 1);
}

#[test]
fn rename_to_config_name_still_renames_restored_pet() {
    let store = MockStore::with_state(PetState::hatch("Mochi", t0()));
    let config = EngineConfig::default();
    let engine = PetEngine::new(&config, store.clone(), ManualClock::new(t0())).unwrap();
    let mut rt = Runtime::new(engine, config, 0);
    assert_eq!(rt.engine().state().name, "Mochi");

    assert_eq!(run(&mut rt, "rename Tama", 0), "Your pet is now called Tama.");
    assert_eq!(rt.engine().state().name, "Tama");
    assert_eq!(store.saved().unwrap().name, "Tama");
    assert!(!rt.is_config_dirty());
}
