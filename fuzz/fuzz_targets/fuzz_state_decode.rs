//! Fuzz target: stored state decoding
//!
//! Puts arbitrary bytes in the in-memory state slot and builds an engine
//! on top of it, then runs a few ticks.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Undecodable bytes surface as `Error::Store`, never a default pet
//!
//! cargo fuzz run fuzz_state_decode

#![no_main]

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use tamagotchi::Error;
use tamagotchi::adapters::memory_store::MemoryStore;
use tamagotchi::adapters::time::ManualClock;
use tamagotchi::app::ports::PetStore;
use tamagotchi::app::service::PetEngine;
use tamagotchi::config::EngineConfig;

fuzz_target!(|data: &[u8]| {
    let store = MemoryStore::new();
    store.put_raw(data.to_vec());
    let decodable = store.load().is_ok();

    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    match PetEngine::new(&EngineConfig::default(), store, clock) {
        Ok(mut engine) => {
            assert!(decodable);
            for _ in 0..4 {
                engine.tick();
            }
        }
        Err(Error::Store(_)) => assert!(!decodable),
        Err(other) => panic!("unexpected error: {other}"),
    }
});
