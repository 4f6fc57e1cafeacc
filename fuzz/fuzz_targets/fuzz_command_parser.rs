//! Fuzz target: console command parser
//!
//! Feeds arbitrary UTF-8 lines to `Command::from_str`.
//!
//! Invariants checked:
//! - No panics under any input
//! - Blank lines always parse as `ParseCommandError::Empty`
//! - A parsed `rename` never carries surrounding whitespace
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use tamagotchi::app::commands::{Command, ParseCommandError};

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    match line.parse::<Command>() {
        Ok(Command::Rename(name)) => {
            assert!(!name.is_empty());
            assert_eq!(name, name.trim());
        }
        Ok(_) => assert!(!line.trim().is_empty()),
        Err(ParseCommandError::Empty) => assert!(line.trim().is_empty()),
        Err(_) => {}
    }
});
