//! Tamagotchi: a virtual pet in the terminal.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  FileStore            SystemClock        fmt subscriber  │
//! │  (PetStore+Config)    (Clock)            (stderr)        │
//! │  LogObserver          stdin reader thread                │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │           PetEngine (pure logic)                   │  │
//! │  │  rules · action table · observers                  │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                                          │
//! │  Runtime · Scheduler (delegate-driven)                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use tamagotchi::adapters::file_store::FileStore;
use tamagotchi::adapters::log_sink::LogObserver;
use tamagotchi::adapters::time::SystemClock;
use tamagotchi::app::commands::{Command, ParseCommandError};
use tamagotchi::app::ports::ConfigPort;
use tamagotchi::app::service::PetEngine;
use tamagotchi::runtime::Runtime;

/// Longest the loop sleeps when no timer is pending.
const IDLE_WAIT: Duration = Duration::from_secs(1);

#[derive(Debug, Parser)]
#[command(name = "tamagotchi", version, about = "A virtual pet that lives in your terminal")]
struct Args {
    /// Directory holding state.json and config.json
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Live tick interval in milliseconds (saved to the config)
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,

    /// Name for the pet (saved to the config)
    #[arg(long)]
    name: Option<String>,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

// ── Console input ─────────────────────────────────────────────

/// Forward stdin lines to the main loop.  The channel closes on EOF.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    // ── 1. Storage + config ───────────────────────────────────
    let dir = match args.data_dir {
        Some(dir) => dir,
        None => FileStore::default_dir().context("no home directory, pass --data-dir")?,
    };
    let files = FileStore::open(dir.clone())
        .with_context(|| format!("opening data directory {}", dir.display()))?;

    let stored = files.load_config().context("loading config.json")?;
    let mut config = stored.clone();
    if let Some(ms) = args.tick_ms {
        config.tick_interval_ms = ms;
    }
    if let Some(name) = args.name {
        config.pet_name = name.trim().to_string();
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    config.validate().context("invalid configuration")?;

    // ── 2. Logging ────────────────────────────────────────────
    // `log` records reach the subscriber through its `tracing-log` bridge.
    let level: Directive = config.log_level.parse().context("parsing log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
    info!("Tamagotchi v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {}", dir.display());

    if config != stored {
        files.save_config(&config).context("saving config.json")?;
    }

    // ── 3. Engine + runtime ───────────────────────────────────
    let clock = SystemClock::new();
    let mut engine = PetEngine::new(&config, files.clone(), clock)
        .context("loading saved pet")?;
    engine.subscribe(LogObserver::new().into_callback());
    let name_changed = stored.pet_name != config.pet_name;
    if name_changed && engine.state().name != config.pet_name {
        engine.rename(config.pet_name.clone());
    }
    engine.set_default_name(config.pet_name.clone());

    let start_ms = engine.clock().uptime_ms();
    let mut runtime = Runtime::new(engine, config, start_ms);

    println!("{}", runtime.engine().state());
    println!("Commands: feed, play, sleep, clean, status, rename <name>, interval <ms>, reset, quit");

    // ── 4. Event loop ─────────────────────────────────────────
    let input = spawn_stdin_reader();

    while runtime.is_running() {
        let now_ms = runtime.engine().clock().uptime_ms();
        let wait = runtime
            .next_deadline()
            .map_or(IDLE_WAIT, |due| Duration::from_millis(due.saturating_sub(now_ms)));

        match input.recv_timeout(wait) {
            Ok(line) => {
                let now_ms = runtime.engine().clock().uptime_ms();
                match line.parse::<Command>() {
                    Ok(command) => println!("{}", runtime.handle(command, now_ms)),
                    Err(ParseCommandError::Empty) => {}
                    Err(e) => println!("{}", e),
                }
                runtime.save_config_if_dirty(&files);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                info!("stdin closed");
                break;
            }
        }

        let now_ms = runtime.engine().clock().uptime_ms();
        runtime.poll(now_ms);
    }

    runtime.shutdown();
    if runtime.is_config_dirty() && !runtime.save_config_if_dirty(&files) {
        warn!("Config changes were not saved");
    }
    Ok(())
}
