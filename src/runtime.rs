//! Runtime: wires the engine to the scheduler and routes commands.
//!
//! ```text
//!  console / UI ──Command──▶ Runtime ──▶ PetEngine
//!                               │  ▲
//!              arm_revert()     ▼  │ on_schedule_fired()
//!                             Scheduler
//! ```
//!
//! Everything here runs on one thread; callers feed in monotonic
//! milliseconds and the runtime never sleeps or blocks on its own.

use log::{info, warn};

use crate::app::commands::Command;
use crate::app::ports::{Clock, ConfigError, ConfigPort, PetStore, ScheduleFired, SchedulerDelegate};
use crate::app::service::PetEngine;
use crate::config::EngineConfig;
use crate::scheduler::Scheduler;

pub const RESET_MESSAGE: &str = "A new Tamagotchi egg has appeared! 🥚";

/// Adapter letting the scheduler call into the engine.
struct EngineDelegate<'a, S: PetStore, C: Clock> {
    engine: &'a mut PetEngine<S, C>,
}

impl<S: PetStore, C: Clock> SchedulerDelegate for EngineDelegate<'_, S, C> {
    fn on_schedule_fired(&mut self, fired: ScheduleFired) {
        match fired {
            ScheduleFired::Tick => self.engine.tick(),
            ScheduleFired::Revert(ticket) => {
                self.engine.revert_transient(ticket);
            }
        }
    }
}

/// The engine plus its timers and live configuration.
pub struct Runtime<S: PetStore, C: Clock> {
    engine: PetEngine<S, C>,
    scheduler: Scheduler,
    config: EngineConfig,
    config_dirty: bool,
    running: bool,
}

impl<S: PetStore, C: Clock> Runtime<S, C> {
    pub fn new(engine: PetEngine<S, C>, config: EngineConfig, now_ms: u64) -> Self {
        let scheduler = Scheduler::new(config.tick_interval_ms, now_ms);
        info!(
            "Runtime started: ticking every {} ms",
            config.tick_interval_ms
        );
        Self {
            engine,
            scheduler,
            config,
            config_dirty: false,
            running: true,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn engine(&self) -> &PetEngine<S, C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PetEngine<S, C> {
        &mut self.engine
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Earliest monotonic instant at which [`poll`](Self::poll) has work.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    // ── Timers ────────────────────────────────────────────────

    /// Fire every timer due at `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> usize {
        let mut delegate = EngineDelegate {
            engine: &mut self.engine,
        };
        self.scheduler.poll(now_ms, &mut delegate)
    }

    // ── Commands ──────────────────────────────────────────────

    /// Execute one command and return the reply for the user.
    pub fn handle(&mut self, command: Command, now_ms: u64) -> String {
        match command {
            Command::Care(action) => {
                let outcome = self.engine.perform(action);
                if let Some(ticket) = self.engine.take_pending_revert() {
                    self.scheduler.arm_revert(ticket, now_ms);
                }
                outcome.message
            }
            Command::Reset => {
                self.engine.reset();
                self.scheduler.cancel_revert();
                RESET_MESSAGE.to_string()
            }
            Command::Rename(name) => {
                let name = name.trim().to_string();
                let config = EngineConfig {
                    pet_name: name.clone(),
                    ..self.config.clone()
                };
                if let Err(e) = self.apply_config(config, now_ms) {
                    return format!("Cannot rename: {}", e);
                }
                // The restored pet may carry a name the config never had.
                if self.engine.state().name != name {
                    self.engine.rename(name.clone());
                }
                format!("Your pet is now called {}.", name)
            }
            Command::Status => self.engine.state().to_string(),
            Command::SetTickInterval(ms) => {
                let config = EngineConfig {
                    tick_interval_ms: ms,
                    ..self.config.clone()
                };
                match self.apply_config(config, now_ms) {
                    Ok(()) => format!("Ticking every {} ms.", ms),
                    Err(e) => format!("Cannot change interval: {}", e),
                }
            }
            Command::Quit => {
                self.shutdown();
                format!("{} is saved. Bye!", self.engine.state().name)
            }
        }
    }

    /// Apply a changed configuration to the live system.
    ///
    /// A new tick interval cancels and reschedules the ticker; a new pet
    /// name renames the current pet and every future egg.
    pub fn apply_config(&mut self, config: EngineConfig, now_ms: u64) -> Result<(), ConfigError> {
        config.validate()?;

        if config.tick_interval_ms != self.config.tick_interval_ms {
            self.scheduler
                .set_tick_interval(config.tick_interval_ms, now_ms);
        }
        if config.pet_name != self.config.pet_name {
            self.engine.set_default_name(config.pet_name.clone());
            self.engine.rename(config.pet_name.clone());
        }
        if config != self.config {
            self.config = config;
            self.mark_config_dirty();
        }
        Ok(())
    }

    /// Persist the pet one last time and stop.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.engine.persist();
        self.scheduler.set_enabled(false);
        self.running = false;
        info!("Runtime stopped");
    }

    // ── Config dirty-flag management ──────────────────────────

    fn mark_config_dirty(&mut self) {
        self.config_dirty = true;
    }

    /// Whether the config has unsaved changes.
    pub fn is_config_dirty(&self) -> bool {
        self.config_dirty
    }

    /// Save the config if it changed.  Returns `true` if it was written.
    pub fn save_config_if_dirty(&mut self, storage: &impl ConfigPort) -> bool {
        if !self.config_dirty {
            return false;
        }
        match storage.save_config(&self.config) {
            Ok(()) => {
                self.config_dirty = false;
                true
            }
            Err(e) => {
                warn!("Config save failed: {}", e);
                false
            }
        }
    }
}
