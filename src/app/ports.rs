//! Port traits: the hexagonal boundary between the pet engine and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PetEngine (domain)
//! ```
//!
//! Driven adapters (state store, clock, config file) implement these
//! traits.  [`PetEngine`](super::service::PetEngine) consumes them via
//! generics, so the domain core never touches the filesystem or the
//! system clock directly.

use chrono::{DateTime, Utc};

use super::events::RevertTicket;
use crate::config::EngineConfig;
use crate::pet::PetState;

// ───────────────────────────────────────────────────────────────
// Store port (driven adapter: domain ↔ persistent slot)
// ───────────────────────────────────────────────────────────────

/// A single named slot holding the pet.  Last writer wins; no versioning.
pub trait PetStore {
    /// Load the saved pet.  `Ok(None)` means nothing was ever saved.
    fn load(&self) -> Result<Option<PetState>, StoreError>;

    /// Overwrite the slot with `state`.
    fn save(&mut self, state: &PetState) -> Result<(), StoreError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Wall-clock source used for birth dates and offline catch-up.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads and persists engine configuration.
///
/// Implementations MUST validate before persisting and return
/// [`ConfigError::ValidationFailed`] rather than silently clamping.
pub trait ConfigPort {
    /// Returns [`EngineConfig::default()`] if no stored config exists.
    fn load_config(&self) -> Result<EngineConfig, ConfigError>;

    fn save_config(&self, config: &EngineConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate
// ───────────────────────────────────────────────────────────────

/// Callback the [`Scheduler`](crate::scheduler::Scheduler) invokes when a
/// timer fires.  The scheduler knows nothing about the engine.
pub trait SchedulerDelegate {
    fn on_schedule_fired(&mut self, fired: ScheduleFired);
}

/// What fired, passed to [`SchedulerDelegate::on_schedule_fired`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFired {
    /// The periodic simulation tick.
    Tick,
    /// A transient action's revert delay elapsed.
    Revert(RevertTicket),
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`PetStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The stored blob could not be decoded.
    Corrupted,
    /// The state could not be encoded.
    Encode,
    /// Underlying I/O failed.
    Io(std::io::ErrorKind),
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed to parse.
    Corrupted,
    /// A field failed range validation.  Describes which field and why.
    ValidationFailed(&'static str),
    /// Underlying I/O failed.
    Io(std::io::ErrorKind),
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "stored state corrupted"),
            Self::Encode => write!(f, "state could not be encoded"),
            Self::Io(kind) => write!(f, "I/O error: {}", kind),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Io(kind) => write!(f, "I/O error: {}", kind),
        }
    }
}

impl std::error::Error for StoreError {}
impl std::error::Error for ConfigError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.kind())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.kind())
    }
}
