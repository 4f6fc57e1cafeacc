//! Unified error types for the pet engine.
//!
//! Two kinds of "failure" exist and they are kept apart:
//!
//! - [`Error`]: something went wrong around the engine (storage or
//!   configuration).  Returned through `Result`.
//! - [`Rejection`]: the pet refused a care action.  Not an error at all;
//!   it becomes the message of an unsuccessful
//!   [`ActionOutcome`](crate::app::events::ActionOutcome).

use core::fmt;

use crate::app::ports::{ConfigError, StoreError};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// The state store failed.
    Store(StoreError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "store: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Action rejections
// ---------------------------------------------------------------------------

/// Why a care action was refused.  Checked in declaration order: a dead
/// pet is reported as dead even if it is also "too full".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Dead,
    Sleeping,
    TooFull,
    TooTired,
    NotTired,
    AlreadyClean,
}

impl Rejection {
    /// User-facing message for the pet called `name`.
    pub fn message(self, name: &str) -> String {
        format!("{name} {self}")
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dead => write!(f, "has passed away..."),
            Self::Sleeping => write!(f, "is sleeping!"),
            Self::TooFull => write!(f, "is too full to eat!"),
            Self::TooTired => write!(f, "is too tired to play!"),
            Self::NotTired => write!(f, "isn't tired!"),
            Self::AlreadyClean => write!(f, "is already clean!"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
