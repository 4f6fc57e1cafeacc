//! Tamagotchi engine library.
//!
//! A virtual pet simulation: the pet model and its decay rules live in
//! [`pet`], the engine that owns one pet lives in [`app`], and the
//! [`runtime`] drives it from a [`scheduler`].  Storage, clocks and
//! logging plug in through the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod pet;
pub mod runtime;
pub mod scheduler;

pub use error::{Error, Rejection, Result};
