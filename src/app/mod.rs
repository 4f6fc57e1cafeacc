//! Application core: pure domain logic, zero I/O.
//!
//! [`service::PetEngine`] owns the pet and applies care actions and ticks
//! to it.  Storage and time are reached only through the **port traits**
//! in [`ports`], so the engine is fully testable with in-memory adapters.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
