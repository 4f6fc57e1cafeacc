//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter          | Implements           | Connects to                |
//! |------------------|----------------------|----------------------------|
//! | `file_store`     | PetStore, ConfigPort | JSON files in a data dir   |
//! | `log_sink`       | observer callback    | `log` facade               |
//! | `memory_store`   | PetStore             | in-process postcard blob   |
//! | `time`           | Clock                | system clock / manual time |

pub mod file_store;
pub mod log_sink;
pub mod memory_store;
pub mod time;
