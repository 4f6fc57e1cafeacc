//! In-memory state slot.
//!
//! Implements [`PetStore`] with a single `postcard` blob, so every save
//! goes through the same encode/decode path a persistent backend would.
//! Clones share the slot: hand one clone to the engine and keep another
//! to inspect or pre-seed what was saved.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::app::ports::{PetStore, StoreError};
use crate::pet::PetState;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `state`.
    pub fn with_state(state: &PetState) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.save(state)?;
        Ok(store)
    }

    /// Replace the slot with raw bytes (e.g. to simulate corruption).
    pub fn put_raw(&self, bytes: Vec<u8>) {
        *self.slot.borrow_mut() = Some(bytes);
    }

    pub fn is_empty(&self) -> bool {
        self.slot.borrow().is_none()
    }
}

impl PetStore for MemoryStore {
    fn load(&self) -> Result<Option<PetState>, StoreError> {
        match self.slot.borrow().as_deref() {
            Some(bytes) => {
                let state = postcard::from_bytes(bytes).map_err(|_| StoreError::Corrupted)?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    fn save(&mut self, state: &PetState) -> Result<(), StoreError> {
        let bytes = postcard::to_allocvec(state).map_err(|_| StoreError::Encode)?;
        debug!("MemoryStore: saved {} bytes", bytes.len());
        *self.slot.borrow_mut() = Some(bytes);
        Ok(())
    }
}
