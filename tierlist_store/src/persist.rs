// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistence port.
//!
//! The store calls [`Persistence::save`] after every committed mutation and
//! [`Persistence::load`] once when an adapter is attached. Saving is
//! best-effort: failures are logged by the store and never undo a command.
//! The storage medium is entirely the adapter's business.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::ListId;
use crate::model::TierList;

/// Serializable image of the whole store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    /// Every list, in creation order.
    pub lists: Vec<TierList>,
    /// The list being edited, if any.
    #[serde(default)]
    pub current_list_id: Option<ListId>,
}

impl PersistedState {
    /// Largest raw id used anywhere in the state, or 0 when empty.
    pub fn max_raw_id(&self) -> u64 {
        self.lists.iter().map(TierList::max_raw_id).max().unwrap_or(0)
    }
}

/// Errors an adapter may report.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The state could not be encoded or decoded.
    #[error("failed to encode or decode tier lists: {0}")]
    Json(#[from] serde_json::Error),
    /// The storage medium failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable storage for the store's state.
pub trait Persistence {
    /// Read back the last saved state; `Ok(None)` means start empty.
    fn load(&mut self) -> Result<Option<PersistedState>, PersistError>;

    /// Write the state. Last write wins.
    fn save(&mut self, state: &PersistedState) -> Result<(), PersistError>;
}

/// JSON text held in memory.
///
/// Clones share one buffer, so a caller can keep a handle to inspect what the
/// store wrote, or hand the same buffer to a second store to simulate a reload.
#[derive(Clone, Debug, Default)]
pub struct MemoryPersistence {
    buffer: Rc<RefCell<Option<String>>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryPersistence {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer pre-filled with JSON text, as if written by an earlier session.
    pub fn with_contents(json: impl Into<String>) -> Self {
        let this = Self::default();
        *this.buffer.borrow_mut() = Some(json.into());
        this
    }

    /// The last JSON text written, if any.
    pub fn contents(&self) -> Option<String> {
        self.buffer.borrow().clone()
    }

    /// How many times [`Persistence::save`] has succeeded.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl Persistence for MemoryPersistence {
    fn load(&mut self) -> Result<Option<PersistedState>, PersistError> {
        match self.buffer.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), PersistError> {
        let json = serde_json::to_string(state)?;
        *self.buffer.borrow_mut() = Some(json);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_loads_nothing() {
        let mut p = MemoryPersistence::new();
        assert!(p.load().unwrap().is_none());
    }

    #[test]
    fn garbage_is_reported_as_json_error() {
        let mut p = MemoryPersistence::with_contents("{not json");
        assert!(matches!(p.load(), Err(PersistError::Json(_))));
    }

    #[test]
    fn save_then_load_through_shared_handle() {
        let mut writer = MemoryPersistence::new();
        let mut reader = writer.clone();
        writer.save(&PersistedState::default()).unwrap();
        assert_eq!(writer.save_count(), 1);
        assert_eq!(reader.load().unwrap(), Some(PersistedState::default()));
    }
}
