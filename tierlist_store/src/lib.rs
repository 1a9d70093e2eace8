// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tierlist Store: the canonical tier list model and the commands that edit it.
//!
//! A [`TierStore`] owns every [`TierList`] plus a pointer to the one being
//! edited. All mutation goes through its command methods, each of which
//! either commits a complete new state or changes nothing at all:
//!
//! - List commands: [`TierStore::create_list`], [`TierStore::duplicate_list`],
//!   [`TierStore::delete_list`], [`TierStore::select_list`],
//!   [`TierStore::update_list`].
//! - Tier commands: [`TierStore::add_tier`], [`TierStore::add_custom_tier`],
//!   [`TierStore::update_tier`], [`TierStore::delete_tier`],
//!   [`TierStore::clear_tier_items`], [`TierStore::reorder_tiers`].
//! - Item commands: [`TierStore::add_item`], [`TierStore::add_item_to_tier`],
//!   [`TierStore::update_item`], [`TierStore::delete_item`],
//!   [`TierStore::move_item`], [`TierStore::reorder_items`],
//!   [`TierStore::clear_all_items`].
//!
//! Drag resolution produces a [`Command`], which [`TierStore::apply`] runs.
//!
//! Readers take a [`Snapshot`], an immutable `Arc` of the whole state that
//! later commands never touch. Observers registered with
//! [`TierStore::subscribe`] receive each committed snapshot.
//!
//! ## Example
//!
//! ```rust
//! use tierlist_store::{Container, NewItem, TierStore};
//!
//! let mut store = TierStore::new();
//! store.create_list("Test");
//! let x = store.add_item(NewItem::named("X")).unwrap();
//!
//! let s_tier = store.current_list().unwrap().tiers[0].id;
//! store.move_item(x, Container::Pool, Container::Tier(s_tier), None);
//! store.delete_tier(s_tier);
//!
//! let list = store.current_list().unwrap();
//! assert_eq!(list.tiers.len(), 5);
//! assert_eq!(list.pool[0].id, x);
//! ```
//!
//! ## Persistence
//!
//! Attach a [`Persistence`] adapter with [`TierStore::with_persistence`]. The
//! store loads from it once and saves after every committed command; save
//! failures are logged with `tracing` and otherwise ignored.
//!
//! ```rust
//! use tierlist_store::{MemoryPersistence, TierStore};
//!
//! let disk = MemoryPersistence::new();
//! let mut store = TierStore::new().with_persistence(disk.clone());
//! let id = store.create_list("Saved").unwrap();
//!
//! let reopened = TierStore::new().with_persistence(disk);
//! assert_eq!(reopened.current_list_id(), Some(id));
//! ```

mod clock;
mod ids;
mod import;
mod model;
mod persist;
mod store;
mod text;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ids::{Container, IdGen, ItemId, ListId, TierId};
pub use import::{
    EXPORT_VERSION, ExportDocument, ImportError, ItemDocument, ListDocument, TierDocument,
    is_color_token,
};
pub use model::{
    COPY_SUFFIX, ItemPatch, Level, ListPatch, MAX_DESCRIPTION_CHARS, MAX_NAME_CHARS, MAX_TAGS,
    MAX_TITLE_CHARS, NewItem, TierItem, TierList, TierPatch, TierRow,
};
pub use persist::{MemoryPersistence, PersistError, PersistedState, Persistence};
pub use store::{
    Command, Snapshot, StoreConfig, StoreState, SubscriptionId, TierLimits, TierStore,
};
