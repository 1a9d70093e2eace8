// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tierlist Placement: drag-and-drop for tier lists.
//!
//! This crate ties the other pieces together:
//! - [`DragTarget`] names every zone a drag can start from or hover.
//! - [`DragSession`] tracks one gesture. Pointer input goes through collision
//!   detection in `tierlist_hit`; arrow keys go through lane navigation in
//!   `tierlist_focus`.
//! - [`resolve`] turns the finished gesture into a [`tierlist_store::Command`]
//!   that the host applies with [`tierlist_store::TierStore::apply`].
//! - [`BoardLayout`] is a simple fixed-extent layout for hosts that do not
//!   measure their own zones.
//!
//! The session never mutates the store itself. Applying the resolved command
//! is the host's job, so a rejected or stale drop simply produces nothing.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use tierlist_hit::ZoneIndex;
//! use tierlist_placement::{BoardLayout, DragSession, DragTarget};
//! use tierlist_store::{Container, NewItem, TierStore};
//!
//! let mut store = TierStore::new();
//! store.create_list("Games");
//! let zelda = store.add_item(NewItem::named("Zelda")).unwrap();
//! let s_tier = store.current_list().unwrap().tiers[0].id;
//!
//! let layout = BoardLayout::default();
//! let mut zones = ZoneIndex::new();
//! layout.register(store.current_list().unwrap(), &mut zones);
//!
//! // Press on the pooled tile and drag it into the S tier.
//! let start = layout.zones(store.current_list().unwrap())
//!     .into_iter()
//!     .find(|z| z.id == DragTarget::Item(zelda))
//!     .unwrap()
//!     .rect;
//! let mut session = DragSession::new();
//! session.press(DragTarget::Item(zelda), start.center());
//! let to = Point::new(400.0, 40.0);
//! let over = session.pointer_move(to, Rect::from_center_size(to, start.size()), &zones);
//! assert_eq!(over, Some(DragTarget::TierContent(s_tier)));
//!
//! let command = session.drop(store.current_list().unwrap()).unwrap();
//! assert!(store.apply(&command));
//! assert_eq!(store.items_in(Container::Tier(s_tier)).unwrap()[0].id, zelda);
//! ```

mod layout;
mod resolve;
mod session;
mod target;

pub use layout::BoardLayout;
pub use resolve::{array_move, container_of, resolve};
pub use session::{
    ActiveDrag, DEFAULT_ACTIVATION_DISTANCE, DragInput, DragSession, DragState, SessionConfig,
};
pub use target::DragTarget;

pub use tierlist_focus::{NavTarget, Navigation};
