// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tierlist Hit: drop zones and drag collision detection.
//!
//! - [`ZoneIndex`] registers [`DropZone`]s (items, tier rows, tier content
//!   areas, and the pool) and answers point and rectangle queries through a
//!   uniform grid.
//! - [`CollisionFilter`] turns the position of a drag into an ordered list of
//!   hover candidates: exact pointer hits first, rectangle intersection when
//!   the pointer is over nothing, then a filter that keeps only targets the
//!   [`DragKind`] may drop onto.
//!
//! The crate is generic over the key type `K` so callers can use their own
//! tagged identifiers.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use tierlist_hit::{detect, DragKind, DropZone, HitQuery, TargetKind, ZoneIndex};
//!
//! let mut zones = ZoneIndex::new();
//! zones.insert(DropZone::new("tier-s", Rect::new(100.0, 0.0, 600.0, 80.0), TargetKind::TIER_CONTENT));
//! zones.insert(DropZone::new("zelda", Rect::new(110.0, 10.0, 170.0, 70.0), TargetKind::ITEM));
//!
//! let query = HitQuery::pointer(Point::new(140.0, 40.0), Rect::new(110.0, 10.0, 170.0, 70.0));
//! let hits = detect(&zones, &query, DragKind::Item);
//! assert_eq!(hits.first().map(|h| h.id), Some("zelda"));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collide;
mod index;
mod kind;

pub use collide::{Collision, CollisionFilter, Collisions, HitMethod, HitQuery, detect};
pub use index::{DEFAULT_CELL_SIZE, DropZone, ZoneIndex, overlap_area};
pub use kind::{DragKind, TargetKind};
