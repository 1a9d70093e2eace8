// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tierlist Focus: keyboard navigation for keyboard-driven drags.
//!
//! A tier list is laid out as **lanes**: one per tier plus the pool, stacked
//! vertically, each holding a horizontal run of items. Arrow keys therefore
//! mean different things on the two axes:
//!
//! - [`Navigation::Left`] / [`Navigation::Right`] step to the nearest item in
//!   the same visual lane (judged by vertical-center overlap, not by which
//!   container the item belongs to).
//! - [`Navigation::Up`] / [`Navigation::Down`] jump to the nearest other lane
//!   and land on the item closest to the current horizontal position, or on
//!   the lane itself when it is empty.
//!
//! Policies implement [`NavigationPolicy`] over a read-only [`NavSpace`] of
//! drop zones, typically the zones of a [`tierlist_hit::ZoneIndex`], so
//! navigation and pointer hit testing share one registry. [`LanePolicy`] is
//! the default policy.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use tierlist_focus::{LanePolicy, NavOrigin, NavSpace, Navigation, NavigationPolicy};
//! use tierlist_hit::{DropZone, TargetKind};
//!
//! let zones = [
//!     DropZone::new(10_u32, Rect::new(0.0, 0.0, 400.0, 80.0), TargetKind::TIER_CONTENT),
//!     DropZone::new(11, Rect::new(10.0, 10.0, 70.0, 70.0), TargetKind::ITEM),
//!     DropZone::new(12, Rect::new(80.0, 10.0, 140.0, 70.0), TargetKind::ITEM),
//!     DropZone::new(20, Rect::new(0.0, 100.0, 400.0, 180.0), TargetKind::POOL),
//! ];
//! let space = NavSpace::new(&zones);
//! let origin = NavOrigin::new(Rect::new(10.0, 10.0, 70.0, 70.0)).with_active(11);
//!
//! // Right stays in the lane…
//! let right = LanePolicy.next(&origin, Navigation::Right, &space).unwrap();
//! assert_eq!(right.id, 12);
//! // …and Down lands on the empty pool itself.
//! let down = LanePolicy.next(&origin, Navigation::Down, &space).unwrap();
//! assert_eq!(down.id, 20);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use kurbo::{Point, Rect};
use smallvec::SmallVec;
use tierlist_hit::{DropZone, TargetKind};
use tracing::trace;

/// Arrow-key direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Towards the top of the board.
    Up,
    /// Towards the bottom of the board.
    Down,
    /// Towards the start of a lane.
    Left,
    /// Towards the end of a lane.
    Right,
}

/// A read-only view of the drop zones navigation may land on.
#[derive(Clone, Debug)]
pub struct NavSpace<'a, K> {
    /// Registered zones, in registration order.
    pub zones: &'a [DropZone<K>],
}

impl<'a, K> NavSpace<'a, K> {
    /// View over `zones`.
    pub fn new(zones: &'a [DropZone<K>]) -> Self {
        Self { zones }
    }
}

/// Where navigation starts from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NavOrigin<K> {
    /// On-screen bounds of the focused element.
    pub rect: Rect,
    /// The element being dragged; never a result.
    pub active: Option<K>,
    /// The element currently under focus or hover.
    pub over: Option<K>,
}

impl<K> NavOrigin<K> {
    /// Start from `rect` with nothing active or hovered.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            active: None,
            over: None,
        }
    }

    /// Set the dragged element.
    pub fn with_active(mut self, id: K) -> Self {
        self.active = Some(id);
        self
    }

    /// Set the element under focus.
    pub fn with_over(mut self, id: K) -> Self {
        self.over = Some(id);
        self
    }
}

/// A navigation result.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NavTarget<K> {
    /// Zone to hover next.
    pub id: K,
    /// Top-left corner of the zone, where the dragged element should move.
    pub anchor: Point,
}

/// Chooses the next hover target for a keyboard drag.
pub trait NavigationPolicy<K>
where
    K: Copy + Eq,
{
    /// Compute the next target from `origin` in `direction`.
    fn next(
        &self,
        origin: &NavOrigin<K>,
        direction: Navigation,
        space: &NavSpace<'_, K>,
    ) -> Option<NavTarget<K>>;
}

/// Lane-aware arrow-key navigation.
///
/// Row zones and the active element are never candidates. When the best
/// candidate is the element already under focus, the second best is returned
/// so repeated key presses always make progress.
#[derive(Copy, Clone, Debug, Default)]
pub struct LanePolicy;

impl<K> NavigationPolicy<K> for LanePolicy
where
    K: Copy + Eq + core::fmt::Debug,
{
    fn next(
        &self,
        origin: &NavOrigin<K>,
        direction: Navigation,
        space: &NavSpace<'_, K>,
    ) -> Option<NavTarget<K>> {
        let candidates = match direction {
            Navigation::Left | Navigation::Right => along_lane(origin, direction, space),
            Navigation::Up | Navigation::Down => across_lanes(origin, direction, space),
        };
        let mut ranked = candidates.into_iter();
        let best = ranked.next()?;
        let chosen = if origin.over == Some(best.id) {
            ranked.next()?
        } else {
            best
        };
        trace!(?direction, from = ?origin.over, to = ?chosen.id, "keyboard navigation");
        Some(NavTarget {
            id: chosen.id,
            anchor: chosen.rect.origin(),
        })
    }
}

type Ranked<'a, K> = SmallVec<[&'a DropZone<K>; 8]>;

fn eligible<K: Copy + Eq>(zone: &DropZone<K>, origin: &NavOrigin<K>) -> bool {
    !zone.kind.intersects(TargetKind::ROW) && origin.active != Some(zone.id)
}

/// Items sharing the origin's lane, nearest first in `direction`.
fn along_lane<'a, K: Copy + Eq>(
    origin: &NavOrigin<K>,
    direction: Navigation,
    space: &NavSpace<'a, K>,
) -> Ranked<'a, K> {
    let rect = origin.rect;
    let mut out: Ranked<'a, K> = space
        .zones
        .iter()
        .filter(|z| z.kind == TargetKind::ITEM && eligible(z, origin))
        .filter(|z| {
            let cy = z.rect.center().y;
            cy >= rect.y0 && cy <= rect.y1
        })
        .filter(|z| match direction {
            Navigation::Right => z.rect.x0 > rect.x0,
            _ => z.rect.x0 < rect.x0,
        })
        .collect();
    out.sort_by(|a, b| {
        let da = (a.rect.x0 - rect.x0).abs();
        let db = (b.rect.x0 - rect.x0).abs();
        da.total_cmp(&db)
    });
    out
}

/// One landing spot per other lane, nearest lane first in `direction`.
fn across_lanes<'a, K: Copy + Eq>(
    origin: &NavOrigin<K>,
    direction: Navigation,
    space: &NavSpace<'a, K>,
) -> Ranked<'a, K> {
    let rect = origin.rect;
    let center = rect.center();
    let mut lanes: Ranked<'a, K> = space
        .zones
        .iter()
        .filter(|z| TargetKind::LANE.contains(z.kind) && !z.kind.is_empty() && eligible(z, origin))
        .filter(|z| !z.rect.contains(center))
        .filter(|z| match direction {
            Navigation::Down => z.rect.y0 > rect.y0,
            _ => z.rect.y0 < rect.y0,
        })
        .collect();
    lanes.sort_by(|a, b| {
        let da = (a.rect.y0 - rect.y0).abs();
        let db = (b.rect.y0 - rect.y0).abs();
        da.total_cmp(&db)
    });

    lanes
        .into_iter()
        .map(|lane| {
            space
                .zones
                .iter()
                .filter(|z| z.kind == TargetKind::ITEM && eligible(z, origin))
                .filter(|z| lane.rect.contains(z.rect.center()))
                // Wrapped lanes stack runs; the run nearest the origin wins a tie.
                .min_by(|a, b| {
                    let da = (a.rect.x0 - rect.x0).abs();
                    let db = (b.rect.x0 - rect.x0).abs();
                    let ya = (a.rect.y0 - rect.y0).abs();
                    let yb = (b.rect.y0 - rect.y0).abs();
                    da.total_cmp(&db).then(ya.total_cmp(&yb))
                })
                .unwrap_or(lane)
        })
        .collect()
}
