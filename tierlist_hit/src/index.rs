// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of drop zones with a uniform grid broad phase.
//!
//! Zones are kept densely in registration order, which is the order every
//! query reports them in. The grid buckets zone positions into fixed-size
//! cells so point and rectangle queries only look at nearby zones. Zones that
//! would cover an excessive number of cells are kept aside and scanned
//! linearly instead.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::kind::TargetKind;

/// Cell size used by [`ZoneIndex::new`], in pixels.
pub const DEFAULT_CELL_SIZE: f64 = 128.0;

/// Zones covering more cells than this skip the grid.
const MAX_CELLS_PER_ZONE: i64 = 1024;

/// One registered drop target.
#[derive(Clone, Debug, PartialEq)]
pub struct DropZone<K> {
    /// Caller-chosen identifier.
    pub id: K,
    /// Bounds in screen space.
    pub rect: Rect,
    /// What the zone represents.
    pub kind: TargetKind,
}

impl<K> DropZone<K> {
    /// Create a zone.
    pub fn new(id: K, rect: Rect, kind: TargetKind) -> Self {
        Self { id, rect, kind }
    }
}

type CellKey = (i32, i32);

/// Grid cell coordinate containing `value`, rounding towards -∞.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Grid cell indices are intentionally i32; out-of-range values are saturated."
)]
fn cell_coord(value: f64, cell_size: f64) -> i32 {
    let t = value / cell_size;
    let coord = t as i32;
    // The cast truncated towards zero.
    if t < 0.0 && f64::from(coord) > t {
        coord.saturating_sub(1)
    } else {
        coord
    }
}

#[derive(Clone, Debug)]
enum Placement {
    Cells(SmallVec<[CellKey; 4]>),
    Oversized,
    Unindexed,
}

/// Drop-zone registry keyed by `K`.
#[derive(Clone)]
pub struct ZoneIndex<K> {
    cell_size: f64,
    zones: Vec<DropZone<K>>,
    placements: Vec<Placement>,
    by_id: HashMap<K, usize>,
    cells: HashMap<CellKey, SmallVec<[usize; 8]>>,
    oversized: SmallVec<[usize; 4]>,
}

impl<K: Debug> Debug for ZoneIndex<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ZoneIndex")
            .field("cell_size", &self.cell_size)
            .field("zones", &self.zones.len())
            .field("cells", &self.cells.len())
            .field("oversized", &self.oversized.len())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Hash> Default for ZoneIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> ZoneIndex<K> {
    /// Create an empty index with [`DEFAULT_CELL_SIZE`].
    pub fn new() -> Self {
        Self::with_cell_size(DEFAULT_CELL_SIZE)
    }

    /// Create an empty index with the given grid cell size.
    ///
    /// Sizes that are not strictly positive and finite fall back to
    /// [`DEFAULT_CELL_SIZE`].
    pub fn with_cell_size(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            DEFAULT_CELL_SIZE
        };
        Self {
            cell_size,
            zones: Vec::new(),
            placements: Vec::new(),
            by_id: HashMap::new(),
            cells: HashMap::new(),
            oversized: SmallVec::new(),
        }
    }

    /// Grid cell size in use.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of registered zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether no zone is registered.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// All zones, in registration order.
    pub fn zones(&self) -> &[DropZone<K>] {
        &self.zones
    }

    /// Look up a zone by id.
    pub fn zone(&self, id: K) -> Option<&DropZone<K>> {
        self.by_id.get(&id).map(|&slot| &self.zones[slot])
    }

    /// Register a zone, replacing any zone with the same id.
    ///
    /// A replaced zone keeps its place in registration order. Rectangles are
    /// normalized to positive width and height; zones with non-finite bounds
    /// are kept but never hit.
    pub fn insert(&mut self, mut zone: DropZone<K>) -> Option<DropZone<K>> {
        zone.rect = zone.rect.abs();
        if let Some(&slot) = self.by_id.get(&zone.id) {
            self.unplace(slot);
            let old = core::mem::replace(&mut self.zones[slot], zone);
            self.place(slot);
            return Some(old);
        }
        let slot = self.zones.len();
        self.by_id.insert(zone.id, slot);
        self.zones.push(zone);
        self.placements.push(Placement::Unindexed);
        self.place(slot);
        None
    }

    /// Move a registered zone. Returns `false` if `id` is unknown.
    pub fn update(&mut self, id: K, rect: Rect) -> bool {
        let Some(&slot) = self.by_id.get(&id) else {
            return false;
        };
        let rect = rect.abs();
        if self.zones[slot].rect == rect {
            return true;
        }
        self.unplace(slot);
        self.zones[slot].rect = rect;
        self.place(slot);
        true
    }

    /// Unregister a zone.
    pub fn remove(&mut self, id: K) -> Option<DropZone<K>> {
        let slot = self.by_id.remove(&id)?;
        self.unplace(slot);
        self.placements.remove(slot);
        let zone = self.zones.remove(slot);

        // Later zones shift down by one.
        let shift = |s: &mut usize| {
            if *s > slot {
                *s -= 1;
            }
        };
        self.by_id.values_mut().for_each(shift);
        self.cells
            .values_mut()
            .for_each(|bucket| bucket.iter_mut().for_each(shift));
        self.oversized.iter_mut().for_each(shift);
        Some(zone)
    }

    /// Unregister every zone.
    pub fn clear(&mut self) {
        self.zones.clear();
        self.placements.clear();
        self.by_id.clear();
        self.cells.clear();
        self.oversized.clear();
    }

    /// Zones containing `point`, in registration order.
    pub fn query_point(&self, point: Point) -> impl Iterator<Item = &DropZone<K>> + '_ {
        let mut slots: SmallVec<[usize; 8]> = SmallVec::new();
        if point.is_finite() {
            let key = (
                cell_coord(point.x, self.cell_size),
                cell_coord(point.y, self.cell_size),
            );
            if let Some(bucket) = self.cells.get(&key) {
                slots.extend(bucket.iter().copied());
            }
            slots.extend(self.oversized.iter().copied());
            slots.retain(|s| self.zones[*s].rect.contains(point));
            slots.sort_unstable();
        }
        slots.into_iter().map(|s| &self.zones[s])
    }

    /// Zones whose bounds overlap `rect` with positive area, in registration order.
    pub fn query_rect(&self, rect: Rect) -> impl Iterator<Item = &DropZone<K>> + '_ {
        let rect = rect.abs();
        let mut slots: SmallVec<[usize; 8]> = SmallVec::new();
        match self.covered_cells(rect) {
            Placement::Cells(keys) => {
                for key in keys {
                    if let Some(bucket) = self.cells.get(&key) {
                        slots.extend(bucket.iter().copied());
                    }
                }
                slots.extend(self.oversized.iter().copied());
            }
            // Too large for the grid: every indexed zone is a candidate.
            Placement::Oversized => slots.extend(
                self.placements
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| !matches!(p, Placement::Unindexed))
                    .map(|(s, _)| s),
            ),
            Placement::Unindexed => {}
        }
        slots.sort_unstable();
        slots.dedup();
        slots.retain(|s| overlap_area(self.zones[*s].rect, rect) > 0.0);
        slots.into_iter().map(|s| &self.zones[s])
    }

    fn covered_cells(&self, rect: Rect) -> Placement {
        if !rect.is_finite() {
            return Placement::Unindexed;
        }
        let (ix0, ix1) = (
            cell_coord(rect.x0, self.cell_size),
            cell_coord(rect.x1, self.cell_size),
        );
        let (iy0, iy1) = (
            cell_coord(rect.y0, self.cell_size),
            cell_coord(rect.y1, self.cell_size),
        );
        let cols = i64::from(ix1) - i64::from(ix0) + 1;
        let rows = i64::from(iy1) - i64::from(iy0) + 1;
        // Saturated coordinates can span the whole i32 range on both axes.
        match cols.checked_mul(rows) {
            Some(count) if count <= MAX_CELLS_PER_ZONE => {}
            _ => return Placement::Oversized,
        }
        let mut keys = SmallVec::new();
        for ix in ix0..=ix1 {
            for iy in iy0..=iy1 {
                keys.push((ix, iy));
            }
        }
        Placement::Cells(keys)
    }

    fn place(&mut self, slot: usize) {
        let placement = self.covered_cells(self.zones[slot].rect);
        match &placement {
            Placement::Cells(keys) => {
                for key in keys {
                    self.cells.entry(*key).or_default().push(slot);
                }
            }
            Placement::Oversized => self.oversized.push(slot),
            Placement::Unindexed => {}
        }
        self.placements[slot] = placement;
    }

    fn unplace(&mut self, slot: usize) {
        match core::mem::replace(&mut self.placements[slot], Placement::Unindexed) {
            Placement::Cells(keys) => {
                for key in keys {
                    if let Some(bucket) = self.cells.get_mut(&key) {
                        bucket.retain(|s| *s != slot);
                        if bucket.is_empty() {
                            self.cells.remove(&key);
                        }
                    }
                }
            }
            Placement::Oversized => self.oversized.retain(|s| *s != slot),
            Placement::Unindexed => {}
        }
    }
}

/// Area of the intersection of two rectangles, 0 when they do not overlap.
pub fn overlap_area(a: Rect, b: Rect) -> f64 {
    let w = a.x1.min(b.x1) - a.x0.max(b.x0);
    let h = a.y1.min(b.y1) - a.y0.max(b.y0);
    if w > 0.0 && h > 0.0 { w * h } else { 0.0 }
}
