// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A fixed-extent board layout that registers drop zones for a list.
//!
//! Hosts with their own layout engine register zones themselves; this is the
//! simple arrangement used by headless drivers: tiers stacked top to bottom,
//! each a label column followed by runs of square tiles, with the pool
//! underneath. A lane that outgrows one run wraps and gets taller.

use kurbo::Rect;
use tierlist_hit::{DropZone, ZoneIndex};
use tierlist_store::{TierItem, TierList};

use crate::target::DragTarget;

/// Extents of the board, in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoardLayout {
    /// Width of the whole board.
    pub width: f64,
    /// Width of a tier's label column (the row chrome).
    pub label_width: f64,
    /// Height of a tier whose tiles fit on one run.
    pub row_height: f64,
    /// Vertical space between tiers, and between the last tier and the pool.
    pub row_gap: f64,
    /// Side of a square item tile.
    pub tile: f64,
    /// Space around and between tiles.
    pub tile_gap: f64,
    /// Minimum height of the pool.
    pub pool_height: f64,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            width: 960.0,
            label_width: 100.0,
            row_height: 80.0,
            row_gap: 4.0,
            tile: 64.0,
            tile_gap: 8.0,
            pool_height: 160.0,
        }
    }
}

impl BoardLayout {
    /// Tiles that fit on one run of a lane `width` pixels wide, at least one.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The value is floored, finite, and at least one before the cast."
    )]
    pub fn tiles_per_run(&self, width: f64) -> usize {
        let fit = ((width - self.tile_gap) / (self.tile + self.tile_gap)).floor();
        if fit.is_finite() && fit >= 1.0 {
            fit as usize
        } else {
            1
        }
    }

    /// Height of a lane `width` wide holding `count` tiles.
    ///
    /// Never less than `min`; grows one run of tiles at a time.
    pub fn lane_height(&self, width: f64, count: usize, min: f64) -> f64 {
        let runs = count.div_ceil(self.tiles_per_run(width));
        let needed = self.tile_gap + runs as f64 * (self.tile + self.tile_gap);
        needed.max(min)
    }

    /// Bounds of the tile at `index` within `lane`, wrapping onto a new run
    /// when the current one is full.
    pub fn tile_rect(&self, lane: Rect, index: usize) -> Rect {
        let per_run = self.tiles_per_run(lane.width());
        let (run, col) = (index / per_run, index % per_run);
        let step = self.tile + self.tile_gap;
        let x0 = lane.x0 + self.tile_gap + col as f64 * step;
        let y0 = lane.y0 + self.tile_gap + run as f64 * step;
        Rect::new(x0, y0, x0 + self.tile, y0 + self.tile)
    }

    /// Bounds of every tier, label included, top to bottom.
    pub fn row_rects(&self, list: &TierList) -> Vec<Rect> {
        let lane_width = self.width - self.label_width;
        let mut y0 = 0.0;
        list.tiers
            .iter()
            .map(|tier| {
                let height = self.lane_height(lane_width, tier.items.len(), self.row_height);
                let row = Rect::new(0.0, y0, self.width, y0 + height);
                y0 = row.y1 + self.row_gap;
                row
            })
            .collect()
    }

    /// Bounds of the pool, below the last tier.
    pub fn pool_rect(&self, list: &TierList) -> Rect {
        let y0 = self
            .row_rects(list)
            .last()
            .map_or(0.0, |row| row.y1)
            + self.row_gap;
        let height = self.lane_height(self.width, list.pool.len(), self.pool_height);
        Rect::new(0.0, y0, self.width, y0 + height)
    }

    /// Every zone of `list`: for each tier its row chrome, content area, and
    /// items; then the pool and its items.
    pub fn zones(&self, list: &TierList) -> Vec<DropZone<DragTarget>> {
        let mut out = Vec::with_capacity(list.item_count() + 2 * list.tiers.len() + 1);
        let tiles = |out: &mut Vec<DropZone<DragTarget>>, lane: Rect, items: &[TierItem]| {
            for (i, item) in items.iter().enumerate() {
                out.push(zone(DragTarget::Item(item.id), self.tile_rect(lane, i)));
            }
        };
        let rows = self.row_rects(list);
        for (tier, row) in list.tiers.iter().zip(&rows) {
            let label_x = row.x0 + self.label_width;
            let label = Rect::new(row.x0, row.y0, label_x, row.y1);
            let content = Rect::new(label_x, row.y0, row.x1, row.y1);
            out.push(zone(DragTarget::Row(tier.id), label));
            out.push(zone(DragTarget::TierContent(tier.id), content));
            tiles(&mut out, content, &tier.items);
        }
        let pool = self.pool_rect(list);
        out.push(zone(DragTarget::Pool, pool));
        tiles(&mut out, pool, &list.pool);
        out
    }

    /// Replace the contents of `index` with the zones of `list`.
    pub fn register(&self, list: &TierList, index: &mut ZoneIndex<DragTarget>) {
        index.clear();
        for z in self.zones(list) {
            index.insert(z);
        }
    }
}

fn zone(target: DragTarget, rect: Rect) -> DropZone<DragTarget> {
    DropZone::new(target, rect, target.kind())
}
