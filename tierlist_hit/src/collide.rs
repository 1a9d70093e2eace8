// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision detection for an in-progress drag.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Point, Rect};
use smallvec::SmallVec;
use tracing::trace;

use crate::index::{ZoneIndex, overlap_area};
use crate::kind::{DragKind, TargetKind};

/// Where the dragged element currently is.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitQuery {
    /// Pointer position, when the drag is pointer driven.
    pub pointer: Option<Point>,
    /// Current bounds of the dragged element.
    pub rect: Rect,
}

impl HitQuery {
    /// A pointer-driven query.
    pub fn pointer(pointer: Point, rect: Rect) -> Self {
        Self {
            pointer: Some(pointer),
            rect,
        }
    }

    /// A query with only the dragged element's bounds.
    pub fn rect(rect: Rect) -> Self {
        Self {
            pointer: None,
            rect,
        }
    }
}

/// Which test produced a set of collisions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HitMethod {
    /// The pointer lies inside the zone.
    PointerWithin,
    /// The dragged rectangle overlaps the zone.
    RectIntersection,
}

/// One candidate hover target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Collision<K> {
    /// Zone id.
    pub id: K,
    /// Zone kind.
    pub kind: TargetKind,
    /// Zone bounds.
    pub rect: Rect,
    /// Zone area for pointer hits, intersection-over-union for rectangle hits.
    pub score: f64,
}

/// Filtered candidates, best first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collisions<K> {
    /// The test that produced the candidates, or `None` if nothing was hit.
    pub method: Option<HitMethod>,
    /// Candidates surviving the type filter.
    pub hits: SmallVec<[Collision<K>; 4]>,
}

impl<K> Collisions<K> {
    /// The hover target.
    pub fn first(&self) -> Option<&Collision<K>> {
        self.hits.first()
    }

    /// Whether no candidate survived.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Candidates, best first.
    pub fn iter(&self) -> impl Iterator<Item = &Collision<K>> + '_ {
        self.hits.iter()
    }
}

/// Hit-testing policy for drags.
///
/// The exact pointer test runs first. Only when it hits nothing at all does
/// the rectangle-intersection fallback run. Candidates of the wrong kind for
/// the drag are dropped afterwards, so a pointer over a row during an item
/// drag yields no target rather than a fallback guess.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    /// Run the exact pointer-within test.
    pub pointer_within: bool,
    /// Fall back to rectangle intersection when the pointer test hits nothing.
    pub rect_fallback: bool,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            pointer_within: true,
            rect_fallback: true,
        }
    }
}

impl CollisionFilter {
    /// Find the hover candidates for a drag of `drag` at `query`.
    ///
    /// Pointer hits are ordered innermost first (ascending area); rectangle
    /// hits by descending intersection-over-union. Equal scores keep
    /// registration order.
    pub fn detect<K>(
        &self,
        index: &ZoneIndex<K>,
        query: &HitQuery,
        drag: DragKind,
    ) -> Collisions<K>
    where
        K: Copy + Eq + Hash + Debug,
    {
        let mut out = Collisions {
            method: None,
            hits: SmallVec::new(),
        };

        if self.pointer_within
            && let Some(point) = query.pointer
        {
            out.hits.extend(index.query_point(point).map(|z| Collision {
                id: z.id,
                kind: z.kind,
                rect: z.rect,
                score: z.rect.area(),
            }));
            if !out.hits.is_empty() {
                out.method = Some(HitMethod::PointerWithin);
                out.hits.sort_by(|a, b| a.score.total_cmp(&b.score));
            }
        }

        if out.method.is_none() && self.rect_fallback {
            let a = query.rect.abs();
            out.hits.extend(index.query_rect(a).filter_map(|z| {
                let inter = overlap_area(a, z.rect);
                let union = a.area() + z.rect.area() - inter;
                (union > 0.0).then(|| Collision {
                    id: z.id,
                    kind: z.kind,
                    rect: z.rect,
                    score: inter / union,
                })
            }));
            if !out.hits.is_empty() {
                out.method = Some(HitMethod::RectIntersection);
                out.hits.sort_by(|a, b| b.score.total_cmp(&a.score));
            }
        }

        let found = out.hits.len();
        out.hits.retain(|c| drag.accepts(c.kind));
        trace!(
            ?drag,
            method = ?out.method,
            found,
            kept = out.hits.len(),
            over = ?out.first().map(|c| c.id),
            "collision"
        );
        out
    }
}

/// [`CollisionFilter::detect`] with the default filter.
pub fn detect<K>(index: &ZoneIndex<K>, query: &HitQuery, drag: DragKind) -> Collisions<K>
where
    K: Copy + Eq + Hash + Debug,
{
    CollisionFilter::default().detect(index, query, drag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DropZone;
    use alloc::vec::Vec;

    const ROW_A: u32 = 1;
    const CONTENT_A: u32 = 2;
    const ITEM_A1: u32 = 3;
    const ROW_B: u32 = 4;
    const CONTENT_B: u32 = 5;
    const POOL: u32 = 6;

    /// Two tiers stacked above a pool; each tier has a 100 px label on the left.
    fn board() -> ZoneIndex<u32> {
        let mut index = ZoneIndex::with_cell_size(64.0);
        index.insert(DropZone::new(ROW_A, Rect::new(0.0, 0.0, 100.0, 80.0), TargetKind::ROW));
        index.insert(DropZone::new(
            CONTENT_A,
            Rect::new(100.0, 0.0, 600.0, 80.0),
            TargetKind::TIER_CONTENT,
        ));
        index.insert(DropZone::new(
            ITEM_A1,
            Rect::new(110.0, 10.0, 170.0, 70.0),
            TargetKind::ITEM,
        ));
        index.insert(DropZone::new(ROW_B, Rect::new(0.0, 90.0, 100.0, 170.0), TargetKind::ROW));
        index.insert(DropZone::new(
            CONTENT_B,
            Rect::new(100.0, 90.0, 600.0, 170.0),
            TargetKind::TIER_CONTENT,
        ));
        index.insert(DropZone::new(
            POOL,
            Rect::new(0.0, 200.0, 600.0, 300.0),
            TargetKind::POOL,
        ));
        index
    }

    fn ids(c: &Collisions<u32>) -> Vec<u32> {
        c.iter().map(|h| h.id).collect()
    }

    fn tile_at(x: f64, y: f64) -> Rect {
        Rect::new(x - 30.0, y - 30.0, x + 30.0, y + 30.0)
    }

    #[test]
    fn innermost_pointer_hit_wins() {
        let index = board();
        let query = HitQuery::pointer(Point::new(140.0, 40.0), tile_at(140.0, 40.0));
        let c = detect(&index, &query, DragKind::Item);
        assert_eq!(c.method, Some(HitMethod::PointerWithin));
        assert_eq!(ids(&c), [ITEM_A1, CONTENT_A]);
    }

    #[test]
    fn item_drag_over_row_chrome_is_rejected_without_fallback() {
        let index = board();
        let query = HitQuery::pointer(Point::new(50.0, 40.0), tile_at(130.0, 40.0));
        let c = detect(&index, &query, DragKind::Item);
        assert_eq!(c.method, Some(HitMethod::PointerWithin));
        assert!(c.is_empty());
    }

    #[test]
    fn gap_falls_back_to_rect_intersection() {
        let index = board();
        // The pointer sits in the gap between the tiers; the tile mostly overlaps tier B.
        let rect = Rect::new(270.0, 75.0, 330.0, 135.0);
        let query = HitQuery::pointer(Point::new(300.0, 85.0), rect);
        let c = detect(&index, &query, DragKind::Item);
        assert_eq!(c.method, Some(HitMethod::RectIntersection));
        assert_eq!(ids(&c), [CONTENT_B, CONTENT_A]);
    }

    #[test]
    fn fallback_can_be_disabled() {
        let index = board();
        let filter = CollisionFilter {
            rect_fallback: false,
            ..CollisionFilter::default()
        };
        let query = HitQuery::pointer(Point::new(300.0, 85.0), tile_at(300.0, 105.0));
        let c = filter.detect(&index, &query, DragKind::Item);
        assert_eq!(c.method, None);
        assert!(c.is_empty());
    }

    #[test]
    fn row_drags_only_see_rows() {
        let index = board();
        let query = HitQuery::pointer(Point::new(300.0, 120.0), Rect::new(0.0, 90.0, 600.0, 170.0));
        let c = detect(&index, &query, DragKind::Row);
        assert!(c.is_empty());

        let query = HitQuery::rect(Rect::new(0.0, 60.0, 600.0, 140.0));
        let c = detect(&index, &query, DragKind::Row);
        assert_eq!(c.method, Some(HitMethod::RectIntersection));
        assert_eq!(ids(&c), [ROW_B, ROW_A]);
    }

    #[test]
    fn kinds_never_leak_across_drag_types() {
        let index = board();
        for y in (0..300).step_by(15) {
            for x in (0..600).step_by(25) {
                let p = Point::new(f64::from(x), f64::from(y));
                let query = HitQuery::pointer(p, tile_at(p.x, p.y));
                for hit in detect(&index, &query, DragKind::Item).iter() {
                    assert_ne!(hit.kind, TargetKind::ROW);
                }
                for hit in detect(&index, &query, DragKind::Row).iter() {
                    assert_eq!(hit.kind, TargetKind::ROW);
                }
            }
        }
    }
}
