// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kinds of drop zones and of the elements being dragged.

bitflags::bitflags! {
    /// What a registered drop zone represents.
    ///
    /// A zone carries exactly one of these; sets are used for filtering.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TargetKind: u8 {
        /// A single item tile.
        const ITEM         = 0b0000_0001;
        /// A tier row's chrome (label and handle); also a row drag source.
        const ROW          = 0b0000_0010;
        /// The area of a tier that holds its items.
        const TIER_CONTENT = 0b0000_0100;
        /// The pool of unplaced items.
        const POOL         = 0b0000_1000;
        /// Containers that form navigable lanes.
        const LANE         = Self::TIER_CONTENT.bits() | Self::POOL.bits();
    }
}

/// The kind of element a drag started from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragKind {
    /// An item is being placed.
    Item,
    /// A tier row is being reordered.
    Row,
}

impl DragKind {
    /// Whether a zone of `kind` is a legal hover target for this drag.
    ///
    /// Row drags only see rows; item drags see everything except rows.
    pub fn accepts(self, kind: TargetKind) -> bool {
        match self {
            Self::Row => kind.intersects(TargetKind::ROW),
            Self::Item => !kind.is_empty() && !kind.intersects(TargetKind::ROW),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_and_item_drags_see_disjoint_targets() {
        for kind in [
            TargetKind::ITEM,
            TargetKind::ROW,
            TargetKind::TIER_CONTENT,
            TargetKind::POOL,
        ] {
            assert_ne!(DragKind::Row.accepts(kind), DragKind::Item.accepts(kind));
        }
    }

    #[test]
    fn lane_covers_both_containers() {
        assert!(TargetKind::LANE.contains(TargetKind::POOL));
        assert!(TargetKind::LANE.contains(TargetKind::TIER_CONTENT));
        assert!(!TargetKind::LANE.intersects(TargetKind::ITEM | TargetKind::ROW));
    }
}
