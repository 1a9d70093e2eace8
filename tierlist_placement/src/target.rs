// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tagged identifiers for everything that can be dragged or hovered.

use core::fmt;

use tierlist_hit::{DragKind, TargetKind};
use tierlist_store::{Container, ItemId, TierId};

/// A drag source or hover target.
///
/// The variant is fixed when a zone is registered or a drag starts, so the
/// resolver never has to guess what an id refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragTarget {
    /// A tier row's chrome; dragging it reorders tiers.
    Row(TierId),
    /// An item tile.
    Item(ItemId),
    /// The pool of unplaced items.
    Pool,
    /// The item area of a tier.
    TierContent(TierId),
}

impl DragTarget {
    /// Zone kind used when registering this target for hit testing.
    pub fn kind(self) -> TargetKind {
        match self {
            Self::Row(_) => TargetKind::ROW,
            Self::Item(_) => TargetKind::ITEM,
            Self::Pool => TargetKind::POOL,
            Self::TierContent(_) => TargetKind::TIER_CONTENT,
        }
    }

    /// Kind of drag this target starts, or `None` if it cannot be dragged.
    pub fn drag_kind(self) -> Option<DragKind> {
        match self {
            Self::Row(_) => Some(DragKind::Row),
            Self::Item(_) => Some(DragKind::Item),
            Self::Pool | Self::TierContent(_) => None,
        }
    }

    /// The container a drop on this target lands in, if it names one directly.
    ///
    /// Rows map to their tier's content. Items return `None`; their container
    /// depends on the list they are in.
    pub fn container(self) -> Option<Container> {
        match self {
            Self::Pool => Some(Container::Pool),
            Self::Row(tier) | Self::TierContent(tier) => Some(Container::Tier(tier)),
            Self::Item(_) => None,
        }
    }
}

impl fmt::Display for DragTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(tier) => write!(f, "row:{tier}"),
            Self::Item(item) => write!(f, "{item}"),
            Self::Pool => f.write_str("pool"),
            Self::TierContent(tier) => write!(f, "content:{tier}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rows_and_items_start_drags() {
        assert_eq!(DragTarget::Row(TierId(1)).drag_kind(), Some(DragKind::Row));
        assert_eq!(DragTarget::Item(ItemId(2)).drag_kind(), Some(DragKind::Item));
        assert_eq!(DragTarget::Pool.drag_kind(), None);
        assert_eq!(DragTarget::TierContent(TierId(1)).drag_kind(), None);
    }

    #[test]
    fn row_chrome_targets_the_tier_content() {
        let tier = TierId(4);
        assert_eq!(DragTarget::Row(tier).container(), Some(Container::Tier(tier)));
        assert_eq!(
            DragTarget::TierContent(tier).container(),
            DragTarget::Row(tier).container()
        );
        assert_eq!(DragTarget::Item(ItemId(9)).container(), None);
    }

    #[test]
    fn display_is_unambiguous() {
        assert_eq!(DragTarget::Row(TierId(3)).to_string(), "row:tier-3");
        assert_eq!(DragTarget::TierContent(TierId(3)).to_string(), "content:tier-3");
        assert_eq!(DragTarget::Item(ItemId(8)).to_string(), "item-8");
    }
}
