// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers for lists, tiers, and items, plus the generator that issues them.

use core::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// The raw numeric value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a [`TierList`](crate::TierList).
    ListId,
    "list"
);
id_type!(
    /// Identifier of a [`TierRow`](crate::TierRow).
    TierId,
    "tier"
);
id_type!(
    /// Identifier of a [`TierItem`](crate::TierItem).
    ItemId,
    "item"
);

/// A place that holds an ordered run of items: the unassigned pool or one tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    /// The pool of unplaced items.
    Pool,
    /// The item sequence owned by a tier.
    Tier(TierId),
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool => f.write_str("pool"),
            Self::Tier(id) => id.fmt(f),
        }
    }
}

/// Monotonic id source shared by every kind of identifier.
///
/// A single counter keeps list, tier, and item ids disjoint from each other,
/// which makes debugging output unambiguous. Ids are never reused.
#[derive(Clone, Debug)]
pub struct IdGen {
    next: u64,
}

impl Default for IdGen {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGen {
    /// Create a generator that starts at 1.
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Make sure future ids are strictly greater than `raw`.
    pub fn observe(&mut self, raw: u64) {
        if raw >= self.next {
            self.next = raw.saturating_add(1);
        }
    }

    /// Whether every id has been handed out.
    ///
    /// `u64::MAX` itself is never issued, so an exhausted generator never
    /// repeats an id it has issued or observed.
    pub fn is_exhausted(&self) -> bool {
        self.next == u64::MAX
    }

    fn bump(&mut self) -> Option<u64> {
        if self.is_exhausted() {
            return None;
        }
        let id = self.next;
        self.next = id.checked_add(1)?;
        Some(id)
    }

    /// Issue a fresh list id, or `None` once exhausted.
    pub fn list_id(&mut self) -> Option<ListId> {
        self.bump().map(ListId)
    }

    /// Issue a fresh tier id, or `None` once exhausted.
    pub fn tier_id(&mut self) -> Option<TierId> {
        self.bump().map(TierId)
    }

    /// Issue a fresh item id, or `None` once exhausted.
    pub fn item_id(&mut self) -> Option<ItemId> {
        self.bump().map(ItemId)
    }
}
