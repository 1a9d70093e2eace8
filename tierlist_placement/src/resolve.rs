// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning a finished drag into a store command.

use tierlist_store::{Command, Container, ItemId, TierId, TierList};
use tracing::debug;

use crate::target::DragTarget;

/// Move the element at `from` so it ends up at `to`, returning the new order.
///
/// Out-of-range indices leave the order unchanged.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = items.to_vec();
    if from < out.len() && to < out.len() && from != to {
        let moved = out.remove(from);
        out.insert(to, moved);
    }
    out
}

/// Resolve a drop of `active` onto `over` against the current list.
///
/// Row drags only resolve onto other rows. Item drags resolve onto the pool,
/// a tier (its content area or its row chrome, appending), or another item
/// (taking that item's position). Anything else, including ids that no
/// longer exist in `list`, yields `None`.
pub fn resolve(active: DragTarget, over: Option<DragTarget>, list: &TierList) -> Option<Command> {
    let command = over.and_then(|over| match active {
        DragTarget::Row(tier) => resolve_row(tier, over, list),
        DragTarget::Item(item) => resolve_item(item, over, list),
        DragTarget::Pool | DragTarget::TierContent(_) => None,
    });
    match &command {
        Some(command) => debug!(%active, ?command, "drop resolved"),
        None => debug!(%active, over = ?over, "drop rejected"),
    }
    command
}

fn resolve_row(tier: TierId, over: DragTarget, list: &TierList) -> Option<Command> {
    let DragTarget::Row(target) = over else {
        return None;
    };
    let from = list.tier_index(tier)?;
    let to = list.tier_index(target)?;
    (from != to).then_some(Command::ReorderTiers { from, to })
}

fn resolve_item(item: ItemId, over: DragTarget, list: &TierList) -> Option<Command> {
    let (from, from_index) = list.locate_item(item)?;
    let (to, index) = match over {
        DragTarget::Item(other) => {
            let (container, position) = list.locate_item(other)?;
            (container, Some(position))
        }
        target => {
            let container = target.container()?;
            list.items(container)?;
            (container, None)
        }
    };

    if from != to {
        return Some(Command::MoveItem {
            item,
            from,
            to,
            index,
        });
    }
    let index = index.filter(|&i| i != from_index)?;
    let ids: Vec<_> = list.items(from)?.iter().map(|i| i.id).collect();
    Some(Command::ReorderItems {
        container: from,
        order: array_move(&ids, from_index, index),
    })
}

/// The container holding `target`, whether it names one or is an item in one.
pub fn container_of(target: DragTarget, list: &TierList) -> Option<Container> {
    match target {
        DragTarget::Item(item) => list.locate_item(item).map(|(container, _)| container),
        other => other.container().filter(|&c| list.items(c).is_some()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use tierlist_store::{ManualClock, NewItem, TierStore};

    fn list() -> (TierList, [ItemId; 4]) {
        let mut store = TierStore::with_clock(ManualClock::new(DateTime::<Utc>::UNIX_EPOCH));
        store.create_list("Resolve");
        let s = store.current_list().unwrap().tiers[0].id;
        let a = store.add_item_to_tier(s, NewItem::named("a")).unwrap();
        let b = store.add_item_to_tier(s, NewItem::named("b")).unwrap();
        let c = store.add_item_to_tier(s, NewItem::named("c")).unwrap();
        let p = store.add_item(NewItem::named("p")).unwrap();
        (store.current_list().unwrap().clone(), [a, b, c, p])
    }

    #[test]
    fn array_move_matches_remove_then_insert() {
        assert_eq!(array_move(&[1, 2, 3, 4], 0, 2), [2, 3, 1, 4]);
        assert_eq!(array_move(&[1, 2, 3, 4], 3, 0), [4, 1, 2, 3]);
        assert_eq!(array_move(&[1, 2, 3], 1, 1), [1, 2, 3]);
        assert_eq!(array_move(&[1, 2, 3], 5, 0), [1, 2, 3]);
    }

    #[test]
    fn row_drops_only_onto_other_rows() {
        let (list, [a, ..]) = list();
        let (s, b) = (list.tiers[0].id, list.tiers[2].id);
        assert_eq!(
            resolve(DragTarget::Row(s), Some(DragTarget::Row(b)), &list),
            Some(Command::ReorderTiers { from: 0, to: 2 })
        );
        assert_eq!(resolve(DragTarget::Row(s), Some(DragTarget::Row(s)), &list), None);
        assert_eq!(resolve(DragTarget::Row(s), Some(DragTarget::Pool), &list), None);
        assert_eq!(resolve(DragTarget::Row(s), Some(DragTarget::Item(a)), &list), None);
        assert_eq!(resolve(DragTarget::Row(s), None, &list), None);
    }

    #[test]
    fn item_onto_other_container_moves() {
        let (list, [a, _, _, p]) = list();
        let (s, f) = (list.tiers[0].id, list.tiers[5].id);
        assert_eq!(
            resolve(DragTarget::Item(p), Some(DragTarget::TierContent(f)), &list),
            Some(Command::MoveItem {
                item: p,
                from: Container::Pool,
                to: Container::Tier(f),
                index: None,
            })
        );
        // Row chrome behaves like the content area.
        assert_eq!(
            resolve(DragTarget::Item(p), Some(DragTarget::Row(f)), &list),
            resolve(DragTarget::Item(p), Some(DragTarget::TierContent(f)), &list)
        );
        // Dropping on an item takes its index.
        assert_eq!(
            resolve(DragTarget::Item(a), Some(DragTarget::Item(p)), &list),
            Some(Command::MoveItem {
                item: a,
                from: Container::Tier(s),
                to: Container::Pool,
                index: Some(0),
            })
        );
    }

    #[test]
    fn item_within_its_container_reorders() {
        let (list, [a, b, c, _]) = list();
        let s = list.tiers[0].id;
        assert_eq!(
            resolve(DragTarget::Item(a), Some(DragTarget::Item(c)), &list),
            Some(Command::ReorderItems {
                container: Container::Tier(s),
                order: vec![b, c, a],
            })
        );
        assert_eq!(resolve(DragTarget::Item(a), Some(DragTarget::Item(a)), &list), None);
        // Own container without an index is a no-op.
        assert_eq!(resolve(DragTarget::Item(b), Some(DragTarget::TierContent(s)), &list), None);
    }

    #[test]
    fn stale_ids_never_resolve() {
        let (list, [a, ..]) = list();
        let gone = TierId(9999);
        assert_eq!(resolve(DragTarget::Item(ItemId(9999)), Some(DragTarget::Pool), &list), None);
        assert_eq!(resolve(DragTarget::Item(a), Some(DragTarget::TierContent(gone)), &list), None);
        assert_eq!(resolve(DragTarget::Item(a), Some(DragTarget::Item(ItemId(9999))), &list), None);
        assert_eq!(resolve(DragTarget::Pool, Some(DragTarget::Pool), &list), None);
    }

    #[test]
    fn container_of_looks_through_items() {
        let (list, [a, _, _, p]) = list();
        let s = list.tiers[0].id;
        assert_eq!(container_of(DragTarget::Item(a), &list), Some(Container::Tier(s)));
        assert_eq!(container_of(DragTarget::Item(p), &list), Some(Container::Pool));
        assert_eq!(container_of(DragTarget::Row(s), &list), Some(Container::Tier(s)));
    }
}
