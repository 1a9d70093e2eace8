// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Random pointer drags over a laid-out board.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use kurbo::{Point, Rect};
use proptest::prelude::*;
use tierlist_hit::ZoneIndex;
use tierlist_placement::{BoardLayout, DragSession, DragTarget};
use tierlist_store::{ItemId, ManualClock, NewItem, TierList, TierStore};

#[derive(Clone, Debug)]
struct Gesture {
    row: bool,
    pick: usize,
    to: (f64, f64),
}

fn gesture() -> impl Strategy<Value = Gesture> {
    (prop::bool::weighted(0.2), any::<usize>(), 0.0..1000.0_f64, 0.0..700.0_f64)
        .prop_map(|(row, pick, x, y)| Gesture { row, pick, to: (x, y) })
}

fn alive(list: &TierList) -> BTreeSet<ItemId> {
    list.containers()
        .flat_map(|(_, items)| items.iter().map(|i| i.id))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn drags_never_lose_or_duplicate_items(
        counts in prop::collection::vec(0..5_usize, 7),
        gestures in prop::collection::vec(gesture(), 1..24),
    ) {
        let mut store = TierStore::with_clock(ManualClock::new(DateTime::<Utc>::UNIX_EPOCH));
        store.create_list("Random");
        let tiers: Vec<_> = store.current_list().unwrap().tiers.iter().map(|t| t.id).collect();
        for (slot, &count) in counts.iter().enumerate() {
            for n in 0..count {
                let data = NewItem::named(format!("{slot}-{n}"));
                let added = match tiers.get(slot) {
                    Some(&tier) => store.add_item_to_tier(tier, data),
                    None => store.add_item(data),
                };
                prop_assert!(added.is_some());
            }
        }
        let expected = alive(store.current_list().unwrap());
        prop_assert_eq!(expected.len(), counts.iter().sum::<usize>());

        let layout = BoardLayout::default();
        let mut zones = ZoneIndex::new();
        for g in gestures {
            let list = store.current_list().unwrap();
            layout.register(list, &mut zones);
            let active = if g.row || expected.is_empty() {
                DragTarget::Row(list.tiers[g.pick % list.tiers.len()].id)
            } else {
                let ids: Vec<_> = expected.iter().copied().collect();
                DragTarget::Item(ids[g.pick % ids.len()])
            };
            let start = zones.zone(active).unwrap().rect;

            let mut session = DragSession::new();
            prop_assert!(session.press(active, start.center()));
            let to = Point::new(g.to.0, g.to.1);
            let over = session.pointer_move(to, Rect::from_center_size(to, start.size()), &zones);
            match (active, over) {
                (DragTarget::Row(_), Some(target)) => {
                    prop_assert!(matches!(target, DragTarget::Row(_)));
                }
                (_, Some(target)) => {
                    prop_assert!(!matches!(target, DragTarget::Row(_)));
                }
                (_, None) => {}
            }

            if let Some(command) = session.drop(list) {
                prop_assert!(store.apply(&command), "{:?} did not apply", command);
            }
            prop_assert!(!session.is_dragging());
            prop_assert_eq!(&alive(store.current_list().unwrap()), &expected);
            prop_assert_eq!(store.current_list().unwrap().tiers.len(), tiers.len());
        }
    }
}
