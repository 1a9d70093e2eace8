// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrow-key drags and JSON export.
//!
//! Items are moved with the keyboard navigator alone: Up and Down hop between
//! lanes, Left and Right walk along one. The finished list is printed in its
//! exchange format.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p tierlist_demos --example keyboard_drag`

use tierlist_hit::ZoneIndex;
use tierlist_placement::{BoardLayout, DragSession, DragTarget, Navigation};
use tierlist_placement::Navigation::{Down, Right, Up};
use tierlist_store::{ItemId, NewItem, TierStore};
use tracing_subscriber::EnvFilter;

fn keyboard_drag(
    store: &mut TierStore,
    layout: &BoardLayout,
    zones: &mut ZoneIndex<DragTarget>,
    item: ItemId,
    keys: &[Navigation],
) {
    let Some(list) = store.current_list() else {
        return;
    };
    layout.register(list, zones);
    let target = DragTarget::Item(item);
    let Some(rect) = zones.zone(target).map(|z| z.rect) else {
        return;
    };

    let mut session = DragSession::new();
    session.start_keyboard(target, rect);
    for &key in keys {
        match session.keyboard_move(key, zones) {
            Some(step) => println!("  {key:?} -> {} at {:?}", step.id, step.anchor),
            None => println!("  {key:?} -> stays"),
        }
    }
    if let Some(command) = session.drop(list) {
        println!("  drop -> {command:?}");
        store.apply(&command);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut store = TierStore::new();
    store.create_list("Fruit");
    let names = ["Mango", "Durian", "Apple"];
    let items: Vec<_> = names
        .iter()
        .filter_map(|n| store.add_item(NewItem::named(*n)))
        .collect();

    let layout = BoardLayout::default();
    let mut zones = ZoneIndex::new();

    println!("Mango all the way up:");
    keyboard_drag(&mut store, &layout, &mut zones, items[0], &[Up; 6]);

    println!("Durian to the bottom tier:");
    keyboard_drag(&mut store, &layout, &mut zones, items[1], &[Up]);

    println!("Apple up into S, ahead of Mango:");
    keyboard_drag(&mut store, &layout, &mut zones, items[2], &[Up; 6]);

    println!("Durian back down to the pool:");
    keyboard_drag(&mut store, &layout, &mut zones, items[1], &[Down, Right]);

    let Some(id) = store.current_list_id() else {
        return;
    };
    if let Some(doc) = store.export_list(id) {
        match serde_json::to_string_pretty(&doc) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("export failed: {err}"),
        }
    }
}
