// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer drags on a headless board.
//!
//! This example shows how to combine:
//! - `tierlist_store` for the list model and commands,
//! - `BoardLayout` and `tierlist_hit` for drop zones,
//! - `DragSession` for the gesture itself.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p tierlist_demos --example pointer_drag`

use kurbo::{Point, Rect};
use tierlist_hit::ZoneIndex;
use tierlist_placement::{BoardLayout, DragSession, DragTarget};
use tierlist_store::{Container, NewItem, TierList, TierStore};
use tracing_subscriber::EnvFilter;

fn print_board(list: &TierList) {
    for tier in &list.tiers {
        let names: Vec<_> = tier.items.iter().map(|i| i.name.as_str()).collect();
        println!("  {:>4} | {}", tier.display_name(), names.join(", "));
    }
    let pool: Vec<_> = list.pool.iter().map(|i| i.name.as_str()).collect();
    println!("  pool | {}", pool.join(", "));
}

/// Press on `target`, travel to `to`, and drop. Returns whether the store changed.
fn drag(
    store: &mut TierStore,
    layout: &BoardLayout,
    zones: &mut ZoneIndex<DragTarget>,
    target: DragTarget,
    to: Point,
) -> bool {
    let Some(list) = store.current_list() else {
        return false;
    };
    layout.register(list, zones);
    let Some(start) = zones.zone(target).map(|z| z.rect) else {
        return false;
    };

    let mut session = DragSession::new();
    session.press(target, start.center());
    // A few intermediate moves, as a real pointer would report.
    for step in 1..=4 {
        let t = f64::from(step) / 4.0;
        let at = start.center().lerp(to, t);
        let over = session.pointer_move(at, Rect::from_center_size(at, start.size()), zones);
        println!("    move to ({:.0}, {:.0}) over {:?}", at.x, at.y, over);
    }

    match session.drop(list) {
        Some(command) => {
            println!("    drop -> {command:?}");
            store.apply(&command)
        }
        None => {
            println!("    drop -> nothing");
            false
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut store = TierStore::new();
    store.create_list("Games");
    let Some(list) = store.current_list() else {
        return;
    };
    let tiers: Vec<_> = list.tiers.iter().map(|t| t.id).collect();
    let names = ["Zelda", "Metroid", "Portal", "Tetris"];
    let items: Vec<_> = names
        .iter()
        .filter_map(|n| store.add_item(NewItem::named(*n)))
        .collect();

    let layout = BoardLayout::default();
    let mut zones = ZoneIndex::new();

    println!("start:");
    print_board(store.current_list().unwrap());

    // Rows only grow once a lane wraps, so these stay put for four items.
    let rows = layout.row_rects(store.current_list().unwrap());
    let (s, a) = (rows[0], rows[1]);

    println!("Zelda into S:");
    let to = Point::new(500.0, s.center().y);
    drag(&mut store, &layout, &mut zones, DragTarget::Item(items[0]), to);

    println!("Portal into A:");
    let to = Point::new(500.0, a.center().y);
    drag(&mut store, &layout, &mut zones, DragTarget::Item(items[2]), to);

    println!("Metroid onto Zelda (takes its place):");
    let zelda = layout.tile_rect(Rect::new(layout.label_width, s.y0, s.x1, s.y1), 0);
    drag(&mut store, &layout, &mut zones, DragTarget::Item(items[1]), zelda.center());

    println!("Row S below row A:");
    let label = Point::new(layout.label_width / 2.0, a.center().y);
    drag(&mut store, &layout, &mut zones, DragTarget::Row(tiers[0]), label);

    println!("Tetris off the board:");
    let far = Point::new(4000.0, 4000.0);
    drag(&mut store, &layout, &mut zones, DragTarget::Item(items[3]), far);

    println!("end:");
    print_board(store.current_list().unwrap());
    let pooled = store.items_in(Container::Pool).map_or(0, <[_]>::len);
    println!("{pooled} item(s) left in the pool");
}
