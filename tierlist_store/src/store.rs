// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The store: owned state, atomic commands, snapshots, and subscribers.
//!
//! ## Atomicity
//!
//! State lives behind an `Arc<StoreState>`, and each list behind its own
//! `Arc<TierList>`. A command clones the outer state (a vector of `Arc`s),
//! obtains the list it edits with [`Arc::make_mut`] (which copies it because
//! the previous state still references it), edits the copy, and swaps the
//! new state in only when the edit succeeds. A [`Snapshot`] handed out
//! earlier therefore never changes, and a rejected command leaves no trace.
//!
//! ## No-ops
//!
//! Commands that need a current list do nothing when there is none, and
//! commands naming an unknown id do nothing either. No-ops do not notify
//! subscribers or reach the persistence adapter.

use std::mem;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::ids::{Container, IdGen, ItemId, ListId, TierId};
use crate::import::{ExportDocument, ImportError};
use crate::model::{
    COPY_SUFFIX, ItemPatch, Level, ListPatch, MAX_NAME_CHARS, MAX_TITLE_CHARS, NewItem, TierItem,
    TierList, TierPatch, TierRow,
};
use crate::persist::{PersistedState, Persistence};
use crate::text::clamp_chars;

/// Caps on list growth.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TierLimits {
    /// Items a single tier may hold.
    pub max_items_per_tier: usize,
    /// User-created tiers a list may hold.
    pub max_custom_tiers: usize,
}

impl Default for TierLimits {
    fn default() -> Self {
        Self {
            max_items_per_tier: 100,
            max_custom_tiers: 20,
        }
    }
}

/// Store configuration.
#[derive(Clone, Debug, Default)]
pub struct StoreConfig {
    /// Growth caps.
    pub limits: TierLimits,
    /// Reject commands that would exceed [`StoreConfig::limits`].
    ///
    /// Off by default: the limits are then advisory and enforcement is left
    /// to the UI layer.
    pub enforce_limits: bool,
}

/// Immutable image of the store at one point in time.
#[derive(Clone, Debug, Default)]
pub struct StoreState {
    lists: Vec<Arc<TierList>>,
    current_list_id: Option<ListId>,
}

impl StoreState {
    /// Every list, in creation order.
    pub fn lists(&self) -> impl ExactSizeIterator<Item = &TierList> + '_ {
        self.lists.iter().map(|l| &**l)
    }

    /// Look up a list by id.
    pub fn list(&self, id: ListId) -> Option<&TierList> {
        self.lists.iter().find(|l| l.id == id).map(|l| &**l)
    }

    /// Id of the list being edited. May name a list that does not exist.
    pub fn current_list_id(&self) -> Option<ListId> {
        self.current_list_id
    }

    /// The list being edited, if it exists.
    pub fn current_list(&self) -> Option<&TierList> {
        self.list(self.current_list_id?)
    }

    fn position(&self, id: ListId) -> Option<usize> {
        self.lists.iter().position(|l| l.id == id)
    }

    fn to_persisted(&self) -> PersistedState {
        PersistedState {
            lists: self.lists().cloned().collect(),
            current_list_id: self.current_list_id,
        }
    }
}

/// Cheap, shareable handle to a [`StoreState`].
pub type Snapshot = Arc<StoreState>;

/// Handle returned by [`TierStore::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Placement commands, as produced by drag resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Move the tier at `from` so it ends up at `to`.
    ReorderTiers {
        /// Current index.
        from: usize,
        /// Destination index.
        to: usize,
    },
    /// Move an item between two different containers.
    MoveItem {
        /// The item.
        item: ItemId,
        /// Container currently holding it.
        from: Container,
        /// Destination container.
        to: Container,
        /// Destination index; `None` appends.
        index: Option<usize>,
    },
    /// Replace the order of one container's items.
    ReorderItems {
        /// The container.
        container: Container,
        /// A permutation of the container's item ids.
        order: Vec<ItemId>,
    },
}

struct Ctx<'a> {
    ids: &'a mut IdGen,
    now: DateTime<Utc>,
    config: &'a StoreConfig,
}

impl Ctx<'_> {
    fn tier_id(&mut self) -> Option<TierId> {
        let id = self.ids.tier_id();
        if id.is_none() {
            warn!("identifier space exhausted, tier not added");
        }
        id
    }

    fn item_id(&mut self) -> Option<ItemId> {
        let id = self.ids.item_id();
        if id.is_none() {
            warn!("identifier space exhausted, item not added");
        }
        id
    }
}

type Subscriber = Box<dyn FnMut(&Snapshot)>;

/// Owner of all tier lists and the only way to change them.
pub struct TierStore<C: Clock = SystemClock> {
    state: Snapshot,
    ids: IdGen,
    clock: C,
    config: StoreConfig,
    persistence: Option<Box<dyn Persistence>>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<C: Clock> core::fmt::Debug for TierStore<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TierStore")
            .field("lists", &self.state.lists.len())
            .field("current_list_id", &self.state.current_list_id)
            .field("config", &self.config)
            .field("persistent", &self.persistence.is_some())
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Default for TierStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TierStore {
    /// An empty store using wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> TierStore<C> {
    /// An empty store using the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: Snapshot::default(),
            ids: IdGen::new(),
            clock,
            config: StoreConfig::default(),
            persistence: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach a persistence adapter and restore whatever it holds.
    ///
    /// A failed load is logged and the store starts empty.
    pub fn with_persistence(mut self, mut adapter: impl Persistence + 'static) -> Self {
        match adapter.load() {
            Ok(Some(state)) => self.restore(state),
            Ok(None) => debug!("no persisted tier lists, starting empty"),
            Err(err) => warn!(%err, "failed to load persisted tier lists, starting empty"),
        }
        self.persistence = Some(Box::new(adapter));
        self
    }

    /// Replace the whole state, e.g. from a persisted image.
    ///
    /// Future ids are issued past the largest id in `state`. Subscribers are
    /// not notified.
    pub fn restore(&mut self, state: PersistedState) {
        self.ids.observe(state.max_raw_id());
        debug!(lists = state.lists.len(), "restored tier lists");
        self.state = Arc::new(StoreState {
            lists: state.lists.into_iter().map(Arc::new).collect(),
            current_list_id: state.current_list_id,
        });
    }

    /// Active configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The current state. Holding it never blocks or observes later commands.
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.state)
    }

    /// The list being edited.
    pub fn current_list(&self) -> Option<&TierList> {
        self.state.current_list()
    }

    /// Id of the list being edited.
    pub fn current_list_id(&self) -> Option<ListId> {
        self.state.current_list_id
    }

    /// Every list, in creation order.
    pub fn lists(&self) -> impl ExactSizeIterator<Item = &TierList> + '_ {
        self.state.lists()
    }

    /// Look up any list by id.
    pub fn list(&self, id: ListId) -> Option<&TierList> {
        self.state.list(id)
    }

    /// Items of a container of the current list.
    pub fn items_in(&self, container: Container) -> Option<&[TierItem]> {
        self.current_list()?.items(container)
    }

    /// Call `f` with every committed snapshot until unsubscribed.
    pub fn subscribe(&mut self, f: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Stop notifying a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(s, _)| *s != id);
        self.subscribers.len() != before
    }

    // --- Lists -----------------------------------------------------------

    /// Create a list with the six default tiers and make it current.
    pub fn create_list(&mut self, title: impl Into<String>) -> Option<ListId> {
        let Some(list) = TierList::with_default_tiers(&mut self.ids, title, self.clock.now())
        else {
            warn!("identifier space exhausted, list not created");
            return None;
        };
        let id = list.id;
        let mut next = StoreState::clone(&self.state);
        next.lists.push(Arc::new(list));
        next.current_list_id = Some(id);
        self.commit("create_list", next);
        Some(id)
    }

    /// Deep-copy a list under fresh ids and make the copy current.
    ///
    /// Returns `None` when `id` does not exist.
    pub fn duplicate_list(&mut self, id: ListId) -> Option<ListId> {
        let Some(source) = self.state.list(id) else {
            debug!(%id, "duplicate of unknown list ignored");
            return None;
        };
        let now = self.clock.now();
        let mut copy = source.clone();
        if copy.reissue_ids(&mut self.ids).is_none() {
            warn!(%id, "identifier space exhausted, list not duplicated");
            return None;
        }
        copy.title = clamp_chars(format!("{}{COPY_SUFFIX}", copy.title), MAX_TITLE_CHARS);
        copy.created_at = now;
        copy.updated_at = now;
        let copy_id = copy.id;

        let mut next = StoreState::clone(&self.state);
        next.lists.push(Arc::new(copy));
        next.current_list_id = Some(copy_id);
        self.commit("duplicate_list", next);
        Some(copy_id)
    }

    /// Remove a list. Clears the current pointer if it named this list.
    pub fn delete_list(&mut self, id: ListId) -> bool {
        let Some(pos) = self.state.position(id) else {
            return false;
        };
        let mut next = StoreState::clone(&self.state);
        next.lists.remove(pos);
        if next.current_list_id == Some(id) {
            next.current_list_id = None;
        }
        self.commit("delete_list", next);
        true
    }

    /// Make `id` current. Unknown ids are accepted and read as "no list".
    pub fn select_list(&mut self, id: ListId) {
        self.set_current(Some(id));
    }

    /// Leave editing mode.
    pub fn clear_current_list(&mut self) {
        self.set_current(None);
    }

    fn set_current(&mut self, id: Option<ListId>) {
        if self.state.current_list_id == id {
            return;
        }
        let mut next = StoreState::clone(&self.state);
        next.current_list_id = id;
        self.commit("select_list", next);
    }

    /// Merge list-level fields into the current list.
    pub fn update_list(&mut self, patch: ListPatch) -> bool {
        self.edit_current("update_list", |list, _| {
            list.apply(patch);
            Some(())
        })
        .is_some()
    }

    /// Capture a list for export.
    pub fn export_list(&self, id: ListId) -> Option<ExportDocument> {
        self.state.list(id).map(ExportDocument::from_list)
    }

    /// Validate and ingest an exported list under fresh ids; it becomes current.
    pub fn import_document(&mut self, doc: ExportDocument) -> Result<ListId, ImportError> {
        let list = doc.into_list(&mut self.ids, self.clock.now())?;
        let id = list.id;
        let mut next = StoreState::clone(&self.state);
        next.lists.push(Arc::new(list));
        next.current_list_id = Some(id);
        self.commit("import_list", next);
        Ok(id)
    }

    // --- Tiers -----------------------------------------------------------

    /// Append a tier of the given level.
    pub fn add_tier(&mut self, level: Level) -> Option<TierId> {
        self.edit_current("add_tier", |list, cx| {
            let id = cx.tier_id()?;
            list.tiers.push(TierRow::new(id, level, level.default_color()));
            Some(id)
        })
    }

    /// Append a user-named tier.
    ///
    /// The tier gets the [`Level::Custom`] marker. Name uniqueness is the
    /// caller's concern.
    pub fn add_custom_tier(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Option<TierId> {
        let (name, color) = (name.into(), color.into());
        self.edit_current("add_custom_tier", |list, cx| {
            let custom = list
                .tiers
                .iter()
                .filter(|t| t.level == Level::Custom)
                .count();
            if cx.config.enforce_limits && custom >= cx.config.limits.max_custom_tiers {
                warn!(custom, "custom tier limit reached");
                return None;
            }
            let id = cx.tier_id()?;
            let mut row = TierRow::new(id, Level::Custom, color);
            row.name = Some(clamp_chars(name, MAX_NAME_CHARS));
            list.tiers.push(row);
            Some(id)
        })
    }

    /// Rename, recolor, or otherwise patch a tier.
    pub fn update_tier(&mut self, id: TierId, patch: TierPatch) -> bool {
        self.edit_current("update_tier", |list, _| {
            list.tiers.iter_mut().find(|t| t.id == id)?.apply(patch);
            Some(())
        })
        .is_some()
    }

    /// Remove a tier; its items move to the end of the pool in order.
    pub fn delete_tier(&mut self, id: TierId) -> bool {
        self.edit_current("delete_tier", |list, cx| {
            let pos = list.tier_index(id)?;
            let row = list.tiers.remove(pos);
            list.pool.extend(row.items.into_iter().map(|mut item| {
                item.updated_at = cx.now;
                item
            }));
            Some(())
        })
        .is_some()
    }

    /// Move every item of a tier to the end of the pool; the tier stays.
    pub fn clear_tier_items(&mut self, id: TierId) -> bool {
        self.edit_current("clear_tier_items", |list, cx| {
            let row = list.tiers.iter_mut().find(|t| t.id == id)?;
            if row.items.is_empty() {
                return None;
            }
            let items = mem::take(&mut row.items);
            list.pool.extend(items.into_iter().map(|mut item| {
                item.updated_at = cx.now;
                item
            }));
            Some(())
        })
        .is_some()
    }

    /// Move the tier at `from` so it ends up at `to`.
    pub fn reorder_tiers(&mut self, from: usize, to: usize) -> bool {
        self.edit_current("reorder_tiers", |list, _| {
            let len = list.tiers.len();
            if from == to || from >= len || to >= len {
                return None;
            }
            let row = list.tiers.remove(from);
            list.tiers.insert(to, row);
            Some(())
        })
        .is_some()
    }

    // --- Items -----------------------------------------------------------

    /// Add an item to the end of the pool.
    pub fn add_item(&mut self, data: NewItem) -> Option<ItemId> {
        self.edit_current("add_item", |list, cx| {
            let id = cx.item_id()?;
            list.pool.push(data.build(id, cx.now));
            Some(id)
        })
    }

    /// Add an item to the end of a tier.
    pub fn add_item_to_tier(&mut self, tier: TierId, data: NewItem) -> Option<ItemId> {
        self.edit_current("add_item_to_tier", |list, cx| {
            let items = list.items_mut(Container::Tier(tier))?;
            if !has_room(cx.config, items.len()) {
                warn!(%tier, "tier is full");
                return None;
            }
            let id = cx.item_id()?;
            items.push(data.build(id, cx.now));
            Some(id)
        })
    }

    /// Patch an item wherever it lives.
    pub fn update_item(&mut self, id: ItemId, patch: ItemPatch) -> bool {
        self.edit_current("update_item", |list, cx| {
            list.item_mut(id)?.apply(patch, cx.now);
            Some(())
        })
        .is_some()
    }

    /// Remove an item from whichever container holds it.
    pub fn delete_item(&mut self, id: ItemId) -> bool {
        self.edit_current("delete_item", |list, _| {
            let (container, pos) = list.locate_item(id)?;
            list.items_mut(container)?.remove(pos);
            Some(())
        })
        .is_some()
    }

    /// Move an item from `from` into a different container `to`.
    ///
    /// Inserts at `index` (clamped to the destination length) or appends.
    /// Does nothing when the containers are equal, when the item is not in
    /// `from`, or when `to` does not exist.
    pub fn move_item(
        &mut self,
        item: ItemId,
        from: Container,
        to: Container,
        index: Option<usize>,
    ) -> bool {
        if from == to {
            debug!(%item, %from, "same-container move ignored, use reorder_items");
            return false;
        }
        self.edit_current("move_item", |list, cx| {
            let target_len = list.items(to)?.len();
            if matches!(to, Container::Tier(_)) && !has_room(cx.config, target_len) {
                warn!(%to, "tier is full");
                return None;
            }
            let source = list.items_mut(from)?;
            let pos = source.iter().position(|i| i.id == item)?;
            let mut moved = source.remove(pos);
            moved.updated_at = cx.now;
            let target = list.items_mut(to)?;
            let at = index.unwrap_or(target.len()).min(target.len());
            target.insert(at, moved);
            Some(())
        })
        .is_some()
    }

    /// Replace a container's order with `order`, a permutation of its ids.
    pub fn reorder_items(&mut self, container: Container, order: &[ItemId]) -> bool {
        self.edit_current("reorder_items", |list, _| {
            let items = list.items_mut(container)?;
            let unchanged = items.iter().map(|i| i.id).eq(order.iter().copied());
            if items.len() != order.len() || unchanged {
                return None;
            }
            let mut pending: Vec<Option<TierItem>> =
                mem::take(items).into_iter().map(Some).collect();
            let mut reordered = Vec::with_capacity(order.len());
            for id in order {
                let slot = pending
                    .iter_mut()
                    .find(|slot| slot.as_ref().is_some_and(|i| i.id == *id))?;
                reordered.extend(slot.take());
            }
            *items = reordered;
            Some(())
        })
        .is_some()
    }

    /// Delete every item of the current list, tiers and pool alike.
    pub fn clear_all_items(&mut self) -> bool {
        self.edit_current("clear_all_items", |list, _| {
            if list.item_count() == 0 {
                return None;
            }
            list.pool.clear();
            for tier in &mut list.tiers {
                tier.items.clear();
            }
            Some(())
        })
        .is_some()
    }

    /// Apply a placement command. Returns whether state changed.
    pub fn apply(&mut self, command: &Command) -> bool {
        trace!(?command, "applying");
        match command {
            Command::ReorderTiers { from, to } => self.reorder_tiers(*from, *to),
            Command::MoveItem {
                item,
                from,
                to,
                index,
            } => self.move_item(*item, *from, *to, *index),
            Command::ReorderItems { container, order } => self.reorder_items(*container, order),
        }
    }

    // --- Plumbing --------------------------------------------------------

    /// Run `f` on a private copy of the current list; commit if it returns `Some`.
    fn edit_current<R>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut TierList, &mut Ctx<'_>) -> Option<R>,
    ) -> Option<R> {
        let Some(pos) = self
            .state
            .current_list_id
            .and_then(|id| self.state.position(id))
        else {
            debug!(op, "no current list, command ignored");
            return None;
        };
        let mut next = StoreState::clone(&self.state);
        let list = Arc::make_mut(&mut next.lists[pos]);
        let mut cx = Ctx {
            ids: &mut self.ids,
            now: self.clock.now(),
            config: &self.config,
        };
        let Some(out) = f(list, &mut cx) else {
            debug!(op, "command was a no-op");
            return None;
        };
        list.updated_at = cx.now;
        self.commit(op, next);
        Some(out)
    }

    fn commit(&mut self, op: &'static str, next: StoreState) {
        self.state = Arc::new(next);
        debug!(op, lists = self.state.lists.len(), "committed");
        if let Some(adapter) = self.persistence.as_mut()
            && let Err(err) = adapter.save(&self.state.to_persisted())
        {
            warn!(op, %err, "failed to persist tier lists");
        }
        let snapshot = Arc::clone(&self.state);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&snapshot);
        }
    }
}

fn has_room(config: &StoreConfig, len: usize) -> bool {
    !config.enforce_limits || len < config.limits.max_items_per_tier
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::{TimeDelta, TimeZone};

    use super::*;
    use crate::clock::ManualClock;

    fn store() -> (TierStore<ManualClock>, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());
        (TierStore::with_clock(clock.clone()), clock)
    }

    fn ids(items: &[TierItem]) -> Vec<ItemId> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn commands_without_current_list_are_noops() {
        let (mut s, _) = store();
        assert_eq!(s.add_item(NewItem::named("x")), None);
        assert_eq!(s.add_tier(Level::S), None);
        assert!(!s.reorder_tiers(0, 1));
        assert!(!s.update_list(ListPatch::title("t")));
        assert!(!s.clear_all_items());
        assert_eq!(s.lists().len(), 0);
    }

    #[test]
    fn selecting_unknown_list_means_no_current_list() {
        let (mut s, _) = store();
        s.create_list("A");
        s.select_list(ListId(9999));
        assert!(s.current_list().is_none());
        assert_eq!(s.add_item(NewItem::named("x")), None);
    }

    #[test]
    fn snapshot_is_isolated_from_later_commands() {
        let (mut s, _) = store();
        s.create_list("Test");
        let before = s.snapshot();
        s.add_item(NewItem::named("x")).unwrap();
        assert!(before.current_list().unwrap().pool.is_empty());
        assert_eq!(s.current_list().unwrap().pool.len(), 1);
    }

    #[test]
    fn subscribers_see_commits_only() {
        let (mut s, _) = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = s.subscribe(move |snap| {
            sink.borrow_mut()
                .push(snap.current_list().map_or(0, TierList::item_count));
        });
        s.create_list("Test");
        s.add_item(NewItem::named("x"));
        // No-op: same source and target.
        let x = s.current_list().unwrap().pool[0].id;
        s.move_item(x, Container::Pool, Container::Pool, None);
        assert_eq!(*seen.borrow(), [0, 1]);

        assert!(s.unsubscribe(sub));
        s.add_item(NewItem::named("y"));
        assert_eq!(seen.borrow().len(), 2);
        assert!(!s.unsubscribe(sub));
    }

    #[test]
    fn duplicate_assigns_fresh_ids_and_copy_title() {
        let (mut s, clock) = store();
        let src = s.create_list("Games").unwrap();
        let s_tier = s.current_list().unwrap().tiers[0].id;
        s.add_item_to_tier(s_tier, NewItem::named("Zelda")).unwrap();
        s.add_item(NewItem::named("Tetris")).unwrap();
        clock.advance(TimeDelta::minutes(1));

        let copy = s.duplicate_list(src).unwrap();
        assert_eq!(s.current_list_id(), Some(copy));
        let (a, b) = (s.list(src).unwrap(), s.list(copy).unwrap());
        assert_eq!(b.title, "Games (Copy)");
        assert_eq!(b.created_at, clock.now());
        assert_ne!(a.tiers[0].id, b.tiers[0].id);
        assert_ne!(a.tiers[0].items[0].id, b.tiers[0].items[0].id);
        assert_eq!(b.tiers[0].items[0].name, "Zelda");
        assert_eq!(s.duplicate_list(ListId(4242)), None);
    }

    #[test]
    fn duplicate_title_stays_within_limit() {
        let (mut s, _) = store();
        let src = s.create_list("t".repeat(MAX_TITLE_CHARS)).unwrap();
        let copy = s.duplicate_list(src).unwrap();
        let title = &s.list(copy).unwrap().title;
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
        assert!(title.starts_with("ttt"));
    }

    #[test]
    fn exhausted_ids_reject_commands_without_changes() {
        let (mut s, _) = store();
        let list = s.create_list("Full").unwrap();
        let tier = s.current_list().unwrap().tiers[0].id;
        let mut image = s.snapshot().to_persisted();
        image.lists[0].id = ListId(u64::MAX - 1);
        image.current_list_id = Some(ListId(u64::MAX - 1));
        s.restore(image);
        let before = s.snapshot();

        assert_eq!(s.add_item(NewItem::named("x")), None);
        assert_eq!(s.add_item_to_tier(tier, NewItem::named("y")), None);
        assert_eq!(s.add_tier(Level::A), None);
        assert_eq!(s.add_custom_tier("Extra", "#123456"), None);
        assert_eq!(s.create_list("Another"), None);
        assert_eq!(s.duplicate_list(ListId(u64::MAX - 1)), None);
        let doc = s.export_list(ListId(u64::MAX - 1)).unwrap();
        assert_eq!(s.import_document(doc), Err(ImportError::IdsExhausted));
        assert!(Arc::ptr_eq(&before, &s.snapshot()));
        assert!(s.list(list).is_none());

        // Commands that need no ids keep working.
        assert!(s.update_list(ListPatch::title("Still editable")));
    }

    #[test]
    fn delete_current_list_clears_pointer() {
        let (mut s, _) = store();
        let a = s.create_list("A").unwrap();
        let b = s.create_list("B").unwrap();
        assert!(s.delete_list(b));
        assert_eq!(s.current_list_id(), None);
        assert!(!s.delete_list(b));
        s.select_list(a);
        assert!(s.delete_list(a));
        assert_eq!(s.lists().len(), 0);
    }

    #[test]
    fn custom_tier_uses_placeholder_marker() {
        let (mut s, _) = store();
        s.create_list("L");
        let id = s.add_custom_tier("Honorable mention", "#abcdef").unwrap();
        let list = s.current_list().unwrap();
        let row = list.tier(id).unwrap();
        assert_eq!(row.level, Level::Custom);
        assert_eq!(row.display_name(), "Honorable mention");
        assert_eq!(list.tier_index(id), Some(6));
    }

    #[test]
    fn limits_are_advisory_unless_enforced() {
        let clock = ManualClock::new(DateTime::<Utc>::UNIX_EPOCH);
        let mut s = TierStore::with_clock(clock).with_config(StoreConfig {
            limits: TierLimits {
                max_items_per_tier: 1,
                max_custom_tiers: 0,
            },
            enforce_limits: true,
        });
        s.create_list("L");
        let tier = s.current_list().unwrap().tiers[0].id;
        assert!(s.add_item_to_tier(tier, NewItem::named("a")).is_some());
        assert!(s.add_item_to_tier(tier, NewItem::named("b")).is_none());
        let pooled = s.add_item(NewItem::named("c")).unwrap();
        assert!(!s.move_item(pooled, Container::Pool, Container::Tier(tier), None));
        assert!(s.add_custom_tier("x", "#fff").is_none());

        let (mut relaxed, _) = store();
        relaxed.create_list("L");
        assert!(relaxed.add_custom_tier("x", "#fff").is_some());
    }

    #[test]
    fn clear_tier_items_keeps_tier_and_appends_to_pool() {
        let (mut s, _) = store();
        s.create_list("L");
        let pooled = s.add_item(NewItem::named("p")).unwrap();
        let tier = s.current_list().unwrap().tiers[1].id;
        let a = s.add_item_to_tier(tier, NewItem::named("a")).unwrap();
        let b = s.add_item_to_tier(tier, NewItem::named("b")).unwrap();
        assert!(s.clear_tier_items(tier));
        let list = s.current_list().unwrap();
        assert_eq!(list.tiers.len(), 6);
        assert!(list.tier(tier).unwrap().items.is_empty());
        assert_eq!(ids(&list.pool), [pooled, a, b]);
        assert!(!s.clear_tier_items(tier));
    }

    #[test]
    fn move_item_inserts_at_clamped_index() {
        let (mut s, clock) = store();
        s.create_list("L");
        let tier = s.current_list().unwrap().tiers[0].id;
        let a = s.add_item_to_tier(tier, NewItem::named("a")).unwrap();
        let b = s.add_item_to_tier(tier, NewItem::named("b")).unwrap();
        let x = s.add_item(NewItem::named("x")).unwrap();
        clock.advance(TimeDelta::seconds(30));

        assert!(s.move_item(x, Container::Pool, Container::Tier(tier), Some(1)));
        let list = s.current_list().unwrap();
        assert_eq!(ids(&list.tier(tier).unwrap().items), [a, x, b]);
        assert_eq!(list.item(x).unwrap().updated_at, clock.now());

        // Wrong source: silent no-op.
        assert!(!s.move_item(x, Container::Pool, Container::Tier(tier), None));
        // Past the end clamps to append.
        assert!(s.move_item(a, Container::Tier(tier), Container::Pool, Some(99)));
        assert_eq!(ids(s.items_in(Container::Pool).unwrap()), [a]);
        // Unknown destination.
        assert!(!s.move_item(b, Container::Tier(tier), Container::Tier(TierId(777)), None));
    }

    #[test]
    fn reorder_items_requires_a_permutation() {
        let (mut s, _) = store();
        s.create_list("L");
        let a = s.add_item(NewItem::named("a")).unwrap();
        let b = s.add_item(NewItem::named("b")).unwrap();
        let c = s.add_item(NewItem::named("c")).unwrap();

        assert!(!s.reorder_items(Container::Pool, &[a, b]));
        assert!(!s.reorder_items(Container::Pool, &[a, a, b]));
        assert!(!s.reorder_items(Container::Pool, &[a, b, ItemId(500)]));
        assert!(!s.reorder_items(Container::Pool, &[a, b, c]));
        assert!(s.reorder_items(Container::Pool, &[c, a, b]));
        assert_eq!(ids(s.items_in(Container::Pool).unwrap()), [c, a, b]);
    }

    #[test]
    fn update_and_delete_item_anywhere() {
        let (mut s, _) = store();
        s.create_list("L");
        let tier = s.current_list().unwrap().tiers[3].id;
        let a = s.add_item_to_tier(tier, NewItem::named("a")).unwrap();
        assert!(s.update_item(
            a,
            ItemPatch {
                name: Some("renamed".into()),
                image_ref: Some(Some("https://img.example/a.png".into())),
                ..ItemPatch::default()
            }
        ));
        let item = s.current_list().unwrap().item(a).unwrap();
        assert_eq!(item.name, "renamed");
        assert_eq!(item.image_ref.as_deref(), Some("https://img.example/a.png"));
        assert!(s.delete_item(a));
        assert!(!s.delete_item(a));
        assert_eq!(s.current_list().unwrap().item_count(), 0);
    }

    #[test]
    fn update_tier_and_list_fields() {
        let (mut s, _) = store();
        s.create_list("L");
        let tier = s.current_list().unwrap().tiers[0].id;
        assert!(s.update_tier(
            tier,
            TierPatch {
                name: Some(Some("God tier".into())),
                color: Some("#000".into()),
                ..TierPatch::default()
            }
        ));
        assert!(!s.update_tier(TierId(31337), TierPatch::default()));
        assert!(s.update_list(ListPatch {
            is_public: Some(true),
            ..ListPatch::title("Renamed")
        }));
        let list = s.current_list().unwrap();
        assert_eq!(list.tiers[0].display_name(), "God tier");
        assert_eq!(list.tiers[0].color, "#000");
        assert_eq!(list.title, "Renamed");
        assert!(list.is_public);
    }

    #[test]
    fn clear_all_items_empties_every_container() {
        let (mut s, _) = store();
        s.create_list("L");
        let tier = s.current_list().unwrap().tiers[0].id;
        s.add_item(NewItem::named("a"));
        s.add_item_to_tier(tier, NewItem::named("b"));
        assert!(s.clear_all_items());
        assert_eq!(s.current_list().unwrap().item_count(), 0);
        assert_eq!(s.current_list().unwrap().tiers.len(), 6);
        assert!(!s.clear_all_items());
    }

    #[test]
    fn apply_dispatches_placement_commands() {
        let (mut s, _) = store();
        s.create_list("L");
        let before: Vec<_> = s.current_list().unwrap().tiers.iter().map(|t| t.id).collect();
        assert!(s.apply(&Command::ReorderTiers { from: 5, to: 0 }));
        let after: Vec<_> = s.current_list().unwrap().tiers.iter().map(|t| t.id).collect();
        assert_eq!(after[0], before[5]);
        assert_eq!(after[1..], before[..5]);
        assert!(!s.apply(&Command::ReorderTiers { from: 2, to: 2 }));
        assert!(!s.apply(&Command::ReorderTiers { from: 0, to: 6 }));
    }

    #[test]
    fn import_and_export_round_trip_through_the_store() {
        let (mut s, _) = store();
        let src = s.create_list("Movies").unwrap();
        s.add_item(NewItem::named("Alien")).unwrap();
        let doc = s.export_list(src).unwrap();
        let imported = s.import_document(doc).unwrap();
        assert_ne!(imported, src);
        assert_eq!(s.current_list_id(), Some(imported));
        assert_eq!(s.current_list().unwrap().pool[0].name, "Alien");
        assert_ne!(
            s.current_list().unwrap().pool[0].id,
            s.list(src).unwrap().pool[0].id
        );
    }
}
