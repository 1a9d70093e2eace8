// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tier list data model: items, tiers, and the list aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{Container, IdGen, ItemId, ListId, TierId};
use crate::text::clamp_chars;

/// Maximum length of a list title, in characters.
pub const MAX_TITLE_CHARS: usize = 200;
/// Maximum length of an item or tier name, in characters.
pub const MAX_NAME_CHARS: usize = 200;
/// Maximum length of any description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;
/// Maximum number of tags on a list.
pub const MAX_TAGS: usize = 10;
/// Suffix appended to the title of a duplicated list.
pub const COPY_SUFFIX: &str = " (Copy)";

/// Rank marker of a tier.
///
/// The six fixed levels make up a fresh list. [`Level::Custom`] is the
/// placeholder marker given to user-created tiers; it carries no ranking
/// meaning, rank is always the tier's position in the list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Top tier.
    S,
    /// Second tier.
    A,
    /// Third tier.
    B,
    /// Fourth tier.
    C,
    /// Fifth tier.
    D,
    /// Bottom tier.
    F,
    /// Marker for a user-created tier.
    Custom,
}

impl Level {
    /// The levels of a freshly created list, best first.
    pub const DEFAULTS: [Self; 6] = [Self::S, Self::A, Self::B, Self::C, Self::D, Self::F];

    /// Short display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
            Self::Custom => "Custom",
        }
    }

    /// Color token used when a tier of this level is created without one.
    pub const fn default_color(self) -> &'static str {
        match self {
            Self::S => "#ff7f7f",
            Self::A => "#ffbf7f",
            Self::B => "#ffdf7f",
            Self::C => "#ffff7f",
            Self::D => "#bfff7f",
            Self::F => "#7fff7f",
            Self::Custom => "#cfcfcf",
        }
    }

    /// Parse a level token, ignoring ASCII case.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        [
            Self::S,
            Self::A,
            Self::B,
            Self::C,
            Self::D,
            Self::F,
            Self::Custom,
        ]
        .into_iter()
        .find(|level| level.label().eq_ignore_ascii_case(token))
    }
}

/// One rankable entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierItem {
    /// Unique id within the owning list.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Opaque image handle (data URL or remote URL). Stored verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update or move.
    pub updated_at: DateTime<Utc>,
}

/// Data for a new item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewItem {
    /// Display name.
    pub name: String,
    /// Opaque image handle.
    pub image_ref: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

impl NewItem {
    /// An item with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach an image handle.
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    pub(crate) fn build(self, id: ItemId, now: DateTime<Utc>) -> TierItem {
        TierItem {
            id,
            name: clamp_chars(self.name, MAX_NAME_CHARS),
            image_ref: self.image_ref,
            description: self
                .description
                .map(|d| clamp_chars(d, MAX_DESCRIPTION_CHARS)),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of an item. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemPatch {
    /// New name.
    pub name: Option<String>,
    /// New image handle; `Some(None)` removes it.
    pub image_ref: Option<Option<String>>,
    /// New description; `Some(None)` removes it.
    pub description: Option<Option<String>>,
}

impl TierItem {
    pub(crate) fn apply(&mut self, patch: ItemPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = clamp_chars(name, MAX_NAME_CHARS);
        }
        if let Some(image_ref) = patch.image_ref {
            self.image_ref = image_ref;
        }
        if let Some(description) = patch.description {
            self.description = description.map(|d| clamp_chars(d, MAX_DESCRIPTION_CHARS));
        }
        self.updated_at = now;
    }
}

/// One ranked bucket of items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRow {
    /// Unique id within the owning list.
    pub id: TierId,
    /// Rank marker.
    pub level: Level,
    /// Display override; the level label is shown when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Color token, `#rgb` or `#rrggbb`.
    pub color: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Items placed in this tier, in display order.
    #[serde(default)]
    pub items: Vec<TierItem>,
}

impl TierRow {
    /// An empty tier.
    pub fn new(id: TierId, level: Level, color: impl Into<String>) -> Self {
        Self {
            id,
            level,
            name: None,
            color: color.into(),
            description: None,
            items: Vec::new(),
        }
    }

    /// Name shown to the user.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.level.label())
    }

    pub(crate) fn apply(&mut self, patch: TierPatch) {
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(name) = patch.name {
            self.name = name.map(|n| clamp_chars(n, MAX_NAME_CHARS));
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(description) = patch.description {
            self.description = description.map(|d| clamp_chars(d, MAX_DESCRIPTION_CHARS));
        }
    }
}

/// Partial update of a tier. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TierPatch {
    /// New rank marker.
    pub level: Option<Level>,
    /// New display override; `Some(None)` falls back to the level label.
    pub name: Option<Option<String>>,
    /// New color token.
    pub color: Option<String>,
    /// New description; `Some(None)` removes it.
    pub description: Option<Option<String>>,
}

/// The aggregate root: a titled, ordered set of tiers plus a pool.
///
/// Every item of a list lives in exactly one container, either the pool or
/// the `items` of a single tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierList {
    /// Unique id.
    pub id: ListId,
    /// Title.
    pub title: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tiers, best first.
    pub tiers: Vec<TierRow>,
    /// Unassigned items, in display order.
    #[serde(default)]
    pub pool: Vec<TierItem>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last committed change.
    pub updated_at: DateTime<Utc>,
    /// Owning account, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Whether the list is publicly visible.
    #[serde(default)]
    pub is_public: bool,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update of list-level fields. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListPatch {
    /// New title.
    pub title: Option<String>,
    /// New description; `Some(None)` removes it.
    pub description: Option<Option<String>>,
    /// Replacement tag set (clamped to [`MAX_TAGS`]).
    pub tags: Option<Vec<String>>,
    /// New visibility.
    pub is_public: Option<bool>,
    /// New owner; `Some(None)` removes it.
    pub owner: Option<Option<String>>,
}

impl ListPatch {
    /// A patch that only changes the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

impl TierList {
    /// A list with the six default tiers and an empty pool.
    ///
    /// Returns `None` if `ids` runs out.
    pub fn with_default_tiers(
        ids: &mut IdGen,
        title: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let mut tiers = Vec::with_capacity(Level::DEFAULTS.len());
        for level in Level::DEFAULTS {
            tiers.push(TierRow::new(ids.tier_id()?, level, level.default_color()));
        }
        Some(Self {
            id: ids.list_id()?,
            title: clamp_chars(title.into(), MAX_TITLE_CHARS),
            description: None,
            tiers,
            pool: Vec::new(),
            created_at: now,
            updated_at: now,
            owner: None,
            is_public: false,
            tags: Vec::new(),
        })
    }

    /// Look up a tier by id.
    pub fn tier(&self, id: TierId) -> Option<&TierRow> {
        self.tiers.iter().find(|t| t.id == id)
    }

    /// Position of a tier in rank order.
    pub fn tier_index(&self, id: TierId) -> Option<usize> {
        self.tiers.iter().position(|t| t.id == id)
    }

    /// Items of a container, or `None` if the tier does not exist.
    pub fn items(&self, container: Container) -> Option<&[TierItem]> {
        match container {
            Container::Pool => Some(&self.pool),
            Container::Tier(id) => self.tier(id).map(|t| t.items.as_slice()),
        }
    }

    pub(crate) fn items_mut(&mut self, container: Container) -> Option<&mut Vec<TierItem>> {
        match container {
            Container::Pool => Some(&mut self.pool),
            Container::Tier(id) => self
                .tiers
                .iter_mut()
                .find(|t| t.id == id)
                .map(|t| &mut t.items),
        }
    }

    /// Every container in display order: the tiers, then the pool.
    pub fn containers(&self) -> impl Iterator<Item = (Container, &[TierItem])> + '_ {
        self.tiers
            .iter()
            .map(|t| (Container::Tier(t.id), t.items.as_slice()))
            .chain(core::iter::once((Container::Pool, self.pool.as_slice())))
    }

    /// Find the container and position holding an item, searching the pool first.
    pub fn locate_item(&self, id: ItemId) -> Option<(Container, usize)> {
        if let Some(pos) = self.pool.iter().position(|i| i.id == id) {
            return Some((Container::Pool, pos));
        }
        self.tiers.iter().find_map(|t| {
            t.items
                .iter()
                .position(|i| i.id == id)
                .map(|pos| (Container::Tier(t.id), pos))
        })
    }

    /// Look up an item anywhere in the list.
    pub fn item(&self, id: ItemId) -> Option<&TierItem> {
        let (container, pos) = self.locate_item(id)?;
        self.items(container)?.get(pos)
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Option<&mut TierItem> {
        let (container, pos) = self.locate_item(id)?;
        self.items_mut(container)?.get_mut(pos)
    }

    /// Total number of items across all containers.
    pub fn item_count(&self) -> usize {
        self.pool.len() + self.tiers.iter().map(|t| t.items.len()).sum::<usize>()
    }

    /// Largest raw id used anywhere in the list.
    pub fn max_raw_id(&self) -> u64 {
        let items = self.containers().flat_map(|(_, items)| items.iter());
        items
            .map(|i| i.id.get())
            .chain(self.tiers.iter().map(|t| t.id.get()))
            .fold(self.id.get(), u64::max)
    }

    /// Give the list, every tier, and every item a fresh id.
    ///
    /// Order and contents are untouched; only identities change. Returns
    /// `None` if `ids` runs out, leaving the list partly renumbered.
    pub fn reissue_ids(&mut self, ids: &mut IdGen) -> Option<()> {
        self.id = ids.list_id()?;
        for tier in &mut self.tiers {
            tier.id = ids.tier_id()?;
            for item in &mut tier.items {
                item.id = ids.item_id()?;
            }
        }
        for item in &mut self.pool {
            item.id = ids.item_id()?;
        }
        Some(())
    }

    pub(crate) fn apply(&mut self, patch: ListPatch) {
        if let Some(title) = patch.title {
            self.title = clamp_chars(title, MAX_TITLE_CHARS);
        }
        if let Some(description) = patch.description {
            self.description = description.map(|d| clamp_chars(d, MAX_DESCRIPTION_CHARS));
        }
        if let Some(mut tags) = patch.tags {
            tags.truncate(MAX_TAGS);
            self.tags = tags;
        }
        if let Some(is_public) = patch.is_public {
            self.is_public = is_public;
        }
        if let Some(owner) = patch.owner {
            self.owner = owner;
        }
    }
}
