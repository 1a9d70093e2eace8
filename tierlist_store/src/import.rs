// Copyright 2025 the Tierlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Import and export of single lists.
//!
//! An [`ExportDocument`] is the plain serde shape exchanged with codecs (JSON
//! files, share URLs, ...). Ingesting one happens in two steps: validation
//! rejects documents that cannot be trusted (wrong version, missing fields,
//! unknown level or color tokens) with an [`ImportError`], then sanitizing
//! clamps values that are merely out of range (over-long strings, too many
//! tags). Every id in an ingested list is freshly issued, so importing the
//! same document twice yields two independent lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::IdGen;
use crate::model::{
    Level, MAX_DESCRIPTION_CHARS, MAX_NAME_CHARS, MAX_TAGS, MAX_TITLE_CHARS, TierItem, TierList,
    TierRow,
};
use crate::text::clamp_chars;

/// Version written by [`ExportDocument::from_list`] and the newest one accepted.
pub const EXPORT_VERSION: u32 = 1;

/// Why a document was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The document is structurally unusable.
    #[error("malformed tier list: {0}")]
    Malformed(String),
    /// Written by a newer version of the format.
    #[error("unsupported format version {found} (newest supported is {supported})")]
    UnsupportedVersion {
        /// Version found in the document.
        found: u32,
        /// Newest version this build reads.
        supported: u32,
    },
    /// A required field is missing or blank.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    /// A tier level token is not recognised.
    #[error("invalid tier level `{0}`")]
    InvalidLevel(String),
    /// A color token is not `#rgb` or `#rrggbb`.
    #[error("invalid color `{0}`")]
    InvalidColor(String),
    /// No fresh ids are left to give the imported list.
    #[error("identifier space exhausted")]
    IdsExhausted,
}

/// A list in exchange form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Format version.
    pub version: u32,
    /// The list itself.
    pub list: ListDocument,
}

/// List fields carried by an [`ExportDocument`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocument {
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tiers, best first.
    pub tiers: Vec<TierDocument>,
    /// Unassigned items.
    #[serde(default)]
    pub pool: Vec<ItemDocument>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Visibility.
    #[serde(default)]
    pub is_public: bool,
}

/// Tier fields carried by an [`ExportDocument`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierDocument {
    /// Level token, e.g. `"S"` or `"Custom"`.
    pub level: String,
    /// Display override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Color token.
    pub color: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<ItemDocument>,
}

/// Item fields carried by an [`ExportDocument`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDocument {
    /// Name.
    pub name: String,
    /// Opaque image handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExportDocument {
    /// Capture a list in exchange form. Ids and timestamps are not exported.
    pub fn from_list(list: &TierList) -> Self {
        let item = |i: &TierItem| ItemDocument {
            name: i.name.clone(),
            image_ref: i.image_ref.clone(),
            description: i.description.clone(),
        };
        Self {
            version: EXPORT_VERSION,
            list: ListDocument {
                title: list.title.clone(),
                description: list.description.clone(),
                tiers: list
                    .tiers
                    .iter()
                    .map(|t| TierDocument {
                        level: t.level.label().to_owned(),
                        name: t.name.clone(),
                        color: t.color.clone(),
                        description: t.description.clone(),
                        items: t.items.iter().map(item).collect(),
                    })
                    .collect(),
                pool: list.pool.iter().map(item).collect(),
                tags: list.tags.clone(),
                is_public: list.is_public,
            },
        }
    }

    /// Validate the document without building anything.
    pub fn validate(&self) -> Result<(), ImportError> {
        if self.version == 0 {
            return Err(ImportError::Malformed("version must be at least 1".into()));
        }
        if self.version > EXPORT_VERSION {
            return Err(ImportError::UnsupportedVersion {
                found: self.version,
                supported: EXPORT_VERSION,
            });
        }
        let list = &self.list;
        if list.title.trim().is_empty() {
            return Err(ImportError::MissingField("title"));
        }
        if list.tiers.is_empty() {
            return Err(ImportError::Malformed("a tier list needs at least one tier".into()));
        }
        for tier in &list.tiers {
            if Level::parse(&tier.level).is_none() {
                return Err(ImportError::InvalidLevel(tier.level.clone()));
            }
            if !is_color_token(&tier.color) {
                return Err(ImportError::InvalidColor(tier.color.clone()));
            }
        }
        let items = list.tiers.iter().flat_map(|t| &t.items).chain(&list.pool);
        for item in items {
            if item.name.trim().is_empty() {
                return Err(ImportError::MissingField("item name"));
            }
        }
        Ok(())
    }

    /// Validate, sanitize, and build a list with fresh ids.
    pub fn into_list(self, ids: &mut IdGen, now: DateTime<Utc>) -> Result<TierList, ImportError> {
        self.validate()?;
        let ListDocument {
            title,
            description,
            tiers,
            pool,
            mut tags,
            is_public,
        } = self.list;

        let mut item = |doc: ItemDocument| -> Result<TierItem, ImportError> {
            Ok(TierItem {
                id: ids.item_id().ok_or(ImportError::IdsExhausted)?,
                name: clamp_chars(doc.name, MAX_NAME_CHARS),
                image_ref: doc.image_ref,
                description: doc.description.map(|d| clamp_chars(d, MAX_DESCRIPTION_CHARS)),
                created_at: now,
                updated_at: now,
            })
        };

        let mut rows = Vec::with_capacity(tiers.len());
        for doc in tiers {
            // Already checked by `validate`.
            let level = Level::parse(&doc.level).unwrap_or(Level::Custom);
            let items: Vec<TierItem> = doc
                .items
                .into_iter()
                .map(&mut item)
                .collect::<Result<_, _>>()?;
            rows.push((level, doc.name, doc.color, doc.description, items));
        }
        let pool: Vec<TierItem> = pool.into_iter().map(&mut item).collect::<Result<_, _>>()?;

        let tiers = rows
            .into_iter()
            .map(|(level, name, color, description, items)| {
                Ok(TierRow {
                    id: ids.tier_id().ok_or(ImportError::IdsExhausted)?,
                    level,
                    name: name.map(|n| clamp_chars(n, MAX_NAME_CHARS)),
                    color: color.to_ascii_lowercase(),
                    description: description.map(|d| clamp_chars(d, MAX_DESCRIPTION_CHARS)),
                    items,
                })
            })
            .collect::<Result<Vec<_>, ImportError>>()?;

        tags.truncate(MAX_TAGS);
        Ok(TierList {
            id: ids.list_id().ok_or(ImportError::IdsExhausted)?,
            title: clamp_chars(title, MAX_TITLE_CHARS),
            description: description.map(|d| clamp_chars(d, MAX_DESCRIPTION_CHARS)),
            tiers,
            pool,
            created_at: now,
            updated_at: now,
            owner: None,
            is_public,
            tags,
        })
    }
}

/// Whether `token` is `#rgb` or `#rrggbb` hex.
pub fn is_color_token(token: &str) -> bool {
    match token.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}
