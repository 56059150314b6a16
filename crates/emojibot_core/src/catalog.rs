//! Catalog data model.
//!
//! On disk the catalog is a two-level JSON document:
//!
//! ```json
//! { "<community id>": { ":name:": { "url": "...", "creator": 1234, "uses": 0 } } }
//! ```
//!
//! In memory the names are stored without delimiters as [`EmojiName`] keys.
//! Keys are validated when the document is deserialized, so a malformed
//! snapshot fails at load time rather than at first access.

use crate::{CommunityId, EmojiName, UserId};
use derive_getters::Getters;
use emojibot_error::{CatalogError, CatalogErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One registered emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct EmojiRecord {
    /// Where the image bytes are fetched from.
    #[serde(rename = "url")]
    source_url: String,

    /// Who registered the emoji.
    #[serde(rename = "creator", with = "creator_id")]
    creator_id: UserId,

    /// Confirmed references so far.
    #[serde(rename = "uses", default)]
    use_count: u64,
}

impl EmojiRecord {
    /// Create a fresh record with no recorded uses.
    pub fn new(source_url: impl Into<String>, creator_id: UserId) -> Self {
        Self {
            source_url: source_url.into(),
            creator_id,
            use_count: 0,
        }
    }

    pub(crate) fn record_use(&mut self) {
        self.use_count = self.use_count.saturating_add(1);
    }

    /// Copy of this record with a specific use count.
    pub fn with_use_count(mut self, use_count: u64) -> Self {
        self.use_count = use_count;
        self
    }
}

// Creator ids were historically written as JSON numbers.
mod creator_id {
    use crate::UserId;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(id: &UserId, serializer: S) -> Result<S::Ok, S::Error> {
        match id.as_str().parse::<u64>() {
            Ok(n) => serializer.serialize_u64(n),
            Err(_) => serializer.serialize_str(id.as_str()),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<UserId, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => UserId::from(n),
            RawId::Text(s) => UserId::new(s),
        })
    }
}

/// Emoji registered in one community, keyed by normalized name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, EmojiRecord>",
    into = "BTreeMap<String, EmojiRecord>"
)]
pub struct CommunityCatalog {
    entries: BTreeMap<EmojiName, EmojiRecord>,
}

impl CommunityCatalog {
    /// Look up a record.
    pub fn get(&self, name: &EmojiName) -> Option<&EmojiRecord> {
        self.entries.get(name)
    }

    /// Whether the name is registered.
    pub fn contains(&self, name: &EmojiName) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered emoji.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in name order.
    pub fn names(&self) -> impl Iterator<Item = &EmojiName> {
        self.entries.keys()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&EmojiName, &EmojiRecord)> {
        self.entries.iter()
    }

    /// Entries by `use_count` descending, ties by name ascending.
    pub fn ranked(&self) -> Vec<(&EmojiName, &EmojiRecord)> {
        let mut ranked: Vec<_> = self.entries.iter().collect();
        ranked.sort_by(|(a_name, a), (b_name, b)| {
            b.use_count.cmp(&a.use_count).then_with(|| a_name.cmp(b_name))
        });
        ranked
    }

    /// Insert or replace a record.
    pub fn insert(&mut self, name: EmojiName, record: EmojiRecord) -> Option<EmojiRecord> {
        self.entries.insert(name, record)
    }

    /// Remove a record.
    pub fn remove(&mut self, name: &EmojiName) -> Option<EmojiRecord> {
        self.entries.remove(name)
    }

    pub(crate) fn record_use(&mut self, name: &EmojiName) -> bool {
        match self.entries.get_mut(name) {
            Some(record) => {
                record.record_use();
                true
            }
            None => false,
        }
    }
}

impl TryFrom<BTreeMap<String, EmojiRecord>> for CommunityCatalog {
    type Error = CatalogError;

    fn try_from(raw: BTreeMap<String, EmojiRecord>) -> Result<Self, Self::Error> {
        let mut entries = BTreeMap::new();
        for (key, record) in raw {
            let delimited = key.len() > 2 && key.starts_with(':') && key.ends_with(':');
            let name = EmojiName::from_reference(&key)
                .filter(|_| delimited)
                .ok_or_else(|| CatalogError::new(CatalogErrorKind::InvalidKey(key.clone())))?;
            if entries.insert(name, record).is_some() {
                return Err(CatalogError::new(CatalogErrorKind::InvalidKey(format!(
                    "{key} (duplicate ignoring case)"
                ))));
            }
        }
        Ok(Self { entries })
    }
}

impl From<CommunityCatalog> for BTreeMap<String, EmojiRecord> {
    fn from(catalog: CommunityCatalog) -> Self {
        catalog
            .entries
            .into_iter()
            .map(|(name, record)| (name.tag(), record))
            .collect()
    }
}

/// Every community's catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    communities: BTreeMap<CommunityId, CommunityCatalog>,
}

impl Catalog {
    /// Catalog of one community, if it has ever been touched.
    pub fn community(&self, id: &CommunityId) -> Option<&CommunityCatalog> {
        self.communities.get(id)
    }

    /// Mutable catalog of one community, created empty on first access.
    pub fn community_mut(&mut self, id: &CommunityId) -> &mut CommunityCatalog {
        self.communities.entry(id.clone()).or_default()
    }

    /// Number of communities with a catalog.
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    /// Whether no community has a catalog.
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Total emoji across all communities.
    pub fn emoji_count(&self) -> usize {
        self.communities.values().map(CommunityCatalog::len).sum()
    }
}
