//! Whole-snapshot JSON persistence for the catalog.
//!
//! Every mutation rewrites the entire document. A failed save is logged and
//! the in-memory mutation is kept; there is no retry and no transaction log.

use crate::{Catalog, CommunityCatalog, CommunityId, EmojiName, EmojiRecord};
use emojibot_error::{
    CatalogError, CatalogErrorKind, CommandError, CommandErrorKind, EmojibotResult,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Owns the catalog and its backing file.
///
/// The snapshot lives behind one async mutex that is also held across each
/// save, so writes never interleave and the file always reflects the latest
/// mutation that completed.
///
/// # Example
///
/// ```no_run
/// use emojibot_core::CatalogStore;
///
/// # async fn example() -> emojibot_error::EmojibotResult<()> {
/// let store = CatalogStore::load("emoji.json").await?;
/// store.save().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CatalogStore {
    path: Option<PathBuf>,
    catalog: Mutex<Catalog>,
}

impl CatalogStore {
    /// Load the catalog from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `Read` if the file is missing or unreadable and `Parse`/
    /// `InvalidKey` if it is malformed. Both are fatal at startup.
    #[instrument(skip(path), fields(path))]
    pub async fn load(path: impl Into<PathBuf>) -> EmojibotResult<Self> {
        let path = path.into();
        tracing::Span::current().record("path", path.display().to_string());

        let json = tokio::fs::read_to_string(&path).await.map_err(|e| {
            CatalogError::new(CatalogErrorKind::Read(format!("{}: {}", path.display(), e)))
        })?;
        let catalog: Catalog = serde_json::from_str(&json).map_err(|e| {
            CatalogError::new(CatalogErrorKind::Parse(format!("{}: {}", path.display(), e)))
        })?;

        info!(
            communities = catalog.len(),
            emoji = catalog.emoji_count(),
            "Catalog loaded"
        );
        Ok(Self::new(path, catalog))
    }

    /// Create a store that snapshots to `path`.
    pub fn new(path: impl Into<PathBuf>, catalog: Catalog) -> Self {
        Self {
            path: Some(path.into()),
            catalog: Mutex::new(catalog),
        }
    }

    /// Create a store with no backing file; saves are no-ops.
    pub fn in_memory(catalog: Catalog) -> Self {
        Self {
            path: None,
            catalog: Mutex::new(catalog),
        }
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the whole snapshot to the backing file.
    ///
    /// # Errors
    ///
    /// Returns `Write` if serialization or the file write fails.
    pub async fn save(&self) -> EmojibotResult<()> {
        let catalog = self.catalog.lock().await;
        self.write_snapshot(&catalog).await
    }

    /// Clone of the whole catalog.
    pub async fn snapshot(&self) -> Catalog {
        self.catalog.lock().await.clone()
    }

    /// Clone of one community's catalog (empty if never touched).
    pub async fn community(&self, id: &CommunityId) -> CommunityCatalog {
        self.catalog
            .lock()
            .await
            .community(id)
            .cloned()
            .unwrap_or_default()
    }

    /// Register a new emoji and persist.
    ///
    /// # Errors
    ///
    /// Returns `NameInUse` if the community already has this name.
    #[instrument(skip(self, record), fields(community = %community, name = %name))]
    pub async fn add_emoji(
        &self,
        community: &CommunityId,
        name: &EmojiName,
        record: EmojiRecord,
    ) -> EmojibotResult<()> {
        let mut catalog = self.catalog.lock().await;
        let entries = catalog.community_mut(community);
        if entries.contains(name) {
            return Err(CommandError::new(CommandErrorKind::NameInUse(name.to_string())).into());
        }
        entries.insert(name.clone(), record);
        info!("Emoji added to catalog");

        self.persist(&catalog).await;
        Ok(())
    }

    /// Delete an emoji and persist.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the community has no such name.
    #[instrument(skip(self), fields(community = %community, name = %name))]
    pub async fn remove_emoji(
        &self,
        community: &CommunityId,
        name: &EmojiName,
    ) -> EmojibotResult<EmojiRecord> {
        let mut catalog = self.catalog.lock().await;
        let record = catalog
            .community_mut(community)
            .remove(name)
            .ok_or_else(|| CommandError::new(CommandErrorKind::NotFound(name.to_string())))?;
        info!("Emoji removed from catalog");

        self.persist(&catalog).await;
        Ok(record)
    }

    /// Count one use for each registered name and persist once.
    ///
    /// Names not in the catalog are ignored. Returns how many were counted.
    #[instrument(skip(self, names), fields(community = %community, referenced = names.len()))]
    pub async fn increment_uses(
        &self,
        community: &CommunityId,
        names: &BTreeSet<EmojiName>,
    ) -> usize {
        let mut catalog = self.catalog.lock().await;
        let entries = catalog.community_mut(community);
        let counted = names.iter().filter(|name| entries.record_use(name)).count();
        if counted > 0 {
            debug!(counted, "Recorded emoji uses");
            self.persist(&catalog).await;
        }
        counted
    }

    async fn persist(&self, catalog: &Catalog) {
        if let Err(e) = self.write_snapshot(catalog).await {
            warn!(error = %e, "Catalog save failed; keeping in-memory state");
        }
    }

    async fn write_snapshot(&self, catalog: &Catalog) -> EmojibotResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(catalog)
            .map_err(|e| CatalogError::new(CatalogErrorKind::Write(e.to_string())))?;

        // Temp file + rename keeps the snapshot whole if we die mid-write
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json).await.map_err(|e| {
            CatalogError::new(CatalogErrorKind::Write(format!("{}: {}", tmp.display(), e)))
        })?;
        tokio::fs::rename(&tmp, path).await.map_err(|e| {
            CatalogError::new(CatalogErrorKind::Write(format!("{}: {}", path.display(), e)))
        })?;

        debug!(path = %path.display(), "Catalog saved");
        Ok(())
    }
}
