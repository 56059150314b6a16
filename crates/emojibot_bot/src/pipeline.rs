//! The message rewrite pipeline.
//!
//! Each message walks through
//! `PendingUploadCheck → CommandDispatch → UsageAccounting → SpellCorrect →
//! SlotResolution → Substitution → Repost → Reconcile`, leaving early as soon
//! as a stage has nothing more to do.

use crate::locks::CommunityLocks;
use crate::tokens::{self, Reference};
use crate::warnings::capacity_warnings;
use crate::{Command, RewriteSettings};
use emojibot_core::{
    BuiltinNames, CatalogStore, CommunityCatalog, CommunityId, EmojiName, EmojiPlatform,
    EmojiRecord, FuzzyMatcher, IncomingMessage, NativeEmoji, NativeSlotIndex, PendingUploads,
    SlotDelta, reconcile, validate_image,
};
use emojibot_error::{CommandError, CommandErrorKind, EmojibotResult, PlatformError};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// How processing of one message ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// A pending upload was bound to a new catalog entry.
    UploadBound(EmojiName),
    /// A command was handled.
    Command,
    /// No catalog emoji referenced; the message was left alone.
    Untouched,
    /// Catalog emoji were referenced but none could be resolved to a slot.
    Unresolved,
    /// The message was deleted and reposted with this text.
    Reposted(String),
    /// Processing stopped with a failure reported to the author.
    Rejected(String),
}

/// Orchestrates detection, correction, slot allocation and repost.
///
/// Owns the pending-upload tracker and shares the catalog store, builtin
/// blocklist and platform handle with the rest of the process.
pub struct RewritePipeline {
    pub(crate) platform: Arc<dyn EmojiPlatform>,
    pub(crate) store: Arc<CatalogStore>,
    pub(crate) builtins: Arc<BuiltinNames>,
    pub(crate) pending: PendingUploads,
    pub(crate) settings: RewriteSettings,
    matcher: FuzzyMatcher,
    locks: CommunityLocks,
}

impl RewritePipeline {
    /// Create a pipeline.
    pub fn new(
        platform: Arc<dyn EmojiPlatform>,
        store: Arc<CatalogStore>,
        builtins: Arc<BuiltinNames>,
        settings: RewriteSettings,
    ) -> Self {
        let matcher = FuzzyMatcher::new(*settings.fuzzy_threshold());
        Self {
            platform,
            store,
            builtins,
            pending: PendingUploads::new(),
            settings,
            matcher,
            locks: CommunityLocks::new(),
        }
    }

    /// Settings in effect.
    pub fn settings(&self) -> &RewriteSettings {
        &self.settings
    }

    /// Pending-upload tracker.
    pub fn pending(&self) -> &PendingUploads {
        &self.pending
    }

    /// Catalog store.
    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// Process a message, reporting any failure to its channel.
    #[instrument(
        skip(self, message),
        fields(community = %message.community, channel = %message.channel, message_id = %message.id)
    )]
    pub async fn process(&self, message: &IncomingMessage) -> RewriteOutcome {
        match self.handle(message).await {
            Ok(outcome) => {
                debug!(?outcome, "Message processed");
                outcome
            }
            Err(e) => {
                let notice = e.user_message();
                error!(error = %e, "Message processing failed");
                self.notify(message, &notice).await;
                RewriteOutcome::Rejected(notice)
            }
        }
    }

    /// Process a message, returning failures to the caller.
    ///
    /// # Errors
    ///
    /// Returns command errors for recoverable user mistakes and platform
    /// errors for failed deletes or reposts.
    pub async fn handle(&self, message: &IncomingMessage) -> EmojibotResult<RewriteOutcome> {
        let _guard = self.locks.acquire(&message.community).await;

        let command = Command::parse(&message.content, self.settings.command_prefix());
        if matches!(command, Ok(Some(Command::Add { .. }))) {
            // A new add supersedes whatever upload the author still owed
            if let Some(name) = self.pending.resolve(&message.author.id, &message.channel) {
                debug!(superseded = %name, "Pending upload replaced by new add");
            }
        } else if let Some(name) = self.pending.resolve(&message.author.id, &message.channel) {
            return self.bind_upload(message, name).await;
        }

        if let Some(command) = command? {
            self.execute(message, command).await?;
            return Ok(RewriteOutcome::Command);
        }

        self.rewrite(message).await
    }

    #[instrument(skip(self, message), fields(name = %name))]
    async fn bind_upload(
        &self,
        message: &IncomingMessage,
        name: EmojiName,
    ) -> EmojibotResult<RewriteOutcome> {
        let attachment = match message.attachments.as_slice() {
            [one] => one,
            [] => return Err(CommandError::new(CommandErrorKind::NoAttachment).into()),
            many => {
                return Err(
                    CommandError::new(CommandErrorKind::TooManyAttachments(many.len())).into(),
                );
            }
        };

        self.fetch_validated(&attachment.url).await?;
        // The name may have been taken while we waited
        self.ensure_available(&message.community, &name).await?;

        let record = EmojiRecord::new(attachment.url.clone(), message.author.id.clone());
        self.store
            .add_emoji(&message.community, &name, record)
            .await?;
        self.notify(message, &format!("Successfully added {}", name.tag()))
            .await;
        Ok(RewriteOutcome::UploadBound(name))
    }

    async fn rewrite(&self, message: &IncomingMessage) -> EmojibotResult<RewriteOutcome> {
        let catalog = self.store.community(&message.community).await;
        if catalog.is_empty() {
            return Ok(RewriteOutcome::Untouched);
        }

        let (corrected, corrections) = self.spell_correct(&message.content, &catalog);

        // Exact tags, renderings of resident emoji and corrected tags each
        // count once per distinct name
        let mut used: BTreeSet<EmojiName> = tokens::scan(&message.content)
            .iter()
            .filter_map(|r| EmojiName::from_reference(r.name()))
            .filter(|name| catalog.contains(name))
            .collect();
        used.extend(corrections);
        if !used.is_empty() {
            self.store
                .increment_uses(&message.community, &used)
                .await;
        }

        let referenced: BTreeSet<EmojiName> = tokens::scan(&corrected)
            .iter()
            .filter_map(|r| match r {
                Reference::Tag(name) => EmojiName::from_reference(name),
                Reference::Native(_) => None,
            })
            .filter(|name| catalog.contains(name))
            .collect();
        if referenced.is_empty() {
            return Ok(RewriteOutcome::Untouched);
        }

        let resolved = self
            .resolve_slots(message, &catalog, &referenced)
            .await?;
        if resolved.is_empty() {
            return Ok(RewriteOutcome::Unresolved);
        }

        let text = tokens::rewrite_tags(&corrected, |tag| {
            EmojiName::from_reference(tag).and_then(|name| resolved.get(&name).cloned())
        });

        self.repost(message, &text).await?;

        if let Err(e) = self.refresh_frequent(&message.community).await {
            warn!(error = %e, "Slot reconciliation failed");
        }

        Ok(RewriteOutcome::Reposted(text))
    }

    /// Correct misspelled tags to catalog names.
    ///
    /// Returns the corrected text and the names corrections resolved to.
    /// Tags that already name a catalog entry are only case-folded.
    pub fn spell_correct(
        &self,
        text: &str,
        catalog: &CommunityCatalog,
    ) -> (String, BTreeSet<EmojiName>) {
        let mut corrections = BTreeSet::new();
        let corrected = tokens::rewrite_tags(text, |tag| {
            let name = EmojiName::from_reference(tag)?;
            if catalog.contains(&name) {
                return Some(name.tag());
            }
            let found = self
                .matcher
                .correct(name.as_str(), catalog.names().map(EmojiName::as_str))
                .and_then(EmojiName::from_reference)?;
            debug!(from = %name, to = %found, "Corrected emoji tag");
            let tag = found.tag();
            corrections.insert(found);
            Some(tag)
        });
        (corrected, corrections)
    }

    #[instrument(skip(self, message, catalog, referenced), fields(referenced = referenced.len()))]
    async fn resolve_slots(
        &self,
        message: &IncomingMessage,
        catalog: &CommunityCatalog,
        referenced: &BTreeSet<EmojiName>,
    ) -> EmojibotResult<BTreeMap<EmojiName, String>> {
        let mut natives = NativeSlotIndex::new(
            self.platform
                .list_native_emoji(&message.community)
                .await?,
        );

        let free = natives.free_slots(*self.settings.native_capacity());
        for warning in capacity_warnings(referenced.len(), *self.settings.working_slots(), free) {
            warn!(?warning, "Capacity warning");
            self.notify(message, &warning.to_string()).await;
        }

        let mut resolved = BTreeMap::new();
        for name in referenced {
            if let Some(native) = natives.get(name) {
                resolved.insert(name.clone(), native.markup.clone());
                continue;
            }
            let Some(record) = catalog.get(name) else {
                continue;
            };
            match self
                .register_native(&message.community, name, record)
                .await
            {
                Ok(native) => {
                    resolved.insert(name.clone(), native.markup.clone());
                    natives.insert(native);
                }
                Err(e) => {
                    warn!(name = %name, error = %e, "Native registration failed");
                    let notice = CommandErrorKind::NativeRegistration {
                        name: name.to_string(),
                        reason: e.to_string(),
                    };
                    self.notify(message, &notice.to_string()).await;
                }
            }
        }
        Ok(resolved)
    }

    async fn repost(&self, message: &IncomingMessage, text: &str) -> EmojibotResult<()> {
        let proxy = self
            .platform
            .channel_proxy(&message.channel, self.settings.proxy_name())
            .await?;
        self.platform.delete_message(message).await?;
        self.platform
            .post_as_proxy(
                &proxy,
                text,
                &message.author.display_name,
                message.author.avatar_url.as_deref(),
            )
            .await?;
        info!(author = %message.author.id, "Message reposted");
        Ok(())
    }

    /// Bring the community's managed slots in line with its top-N emoji.
    ///
    /// Evicts before registering so the platform limit is never exceeded.
    /// Individual failures are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if the native emoji cannot be listed.
    #[instrument(skip(self), fields(community = %community))]
    pub async fn refresh_frequent(&self, community: &CommunityId) -> EmojibotResult<SlotDelta> {
        let catalog = self.store.community(community).await;
        let mut natives = NativeSlotIndex::new(self.platform.list_native_emoji(community).await?);
        let delta = reconcile(&catalog, &natives, *self.settings.frequent_slots());

        for name in &delta.to_evict {
            let Some(native) = natives.get(name) else {
                continue;
            };
            match self
                .platform
                .delete_native_emoji(community, &native.handle)
                .await
            {
                Ok(()) => {
                    natives.remove(name);
                    info!(name = %name, "Evicted emoji slot");
                }
                Err(e) => warn!(name = %name, error = %e, "Slot eviction failed"),
            }
        }

        for name in &delta.to_register {
            let Some(record) = catalog.get(name) else {
                continue;
            };
            if natives.free_slots(*self.settings.native_capacity()) == 0 {
                warn!(name = %name, "No free slot left for frequent emoji");
                break;
            }
            match self.register_native(community, name, record).await {
                Ok(native) => natives.insert(native),
                Err(e) => warn!(name = %name, error = %e, "Slot registration failed"),
            }
        }

        Ok(delta)
    }

    pub(crate) async fn register_native(
        &self,
        community: &CommunityId,
        name: &EmojiName,
        record: &EmojiRecord,
    ) -> Result<NativeEmoji, PlatformError> {
        let image = self
            .platform
            .fetch_image_bytes(record.source_url())
            .await?;
        let native = self
            .platform
            .register_native_emoji(community, name, &image)
            .await?;
        info!(name = %name, handle = %native.handle, "Registered emoji slot");
        Ok(native)
    }

    /// Fetch a URL and check it decodes as an image.
    pub(crate) async fn fetch_validated(&self, url: &str) -> EmojibotResult<Vec<u8>> {
        let bytes = self
            .platform
            .fetch_image_bytes(url)
            .await
            .map_err(|e| CommandError::new(CommandErrorKind::InvalidImage(e.to_string())))?;
        validate_image(&bytes)?;
        Ok(bytes)
    }

    /// Check a name is free in the catalog, the native slots and the builtins.
    pub(crate) async fn ensure_available(
        &self,
        community: &CommunityId,
        name: &EmojiName,
    ) -> EmojibotResult<()> {
        if self.store.community(community).await.contains(name) {
            return Err(CommandError::new(CommandErrorKind::NameInUse(name.to_string())).into());
        }
        if self.builtins.contains(name) {
            return Err(
                CommandError::new(CommandErrorKind::BuiltinCollision(name.to_string())).into(),
            );
        }
        let natives = NativeSlotIndex::new(self.platform.list_native_emoji(community).await?);
        if natives.contains(name) {
            return Err(CommandError::new(CommandErrorKind::NameInUse(name.to_string())).into());
        }
        Ok(())
    }

    pub(crate) async fn notify(&self, message: &IncomingMessage, text: &str) {
        if let Err(e) = self.platform.send_notice(&message.channel, text).await {
            warn!(error = %e, "Failed to send notice");
        }
    }
}
