//! Platform-neutral view of an incoming chat message.

use crate::{ChannelId, CommunityId, MessageId, UserId};
use derive_builder::Builder;

/// Who wrote a message, as needed to repost it under their name.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct Author {
    /// Platform user id.
    pub id: UserId,
    /// Name shown on the repost.
    pub display_name: String,
    /// Avatar shown on the repost.
    #[builder(default)]
    pub avatar_url: Option<String>,
}

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Download URL.
    pub url: String,
    /// Original file name.
    pub filename: String,
}

impl Attachment {
    /// Create an attachment.
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
        }
    }
}

/// A message posted in a community channel.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct IncomingMessage {
    /// Platform message id.
    pub id: MessageId,
    /// Community the channel belongs to.
    pub community: CommunityId,
    /// Channel the message was posted in.
    pub channel: ChannelId,
    /// Message author.
    pub author: Author,
    /// Raw text.
    #[builder(default)]
    pub content: String,
    /// Attached files.
    #[builder(default)]
    pub attachments: Vec<Attachment>,
}

/// A channel-scoped identity that can post under arbitrary names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyHandle {
    /// Channel the proxy posts into.
    pub channel: ChannelId,
    /// Platform id of the proxy (webhook id on Discord).
    pub id: String,
}
