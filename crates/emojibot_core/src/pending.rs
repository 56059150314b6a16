//! Volatile bindings from (user, channel) to an emoji name awaiting an image.

use crate::{ChannelId, EmojiName, UserId};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

/// Users who ran `add <name>` without a URL, keyed by where they did it.
///
/// Not persisted; a restart forgets every entry.
#[derive(Debug, Default)]
pub struct PendingUploads {
    entries: Mutex<HashMap<(UserId, ChannelId), EmojiName>>,
}

impl PendingUploads {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect the next attachment from `user` in `channel` to become `name`.
    ///
    /// Replaces and returns an older name pending for the same pair.
    pub fn await_upload(
        &self,
        user: &UserId,
        channel: &ChannelId,
        name: EmojiName,
    ) -> Option<EmojiName> {
        debug!(user = %user, channel = %channel, name = %name, "Awaiting upload");
        self.entries
            .lock()
            .insert((user.clone(), channel.clone()), name)
    }

    /// Take the name pending for this pair, if any.
    pub fn resolve(&self, user: &UserId, channel: &ChannelId) -> Option<EmojiName> {
        self.entries
            .lock()
            .remove(&(user.clone(), channel.clone()))
    }

    /// Whether something is pending for this pair.
    pub fn contains(&self, user: &UserId, channel: &ChannelId) -> bool {
        self.entries
            .lock()
            .contains_key(&(user.clone(), channel.clone()))
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> EmojiName {
        EmojiName::from_reference(s).unwrap()
    }

    #[test]
    fn test_resolve_consumes_only_matching_pair() {
        let pending = PendingUploads::new();
        let (u1, u2) = (UserId::from("u1"), UserId::from("u2"));
        let c = ChannelId::from("c");
        pending.await_upload(&u1, &c, name("wow"));
        pending.await_upload(&u2, &c, name("yay"));

        assert_eq!(pending.resolve(&u1, &c), Some(name("wow")));
        assert_eq!(pending.resolve(&u1, &c), None);
        assert!(pending.contains(&u2, &c));
    }

    #[test]
    fn test_same_pair_replaces_older_name() {
        let pending = PendingUploads::new();
        let (u, c) = (UserId::from("u"), ChannelId::from("c"));
        assert_eq!(pending.await_upload(&u, &c, name("one")), None);
        assert_eq!(pending.await_upload(&u, &c, name("two")), Some(name("one")));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_pairs_are_scoped_per_channel() {
        let pending = PendingUploads::new();
        let u = UserId::from("u");
        pending.await_upload(&u, &ChannelId::from("c1"), name("wow"));
        assert_eq!(pending.resolve(&u, &ChannelId::from("c2")), None);
        assert!(!pending.is_empty());
    }
}
