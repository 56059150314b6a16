//! Channel proxy identities cached for the lifetime of the process.

use emojibot_core::ChannelId;
use std::collections::HashMap;

/// A cached proxy and the lookup that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedProxy<H> {
    /// Channel the proxy posts into.
    pub channel: ChannelId,
    /// Name the proxy was found or created under.
    pub proxy_name: String,
    /// Platform handle used to post.
    pub hook: H,
}

/// Proxies keyed by platform id.
///
/// Entries are evicted when posting through them fails, so a proxy deleted
/// on the platform side is looked up or created again.
#[derive(Debug)]
pub struct ProxyCache<H> {
    by_id: HashMap<String, CachedProxy<H>>,
}

impl<H> Default for ProxyCache<H> {
    fn default() -> Self {
        Self {
            by_id: HashMap::new(),
        }
    }
}

impl<H> ProxyCache<H> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the cached proxy for a channel and name.
    pub fn find(&self, channel: &ChannelId, proxy_name: &str) -> Option<&str> {
        self.by_id
            .iter()
            .find(|(_, p)| &p.channel == channel && p.proxy_name == proxy_name)
            .map(|(id, _)| id.as_str())
    }

    /// Cache a proxy under its platform id.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        channel: ChannelId,
        proxy_name: impl Into<String>,
        hook: H,
    ) {
        self.by_id.insert(
            id.into(),
            CachedProxy {
                channel,
                proxy_name: proxy_name.into(),
                hook,
            },
        );
    }

    /// Cached proxy by id.
    pub fn get(&self, id: &str) -> Option<&CachedProxy<H>> {
        self.by_id.get(id)
    }

    /// Forget a proxy that stopped working.
    pub fn evict(&mut self, id: &str) -> Option<CachedProxy<H>> {
        self.by_id.remove(id)
    }

    /// Number of cached proxies.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
