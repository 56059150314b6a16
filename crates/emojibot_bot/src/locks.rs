//! Per-community serialization.

use emojibot_core::CommunityId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async mutex per community.
///
/// Holding the guard for a whole message keeps catalog mutation, native slot
/// observation and reconciliation of a community from interleaving.
#[derive(Debug, Default)]
pub struct CommunityLocks {
    locks: Mutex<HashMap<CommunityId, Arc<AsyncMutex<()>>>>,
}

impl CommunityLocks {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a community.
    pub async fn acquire(&self, community: &CommunityId) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .lock()
            .entry(community.clone())
            .or_default()
            .clone();
        lock.lock_owned().await
    }
}
