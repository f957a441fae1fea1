use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use ripple_core::{Clock, PostId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    user_id: UserId,
    limit: usize,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    post_ids: Vec<PostId>,
    cached_at: DateTime<Utc>,
}

/// In-process recommendation cache with a lazily enforced TTL. Each
/// process instance has its own; entries are advisory and TTL-bounded,
/// so no cross-process coherency is needed.
pub struct RecommendationCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl RecommendationCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// A stored list, if one exists and is still within its TTL.
    pub fn get(&self, user_id: UserId, limit: usize) -> Option<Vec<PostId>> {
        let entries = self.entries.lock().unwrap();
        let entry = entries.get(&CacheKey { user_id, limit })?;

        if self.clock.now() - entry.cached_at < self.ttl {
            debug!("Cache hit for user {}", user_id);
            Some(entry.post_ids.clone())
        } else {
            None
        }
    }

    pub fn insert(&self, user_id: UserId, limit: usize, post_ids: Vec<PostId>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            CacheKey { user_id, limit },
            CacheEntry {
                post_ids,
                cached_at: self.clock.now(),
            },
        );
    }

    /// Drop every entry older than the TTL.
    pub fn sweep(&self) {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|_, entry| now - entry.cached_at <= self.ttl);
    }

    /// Drop every entry for one user, whatever the requested limit.
    /// Called when the user likes, reposts, or follows.
    pub fn clear_user(&self, user_id: UserId) {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|key, _| key.user_id != user_id);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}
