// Process-wide project index with a TTL

use pana_types::ProjectContextIndex;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

pub const DEFAULT_INDEX_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CachedIndex {
    index: Arc<ProjectContextIndex>,
    built_at: Instant,
}

/// Holds the most recently built index until it goes stale
///
/// Shared through an `Arc` by every consumer. Two callers that miss at the
/// same time will both rebuild; the last store wins.
#[derive(Debug)]
pub struct IndexCache {
    slot: RwLock<Option<CachedIndex>>,
    ttl: Duration,
}

impl IndexCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached index, if one exists and is younger than the TTL
    pub fn get(&self) -> Option<Arc<ProjectContextIndex>> {
        let slot = self.slot.read().ok()?;
        let cached = slot.as_ref()?;
        if cached.built_at.elapsed() >= self.ttl {
            return None;
        }
        Some(Arc::clone(&cached.index))
    }

    pub fn store(&self, index: ProjectContextIndex) -> Arc<ProjectContextIndex> {
        let index = Arc::new(index);
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(CachedIndex {
                index: Arc::clone(&index),
                built_at: Instant::now(),
            });
        }
        index
    }

    /// Drop the cached index so the next lookup rebuilds it
    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }
}

impl Default for IndexCache {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_empty_cache_misses() {
        let cache = IndexCache::default();
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_store_then_hit() {
        let cache = IndexCache::new(Duration::from_secs(10));
        let stored = cache.store(ProjectContextIndex::new(vec![]));
        let hit = cache.get().unwrap();
        assert!(Arc::ptr_eq(&stored, &hit));
    }

    #[test]
    fn test_expiration() {
        let cache = IndexCache::new(Duration::from_millis(50));
        cache.store(ProjectContextIndex::new(vec![]));
        assert!(cache.get().is_some());

        sleep(Duration::from_millis(80));
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_invalidate() {
        let cache = IndexCache::new(Duration::from_secs(10));
        cache.store(ProjectContextIndex::new(vec![]));
        cache.invalidate();
        assert!(cache.get().is_none());
    }
}
