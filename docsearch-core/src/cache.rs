//! Short-lived staging of hits between the suggestion and resolution phases

use crate::{Hit, LookupKey};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// How long a staged candidate stays resolvable.
pub const DEFAULT_STAGE_TTL: Duration = Duration::from_secs(60);

/// Expired entries are swept once the map grows past this size, at most once
/// per TTL.
const SWEEP_THRESHOLD: usize = 4096;

/// Key/value store for staged candidates.
///
/// Absence is the only miss signal: `fetch` does not distinguish an expired
/// entry from one that was never staged, and implementations backed by an
/// external store report their read failures as absence too.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Upsert `hit` under `key` and (re)start its expiry window.
    async fn stage(&self, key: &LookupKey, hit: &Hit) -> crate::Result<()>;

    /// Point lookup of a staged hit.
    async fn fetch(&self, key: &LookupKey) -> Option<Hit>;
}

struct StagedEntry {
    hit: Hit,
    expires_at: Instant,
}

struct Entries {
    map: HashMap<LookupKey, StagedEntry>,
    last_sweep: Instant,
}

/// In-process `ResultCache` with per-entry expiry.
pub struct MemoryCache {
    entries: RwLock<Entries>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(Entries {
                map: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            ttl,
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STAGE_TTL)
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn stage(&self, key: &LookupKey, hit: &Hit) -> crate::Result<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        // Full scans are bounded to one per TTL.
        if entries.map.len() >= SWEEP_THRESHOLD && now >= entries.last_sweep + self.ttl {
            entries.map.retain(|_, entry| entry.expires_at > now);
            entries.last_sweep = now;
        }

        entries.map.insert(
            key.clone(),
            StagedEntry {
                hit: hit.clone(),
                expires_at: now + self.ttl,
            },
        );
        Ok(())
    }

    async fn fetch(&self, key: &LookupKey) -> Option<Hit> {
        let entries = self.entries.read().await;
        entries
            .map
            .get(key)
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.hit.clone())
    }
}
