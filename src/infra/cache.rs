use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Default lifetime of a cached list.
pub const DEFAULT_LIST_TTL: Duration = Duration::from_secs(15 * 60);

/// One fetched list kept in process memory for a while.
///
/// Writers never rebuild the list from a mutation response; they hand a
/// patch function to [`ListCache::patch`].
pub struct ListCache<T> {
    slot: Arc<RwLock<Option<Entry<T>>>>,
    ttl: Duration,
}

struct Entry<T> {
    items: Vec<T>,
    fetched_at: Instant,
}

impl<T> Clone for ListCache<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            ttl: self.ttl,
        }
    }
}

impl<T: Clone> ListCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Returns the cached list, fetching it first when missing or stale.
    /// Failed fetches are not cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<Vec<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        if let Some(items) = self.fresh(&*self.slot.read().await) {
            return Ok(items);
        }

        let mut slot = self.slot.write().await;
        // Another request may have filled it while we waited for the lock.
        if let Some(items) = self.fresh(&slot) {
            return Ok(items);
        }

        let items = fetch().await?;
        *slot = Some(Entry {
            items: items.clone(),
            fetched_at: Instant::now(),
        });
        Ok(items)
    }

    /// The cached list regardless of age.
    pub async fn peek(&self) -> Option<Vec<T>> {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|entry| entry.items.clone())
    }

    /// Replaces the cached list with `patch(list)`. Nothing happens when the
    /// list was never fetched.
    pub async fn patch<F>(&self, patch: F)
    where
        F: FnOnce(Vec<T>) -> Vec<T>,
    {
        let mut slot = self.slot.write().await;
        if let Some(entry) = slot.as_mut() {
            let items = std::mem::take(&mut entry.items);
            entry.items = patch(items);
        }
    }

    fn fresh(&self, slot: &Option<Entry<T>>) -> Option<Vec<T>> {
        slot.as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.items.clone())
    }
}
