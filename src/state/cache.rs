use crate::AccountState;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cache key for one address on one network
///
/// The same address can exist on several networks with independent
/// counters, so entries are keyed by the pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountKey {
    pub address: String,
    pub network: String,
}

impl AccountKey {
    pub fn new(address: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            network: network.into(),
        }
    }
}

/// In-memory cache of account counters
///
/// Entries are created by the resolver after a successful query, advanced
/// after a successful submission, and removed by explicit eviction. There
/// is no TTL; staleness is the caller's responsibility.
#[derive(Clone)]
pub struct AccountCache {
    entries: Arc<RwLock<HashMap<AccountKey, AccountState>>>,
}

impl AccountCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, key: &AccountKey) -> Option<AccountState> {
        let entries = self.entries.read().await;
        entries.get(key).copied()
    }

    pub async fn insert(&self, key: AccountKey, state: AccountState) {
        let mut entries = self.entries.write().await;
        entries.insert(key, state);
    }

    /// Advance the cached sequence for a key
    ///
    /// Returns the updated state, or `None` when nothing is cached for the
    /// key. An absent entry is a no-op, not an error, and is not created.
    pub async fn advance_sequence(&self, key: &AccountKey, increment: u64) -> Option<AccountState> {
        let mut entries = self.entries.write().await;
        let state = entries.get_mut(key)?;
        state.sequence += increment;
        Some(*state)
    }

    /// Remove one entry; returns whether anything was cached for the key
    pub async fn evict(&self, key: &AccountKey) -> bool {
        let mut entries = self.entries.write().await;
        entries.remove(key).is_some()
    }

    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }
}

impl Default for AccountCache {
    fn default() -> Self {
        Self::new()
    }
}
