use crate::command::CommandRunner;
use crate::state::{AccountCache, AccountKey};
use crate::{AccountState, ResolveError};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Resolves account counters through the cache, querying the chain on a miss
///
/// The miss path (check, query, insert) is a critical section per key:
/// concurrent misses for the same key must perform exactly one query, or two
/// tasks could race divergent state into the cache.
pub struct AccountResolver {
    cache: AccountCache,
    runner: Arc<CommandRunner>,
    locks: Mutex<HashMap<AccountKey, Arc<Mutex<()>>>>,
}

impl AccountResolver {
    pub fn new(cache: AccountCache, runner: Arc<CommandRunner>) -> Self {
        Self {
            cache,
            runner,
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn key_lock(&self, key: &AccountKey) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(key.clone()).or_default().clone()
    }

    /// Current account number and sequence for an address
    ///
    /// A cache hit returns the stored pair unchanged. On a miss the chain is
    /// queried through the node binary; a failed query or an unparseable
    /// reply leaves the cache untouched.
    pub async fn get_state(
        &self,
        address: &str,
        network_id: &str,
    ) -> Result<AccountState, ResolveError> {
        let key = AccountKey::new(address, network_id);
        let lock = self.key_lock(&key).await;
        let _guard = lock.lock().await;

        if let Some(state) = self.cache.get(&key).await {
            debug!("Account state cache hit for {}", address);
            return Ok(state);
        }

        let command = vec![
            "query".to_string(),
            "auth".to_string(),
            "account".to_string(),
            address.to_string(),
            "-o".to_string(),
            "json".to_string(),
        ];
        let outcome = self.runner.run(&command, network_id, false).await;
        if !outcome.succeeded() {
            return Err(ResolveError::QueryFailed {
                stderr: outcome.stderr,
            });
        }

        let state = parse_account_state(&outcome.stdout)?;
        info!(
            "Resolved account {} on {}: number {}, sequence {}",
            address, network_id, state.account_number, state.sequence
        );
        self.cache.insert(key, state).await;
        Ok(state)
    }

    /// Advance the cached sequence after a successful submission
    ///
    /// The chain is not re-queried for the new sequence, so submitters call
    /// this immediately after a broadcast is accepted. An absent entry is a
    /// no-op and returns `None`.
    pub async fn advance_sequence(
        &self,
        address: &str,
        network_id: &str,
        increment: u64,
    ) -> Option<AccountState> {
        let key = AccountKey::new(address, network_id);
        self.cache.advance_sequence(&key, increment).await
    }

    /// Drop the cached entry for one address
    ///
    /// Used after a failed submission whose on-chain effect is uncertain, or
    /// when state is known to have changed out of band.
    pub async fn evict(&self, address: &str, network_id: &str) -> bool {
        let key = AccountKey::new(address, network_id);
        self.cache.evict(&key).await
    }

    pub async fn clear(&self) {
        self.cache.clear().await;
    }
}

/// Counters arrive as JSON strings from the binary but are plain numbers in
/// some node versions; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Counter {
    Number(u64),
    Text(String),
}

impl Counter {
    fn value(&self) -> Result<u64, ResolveError> {
        match self {
            Counter::Number(n) => Ok(*n),
            Counter::Text(s) => s
                .parse()
                .map_err(|_| ResolveError::ParseFailed(format!("non-numeric counter '{s}'"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AccountEnvelope {
    account: AccountRecord,
}

#[derive(Debug, Deserialize)]
struct AccountRecord {
    value: AccountFields,
}

#[derive(Debug, Deserialize)]
struct AccountFields {
    account_number: Counter,
    sequence: Counter,
}

fn parse_account_state(stdout: &str) -> Result<AccountState, ResolveError> {
    let envelope: AccountEnvelope = serde_json::from_str(stdout)
        .map_err(|err| ResolveError::ParseFailed(err.to_string()))?;
    Ok(AccountState {
        account_number: envelope.account.value.account_number.value()?,
        sequence: envelope.account.value.sequence.value()?,
    })
}
