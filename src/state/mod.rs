//! Account State Module
//!
//! This module caches the replay-protection counters (account number and
//! sequence) the chain assigns to each address, and resolves them through
//! the node binary on a cache miss. Transaction-building callers read the
//! pair from here instead of round-tripping to the chain on every call.

mod cache;
mod resolver;


pub use cache::{AccountCache, AccountKey};
pub use resolver::AccountResolver;
