// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memoization of decoded strings.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::codec::DecodeMode;
use crate::error::Result;

/// Cache key: the resolved ciphertext text and the decode mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    ciphertext: String,
    mode: DecodeMode,
}

impl CacheKey {
    pub fn new(ciphertext: impl Into<String>, mode: DecodeMode) -> Self {
        Self {
            ciphertext: ciphertext.into(),
            mode,
        }
    }

    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }
}

/// Hit/miss counters and current size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Concurrent store of decoded strings.
///
/// Entries are never evicted. A failed computation stores nothing.
#[derive(Debug, Default)]
pub struct DecodeCache {
    entries: DashMap<CacheKey, String>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DecodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn insert(&self, key: CacheKey, value: String) {
        self.entries.insert(key, value);
    }

    /// Return the cached value for `key`, computing and storing it with `f`
    /// on a miss.
    ///
    /// The shard holding `key` stays locked while `f` runs, so concurrent
    /// callers for the same key compute it once.
    pub fn get_or_try_insert_with<F>(&self, key: CacheKey, f: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(mode = ?entry.key().mode(), "decode cache hit");
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(mode = ?entry.key().mode(), "decode cache miss");
                let value = f()?;
                entry.insert(value.clone());
                Ok(value)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}
