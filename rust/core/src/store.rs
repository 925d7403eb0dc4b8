// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Search-history persistence.
//!
//! The history is an append-only log: there is no uniqueness on `name` or
//! `pokeId`, so searching the same Pokemon twice stores two documents.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::record::{Identifier, PokemonRecord};

/// Persistence backend for search records.
///
/// Each call is a single unit of work; no transaction spans calls.
/// Backend failures are reported as [`crate::Error::StoreUnavailable`].
#[async_trait]
pub trait PokemonStore: Send + Sync {
    /// First record matching the identifier, in store order.
    async fn lookup(&self, identifier: &Identifier) -> Result<Option<PokemonRecord>>;

    /// Append a record unconditionally. Returns the store-assigned id.
    async fn insert(&self, record: &PokemonRecord) -> Result<String>;

    /// Every record, unfiltered, in store order.
    async fn list_all(&self) -> Result<Vec<PokemonRecord>>;

    /// Remove every record. Returns the number removed.
    async fn clear_all(&self) -> Result<u64>;
}

/// In-process store used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<PokemonRecord>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PokemonStore for MemoryStore {
    async fn lookup(&self, identifier: &Identifier) -> Result<Option<PokemonRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| identifier.matches(r)).cloned())
    }

    async fn insert(&self, record: &PokemonRecord) -> Result<String> {
        self.records.write().await.push(record.clone());
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(id.to_string())
    }

    async fn list_all(&self) -> Result<Vec<PokemonRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn clear_all(&self) -> Result<u64> {
        let mut records = self.records.write().await;
        let removed = records.len() as u64;
        records.clear();
        Ok(removed)
    }
}
