// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MongoDB-backed search history.
//!
//! Every operation opens its own client, runs one command and shuts the
//! client down again before returning, whether the command succeeded or not.
//! Nothing is shared between requests except the parsed connection options.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::ClientOptions,
    Client, Collection,
};
use pokedex_core::{Error, Identifier, PokemonRecord, PokemonStore, Result};
use std::time::Duration;

/// Search history stored as one document per search in a single collection.
#[derive(Debug, Clone)]
pub struct MongoStore {
    options: ClientOptions,
    database: String,
    collection: String,
}

/// A client scoped to one operation.
struct Connection {
    client: Client,
    collection: Collection<PokemonRecord>,
}

impl Connection {
    async fn close(self) {
        self.client.shutdown().await;
    }
}

impl MongoStore {
    /// Parse the connection string once; no connection is opened here.
    ///
    /// `timeout` bounds server selection and connection setup unless the
    /// connection string sets its own, so an unreachable server fails fast
    /// with [`Error::StoreUnavailable`].
    pub async fn new(
        uri: &str,
        database: &str,
        collection: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await.map_err(unavailable)?;
        options.server_selection_timeout.get_or_insert(timeout);
        options.connect_timeout.get_or_insert(timeout);
        Ok(Self {
            options,
            database: database.to_string(),
            collection: collection.to_string(),
        })
    }

    fn connect(&self) -> Result<Connection> {
        let client = Client::with_options(self.options.clone()).map_err(unavailable)?;
        let collection = client
            .database(&self.database)
            .collection::<PokemonRecord>(&self.collection);
        Ok(Connection { client, collection })
    }
}

/// Filter selecting records for a search term.
pub fn filter_for(identifier: &Identifier) -> Document {
    match identifier {
        Identifier::Id(id) => doc! { "pokeId": *id },
        Identifier::Number(n) => doc! { "pokeId": *n },
        Identifier::Name(name) => doc! { "name": name.as_str() },
    }
}

fn unavailable(err: mongodb::error::Error) -> Error {
    tracing::error!(error = %err, "MongoDB operation failed");
    Error::StoreUnavailable(err.to_string())
}

#[async_trait]
impl PokemonStore for MongoStore {
    async fn lookup(&self, identifier: &Identifier) -> Result<Option<PokemonRecord>> {
        let conn = self.connect()?;
        let found = conn.collection.find_one(filter_for(identifier)).await;
        conn.close().await;
        found.map_err(unavailable)
    }

    async fn insert(&self, record: &PokemonRecord) -> Result<String> {
        let conn = self.connect()?;
        let inserted = conn.collection.insert_one(record).await;
        conn.close().await;

        let id = inserted.map_err(unavailable)?.inserted_id;
        let id = match id.as_object_id() {
            Some(oid) => oid.to_hex(),
            None => id.to_string(),
        };
        tracing::info!(inserted_id = %id, name = %record.name, "Inserted search record");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<PokemonRecord>> {
        let conn = self.connect()?;
        let records = match conn.collection.find(doc! {}).await {
            Ok(cursor) => cursor.try_collect::<Vec<_>>().await,
            Err(e) => Err(e),
        };
        conn.close().await;
        records.map_err(unavailable)
    }

    async fn clear_all(&self) -> Result<u64> {
        let conn = self.connect()?;
        let deleted = conn.collection.delete_many(doc! {}).await;
        conn.close().await;
        Ok(deleted.map_err(unavailable)?.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn test_numeric_terms_filter_on_poke_id() {
        let filter = filter_for(&Identifier::Id(25));
        assert_eq!(filter.get("pokeId"), Some(&Bson::Int64(25)));
        assert!(filter.get("name").is_none());
    }

    #[test]
    fn test_names_filter_on_exact_name() {
        let filter = filter_for(&Identifier::Name("Pikachu".into()));
        assert_eq!(filter.get("name"), Some(&Bson::String("Pikachu".into())));
        assert!(filter.get("pokeId").is_none());
    }

    #[test]
    fn test_fractional_terms_filter_on_poke_id() {
        let filter = filter_for(&Identifier::Number(2.5));
        assert_eq!(filter.get("pokeId"), Some(&Bson::Double(2.5)));
    }

    #[tokio::test]
    async fn test_bad_connection_string_is_store_unavailable() {
        let err = MongoStore::new("not-a-mongo-uri", "pokedex", "searches", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_fails_within_timeout() {
        let store = MongoStore::new(
            "mongodb://127.0.0.1:1/?directConnection=true",
            "pokedex",
            "searches",
            Duration::from_millis(300),
        )
        .await
        .unwrap();
        assert_eq!(
            store.options.server_selection_timeout,
            Some(Duration::from_millis(300))
        );

        let started = std::time::Instant::now();
        let lookup = store.lookup(&Identifier::Id(25)).await;
        let cleared = store.clear_all().await;

        assert!(matches!(lookup, Err(Error::StoreUnavailable(_))));
        assert!(matches!(cleared, Err(Error::StoreUnavailable(_))));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_connection_string_timeout_wins() {
        let store = MongoStore::new(
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=100",
            "pokedex",
            "searches",
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert_eq!(
            store.options.server_selection_timeout,
            Some(Duration::from_millis(100))
        );
        assert_eq!(store.options.connect_timeout, Some(Duration::from_secs(5)));
    }
}
