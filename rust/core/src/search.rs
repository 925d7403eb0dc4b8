// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cache-then-fetch search and history operations.
//!
//! A search first asks the store. On a hit the cached record is appended
//! again so repeat searches show up in history. On a miss the external
//! source is consulted; a found Pokemon is appended, a 404 is not.

use serde::Serialize;

use crate::error::Result;
use crate::pokeapi::{FALLBACK_IMAGE, FALLBACK_NAME, FALLBACK_SHINY, PLACEHOLDER};
use crate::record::{Identifier, PokemonRecord};
use crate::source::{Lookup, PokemonSource};
use crate::store::PokemonStore;

/// Result of one search submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Served from the store and recorded again.
    Cached(PokemonRecord),
    /// Fetched from the external source and recorded.
    Fetched(PokemonRecord),
    /// Unknown to the external source; nothing recorded.
    NotFound,
}

impl SearchOutcome {
    /// Presentation data for the result page.
    pub fn card(&self) -> PokemonCard {
        match self {
            SearchOutcome::Cached(record) => PokemonCard::from_record(record, true),
            SearchOutcome::Fetched(record) => PokemonCard::from_record(record, false),
            SearchOutcome::NotFound => PokemonCard::fallback(),
        }
    }
}

/// Everything the result page shows for one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonCard {
    pub found: bool,
    pub from_cache: bool,
    pub name: String,
    pub id: String,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub height: String,
    pub weight: String,
    pub image: String,
    pub shiny: String,
}

impl PokemonCard {
    fn from_record(record: &PokemonRecord, from_cache: bool) -> Self {
        Self {
            found: true,
            from_cache,
            name: record.name.clone(),
            id: record.poke_id.to_string(),
            types: record.types.clone(),
            abilities: record.abilities.clone(),
            height: record.height.to_string(),
            weight: record.weight.to_string(),
            image: record.image.clone(),
            shiny: record.shiny.clone(),
        }
    }

    fn fallback() -> Self {
        Self {
            found: false,
            from_cache: false,
            name: FALLBACK_NAME.to_string(),
            id: PLACEHOLDER.to_string(),
            types: vec![PLACEHOLDER.to_string()],
            abilities: vec![PLACEHOLDER.to_string()],
            height: PLACEHOLDER.to_string(),
            weight: PLACEHOLDER.to_string(),
            image: FALLBACK_IMAGE.to_string(),
            shiny: FALLBACK_SHINY.to_string(),
        }
    }
}

/// Handle one search submission.
///
/// Concurrent searches for the same term may both miss and both insert;
/// the history tolerates duplicates.
pub async fn search<S, P>(store: &S, source: &P, raw: &str) -> Result<SearchOutcome>
where
    S: PokemonStore + ?Sized,
    P: PokemonSource + ?Sized,
{
    let identifier = Identifier::classify(raw)?;

    if let Some(record) = store.lookup(&identifier).await? {
        tracing::info!(term = %identifier, poke_id = record.poke_id, "Cache HIT");
        let inserted_id = store.insert(&record).await?;
        tracing::debug!(inserted_id = %inserted_id, "Recorded repeat search");
        return Ok(SearchOutcome::Cached(record));
    }

    tracing::info!(term = %identifier, "Cache MISS, querying PokeAPI");
    match source.fetch(&identifier).await? {
        Lookup::Found(record) => {
            let inserted_id = store.insert(&record).await?;
            tracing::info!(
                inserted_id = %inserted_id,
                name = %record.name,
                poke_id = record.poke_id,
                "Recorded new search"
            );
            Ok(SearchOutcome::Fetched(record))
        }
        Lookup::NotFound => {
            tracing::info!(term = %identifier, "Pokemon not found, nothing recorded");
            Ok(SearchOutcome::NotFound)
        }
    }
}

/// All past searches in store order.
pub async fn history<S>(store: &S) -> Result<Vec<PokemonRecord>>
where
    S: PokemonStore + ?Sized,
{
    store.list_all().await
}

/// Wipe the history, returning how many records were removed.
pub async fn clear_history<S>(store: &S) -> Result<u64>
where
    S: PokemonStore + ?Sized,
{
    let removed = store.clear_all().await?;
    tracing::info!(removed, "Cleared search history");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_card() {
        let card = SearchOutcome::NotFound.card();
        assert!(!card.found);
        assert_eq!(card.name, FALLBACK_NAME);
        assert_eq!(card.id, "NONE");
        assert_eq!(card.types, vec!["NONE"]);
        assert_eq!(card.abilities, vec!["NONE"]);
        assert_eq!(card.height, "NONE");
        assert_eq!(card.weight, "NONE");
        assert!(card.image.ends_with("/613.png"));
        assert!(card.shiny.ends_with("/shiny/613.png"));
    }

    #[test]
    fn test_card_formats_measurements() {
        let record = PokemonRecord {
            name: "pikachu".into(),
            poke_id: 25,
            types: vec!["electric".into()],
            abilities: vec!["static".into()],
            height: 0.4,
            weight: 6.0,
            image: String::new(),
            shiny: String::new(),
        };
        let card = SearchOutcome::Cached(record).card();
        assert!(card.found);
        assert!(card.from_cache);
        assert_eq!(card.id, "25");
        assert_eq!(card.height, "0.4");
        assert_eq!(card.weight, "6");
    }
}
