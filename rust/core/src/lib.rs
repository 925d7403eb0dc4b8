// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Pokedex Core
//!
//! Search-history logic for the Pokedex server, independent of any web
//! framework or database driver.
//!
//! ## Overview
//!
//! - **Records**: [`PokemonRecord`], the single stored document shape
//! - **Identifiers**: numeric id vs. exact name classification of search terms
//! - **PokeAPI**: payload model and unit conversion into records
//! - **Search**: cache-then-fetch flow over the [`PokemonStore`] and
//!   [`PokemonSource`] capabilities
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pokedex_core::{search, MemoryStore, SearchOutcome};
//!
//! let store = MemoryStore::new();
//! let outcome = search(&store, &source, "pikachu").await?;
//! if let SearchOutcome::Fetched(record) = outcome {
//!     println!("#{} {}", record.poke_id, record.name);
//! }
//! ```

pub mod error;
pub mod pokeapi;
pub mod record;
pub mod search;
pub mod source;
pub mod store;

pub use error::{Error, Result};
pub use pokeapi::{ApiPokemon, DEFAULT_BASE_URL};
pub use record::{Identifier, PokemonRecord};
pub use search::{clear_history, history, search, PokemonCard, SearchOutcome};
pub use source::{Lookup, PokemonSource};
pub use store::{MemoryStore, PokemonStore};
