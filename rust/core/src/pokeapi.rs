// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PokeAPI payload model and normalization into [`PokemonRecord`].
//!
//! Only the fields the service stores are deserialized; PokeAPI returns a
//! much larger document and everything else is skipped by serde.

use serde::Deserialize;

use crate::record::PokemonRecord;

/// Public PokeAPI endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Placeholder used for every field of a failed search.
pub const PLACEHOLDER: &str = "NONE";

/// Name shown when PokeAPI does not know the search term.
pub const FALLBACK_NAME: &str = "Invalid pokemon name. Here are some photos of cubchoo instead :)";

/// Default sprite shown for a failed search (Cubchoo, #613).
pub const FALLBACK_IMAGE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/613.png";

/// Shiny sprite shown for a failed search.
pub const FALLBACK_SHINY: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/shiny/613.png";

/// `GET /pokemon/{id or name}/` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPokemon {
    pub name: String,
    pub id: i64,
    /// Decimeters.
    pub height: f64,
    /// Hectograms.
    pub weight: f64,
    pub abilities: Vec<AbilitySlot>,
    pub types: Vec<TypeSlot>,
    pub sprites: Sprites,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
}

impl ApiPokemon {
    /// Flatten into the stored shape, converting to meters and kilograms.
    pub fn into_record(self) -> PokemonRecord {
        PokemonRecord {
            name: self.name,
            poke_id: self.id,
            types: self.types.into_iter().map(|slot| slot.kind.name).collect(),
            abilities: self
                .abilities
                .into_iter()
                .map(|slot| slot.ability.name)
                .collect(),
            height: self.height / 10.0,
            weight: self.weight / 10.0,
            image: self.sprites.front_default.unwrap_or_default(),
            shiny: self.sprites.front_shiny.unwrap_or_default(),
        }
    }
}
