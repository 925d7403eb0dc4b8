// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stored search record and search-term classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// One stored search result.
///
/// Field names match the stored document layout, so `poke_id` is persisted
/// as `pokeId`. Unknown fields (e.g. a store-assigned `_id`) are ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    /// Lowercase name as reported by PokeAPI.
    pub name: String,
    #[serde(rename = "pokeId")]
    pub poke_id: i64,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    /// Height in meters.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// Default sprite URL.
    pub image: String,
    /// Shiny sprite URL.
    pub shiny: String,
}

/// A user-supplied search term, classified as numeric id or name.
#[derive(Debug, Clone, PartialEq)]
pub enum Identifier {
    /// Matches `pokeId`.
    Id(i64),
    /// A number that is not a whole `i64` (e.g. `2.5`). Compared against
    /// `pokeId` numerically, so it never selects a stored record.
    Number(f64),
    /// Exact, case-sensitive match on `name`.
    Name(String),
}

impl Identifier {
    /// Classify raw form input.
    ///
    /// Surrounding whitespace is ignored. Decimal, exponent and `0x`/`0o`/`0b`
    /// numerals are numeric; a finite whole value is an id. Everything else
    /// is kept verbatim as a name.
    pub fn classify(raw: &str) -> Result<Self> {
        let term = raw.trim();
        if term.is_empty() {
            return Err(Error::InvalidSearch("search term is empty".into()));
        }

        if let Ok(id) = term.parse::<i64>() {
            return Ok(Identifier::Id(id));
        }
        if let Some(id) = parse_radix(term) {
            return Ok(Identifier::Id(id));
        }
        Ok(match term.parse::<f64>() {
            Ok(n) if n.is_finite() => whole(n).map_or(Identifier::Number(n), Identifier::Id),
            _ => Identifier::Name(term.to_string()),
        })
    }

    /// Path segment used when asking PokeAPI, which only knows lowercase names.
    pub fn api_path_segment(&self) -> String {
        match self {
            Identifier::Id(id) => id.to_string(),
            Identifier::Number(n) => n.to_string(),
            Identifier::Name(name) => name.to_lowercase(),
        }
    }

    /// Does this identifier select the given record?
    pub fn matches(&self, record: &PokemonRecord) -> bool {
        match self {
            Identifier::Id(id) => record.poke_id == *id,
            Identifier::Number(n) => record.poke_id as f64 == *n,
            Identifier::Name(name) => record.name == *name,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Id(id) => write!(f, "#{}", id),
            Identifier::Number(n) => write!(f, "#{}", n),
            Identifier::Name(name) => f.write_str(name),
        }
    }
}

/// `0x1A`, `0o17`, `0b101` style integers.
fn parse_radix(term: &str) -> Option<i64> {
    let (radix, digits) = match term.get(..2)? {
        "0x" | "0X" => (16, &term[2..]),
        "0o" | "0O" => (8, &term[2..]),
        "0b" | "0B" => (2, &term[2..]),
        _ => return None,
    };
    if digits.starts_with(['+', '-']) {
        return None;
    }
    i64::from_str_radix(digits, radix).ok()
}

/// `Some` when `n` is a whole number representable as `i64`.
fn whole(n: f64) -> Option<i64> {
    let in_range = n >= i64::MIN as f64 && n < i64::MAX as f64;
    (n.fract() == 0.0 && in_range).then_some(n as i64)
}
