// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! External Pokemon data source consulted on a cache miss.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::{Identifier, PokemonRecord};

/// Outcome of an external lookup that reached the API.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(PokemonRecord),
    /// The API answered 404 for this term.
    NotFound,
}

/// Resolves Pokemon the store has never seen.
///
/// A 404 is [`Lookup::NotFound`]. Any other failure (transport, timeout,
/// unexpected status, undecodable body) is [`crate::Error::LookupFailed`].
#[async_trait]
pub trait PokemonSource: Send + Sync {
    async fn fetch(&self, identifier: &Identifier) -> Result<Lookup>;
}
