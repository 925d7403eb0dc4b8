// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service modules for persistence, PokeAPI access and rendering.

pub mod mongo;
pub mod pokeapi;
pub mod templates;

pub use mongo::MongoStore;
pub use pokeapi::PokeApiClient;
pub use templates::Templates;
