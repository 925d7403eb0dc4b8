// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTML page rendering with minijinja.
//!
//! Templates are compiled into the binary. Names end in `.html`, so
//! minijinja's default auto-escaping applies to every interpolated value.

use minijinja::{context, Environment};
use pokedex_core::{PokemonCard, PokemonRecord};

use crate::error::ApiError;

const INDEX: &str = "index.html";
const POKEMON_INFO: &str = "pokemon_info.html";
const HISTORY: &str = "history.html";
const REMOVAL: &str = "removal.html";

/// Page renderer.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, ApiError> {
        let mut env = Environment::new();
        env.add_template(INDEX, include_str!("../../templates/index.html"))?;
        env.add_template(POKEMON_INFO, include_str!("../../templates/pokemon_info.html"))?;
        env.add_template(HISTORY, include_str!("../../templates/history.html"))?;
        env.add_template(REMOVAL, include_str!("../../templates/removal.html"))?;
        Ok(Self { env })
    }

    /// Search form.
    pub fn index(&self, port: u16) -> Result<String, ApiError> {
        Ok(self.env.get_template(INDEX)?.render(context! { port })?)
    }

    /// Result of one search, found or fallback.
    pub fn pokemon_info(&self, card: &PokemonCard) -> Result<String, ApiError> {
        Ok(self
            .env
            .get_template(POKEMON_INFO)?
            .render(context! { pokemon => card })?)
    }

    /// History table, or the empty-history message.
    pub fn history(&self, records: &[PokemonRecord], port: u16) -> Result<String, ApiError> {
        Ok(self
            .env
            .get_template(HISTORY)?
            .render(context! { pokemon => records, port })?)
    }

    /// Confirmation after clearing history.
    pub fn removal(&self, removed: u64) -> Result<String, ApiError> {
        Ok(self.env.get_template(REMOVAL)?.render(context! { removed })?)
    }
}
