// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Search form and search submission endpoints.

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;

use crate::error::ApiError;
use crate::AppState;

/// Body of the search form.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    /// Pokemon name or numeric id.
    #[serde(rename = "pokemonName", default)]
    pub pokemon_name: String,
}

/// GET / - Search form.
pub async fn form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.templates.index(state.config.port)?))
}

/// POST / - Look the Pokemon up in the history first, then in PokeAPI.
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, ApiError> {
    tracing::debug!(term = %form.pokemon_name, "Search submitted");

    let outcome =
        pokedex_core::search(&*state.store, &*state.source, &form.pokemon_name).await?;

    Ok(Html(state.templates.pokemon_info(&outcome.card())?))
}
