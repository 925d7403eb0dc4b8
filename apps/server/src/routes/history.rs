// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Search history endpoints.

use axum::{extract::State, response::Html};

use crate::error::ApiError;
use crate::AppState;

/// GET /prevPokemon - Every past search.
pub async fn list(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let records = pokedex_core::history(&*state.store).await?;
    tracing::debug!(count = records.len(), "Listing search history");
    Ok(Html(state.templates.history(&records, state.config.port)?))
}

/// POST /clearHistory - Delete every past search.
pub async fn clear(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let removed = pokedex_core::clear_history(&*state.store).await?;
    tracing::info!("Deleted {} pokemon", removed);
    Ok(Html(state.templates.removal(removed)?))
}
