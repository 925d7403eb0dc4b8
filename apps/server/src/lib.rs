// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pokedex Server - Pokemon search with a persistent search history.
//!
//! Searches are answered from the history store when possible and from
//! PokeAPI otherwise. Every successful search is appended to the history.
//!
//! # Endpoints
//!
//! - `GET /` - Search form
//! - `POST /` - Search by name or id (`pokemonName` form field)
//! - `GET /prevPokemon` - Search history table
//! - `POST /clearHistory` - Delete the whole history
//! - `GET /api/v1/health` - Health check
//! - `GET /static/*` - Files from the configured static directory

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use pokedex_core::{PokemonSource, PokemonStore};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod shutdown;

use config::Config;
use error::ApiError;
use services::Templates;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PokemonStore>,
    pub source: Arc<dyn PokemonSource>,
    pub templates: Arc<Templates>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn PokemonStore>,
        source: Arc<dyn PokemonSource>,
        config: Config,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            store,
            source,
            templates: Arc::new(Templates::new()?),
            config: Arc::new(config),
        })
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let assets = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Search
        .route("/", get(routes::search::form).post(routes::search::submit))
        // History
        .route("/prevPokemon", get(routes::history::list))
        .route("/clearHistory", post(routes::history::clear))
        // Health check
        .route("/api/v1/health", get(routes::health::check))
        // Stylesheets and images
        .nest_service("/static", assets)
        .fallback(routes::health::not_found)
        // Middleware
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
