// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::Context;
use pokedex_core::{MemoryStore, PokemonStore};
use pokedex_server::{
    config::Config,
    router,
    services::{MongoStore, PokeApiClient},
    shutdown::{AnyOf, ConsoleShutdown, CtrlC, ShutdownSignal},
    AppState,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to read .env")?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,pokedex_server=debug"));
    if config.json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).pretty().init();
    }

    tracing::info!(
        port = config.port,
        mongo_db = %config.mongo_db,
        mongo_collection = %config.mongo_collection,
        pokeapi = %config.pokeapi_base_url,
        "Starting Pokedex Server"
    );

    if config.mongo_timeout_secs >= config.request_timeout_secs {
        tracing::warn!(
            mongo_timeout_secs = config.mongo_timeout_secs,
            request_timeout_secs = config.request_timeout_secs,
            "MongoDB timeout is not below the request timeout, store outages may surface as 408"
        );
    }

    let store: Arc<dyn PokemonStore> = match &config.mongo_uri {
        Some(uri) => Arc::new(
            MongoStore::new(
                uri,
                &config.mongo_db,
                &config.mongo_collection,
                Duration::from_secs(config.mongo_timeout_secs),
            )
            .await
            .context("invalid MONGO_CONNECTION_STRING")?,
        ),
        None => {
            tracing::warn!("MONGO_CONNECTION_STRING not set, search history is kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let source = Arc::new(PokeApiClient::new(
        &config.pokeapi_base_url,
        Duration::from_secs(config.pokeapi_timeout_secs),
    )?);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(store, source, config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Web server started and running at http://localhost:{}", addr.port());

    let mut shutdown = AnyOf::new(ConsoleShutdown::stdio(), CtrlC);
    tokio::select! {
        served = axum::serve(listener, app).into_future() => served?,
        _ = shutdown.wait() => tracing::info!("Shutting down the server"),
    }

    Ok(())
}
