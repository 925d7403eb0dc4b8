// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PokeAPI REST client.

use anyhow::Context;
use async_trait::async_trait;
use pokedex_core::{ApiPokemon, Error, Identifier, Lookup, PokemonSource, Result};
use reqwest::{StatusCode, Url};
use std::time::Duration;

/// PokeAPI REST client.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl PokeApiClient {
    /// Create a client for the given base URL (e.g. `https://pokeapi.co/api/v2`).
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("invalid PokeAPI base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("PokeAPI base URL cannot carry a path: {base_url}");
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { base_url, http })
    }

    /// `{base}/pokemon/{segment}/`, with the segment percent-encoded.
    fn pokemon_url(&self, segment: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("pokemon").push(segment).push("");
        }
        url
    }
}

#[async_trait]
impl PokemonSource for PokeApiClient {
    async fn fetch(&self, identifier: &Identifier) -> Result<Lookup> {
        let url = self.pokemon_url(&identifier.api_path_segment());
        tracing::debug!(url = %url, "PokeAPI request");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::LookupFailed(format!("PokeAPI request failed: {e}")))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            tracing::info!(term = %identifier, "PokeAPI has no such pokemon");
            return Ok(Lookup::NotFound);
        }
        if !status.is_success() {
            return Err(Error::LookupFailed(format!("PokeAPI returned {}", status)));
        }

        let body: ApiPokemon = resp
            .json()
            .await
            .map_err(|e| Error::LookupFailed(format!("PokeAPI response parse failed: {e}")))?;

        tracing::info!(name = %body.name, poke_id = body.id, "Fetched pokemon from PokeAPI");
        Ok(Lookup::Found(body.into_record()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> PokeApiClient {
        PokeApiClient::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_url_has_trailing_slash() {
        let url = client("https://pokeapi.co/api/v2").pokemon_url("pikachu");
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/pikachu/");
    }

    #[test]
    fn test_base_url_trailing_slash_is_ignored() {
        let url = client("https://pokeapi.co/api/v2/").pokemon_url("25");
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/25/");
    }

    #[test]
    fn test_segment_is_percent_encoded() {
        let url = client("http://localhost:1").pokemon_url("../admin?x");
        assert_eq!(url.as_str(), "http://localhost:1/pokemon/..%2Fadmin%3Fx/");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(PokeApiClient::new("not a url", Duration::from_secs(1)).is_err());
    }
}
