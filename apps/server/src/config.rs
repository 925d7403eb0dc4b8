// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables and `.env`.

use pokedex_core::DEFAULT_BASE_URL;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// MongoDB connection string. Unset means an in-memory history.
    pub mongo_uri: Option<String>,
    /// Database holding the history collection.
    pub mongo_db: String,
    /// Collection holding one document per search.
    pub mongo_collection: String,
    /// MongoDB server selection / connect timeout in seconds.
    pub mongo_timeout_secs: u64,
    /// PokeAPI base URL, without trailing slash.
    pub pokeapi_base_url: String,
    /// Timeout for a single PokeAPI request in seconds.
    pub pokeapi_timeout_secs: u64,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Emit JSON logs instead of pretty ones.
    pub json_logs: bool,
}

impl Config {
    /// Load configuration from `.env` in the working directory, if present.
    ///
    /// Process environment variables take precedence over the file.
    pub fn load() -> Result<Self, dotenvy::Error> {
        Self::load_from(Path::new(".env"))
    }

    /// Load configuration from the given env file overlaid by the process environment.
    /// A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self, dotenvy::Error> {
        let mut file_vars = HashMap::new();
        match dotenvy::from_path_iter(path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item?;
                    file_vars.insert(key, value);
                }
            }
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e),
        }

        Ok(Self::from_vars(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_vars.get(key).cloned())
        }))
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: var("PORT")
                .unwrap_or_else(|| "5000".into())
                .parse()
                .unwrap_or(5000),
            mongo_uri: var("MONGO_CONNECTION_STRING").filter(|s| !s.trim().is_empty()),
            mongo_db: var("MONGO_DB_NAME").unwrap_or_else(|| "pokedex".into()),
            mongo_collection: var("MONGO_COLLECTION").unwrap_or_else(|| "searches".into()),
            mongo_timeout_secs: var("MONGO_TIMEOUT_SECS")
                .unwrap_or_else(|| "5".into())
                .parse()
                .unwrap_or(5),
            pokeapi_base_url: var("POKEAPI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.into())
                .trim_end_matches('/')
                .to_string(),
            pokeapi_timeout_secs: var("POKEAPI_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".into())
                .parse()
                .unwrap_or(10),
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".into())
                .parse()
                .unwrap_or(30),
            static_dir: var("STATIC_DIR")
                .unwrap_or_else(|| "static".into())
                .into(),
            json_logs: var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(|_| None);
        assert_eq!(config.port, 5000);
        assert_eq!(config.mongo_uri, None);
        assert_eq!(config.mongo_db, "pokedex");
        assert_eq!(config.mongo_collection, "searches");
        assert_eq!(config.pokeapi_base_url, DEFAULT_BASE_URL);
        assert!(config.mongo_timeout_secs < config.request_timeout_secs);
    }

    #[test]
    fn test_blank_connection_string_means_memory() {
        let config = Config::from_vars(|key| {
            (key == "MONGO_CONNECTION_STRING").then(|| "  ".to_string())
        });
        assert_eq!(config.mongo_uri, None);
    }

    #[test]
    fn test_env_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# deployment settings").unwrap();
        writeln!(file, "MONGO_CONNECTION_STRING=\"mongodb://db.internal:27017\"").unwrap();
        writeln!(file, "MONGO_DB_NAME=CMSC335_DB").unwrap();
        writeln!(file, "MONGO_COLLECTION=pokemonParty").unwrap();
        drop(file);

        let config = Config::load_from(&path).unwrap();

        // Values the process environment does not override come from the file.
        if std::env::var("MONGO_CONNECTION_STRING").is_err() {
            assert_eq!(
                config.mongo_uri.as_deref(),
                Some("mongodb://db.internal:27017")
            );
        }
        if std::env::var("MONGO_DB_NAME").is_err() {
            assert_eq!(config.mongo_db, "CMSC335_DB");
        }
        if std::env::var("MONGO_COLLECTION").is_err() {
            assert_eq!(config.mongo_collection, "pokemonParty");
        }
    }

    #[test]
    fn test_missing_env_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join(".env")).is_ok());
    }
}
