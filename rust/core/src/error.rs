// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for search operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while searching or managing history
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid search term: {0}")]
    InvalidSearch(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Pokemon lookup failed: {0}")]
    LookupFailed(String),
}
