// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for IDF text operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core crate.
///
/// The tokenizer itself never fails; malformed input degrades to records
/// flagged with `well_formed == false`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No {kind} record named '{name}'")]
    RecordNotFound { kind: String, name: String },

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl Error {
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Error::RecordNotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }
}
