// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use super::DETTABLE_TYPES_COMMA_SEPARATED;

/// Errors associated with writing out a detector table.
#[derive(Error, Debug)]
pub enum WriteDetTableError {
    #[error("'{0}' is an invalid file type for a detector table; must have one of the following extensions: {}", *DETTABLE_TYPES_COMMA_SEPARATED)]
    InvalidFormat(String),

    #[error("Detector {name} has ring index {index}, which is too large for a FITS detector table")]
    IndexTooLarge { name: String, index: usize },

    #[error(transparent)]
    Fitsio(#[from] fitsio::errors::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// An IO error.
    #[error(transparent)]
    IO(#[from] std::io::Error),
}
