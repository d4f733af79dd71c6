// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all fpi_dettable-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use super::{channel_tables::ChannelTablesArgsError, common::CommonArgsError};
use crate::{catalog::ReadCatalogError, dettable::WriteDetTableError, params::DetTablesError};

const README: &str = "the README";

/// The *only* publicly visible error from fpi_dettable. Each error message
/// should point to the relevant part of the documentation, unless it's
/// "generic".
#[derive(Error, Debug)]
pub enum FpiError {
    /// An error related to reading or selecting from a catalog.
    #[error("{0}\n\nSee the \"Catalogs\" section of {README} for the supported catalog formats")]
    Catalog(String),

    /// An error related to writing detector tables.
    #[error("{0}\n\nSee the \"Detector tables\" section of {README} for the output layout and formats")]
    Export(String),

    /// An error related to argument files.
    #[error("{0}\n\nSee the \"Argument files\" section of {README}")]
    ArgFile(String),

    /// A cfitsio error. Because these are usually quite spartan, some
    /// suggestions are provided here.
    #[error("cfitsio error: {0}\n\nIf you don't know what this means, try turning up verbosity (-v or -vv) and maybe disabling progress bars.")]
    Cfitsio(String),

    /// A generic error that can't be clarified further with documentation, e.g.
    /// IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<CommonArgsError> for FpiError {
    fn from(e: CommonArgsError) -> Self {
        let s = e.to_string();
        match e {
            CommonArgsError::NoCatalog
            | CommonArgsError::CatalogDoesNotExist(_)
            | CommonArgsError::InvalidCatalogType(_)
            | CommonArgsError::UnknownStep { .. }
            | CommonArgsError::NoSteps => Self::Catalog(s),
            CommonArgsError::InvalidOutputFormat(_) | CommonArgsError::OutputDirIsFile(_) => {
                Self::Export(s)
            }
            CommonArgsError::ReadCatalog(e) => Self::from(e),
        }
    }
}

impl From<ChannelTablesArgsError> for FpiError {
    fn from(e: ChannelTablesArgsError) -> Self {
        let s = e.to_string();
        match e {
            ChannelTablesArgsError::NoChannels => Self::Catalog(s),
            ChannelTablesArgsError::ParseChannel(_) => Self::Generic(s),
        }
    }
}

impl From<ReadCatalogError> for FpiError {
    fn from(e: ReadCatalogError) -> Self {
        let s = e.to_string();
        match e {
            ReadCatalogError::IO(e) => Self::from(e),
            _ => Self::Catalog(s),
        }
    }
}

impl From<WriteDetTableError> for FpiError {
    fn from(e: WriteDetTableError) -> Self {
        let s = e.to_string();
        match e {
            WriteDetTableError::Fitsio(_) => Self::Cfitsio(s),
            WriteDetTableError::InvalidFormat(_) | WriteDetTableError::IndexTooLarge { .. } => {
                Self::Export(s)
            }
            WriteDetTableError::Yaml(_)
            | WriteDetTableError::Json(_)
            | WriteDetTableError::IO(_) => Self::Generic(s),
        }
    }
}

impl From<DetTablesError> for FpiError {
    fn from(e: DetTablesError) -> Self {
        let s = e.to_string();
        match e {
            DetTablesError::CreateDir { .. } => Self::Export(s),
            DetTablesError::WriteStep { err, .. } | DetTablesError::WriteChannel { err, .. } => {
                // Keep the step and channel context, but categorise by the
                // underlying error.
                match Self::from(err) {
                    Self::Cfitsio(_) => Self::Cfitsio(s),
                    Self::Generic(_) => Self::Generic(s),
                    _ => Self::Export(s),
                }
            }
        }
    }
}

impl From<std::io::Error> for FpiError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
