// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read yaml and json catalogs.
//!
//! ```yaml
//! annuli:
//!   - radius: 50.0
//!     detector_count: 4
//!     frequencies:
//!       step210: 211.0
//!       step211: 212.5
//!   - radius: 80.0
//!     detector_count: 6
//!     frequencies:
//!       step211: 211.0
//!       step212: ~
//! ```
//!
//! A null frequency is the same as a missing one: the annulus is
//! unilluminated at that step.

use std::num::NonZeroUsize;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::Deserialize;

use super::{Annulus, Catalog, ReadCatalogError};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    annuli: Vec<AnnulusEntry>,
}

#[derive(Debug, Deserialize)]
struct AnnulusEntry {
    radius: f64,
    detector_count: usize,
    #[serde(default)]
    frequencies: IndexMap<String, Option<f64>>,
}

impl TryFrom<AnnulusEntry> for Annulus {
    type Error = ReadCatalogError;

    fn try_from(entry: AnnulusEntry) -> Result<Self, Self::Error> {
        let AnnulusEntry {
            radius,
            detector_count,
            frequencies,
        } = entry;
        let detector_count = NonZeroUsize::new(detector_count)
            .ok_or(ReadCatalogError::ZeroDetectorCount { radius })?;
        Ok(Annulus {
            radius_mm: radius,
            detector_count,
            frequency_by_step: frequencies
                .into_iter()
                .filter_map(|(step, freq)| freq.map(|f| (step, f)))
                .collect(),
        })
    }
}

fn into_catalog(file: CatalogFile) -> Result<Catalog, ReadCatalogError> {
    // Steps with null frequencies are still steps of the catalog.
    let steps = file
        .annuli
        .iter()
        .flat_map(|a| a.frequencies.keys())
        .unique()
        .cloned()
        .collect();
    let annuli = file
        .annuli
        .into_iter()
        .map(Annulus::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Catalog::with_steps(annuli, steps)
}

/// Convert a yaml file to a [`Catalog`].
pub(crate) fn catalog_from_yaml<T: std::io::BufRead>(
    buf: &mut T,
) -> Result<Catalog, ReadCatalogError> {
    let file: CatalogFile = serde_yaml::from_reader(buf)?;
    into_catalog(file)
}

/// Convert a json file to a [`Catalog`].
pub(crate) fn catalog_from_json<T: std::io::BufRead>(
    buf: &mut T,
) -> Result<Catalog, ReadCatalogError> {
    let file: CatalogFile = serde_json::from_reader(buf)?;
    into_catalog(file)
}
