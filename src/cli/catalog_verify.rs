// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to verify annulus-frequency catalogs.

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use itertools::Itertools;
use log::info;

use super::common::{display_warnings, CommonArgsError, CATALOG_TYPE_HELP};
use crate::{
    catalog::{read::read_catalog_file, CatalogCounts, CatalogType},
    FpiError,
};

/// Verify that annulus-frequency catalogs can be read, and summarise them.
#[derive(Parser, Debug)]
pub(super) struct CatalogVerifyArgs {
    /// Path to the catalog(s) to be verified.
    #[clap(name = "CATALOGS", parse(from_os_str))]
    catalogs: Vec<PathBuf>,

    #[clap(short = 'i', long, help = CATALOG_TYPE_HELP.as_str())]
    catalog_type: Option<String>,
}

impl CatalogVerifyArgs {
    /// Read and print stats out for each input catalog. If a catalog couldn't
    /// be read, print the error, and continue trying to read the other
    /// catalogs. If the `catalog_type` is given, then all provided catalogs are
    /// assumed to be of that type, otherwise each catalog's type is guessed.
    pub(super) fn run(&self) -> Result<(), FpiError> {
        if self.catalogs.is_empty() {
            return Err(CommonArgsError::NoCatalog.into());
        }
        let catalog_type = self
            .catalog_type
            .as_ref()
            .map(|t| {
                CatalogType::from_str(&t.to_lowercase())
                    .map_err(|_| CommonArgsError::InvalidCatalogType(t.clone()))
            })
            .transpose()?;

        for path in &self.catalogs {
            info!("{}:", path.display());

            let result = read_catalog_file(path, catalog_type);
            display_warnings();
            let (catalog, catalog_type) = match result {
                Ok(c) => c,
                Err(e) => {
                    info!("{}", e);
                    info!("");
                    continue;
                }
            };
            info!("    {}-style catalog", catalog_type);
            let CatalogCounts {
                num_annuli,
                num_detectors,
                num_steps,
                num_channels,
            } = catalog.get_counts();
            info!("    {num_annuli} annuli, {num_detectors} detectors");
            info!(
                "    {num_steps} FPI steps: {}",
                catalog.steps().iter().join(", ")
            );
            info!(
                "    {num_channels} frequency channels [GHz]: {}",
                catalog.channels().iter().join(", ")
            );
            for step in catalog.steps() {
                let num_dark = catalog
                    .annuli()
                    .iter()
                    .filter(|a| a.freq_at(step).is_none())
                    .count();
                if num_dark == num_annuli {
                    info!("    No annuli are illuminated at {step}");
                }
            }
            info!("");
        }

        Ok(())
    }
}
