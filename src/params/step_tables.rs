// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Case 1: one detector table per FPI step, containing every illuminated
//! detector on the focal plane.

use std::path::PathBuf;

use log::{debug, info, warn};

use super::{create_parent_dir, tables_progress_bar, DetTablesError, OutputTableParams};
use crate::{catalog::Catalog, dettable::assemble_step_table, export};

pub(crate) struct StepTablesParams {
    pub(crate) catalog: Catalog,

    /// The steps to produce tables for, in output order. These are all steps
    /// of the catalog.
    pub(crate) steps: Vec<String>,

    pub(crate) output: OutputTableParams,
}

impl StepTablesParams {
    /// Write a table for every step, returning the paths written. The first
    /// failure stops everything.
    pub(crate) fn run(&self) -> Result<Vec<PathBuf>, DetTablesError> {
        let Self {
            catalog,
            steps,
            output,
        } = self;

        info!("Writing {} step tables", steps.len());
        let progress = tables_progress_bar(steps.len(), "Step tables");
        let mut written = Vec::with_capacity(steps.len());
        for step in steps {
            let rows = assemble_step_table(catalog, step);
            if rows.is_empty() {
                warn!("No annuli are illuminated at {step}; its table is empty");
            }

            let path = output.step_table_path(step);
            create_parent_dir(&path)?;
            export(&rows, &path).map_err(|err| DetTablesError::WriteStep {
                step: step.clone(),
                path: path.clone(),
                err,
            })?;
            debug!("{step}: {} detectors -> {}", rows.len(), path.display());

            written.push(path);
            progress.inc(1);
        }
        progress.abandon_with_message("Finished");

        info!(
            "Wrote {} step tables to {}",
            written.len(),
            output.output_dir.display()
        );
        Ok(written)
    }
}
