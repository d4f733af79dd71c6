// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Case 2: for every frequency channel, one detector table per FPI step at
//! which some annulus observes that channel.

use std::path::PathBuf;

use log::{debug, info, warn};

use super::{create_parent_dir, tables_progress_bar, DetTablesError, OutputTableParams};
use crate::{
    catalog::{Catalog, Channel},
    dettable::assemble_channel_step_table,
    export,
};

pub(crate) struct ChannelTablesParams {
    pub(crate) catalog: Catalog,

    pub(crate) channels: Vec<Channel>,

    /// The steps to consider for each channel, in output order.
    pub(crate) steps: Vec<String>,

    pub(crate) output: OutputTableParams,
}

impl ChannelTablesParams {
    /// Write a table for every (channel, step) combination that has at least
    /// one detector, returning the paths written. Empty combinations are
    /// skipped. The first failure stops everything.
    pub(crate) fn run(&self) -> Result<Vec<PathBuf>, DetTablesError> {
        let Self {
            catalog,
            channels,
            steps,
            output,
        } = self;

        info!(
            "Writing channel tables for {} channels over {} steps",
            channels.len(),
            steps.len()
        );
        let progress = tables_progress_bar(channels.len() * steps.len(), "Channel tables");
        let mut written = vec![];
        for channel in channels {
            let mut num_channel_tables = 0;
            for step in steps {
                progress.inc(1);
                let rows = assemble_channel_step_table(catalog, channel, step);
                if rows.is_empty() {
                    debug!("Channel {channel} is not observed at {step}; skipping");
                    continue;
                }

                let path = output.channel_table_path(channel, step, rows.len());
                create_parent_dir(&path)?;
                export(&rows, &path).map_err(|err| DetTablesError::WriteChannel {
                    channel: channel.name.clone(),
                    step: step.clone(),
                    path: path.clone(),
                    err,
                })?;
                debug!(
                    "Channel {channel}, {step}: {} detectors -> {}",
                    rows.len(),
                    path.display()
                );

                written.push(path);
                num_channel_tables += 1;
            }

            if num_channel_tables == 0 {
                warn!("Channel {channel} is not observed at any of the requested steps");
            }
        }
        progress.abandon_with_message("Finished");

        info!(
            "Wrote {} channel tables to {}",
            written.len(),
            output.output_dir.display()
        );
        Ok(written)
    }
}
