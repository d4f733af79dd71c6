// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use itertools::Itertools;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{
    display_warnings, parse_steps, CatalogArgs, InfoPrinter, OutputArgs, Warn, ARG_FILE_HELP,
};
use crate::{
    catalog::{Catalog, Channel, ParseChannelError},
    params::ChannelTablesParams,
    FpiError,
};

/// For every frequency channel, write one detector table per FPI step at which
/// that channel is observed.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ChannelTablesArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The frequency channels to write tables for [GHz] (e.g. 211 212.5, or
    /// chnl_211). The default is every frequency in the catalog.
    #[clap(long, multiple_values(true))]
    pub(super) channels: Option<Vec<String>>,

    /// Only consider these steps (e.g. step210 step211). The default is every
    /// step in the catalog.
    #[clap(short, long, multiple_values(true))]
    pub(super) steps: Option<Vec<String>>,

    #[clap(flatten)]
    #[serde(rename = "catalog")]
    #[serde(default)]
    pub(super) catalog_args: CatalogArgs,

    #[clap(flatten)]
    #[serde(rename = "output")]
    #[serde(default)]
    pub(super) output_args: OutputArgs,
}

impl ChannelTablesArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<ChannelTablesArgs, FpiError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let ChannelTablesArgs {
                args_file: _,
                channels,
                steps,
                catalog_args,
                output_args,
            } = unpack_arg_file!(arg_file);

            Ok(ChannelTablesArgs {
                args_file: None,
                channels: cli_args.channels.or(channels),
                steps: cli_args.steps.or(steps),
                catalog_args: cli_args.catalog_args.merge(catalog_args),
                output_args: cli_args.output_args.merge(output_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<ChannelTablesParams, FpiError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            channels,
            steps,
            catalog_args,
            output_args,
        } = self;

        let catalog = catalog_args.parse()?;
        let steps = parse_steps(&catalog, steps)?;
        let channels = parse_channels(&catalog, channels)?;
        let output = output_args.parse("channel table")?;

        let mut printer = InfoPrinter::new("Channel tables".into());
        printer.push_line(
            format!(
                "{} channels [GHz]: {}",
                channels.len(),
                channels.iter().join(", ")
            )
            .into(),
        );
        printer.push_line(format!("{} steps: {}", steps.len(), steps.join(", ")).into());
        printer.display();

        display_warnings();

        Ok(ChannelTablesParams {
            catalog,
            channels,
            steps,
            output,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), FpiError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

/// Turn the user's channel selection into [`Channel`]s. No selection means all
/// of the catalog's channels. A requested channel within tolerance of a
/// catalog channel becomes that catalog channel. Requested channels that the
/// catalog never observes are kept, but warned about.
pub(super) fn parse_channels(
    catalog: &Catalog,
    channels: Option<Vec<String>>,
) -> Result<Vec<Channel>, ChannelTablesArgsError> {
    let channels = match channels {
        None => catalog.channels().to_vec(),
        Some(channels) => {
            let mut parsed: Vec<Channel> = Vec::with_capacity(channels.len());
            for s in channels {
                let requested = Channel::from_str(&s)?;
                let channel = match catalog
                    .channel_of(requested.freq_ghz)
                    .filter(|c| c.matches(requested.freq_ghz))
                {
                    Some(c) => c.clone(),
                    None => {
                        format!(
                            "Channel {requested} GHz is not observed by any annulus in the catalog"
                        )
                        .warn();
                        requested
                    }
                };
                if parsed.iter().any(|c| c.name == channel.name) {
                    continue;
                }
                parsed.push(channel);
            }
            parsed
        }
    };
    if channels.is_empty() {
        return Err(ChannelTablesArgsError::NoChannels);
    }
    Ok(channels)
}

#[derive(Error, Debug)]
pub(super) enum ChannelTablesArgsError {
    #[error("No frequency channels were selected")]
    NoChannels,

    #[error(transparent)]
    ParseChannel(#[from] ParseChannelError),
}
