// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{
    display_warnings, parse_steps, CatalogArgs, InfoPrinter, OutputArgs, ARG_FILE_HELP,
};
use crate::{params::StepTablesParams, FpiError};

/// Write one detector table per FPI step, containing every detector that is
/// illuminated at that step.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct StepTablesArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// Only write tables for these steps (e.g. step210 step211). The default
    /// is every step in the catalog.
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

impl StepTablesArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<StepTablesArgs, FpiError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Ensure all of the file args are accounted for by pattern
            // matching.
            let StepTablesArgs {
                args_file: _,
                steps,
                catalog_args,
                output_args,
            } = unpack_arg_file!(arg_file);

            Ok(StepTablesArgs {
                args_file: None,
                steps: cli_args.steps.or(steps),
                catalog_args: cli_args.catalog_args.merge(catalog_args),
                output_args: cli_args.output_args.merge(output_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<StepTablesParams, FpiError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            steps,
            catalog_args,
            output_args,
        } = self;

        let catalog = catalog_args.parse()?;
        let steps = parse_steps(&catalog, steps)?;
        let output = output_args.parse("step table")?;

        let mut printer = InfoPrinter::new("Step tables".into());
        printer.push_line(format!("{} steps: {}", steps.len(), steps.join(", ")).into());
        printer.display();

        display_warnings();

        Ok(StepTablesParams {
            catalog,
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
