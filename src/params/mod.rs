// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters for producing detector tables.
//!
//! The code here is kind of "mirroring" the code within the `cli` module; the
//! idea is that `cli` is unparsed, user-facing code, whereas parameters have
//! been parsed and validated and are ready to be used directly.

mod channel_tables;
mod step_tables;

pub(crate) use channel_tables::ChannelTablesParams;
pub(crate) use step_tables::StepTablesParams;

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use thiserror::Error;

use crate::{
    catalog::{step_label, Channel},
    constants::{CHANNEL_TABLES_DIR, STEP_TABLES_DIR},
    dettable::{DetTableType, WriteDetTableError},
    PROGRESS_BARS,
};

/// Where and how detector tables are written.
#[derive(Debug, Clone)]
pub(crate) struct OutputTableParams {
    /// The root of all output; the per-case directories go in here.
    pub(crate) output_dir: PathBuf,

    pub(crate) output_type: DetTableType,
}

impl OutputTableParams {
    /// `<out>/fpisteps_h5/fpistep<LABEL>/step<LABEL>_dettable.<ext>`
    pub(crate) fn step_table_path(&self, step: &str) -> PathBuf {
        let label = step_label(step);
        self.output_dir
            .join(STEP_TABLES_DIR)
            .join(format!("fpistep{label}"))
            .join(format!("step{label}_dettable.{}", self.output_type))
    }

    /// `<out>/fchl_h5/chnl_<CH>/f<CH>_step<LABEL>_d<ROWS>_dettable.<ext>`
    pub(crate) fn channel_table_path(
        &self,
        channel: &Channel,
        step: &str,
        num_rows: usize,
    ) -> PathBuf {
        self.output_dir
            .join(CHANNEL_TABLES_DIR)
            .join(channel.dir_name())
            .join(format!(
                "f{channel}_step{}_d{num_rows}_dettable.{}",
                step_label(step),
                self.output_type
            ))
    }
}

/// Errors from producing a set of detector tables. Each carries the step (and
/// channel) that was being worked on when things went wrong.
#[derive(Error, Debug)]
pub(crate) enum DetTablesError {
    #[error("Couldn't create the output directory '{}': {err}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    #[error("Couldn't write the detector table for {step} to '{}': {err}", path.display())]
    WriteStep {
        step: String,
        path: PathBuf,
        #[source]
        err: WriteDetTableError,
    },

    #[error("Couldn't write the detector table for channel {channel} at {step} to '{}': {err}", path.display())]
    WriteChannel {
        channel: String,
        step: String,
        path: PathBuf,
        #[source]
        err: WriteDetTableError,
    },
}

/// Make sure the directory that `path` will be written into exists.
fn create_parent_dir(path: &Path) -> Result<(), DetTablesError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| DetTablesError::CreateDir {
            path: parent.to_path_buf(),
            err,
        })?;
    }
    Ok(())
}

fn tables_progress_bar(len: usize, message: &'static str) -> ProgressBar {
    ProgressBar::with_draw_target(
        Some(len as _),
        if PROGRESS_BARS.load() {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        },
    )
    .with_style(
        ProgressStyle::default_bar()
            .template("{msg:16}: [{wide_bar:.blue}] {pos:3}/{len:3} ({elapsed_precise}<{eta_precise})")
            .unwrap()
            .progress_chars("=> "),
    )
    .with_position(0)
    .with_message(message)
}
