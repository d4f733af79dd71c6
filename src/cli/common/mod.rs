// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. Both `step-tables` and
//! `channel-tables` read a catalog and write detector tables, so the same
//! catalog and output arguments are shared between them.

mod printers;
#[cfg(test)]
mod tests;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{
    catalog::{
        read::read_catalog_file, Catalog, CatalogCounts, CatalogType, ReadCatalogError,
        CATALOG_TYPES_COMMA_SEPARATED,
    },
    constants::DEFAULT_OUTPUT_DIR,
    dettable::{DetTableType, DETTABLE_TYPES_COMMA_SEPARATED},
    params::OutputTableParams,
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref CATALOG_TYPE_HELP: String =
        format!("The type of the annulus-frequency catalog. Valid types are: {}. If not specified, the type is determined from the file extension (anything unrecognised is a text table)", *CATALOG_TYPES_COMMA_SEPARATED);

    static ref OUTPUT_FORMAT_HELP: String =
        format!("The file format of the detector tables. Valid formats are: {}. Default: {}", *DETTABLE_TYPES_COMMA_SEPARATED, DetTableType::default());

    static ref OUTPUT_DIR_HELP: String =
        format!("The directory that all detector tables are written under. Default: {DEFAULT_OUTPUT_DIR}");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(FpiError::ArgFile(format!(
                            "Couldn't decode toml structure from {}:\n{err}",
                            $arg_file.display()
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(FpiError::ArgFile(format!(
                            "Couldn't decode json structure from {}:\n{err}",
                            $arg_file.display()
                        )))
                    }
                }
            }

            _ => {
                return Err(FpiError::ArgFile(format!(
                    "Argument file '{}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file.display(), *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Arguments for the annulus-frequency catalog.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct CatalogArgs {
    /// Path to the annulus-frequency catalog.
    #[clap(short, long, env = "FPI_CATALOG", parse(from_os_str), help_heading = "CATALOG")]
    pub(super) catalog: Option<PathBuf>,

    #[clap(long, help = CATALOG_TYPE_HELP.as_str(), help_heading = "CATALOG")]
    pub(super) catalog_type: Option<String>,
}

impl CatalogArgs {
    /// Prefer `self`'s arguments over `other`'s.
    pub(super) fn merge(self, other: Self) -> Self {
        CatalogArgs {
            catalog: self.catalog.or(other.catalog),
            catalog_type: self.catalog_type.or(other.catalog_type),
        }
    }

    pub(super) fn parse(self) -> Result<Catalog, CommonArgsError> {
        let CatalogArgs {
            catalog,
            catalog_type,
        } = self;

        let path = catalog.ok_or(CommonArgsError::NoCatalog)?;
        if !path.exists() {
            return Err(CommonArgsError::CatalogDoesNotExist(path));
        }
        let catalog_type = catalog_type
            .map(|t| {
                CatalogType::from_str(&t.to_lowercase())
                    .map_err(|_| CommonArgsError::InvalidCatalogType(t))
            })
            .transpose()?;

        let (catalog, catalog_type) = read_catalog_file(&path, catalog_type)?;

        let mut printer = InfoPrinter::new("Catalog info".into());
        printer.push_line(format!("{} ({catalog_type})", path.display()).into());
        let CatalogCounts {
            num_annuli,
            num_detectors,
            num_steps,
            num_channels,
        } = catalog.get_counts();
        printer.push_block(vec![
            format!("{num_annuli} annuli, {num_detectors} detectors").into(),
            format!("{num_steps} FPI steps, {num_channels} frequency channels").into(),
        ]);
        printer.display();

        Ok(catalog)
    }
}

/// Arguments for where detector tables go.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct OutputArgs {
    #[clap(short, long, env = "FPI_OUTPUT_DIR", help = OUTPUT_DIR_HELP.as_str(), parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output_dir: Option<PathBuf>,

    #[clap(long, help = OUTPUT_FORMAT_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) format: Option<String>,
}

impl OutputArgs {
    /// Prefer `self`'s arguments over `other`'s.
    pub(super) fn merge(self, other: Self) -> Self {
        OutputArgs {
            output_dir: self.output_dir.or(other.output_dir),
            format: self.format.or(other.format),
        }
    }

    pub(super) fn parse(self, description: &str) -> Result<OutputTableParams, CommonArgsError> {
        let OutputArgs { output_dir, format } = self;

        let output_dir = output_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let output_type = match format {
            None => DetTableType::default(),
            Some(f) => DetTableType::from_str(f.trim_start_matches('.').to_lowercase().as_str())
                .map_err(|_| CommonArgsError::InvalidOutputFormat(f))?,
        };
        if output_dir.is_file() {
            return Err(CommonArgsError::OutputDirIsFile(output_dir));
        }

        let mut printer = InfoPrinter::new(format!("Output {description} info").into());
        printer.push_line(format!("Writing {output_type} tables under {}", output_dir.display()).into());
        printer.display();

        Ok(OutputTableParams {
            output_dir,
            output_type,
        })
    }
}

/// Turn the user's step selection into steps of the catalog, in the order the
/// user gave them. No selection means all of the catalog's steps.
pub(super) fn parse_steps(
    catalog: &Catalog,
    steps: Option<Vec<String>>,
) -> Result<Vec<String>, CommonArgsError> {
    let steps = match steps {
        None => catalog.steps().to_vec(),
        Some(steps) => {
            let mut parsed = Vec::with_capacity(steps.len());
            for step in steps.into_iter().unique() {
                match catalog.get_step(&step) {
                    Some(s) => parsed.push(s.to_string()),
                    None => {
                        return Err(CommonArgsError::UnknownStep {
                            step,
                            available: catalog.steps().join(", "),
                        })
                    }
                }
            }
            parsed
        }
    };
    if steps.is_empty() {
        return Err(CommonArgsError::NoSteps);
    }
    debug!("Using steps: {steps:?}");
    Ok(steps)
}

#[derive(Error, Debug)]
pub(super) enum CommonArgsError {
    #[error("No catalog was supplied (use -c or set FPI_CATALOG)")]
    NoCatalog,

    #[error("The specified catalog '{}' does not exist", .0.display())]
    CatalogDoesNotExist(PathBuf),

    #[error("'{0}' is not a catalog type; valid types are: {}", *CATALOG_TYPES_COMMA_SEPARATED)]
    InvalidCatalogType(String),

    #[error("'{0}' is not a detector-table format; valid formats are: {}", *DETTABLE_TYPES_COMMA_SEPARATED)]
    InvalidOutputFormat(String),

    #[error("The output directory '{}' is a file", .0.display())]
    OutputDirIsFile(PathBuf),

    #[error("The step '{step}' is not in the catalog; available steps are: {available}")]
    UnknownStep { step: String, available: String },

    #[error("No FPI steps were selected")]
    NoSteps,

    #[error(transparent)]
    ReadCatalog(#[from] ReadCatalogError),
}
