// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Errors associated with reading in an annulus-frequency catalog. Any of
/// these means the catalog is malformed or incomplete; no detector tables can
/// be made from it.
#[derive(Error, Debug)]
pub enum ReadCatalogError {
    #[error("Catalog error: No header line was found; is the file empty?")]
    NoHeader,

    #[error("Catalog error: The required column '{column}' is missing from the header")]
    MissingColumn { column: &'static str },

    #[error("Catalog line {line_num}: The column '{column}' appears more than once")]
    DuplicateColumn { line_num: u32, column: String },

    #[error("Catalog line {0}: No FPI-step frequency columns were found (column names must start with 'step', e.g. 'step210')")]
    NoStepColumns(u32),

    #[error("Catalog line {line_num}: Expected {expected} cells, but found {got}")]
    WrongCellCount {
        line_num: u32,
        expected: usize,
        got: usize,
    },

    /// Error when converting a string to a float.
    #[error("Catalog line {line_num}: Error converting string '{string}' to a float")]
    ParseFloat { line_num: u32, string: String },

    #[error("Catalog line {line_num}: Error converting string '{string}' to a detector count")]
    ParseDetectorCount { line_num: u32, string: String },

    #[error("Catalog error: The annulus at radius {radius} mm has a detector count of 0")]
    ZeroDetectorCount { radius: f64 },

    #[error("Catalog error: Annulus radius {0} mm is invalid; radii must be finite and non-negative")]
    InvalidRadius(f64),

    #[error("Catalog error: The annulus at radius {radius} mm has an invalid frequency {freq} GHz at {step}; frequencies must be finite and positive")]
    InvalidFrequency { radius: f64, step: String, freq: f64 },

    #[error("Catalog error: More than one annulus has the radius {0} mm")]
    DuplicateRadius(f64),

    #[error("Catalog error: The step '{0}' appears more than once")]
    DuplicateStep(String),

    #[error("Catalog error: The steps '{first}' and '{second}' would both be written as '{label}'; step names must differ after any leading 'step'")]
    StepLabelCollision {
        first: String,
        second: String,
        label: String,
    },

    #[error("Catalog error: The annulus at radius {radius} mm uses the undeclared step '{step}'")]
    UndeclaredStep { radius: f64, step: String },

    #[error("Catalog error: No annuli were found")]
    NoAnnuli,

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
