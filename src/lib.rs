// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Detector-table generation for the EoR-Spec Fabry-Pérot interferometer (FPI)
focal plane.

Every annulus of detectors observes a frequency that depends on the current
FPI step. Given a catalog of annulus radii and their frequency at each step,
this crate produces detector tables either per step (every detector on the
plane) or per frequency channel (one table for every step at which that
channel is illuminated).
 */

pub mod catalog;
mod cli;
pub mod constants;
pub mod dettable;
pub mod geometry;
pub(crate) mod params;

// Re-exports.
pub use catalog::{read::read_catalog_file, Annulus, Catalog, CatalogType, Channel};
pub use cli::{FpiDettable, FpiError};
pub use dettable::{
    assemble, assemble_channel_step_table, assemble_step_table, write::export, DetTableType,
    Detector,
};

use crossbeam_utils::atomic::AtomicCell;

/// Are progress bars being drawn? This should only ever be enabled by CLI
/// code.
pub(crate) static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);
