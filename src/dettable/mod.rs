// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Detector tables: one row per detector, carrying its geometry, the
//! frequency it observes and where that frequency came from.
//!
//! There is only one way of building rows ([`assemble`]); step tables and
//! channel tables differ only in which annuli they select.

mod error;
mod fits;
pub mod write;

pub use error::WriteDetTableError;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
    catalog::{Annulus, Catalog, Channel},
    geometry::{detector_name, geometry_for, DetectorGeometry},
};

/// All of the supported detector-table file types.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
)]
pub enum DetTableType {
    #[default]
    #[strum(serialize = "fits")]
    Fits,

    #[strum(serialize = "yaml")]
    Yaml,

    #[strum(serialize = "json")]
    Json,
}

lazy_static::lazy_static! {
    pub(crate) static ref DETTABLE_TYPES_COMMA_SEPARATED: String = DetTableType::iter().join(", ");
}

/// A single row of a detector table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detector {
    /// Unique within any table, and the same for the same physical detector
    /// in every table.
    pub name: String,

    /// The radius of this detector's annulus [mm].
    pub radius_mm: f64,

    /// The position of this detector around its ring.
    pub index: usize,

    /// Focal-plane x coordinate [mm].
    pub x_mm: f64,

    /// Focal-plane y coordinate [mm].
    pub y_mm: f64,

    /// Pointing relative to the boresight, scalar last.
    pub quat: [f64; 4],

    /// [degrees]
    pub pol_angle_deg: f64,

    /// The frequency observed at `step` [GHz].
    pub freq_ghz: f64,

    pub step: String,

    /// Only set for channel tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl Detector {
    fn new(annulus: &Annulus, geometry: DetectorGeometry, freq_ghz: f64, step: &str) -> Detector {
        let DetectorGeometry {
            index,
            x_mm,
            y_mm,
            quat,
            pol_angle_deg,
        } = geometry;
        Detector {
            name: detector_name(annulus.radius_mm, index),
            radius_mm: annulus.radius_mm,
            index,
            x_mm,
            y_mm,
            quat,
            pol_angle_deg,
            freq_ghz,
            step: step.to_string(),
            channel: None,
        }
    }
}

/// Build the rows of a detector table for `step`. Every annulus that is
/// illuminated at `step` and accepted by `predicate` contributes one row per
/// detector. Rows are ordered by annulus (in catalog order), then by ring
/// index.
///
/// This is a pure function of its inputs.
pub fn assemble<F>(catalog: &Catalog, step: &str, mut predicate: F) -> Vec<Detector>
where
    F: FnMut(&Annulus, f64) -> bool,
{
    catalog
        .annuli()
        .iter()
        .filter_map(|annulus| annulus.freq_at(step).map(|freq| (annulus, freq)))
        .filter(|(annulus, freq)| predicate(annulus, *freq))
        .flat_map(|(annulus, freq)| {
            geometry_for(annulus)
                .into_iter()
                .map(move |g| Detector::new(annulus, g, freq, step))
        })
        .collect()
}

/// Every detector on the focal plane that is illuminated at `step`. Annuli
/// that are unilluminated at `step` are skipped; an unknown step gives an
/// empty table.
pub fn assemble_step_table(catalog: &Catalog, step: &str) -> Vec<Detector> {
    assemble(catalog, step, |_, _| true)
}

/// Every detector observing `channel` at `step`. An annulus belongs to the
/// channel that owns its frequency ([`Catalog::channel_of`]), so a detector is
/// in at most one of the catalog's channel tables at any step. If nothing
/// observes the channel at this step, the table is empty.
pub fn assemble_channel_step_table(
    catalog: &Catalog,
    channel: &Channel,
    step: &str,
) -> Vec<Detector> {
    let mut rows = assemble(catalog, step, |_, freq| {
        catalog
            .channel_of(freq)
            .map_or(false, |owner| channel.matches(owner.freq_ghz))
    });
    for row in &mut rows {
        row.channel = Some(channel.name.clone());
    }
    rows
}
