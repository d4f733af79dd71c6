// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code for annulus-frequency catalogs. A catalog describes every ring of
//! detectors on the focal plane (its radius and how many detectors sit on it)
//! and the frequency that ring observes at each FPI step.

mod channel;
mod error;
pub mod read;
pub(crate) mod structured;
pub(crate) mod text;

pub use channel::{Channel, ParseChannelError};
pub use error::ReadCatalogError;

use std::{
    collections::{HashMap, HashSet},
    num::NonZeroUsize,
};

use indexmap::IndexMap;
use itertools::Itertools;
use strum::IntoEnumIterator;

/// All of the supported annulus-frequency catalog file types.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
)]
pub enum CatalogType {
    /// A whitespace- or comma-separated table with a header line.
    #[strum(serialize = "text")]
    Text,

    #[strum(serialize = "yaml")]
    Yaml,

    #[strum(serialize = "json")]
    Json,
}

lazy_static::lazy_static! {
    pub(crate) static ref CATALOG_TYPES_COMMA_SEPARATED: String = CatalogType::iter().join(", ");
}

/// One physical ring of detectors on the focal plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Annulus {
    /// Distance from the focal-plane centre [mm].
    pub radius_mm: f64,

    /// The number of detectors spaced uniformly around the ring.
    pub detector_count: NonZeroUsize,

    /// The frequency observed by this ring at each FPI step [GHz]. Steps
    /// without an entry are steps at which this ring is unilluminated.
    pub frequency_by_step: IndexMap<String, f64>,
}

impl Annulus {
    /// The frequency this ring observes at `step`, if it is illuminated.
    pub fn freq_at(&self, step: &str) -> Option<f64> {
        self.frequency_by_step.get(step).copied()
    }
}

/// The static input of a run. Once constructed, a catalog is never mutated;
/// all detector tables are derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    annuli: Vec<Annulus>,
    steps: Vec<String>,
    channels: Vec<Channel>,
}

/// Summary numbers for a [`Catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub num_annuli: usize,
    pub num_detectors: usize,
    pub num_steps: usize,
    pub num_channels: usize,
}

impl Catalog {
    /// Create a catalog from annuli. The steps of the catalog are the union of
    /// all steps used by the annuli, in the order they first appear.
    pub fn new(annuli: Vec<Annulus>) -> Result<Catalog, ReadCatalogError> {
        let steps = annuli
            .iter()
            .flat_map(|a| a.frequency_by_step.keys())
            .unique()
            .cloned()
            .collect();
        Self::with_steps(annuli, steps)
    }

    /// Create a catalog from annuli and an explicit step ordering (e.g. the
    /// column order of a table). Every step used by an annulus must be in
    /// `steps`; steps that no annulus uses are allowed. No two steps may share
    /// a [`step_label`], as the label names their output files.
    pub fn with_steps(
        annuli: Vec<Annulus>,
        steps: Vec<String>,
    ) -> Result<Catalog, ReadCatalogError> {
        if annuli.is_empty() {
            return Err(ReadCatalogError::NoAnnuli);
        }

        let mut seen_steps = HashSet::with_capacity(steps.len());
        let mut seen_labels: HashMap<&str, &str> = HashMap::with_capacity(steps.len());
        for step in &steps {
            if !seen_steps.insert(step.as_str()) {
                return Err(ReadCatalogError::DuplicateStep(step.clone()));
            }
            if let Some(first) = seen_labels.insert(step_label(step), step.as_str()) {
                return Err(ReadCatalogError::StepLabelCollision {
                    first: first.to_string(),
                    second: step.clone(),
                    label: step_label(step).to_string(),
                });
            }
        }

        for annulus in &annuli {
            let radius = annulus.radius_mm;
            if !radius.is_finite() || radius < 0.0 {
                return Err(ReadCatalogError::InvalidRadius(radius));
            }
            for (step, &freq) in &annulus.frequency_by_step {
                if !seen_steps.contains(step.as_str()) {
                    return Err(ReadCatalogError::UndeclaredStep {
                        radius,
                        step: step.clone(),
                    });
                }
                if !freq.is_finite() || freq <= 0.0 {
                    return Err(ReadCatalogError::InvalidFrequency {
                        radius,
                        step: step.clone(),
                        freq,
                    });
                }
            }
        }

        // Radii must be unique; no two annuli share geometry.
        let mut radii = annuli.iter().map(|a| a.radius_mm).collect::<Vec<_>>();
        radii.sort_unstable_by(f64::total_cmp);
        if let Some(w) = radii.windows(2).find(|w| w[0] == w[1]) {
            return Err(ReadCatalogError::DuplicateRadius(w[0]));
        }

        let channels = derive_channels(&annuli);
        Ok(Catalog {
            annuli,
            steps,
            channels,
        })
    }

    /// The annuli, in source order.
    pub fn annuli(&self) -> &[Annulus] {
        &self.annuli
    }

    /// The FPI steps, in source order.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Find a step by its identifier.
    pub fn get_step(&self, step: &str) -> Option<&str> {
        self.steps
            .iter()
            .find(|s| s.as_str() == step)
            .map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.annuli.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annuli.is_empty()
    }

    /// The total number of detectors on the focal plane.
    pub fn num_detectors(&self) -> usize {
        self.annuli.iter().map(|a| a.detector_count.get()).sum()
    }

    /// Every distinct frequency observed by any annulus at any step, as
    /// channels in ascending frequency order. Every observed frequency is
    /// within [`crate::constants::CHANNEL_FREQ_TOLERANCE_GHZ`] of at least one
    /// channel, and channels are always further apart than the tolerance.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// The channel that owns `freq_ghz`: the nearest of [`Catalog::channels`],
    /// with ties going to the lower channel. Every observed frequency has
    /// exactly one owner, even when it is within tolerance of two channels.
    pub fn channel_of(&self, freq_ghz: f64) -> Option<&Channel> {
        self.channels.iter().min_by(|a, b| {
            (a.freq_ghz - freq_ghz)
                .abs()
                .total_cmp(&(b.freq_ghz - freq_ghz).abs())
        })
    }

    pub fn get_counts(&self) -> CatalogCounts {
        CatalogCounts {
            num_annuli: self.len(),
            num_detectors: self.num_detectors(),
            num_steps: self.steps.len(),
            num_channels: self.channels().len(),
        }
    }
}

fn derive_channels(annuli: &[Annulus]) -> Vec<Channel> {
    let mut freqs = annuli
        .iter()
        .flat_map(|a| a.frequency_by_step.values().copied())
        .collect::<Vec<_>>();
    freqs.sort_unstable_by(f64::total_cmp);

    let mut channels: Vec<Channel> = vec![];
    for freq in freqs {
        match channels.last() {
            Some(c) if c.matches(freq) => (),
            _ => channels.push(Channel::from_freq(freq)),
        }
    }
    channels
}

/// The short label of a step used in output paths, e.g. "step210" -> "210".
/// Identifiers that don't start with "step" are used as they are.
pub fn step_label(step: &str) -> &str {
    match step.strip_prefix("step") {
        Some(label) if !label.is_empty() => label,
        _ => step,
    }
}
