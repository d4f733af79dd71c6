// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::CHANNEL_FREQ_TOLERANCE_GHZ;

/// A nominal spectral band. Different annuli may realise the same channel at
/// different FPI steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// The identifier used in output paths, e.g. "211".
    pub name: String,

    /// The nominal frequency [GHz].
    pub freq_ghz: f64,
}

impl Channel {
    /// Make a channel from its nominal frequency. The name is the shortest
    /// representation of the frequency, i.e. 211.0 GHz is "211".
    pub fn from_freq(freq_ghz: f64) -> Channel {
        Channel {
            name: format!("{freq_ghz}"),
            freq_ghz,
        }
    }

    /// Is `freq_ghz` this channel's frequency?
    pub fn matches(&self, freq_ghz: f64) -> bool {
        (self.freq_ghz - freq_ghz).abs() <= CHANNEL_FREQ_TOLERANCE_GHZ
    }

    /// The name of the directory holding this channel's tables.
    pub fn dir_name(&self) -> String {
        format!("chnl_{}", self.name)
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Channel {
    type Err = ParseChannelError;

    /// Accepts "211", "211.0", "211.5" or "chnl_211".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let freq_str = trimmed.strip_prefix("chnl_").unwrap_or(trimmed);
        match freq_str.parse::<f64>() {
            Ok(f) if f.is_finite() && f > 0.0 => Ok(Channel::from_freq(f)),
            _ => Err(ParseChannelError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Couldn't parse '{0}' as a frequency channel; expected a positive frequency in GHz, e.g. '211', '211.5' or 'chnl_211'")]
pub struct ParseChannelError(pub String);
