// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All lengths on the focal plane are in millimetres, all frequencies are in GHz
and all angles handed to users are in degrees.
 */

/// The plate scale of the EoR-Spec optics [degrees / mm].
pub const PLATE_SCALE_DEG_PER_MM: f64 = 0.00495;

/// The angle of the first detector on every annulus, measured from the
/// focal-plane +x axis [degrees].
pub const REFERENCE_ANGLE_DEG: f64 = 0.0;

/// Detectors are oriented tangentially to their ring; this is added to the
/// position angle to get the polarisation angle [degrees].
pub const POLARISATION_OFFSET_DEG: f64 = 90.0;

/// Two frequencies closer than this are considered the same channel [GHz].
pub const CHANNEL_FREQ_TOLERANCE_GHZ: f64 = 1e-3;

/// The default root of all output detector tables.
pub const DEFAULT_OUTPUT_DIR: &str = "fpi_data";

/// The directory (under the output root) holding the per-step tables.
pub const STEP_TABLES_DIR: &str = "fpisteps_h5";

/// The directory (under the output root) holding the per-channel tables.
pub const CHANNEL_TABLES_DIR: &str = "fchl_h5";

/// The name of the binary-table extension inside FITS detector tables.
pub const DETTABLE_EXTNAME: &str = "DETTABLE";
