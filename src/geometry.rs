// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Placement of detectors around their annulus.
//!
//! Detectors are spaced at equal angular increments starting from
//! [`REFERENCE_ANGLE_DEG`]. Nothing here is random; the same annulus always
//! yields the same geometry, and a detector's name depends only on its radius
//! and its index around the ring. This is what lets a detector appear with
//! identical geometry in both step tables and channel tables.

use nalgebra::{UnitQuaternion, Vector3};

use crate::{
    catalog::Annulus,
    constants::{PLATE_SCALE_DEG_PER_MM, POLARISATION_OFFSET_DEG, REFERENCE_ANGLE_DEG},
};

/// Where a single detector is on the focal plane, and how it is oriented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorGeometry {
    /// The position of this detector around its ring.
    pub index: usize,

    /// Focal-plane x coordinate [mm].
    pub x_mm: f64,

    /// Focal-plane y coordinate [mm].
    pub y_mm: f64,

    /// The pointing of this detector relative to the boresight, as a
    /// scalar-last quaternion `[x, y, z, w]`.
    pub quat: [f64; 4],

    /// Polarisation angle [degrees], in `[0, 360)`.
    pub pol_angle_deg: f64,
}

/// The geometry of every detector on `annulus`, in ring order.
pub fn geometry_for(annulus: &Annulus) -> Vec<DetectorGeometry> {
    let radius = annulus.radius_mm;
    let num_detectors = annulus.detector_count.get();
    let increment_deg = 360.0 / num_detectors as f64;

    (0..num_detectors)
        .map(|index| {
            let angle_deg = REFERENCE_ANGLE_DEG + index as f64 * increment_deg;
            let (sin, cos) = angle_deg.to_radians().sin_cos();
            let x_mm = radius * cos;
            let y_mm = radius * sin;
            let pol_angle_deg = (angle_deg + POLARISATION_OFFSET_DEG).rem_euclid(360.0);
            let quat = xieta_to_quat(
                (x_mm * PLATE_SCALE_DEG_PER_MM).to_radians(),
                (y_mm * PLATE_SCALE_DEG_PER_MM).to_radians(),
                pol_angle_deg.to_radians(),
            );

            DetectorGeometry {
                index,
                x_mm,
                y_mm,
                quat,
                pol_angle_deg,
            }
        })
        .collect()
}

/// Convert sky offsets from the boresight (xi, eta) and an orientation angle
/// gamma (all radians) into a scalar-last quaternion `[x, y, z, w]`.
///
/// The rotation is `Rz(phi) Ry(theta) Rz(psi)`, where theta is the angular
/// distance from the boresight, phi is the direction of the offset and
/// `psi = gamma - phi`.
pub fn xieta_to_quat(xi: f64, eta: f64, gamma: f64) -> [f64; 4] {
    let theta = xi.hypot(eta);
    let phi = eta.atan2(xi);
    let psi = gamma - phi;

    let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), phi)
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), theta)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), psi);
    let c = q.coords;
    [c.x, c.y, c.z, c.w]
}

/// The name of a detector. This is a pure function of the annulus radius and
/// the detector's index around the ring; radii are unique in a catalog, so
/// names are too.
pub fn detector_name(radius_mm: f64, index: usize) -> String {
    format!("R{radius_mm}_D{index:03}")
}
