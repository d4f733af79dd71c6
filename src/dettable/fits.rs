// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! FITS detector tables.
//!
//! The primary HDU carries provenance keys (SOFTWARE, NDET and, when there
//! are rows, STEP and CHANNEL); the detectors are in a binary table extension
//! named [`DETTABLE_EXTNAME`].

use std::path::Path;

use fitsio::{
    tables::{ColumnDataType, ColumnDescription},
    FitsFile,
};

use super::{Detector, WriteDetTableError};
use crate::constants::DETTABLE_EXTNAME;

/// Double-precision columns, their units and how to get them from a row.
const DOUBLE_COLUMNS: [(&str, &str, fn(&Detector) -> f64); 9] = [
    ("X_MM", "mm", |d| d.x_mm),
    ("Y_MM", "mm", |d| d.y_mm),
    ("QUAT_X", "", |d| d.quat[0]),
    ("QUAT_Y", "", |d| d.quat[1]),
    ("QUAT_Z", "", |d| d.quat[2]),
    ("QUAT_W", "", |d| d.quat[3]),
    ("POL_ANG", "deg", |d| d.pol_angle_deg),
    ("FREQ", "GHz", |d| d.freq_ghz),
    ("RADIUS", "mm", |d| d.radius_mm),
];

pub(super) fn write_dettable(path: &Path, rows: &[Detector]) -> Result<(), WriteDetTableError> {
    let indices = rows
        .iter()
        .map(|d| {
            i32::try_from(d.index).map_err(|_| WriteDetTableError::IndexTooLarge {
                name: d.name.clone(),
                index: d.index,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // cfitsio won't overwrite an existing file.
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    let mut fptr = FitsFile::create(path).open()?;
    let hdu = fptr.hdu(0)?;

    hdu.write_key(
        &mut fptr,
        "SOFTWARE",
        format!(
            "Created by {} v{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ),
    )?;
    hdu.write_key(&mut fptr, "NDET", rows.len() as i64)?;
    if let Some(first) = rows.first() {
        hdu.write_key(&mut fptr, "STEP", first.step.clone())?;
        if let Some(channel) = &first.channel {
            hdu.write_key(&mut fptr, "CHANNEL", channel.clone())?;
        }
    }

    let names = rows.iter().map(|d| d.name.clone()).collect::<Vec<_>>();
    let steps = rows.iter().map(|d| d.step.clone()).collect::<Vec<_>>();
    // String columns need a width of at least 1.
    let max_name = names.iter().map(|s| s.len()).max().unwrap_or(0).max(1);
    let max_step = steps.iter().map(|s| s.len()).max().unwrap_or(0).max(1);

    let mut table_description = vec![
        ColumnDescription::new("NAME")
            .with_type(ColumnDataType::String)
            .that_repeats(max_name)
            .create()?,
        ColumnDescription::new("INDEX")
            .with_type(ColumnDataType::Int)
            .create()?,
    ];
    for (col, _, _) in DOUBLE_COLUMNS {
        table_description.push(
            ColumnDescription::new(col)
                .with_type(ColumnDataType::Double)
                .create()?,
        );
    }
    table_description.push(
        ColumnDescription::new("STEP")
            .with_type(ColumnDataType::String)
            .that_repeats(max_step)
            .create()?,
    );
    let hdu = fptr.create_table(DETTABLE_EXTNAME, &table_description)?;

    // Units. NAME and INDEX are the first two columns.
    for (i_col, (_, unit, _)) in DOUBLE_COLUMNS.iter().enumerate() {
        if !unit.is_empty() {
            hdu.write_key(&mut fptr, &format!("TUNIT{}", i_col + 3), unit.to_string())?;
        }
    }

    if rows.is_empty() {
        return Ok(());
    }
    hdu.write_col(&mut fptr, "NAME", &names)?;
    hdu.write_col(&mut fptr, "INDEX", &indices)?;
    for (col, _, get) in DOUBLE_COLUMNS {
        let data = rows.iter().map(get).collect::<Vec<f64>>();
        hdu.write_col(&mut fptr, col, &data)?;
    }
    hdu.write_col(&mut fptr, "STEP", &steps)?;

    Ok(())
}
