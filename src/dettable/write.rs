// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing detector tables to disk.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};

use log::{debug, trace};

use super::{fits, DetTableType, Detector, WriteDetTableError};

impl DetTableType {
    /// Determine the table type from a file extension.
    pub fn from_path(path: &Path) -> Result<DetTableType, WriteDetTableError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        ext.as_deref()
            .and_then(|e| DetTableType::from_str(e).ok())
            .ok_or_else(|| {
                WriteDetTableError::InvalidFormat(ext.unwrap_or_else(|| "<no extension>".to_string()))
            })
    }
}

/// Write `rows` to `path`; the table type is determined by the file
/// extension. Any existing file at `path` is replaced. The parent directory
/// of `path` must already exist.
///
/// The same rows always produce the same bytes; nothing time- or
/// invocation-dependent is written.
pub fn export<P: AsRef<Path>>(rows: &[Detector], path: P) -> Result<(), WriteDetTableError> {
    fn inner(rows: &[Detector], path: &Path) -> Result<(), WriteDetTableError> {
        trace!("Attempting to write detector table {}", path.display());
        let dettable_type = DetTableType::from_path(path)?;

        match dettable_type {
            DetTableType::Fits => fits::write_dettable(path, rows)?,

            DetTableType::Yaml => {
                let mut f = BufWriter::new(File::create(path)?);
                serde_yaml::to_writer(&mut f, rows)?;
                f.flush()?;
            }

            DetTableType::Json => {
                let mut f = BufWriter::new(File::create(path)?);
                serde_json::to_writer_pretty(&mut f, rows)?;
                f.flush()?;
            }
        }
        debug!(
            "Wrote {}-style detector table with {} detectors to {}",
            dettable_type,
            rows.len(),
            path.display()
        );

        Ok(())
    }
    inner(rows, path.as_ref())
}
