// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing of text-table catalogs.
//!
//! The first line that isn't blank or a comment (starting with '#') is the
//! header. It must contain a "radius" column, a "detector_count" (or "ndet")
//! column, and at least one step column (any column whose name starts with
//! "step"). Cells are comma separated if the header contains a comma,
//! otherwise they are whitespace separated. An unilluminated cell is written
//! as "-", "nan" or left empty (comma-separated tables only).
//!
//! ```text
//! # EoR-Spec annuli
//! radius    detector_count  step210  step211  step212
//! 50.0      4               211.0    212.5    -
//! 80.0      6               -        211.0    212.5
//! ```

use std::num::NonZeroUsize;

use indexmap::IndexMap;

use super::{Annulus, Catalog, ReadCatalogError};
use crate::cli::Warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Comma,
    Whitespace,
}

impl Delimiter {
    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Comma => line.split(',').map(|c| c.trim()).collect(),
            Delimiter::Whitespace => line.split_ascii_whitespace().collect(),
        }
    }
}

/// Where the columns we care about are.
#[derive(Debug)]
struct Header {
    delimiter: Delimiter,
    num_cells: usize,
    radius_col: usize,
    count_col: usize,
    step_cols: Vec<(usize, String)>,
}

impl Header {
    fn parse(line: &str, line_num: u32) -> Result<Header, ReadCatalogError> {
        let delimiter = if line.contains(',') {
            Delimiter::Comma
        } else {
            Delimiter::Whitespace
        };
        let cells = delimiter.split(line);

        let mut radius_col = None;
        let mut count_col = None;
        let mut step_cols: Vec<(usize, String)> = vec![];
        for (i_col, &cell) in cells.iter().enumerate() {
            let lower = cell.to_lowercase();
            let slot = match lower.as_str() {
                "radius" | "radius_mm" => &mut radius_col,
                "detector_count" | "ndet" => &mut count_col,
                s if s.starts_with("step") => {
                    if step_cols.iter().any(|(_, existing)| existing == cell) {
                        return Err(ReadCatalogError::DuplicateColumn {
                            line_num,
                            column: cell.to_string(),
                        });
                    }
                    step_cols.push((i_col, cell.to_string()));
                    continue;
                }
                _ => {
                    format!("Catalog line {line_num}: Ignoring unrecognised column '{cell}'")
                        .warn();
                    continue;
                }
            };
            if slot.replace(i_col).is_some() {
                return Err(ReadCatalogError::DuplicateColumn {
                    line_num,
                    column: cell.to_string(),
                });
            }
        }

        let radius_col = radius_col.ok_or(ReadCatalogError::MissingColumn { column: "radius" })?;
        let count_col = count_col.ok_or(ReadCatalogError::MissingColumn {
            column: "detector_count",
        })?;
        if step_cols.is_empty() {
            return Err(ReadCatalogError::NoStepColumns(line_num));
        }

        Ok(Header {
            delimiter,
            num_cells: cells.len(),
            radius_col,
            count_col,
            step_cols,
        })
    }

    fn steps(&self) -> Vec<String> {
        self.step_cols.iter().map(|(_, s)| s.clone()).collect()
    }

    fn parse_row(&self, line: &str, line_num: u32) -> Result<Annulus, ReadCatalogError> {
        let cells = self.delimiter.split(line);
        if cells.len() != self.num_cells {
            return Err(ReadCatalogError::WrongCellCount {
                line_num,
                expected: self.num_cells,
                got: cells.len(),
            });
        }

        let radius_mm = parse_float(cells[self.radius_col], line_num)?;
        let count_str = cells[self.count_col];
        let count = count_str
            .parse::<usize>()
            .map_err(|_| ReadCatalogError::ParseDetectorCount {
                line_num,
                string: count_str.to_string(),
            })?;
        let detector_count = NonZeroUsize::new(count)
            .ok_or(ReadCatalogError::ZeroDetectorCount { radius: radius_mm })?;

        let mut frequency_by_step = IndexMap::with_capacity(self.step_cols.len());
        for (i_col, step) in &self.step_cols {
            let cell = cells[*i_col];
            if is_unilluminated(cell) {
                continue;
            }
            frequency_by_step.insert(step.clone(), parse_float(cell, line_num)?);
        }

        Ok(Annulus {
            radius_mm,
            detector_count,
            frequency_by_step,
        })
    }
}

fn is_unilluminated(cell: &str) -> bool {
    cell.is_empty() || cell == "-" || cell.eq_ignore_ascii_case("nan")
}

fn parse_float(string: &str, line_num: u32) -> Result<f64, ReadCatalogError> {
    string.parse().map_err(|_| ReadCatalogError::ParseFloat {
        line_num,
        string: string.to_string(),
    })
}

/// Parse a buffer containing a text-table catalog into a [`Catalog`]. The
/// steps of the catalog are in header-column order.
pub(crate) fn parse_catalog<T: std::io::BufRead>(buf: &mut T) -> Result<Catalog, ReadCatalogError> {
    let mut line = String::new();
    let mut line_num: u32 = 0;
    let mut header: Option<Header> = None;
    let mut annuli = vec![];

    while buf.read_line(&mut line)? > 0 {
        line_num += 1;

        // Handle lines that aren't intended to parsed (comments and blank
        // lines).
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            line.clear();
            continue;
        }

        if let Some(h) = &header {
            annuli.push(h.parse_row(trimmed, line_num)?);
        } else {
            header = Some(Header::parse(trimmed, line_num)?);
        }
        line.clear();
    }

    let header = header.ok_or(ReadCatalogError::NoHeader)?;
    Catalog::with_steps(annuli, header.steps())
}
