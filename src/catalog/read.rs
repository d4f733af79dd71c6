// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common code for reading annulus-frequency catalog files.

use std::{fs::File, io::BufReader, path::Path};

use log::{debug, trace};

use super::{structured, text, Catalog, CatalogType, ReadCatalogError};

/// Given the path to a catalog file (and optionally its type), return a
/// [`Catalog`]. If the type isn't given, it is determined from the file
/// extension: "yaml"/"yml" and "json" are structured catalogs, anything else
/// is treated as a text table. The [`CatalogType`] is also returned in case
/// that's interesting to the caller.
pub fn read_catalog_file<P: AsRef<Path>>(
    path: P,
    catalog_type: Option<CatalogType>,
) -> Result<(Catalog, CatalogType), ReadCatalogError> {
    fn inner(
        path: &Path,
        catalog_type: Option<CatalogType>,
    ) -> Result<(Catalog, CatalogType), ReadCatalogError> {
        debug!("Attempting to read catalog {}", path.display());

        let catalog_type = catalog_type.unwrap_or_else(|| {
            let ext = path
                .extension()
                .and_then(|os_str| os_str.to_str())
                .map(|s| s.to_lowercase());
            match ext.as_deref() {
                Some("yaml" | "yml") => CatalogType::Yaml,
                Some("json") => CatalogType::Json,
                _ => CatalogType::Text,
            }
        });
        trace!("Reading as a {catalog_type} catalog");

        let mut f = BufReader::new(File::open(path)?);
        let catalog = match catalog_type {
            CatalogType::Text => text::parse_catalog(&mut f)?,
            CatalogType::Yaml => structured::catalog_from_yaml(&mut f)?,
            CatalogType::Json => structured::catalog_from_json(&mut f)?,
        };
        debug!(
            "Read {} annuli and {} steps from {}",
            catalog.len(),
            catalog.steps().len(),
            path.display()
        );

        Ok((catalog, catalog_type))
    }
    inner(path.as_ref(), catalog_type)
}
