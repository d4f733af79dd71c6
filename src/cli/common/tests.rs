// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{num::NonZeroUsize, path::PathBuf};

use indexmap::IndexMap;
use tempfile::{NamedTempFile, TempDir};

use super::*;
use crate::catalog::Annulus;

fn catalog() -> Catalog {
    Catalog::new(vec![Annulus {
        radius_mm: 50.0,
        detector_count: NonZeroUsize::new(4).unwrap(),
        frequency_by_step: IndexMap::from([
            ("step210".to_string(), 211.0),
            ("step211".to_string(), 212.0),
            ("step212".to_string(), 213.0),
        ]),
    }])
    .unwrap()
}

#[test]
fn test_parse_steps() {
    let catalog = catalog();
    assert_eq!(
        parse_steps(&catalog, None).unwrap(),
        ["step210", "step211", "step212"]
    );
    // The user's order is kept, and repeats are dropped.
    let steps = vec![
        "step212".to_string(),
        "step210".to_string(),
        "step212".to_string(),
    ];
    assert_eq!(
        parse_steps(&catalog, Some(steps)).unwrap(),
        ["step212", "step210"]
    );

    let result = parse_steps(&catalog, Some(vec!["step9".to_string()]));
    assert!(matches!(
        result,
        Err(CommonArgsError::UnknownStep { step, available })
            if step == "step9" && available == "step210, step211, step212"
    ));
    assert!(matches!(
        parse_steps(&catalog, Some(vec![])),
        Err(CommonArgsError::NoSteps)
    ));
}

#[test]
fn test_output_args() {
    let params = OutputArgs::default().parse("test").unwrap();
    assert_eq!(params.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    assert_eq!(params.output_type, DetTableType::Fits);

    let params = OutputArgs {
        output_dir: Some(PathBuf::from("somewhere")),
        format: Some(".YAML".to_string()),
    }
    .parse("test")
    .unwrap();
    assert_eq!(params.output_dir, PathBuf::from("somewhere"));
    assert_eq!(params.output_type, DetTableType::Yaml);

    let result = OutputArgs {
        output_dir: None,
        format: Some("h5".to_string()),
    }
    .parse("test");
    assert!(matches!(result, Err(CommonArgsError::InvalidOutputFormat(f)) if f == "h5"));

    let file = NamedTempFile::new().unwrap();
    let result = OutputArgs {
        output_dir: Some(file.path().to_path_buf()),
        format: None,
    }
    .parse("test");
    assert!(matches!(result, Err(CommonArgsError::OutputDirIsFile(_))));
}

#[test]
fn test_catalog_args() {
    assert!(matches!(
        CatalogArgs::default().parse(),
        Err(CommonArgsError::NoCatalog)
    ));

    let tmp_dir = TempDir::new().unwrap();
    let missing = tmp_dir.path().join("missing.txt");
    assert!(matches!(
        CatalogArgs {
            catalog: Some(missing),
            catalog_type: None
        }
        .parse(),
        Err(CommonArgsError::CatalogDoesNotExist(_))
    ));

    // A json catalog with a misleading extension.
    let path = tmp_dir.path().join("annuli.dat");
    std::fs::write(
        &path,
        r#"{"annuli": [{"radius": 50.0, "detector_count": 4, "frequencies": {"step1": 211.0}}]}"#,
    )
    .unwrap();
    assert!(matches!(
        CatalogArgs {
            catalog: Some(path.clone()),
            catalog_type: Some("toml".to_string())
        }
        .parse(),
        Err(CommonArgsError::InvalidCatalogType(t)) if t == "toml"
    ));
    assert!(matches!(
        CatalogArgs {
            catalog: Some(path.clone()),
            catalog_type: None
        }
        .parse(),
        Err(CommonArgsError::ReadCatalog(_))
    ));
    let catalog = CatalogArgs {
        catalog: Some(path),
        catalog_type: Some("JSON".to_string()),
    }
    .parse()
    .unwrap();
    assert_eq!(catalog.num_detectors(), 4);
}

#[test]
fn test_merge_prefers_self() {
    let cli = CatalogArgs {
        catalog: Some(PathBuf::from("cli.txt")),
        catalog_type: None,
    };
    let file = CatalogArgs {
        catalog: Some(PathBuf::from("file.txt")),
        catalog_type: Some("text".to_string()),
    };
    let merged = cli.merge(file);
    assert_eq!(merged.catalog, Some(PathBuf::from("cli.txt")));
    assert_eq!(merged.catalog_type.as_deref(), Some("text"));

    let merged = OutputArgs::default().merge(OutputArgs {
        output_dir: Some(PathBuf::from("out")),
        format: None,
    });
    assert_eq!(merged.output_dir, Some(PathBuf::from("out")));
    assert!(merged.format.is_none());
}
