// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fitsio::FitsFile;
use tempfile::TempDir;

use crate::{fpi_dettable, get_cmd_output, list_files, write_catalog};

#[test]
fn test_step_tables_layout() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_catalog(tmp_dir.path());
    let out = tmp_dir.path().join("fpi_data");

    #[rustfmt::skip]
    let cmd = fpi_dettable()
        .args([
            "step-tables",
            "--catalog", &catalog.display().to_string(),
            "--output-dir", &out.display().to_string(),
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "step-tables failed: {}", cmd.err().unwrap());

    assert_eq!(
        list_files(&out),
        [
            "fpisteps_h5/fpistep210/step210_dettable.fits",
            "fpisteps_h5/fpistep211/step211_dettable.fits",
            "fpisteps_h5/fpistep216/step216_dettable.fits",
        ]
    );

    let mut fptr = FitsFile::open(out.join("fpisteps_h5/fpistep210/step210_dettable.fits")).unwrap();
    let hdu = fptr.primary_hdu().unwrap();
    let ndet: i64 = hdu.read_key(&mut fptr, "NDET").unwrap();
    assert_eq!(ndet, 10);
    let hdu = fptr.hdu("DETTABLE").unwrap();
    let names: Vec<String> = hdu.read_col(&mut fptr, "NAME").unwrap();
    assert_eq!(names[0], "R50_D000");
    assert_eq!(names[9], "R80_D005");

    // The empty step is warned about.
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("step216"), "{stdout}");
}

#[test]
fn test_step_tables_subset_and_format() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_catalog(tmp_dir.path());
    let out = tmp_dir.path().join("out");

    #[rustfmt::skip]
    let cmd = fpi_dettable()
        .env("FPI_CATALOG", &catalog)
        .env("FPI_OUTPUT_DIR", &out)
        .args([
            "step-tables",
            "--steps", "step211",
            "--format", "yaml",
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "step-tables failed: {}", cmd.err().unwrap());
    assert_eq!(
        list_files(&out),
        ["fpisteps_h5/fpistep211/step211_dettable.yaml"]
    );

    let contents =
        std::fs::read_to_string(out.join("fpisteps_h5/fpistep211/step211_dettable.yaml")).unwrap();
    assert_eq!(contents.matches("name:").count(), 10);
    assert!(!contents.contains("channel:"));
}

#[test]
fn test_step_tables_dry_run_writes_nothing() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_catalog(tmp_dir.path());
    let out = tmp_dir.path().join("out");

    #[rustfmt::skip]
    let cmd = fpi_dettable()
        .args([
            "step-tables",
            "-c", &catalog.display().to_string(),
            "-o", &out.display().to_string(),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "step-tables failed: {}", cmd.err().unwrap());
    assert!(!out.exists());
}

#[test]
fn test_step_tables_unknown_step() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_catalog(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = fpi_dettable()
        .args([
            "step-tables",
            "-c", &catalog.display().to_string(),
            "-o", &tmp_dir.path().join("out").display().to_string(),
            "--steps", "step999",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("step999"), "{stderr}");
}

#[test]
fn test_step_tables_bad_catalog() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = tmp_dir.path().join("bad.txt");
    std::fs::write(&catalog, "radius detector_count step210\n50 4 211\n80 6\n").unwrap();
    let out = tmp_dir.path().join("out");

    #[rustfmt::skip]
    let cmd = fpi_dettable()
        .args([
            "step-tables",
            "-c", &catalog.display().to_string(),
            "-o", &out.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Catalog line 3"), "{stderr}");
    // Nothing is written for a bad catalog.
    assert!(!out.exists());
}
