// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{fpi_dettable, get_cmd_output, write_catalog};

#[test]
fn test_step_tables_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_catalog(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = fpi_dettable()
        .args([
            "step-tables",
            "-c", &catalog.display().to_string(),
            "-o", &tmp_dir.path().join("out").display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "step-tables failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_channel_tables_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_catalog(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = fpi_dettable()
        .args([
            "channel-tables",
            "-c", &catalog.display().to_string(),
            "-o", &tmp_dir.path().join("out").display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "channel-tables failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_catalog_verify_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_catalog(tmp_dir.path());

    let cmd = fpi_dettable()
        .args(["catalog-verify", &catalog.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "catalog-verify failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
