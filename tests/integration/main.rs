// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod catalog_verify;
mod channel_tables;
mod no_stderr;
mod step_tables;

use std::{
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};
use indoc::indoc;

/// The example catalog used throughout these tests. Both annuli see 211 GHz
/// at step210; nothing is illuminated at step216.
const CATALOG: &str = indoc! {"
    # radius [mm], number of detectors, then frequency [GHz] at each step
    radius  detector_count  step210  step211  step216
    50.0    4               211.0    212.5    -
    80.0    6               211.0    211.0    -
"};

fn fpi_dettable() -> Command {
    let mut cmd = Command::cargo_bin("fpi-dettable").unwrap();
    // Don't let the environment running the tests change the paths used.
    cmd.env_remove("FPI_CATALOG").env_remove("FPI_OUTPUT_DIR");
    cmd
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Write the example catalog into `dir` and return its path.
fn write_catalog(dir: &Path) -> PathBuf {
    let path = dir.join("annuli.txt");
    std::fs::write(&path, CATALOG).unwrap();
    path
}

/// All of the files under `dir`, relative to `dir`, sorted.
fn list_files(dir: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, files: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, files);
            } else {
                let relative = path.strip_prefix(root).unwrap();
                files.push(relative.display().to_string().replace('\\', "/"));
            }
        }
    }

    let mut files = vec![];
    walk(dir, dir, &mut files);
    files.sort_unstable();
    files
}
