// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::TempDir;

use crate::{fpi_dettable, get_cmd_output, write_catalog};

#[test]
fn test_catalog_verify() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let good = write_catalog(tmp_dir.path());
    let bad = tmp_dir.path().join("bad.yaml");
    std::fs::write(&bad, "annuli: []\n").unwrap();

    // A bad catalog is reported, but doesn't stop the others being verified.
    let cmd = fpi_dettable()
        .args([
            "catalog-verify",
            &bad.display().to_string(),
            &good.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "catalog-verify failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("No annuli were found"), "{stdout}");
    assert!(stdout.contains("2 annuli, 10 detectors"), "{stdout}");
    assert!(stdout.contains("3 FPI steps"), "{stdout}");
    assert!(stdout.contains("No annuli are illuminated at step216"), "{stdout}");
}
