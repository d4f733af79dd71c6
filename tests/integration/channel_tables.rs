// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::TempDir;

use crate::{fpi_dettable, get_cmd_output, list_files, write_catalog};

#[test]
fn test_channel_tables_layout() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_catalog(tmp_dir.path());
    let out = tmp_dir.path().join("fpi_data");

    #[rustfmt::skip]
    let cmd = fpi_dettable()
        .args([
            "channel-tables",
            "--catalog", &catalog.display().to_string(),
            "--output-dir", &out.display().to_string(),
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "channel-tables failed: {}", cmd.err().unwrap());

    // Empty (channel, step) combinations are skipped.
    assert_eq!(
        list_files(&out),
        [
            "fchl_h5/chnl_211/f211_step210_d10_dettable.fits",
            "fchl_h5/chnl_211/f211_step211_d6_dettable.fits",
            "fchl_h5/chnl_212.5/f212.5_step211_d4_dettable.fits",
        ]
    );
}

#[test]
fn test_channel_tables_json_and_arg_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_catalog(tmp_dir.path());
    let out = tmp_dir.path().join("out");
    let arg_file = tmp_dir.path().join("args.json");
    std::fs::write(
        &arg_file,
        serde_json::json!({
            "channels": ["212.5"],
            "catalog": { "catalog": catalog },
            "output": { "output_dir": out, "format": "yaml" },
        })
        .to_string(),
    )
    .unwrap();

    // The command line wins over the file.
    #[rustfmt::skip]
    let cmd = fpi_dettable()
        .args([
            "channel-tables",
            &arg_file.display().to_string(),
            "--format", "json",
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "channel-tables failed: {}", cmd.err().unwrap());
    let files = list_files(&out);
    assert_eq!(files, ["fchl_h5/chnl_212.5/f212.5_step211_d4_dettable.json"]);

    let rows: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join(&files[0])).unwrap()).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    for row in rows {
        assert_eq!(row["channel"], "212.5");
        assert_eq!(row["step"], "step211");
        assert_eq!(row["radius_mm"], 50.0);
    }
}

#[test]
fn test_channel_tables_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_catalog(tmp_dir.path());
    let toml = tmp_dir.path().join("saved.toml");

    #[rustfmt::skip]
    let cmd = fpi_dettable()
        .args([
            "channel-tables",
            "-c", &catalog.display().to_string(),
            "--channels", "211",
            "--save-toml", &toml.display().to_string(),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "channel-tables failed: {}", cmd.err().unwrap());
    let contents = std::fs::read_to_string(&toml).unwrap();
    assert!(contents.contains("channels"), "{contents}");
    assert!(contents.contains("annuli.txt"), "{contents}");
}

#[test]
fn test_channel_tables_unobserved_channel_is_a_warning() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_catalog(tmp_dir.path());
    let out = tmp_dir.path().join("out");

    #[rustfmt::skip]
    let cmd = fpi_dettable()
        .args([
            "channel-tables",
            "-c", &catalog.display().to_string(),
            "-o", &out.display().to_string(),
            "--channels", "300",
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "channel-tables failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Channel 300"), "{stdout}");
    assert!(!out.join("fchl_h5").exists());
}

#[test]
fn test_channel_tables_bad_channel() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let catalog = write_catalog(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = fpi_dettable()
        .args([
            "channel-tables",
            "-c", &catalog.display().to_string(),
            "--channels", "chnl_abc",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("chnl_abc"), "{stderr}");
}
