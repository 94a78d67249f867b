//! Integration tests for the CLI commands

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/analysis.json")
}

fn write_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(120, 120, image::Rgb([255, 255, 255]))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn test_version_command() {
    let mut cmd = cargo_bin_cmd!("glance");
    cmd.arg("version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("glance "));
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo_bin_cmd!("glance");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("glance "));
}

#[test]
fn test_ocr_with_saved_result_writes_annotated_copy() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "sign.png");

    let mut cmd = cargo_bin_cmd!("glance");
    cmd.arg("ocr").arg(&image).arg("--result").arg(fixture());

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("OCR analysis results:\nDetected text:\n"))
        .stdout(predicate::str::contains("Line: 'OPEN 24H'"))
        .stdout(predicate::str::contains("  Word: '24H' (confidence: 87.00%)"))
        .stdout(predicate::str::contains("Caption:").not())
        .stdout(predicate::str::contains("sign_ocr.png"));

    let output = dir.path().join("sign_ocr.png");
    let annotated = image::open(&output).unwrap().to_rgb8();
    assert_eq!(annotated.dimensions(), (120, 120));
    // the OPEN word outline runs along x = 20
    assert_ne!(annotated.get_pixel(20, 102).0, [255, 255, 255]);
}

#[test]
fn test_objects_with_saved_result() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "pets.png");

    let mut cmd = cargo_bin_cmd!("glance");
    cmd.arg("objects").arg(&image).arg("--result").arg(fixture());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "   'dog' (confidence: 92.00%) at x=10, y=10, w=50, h=50\n   'cat' (confidence: 81.00%)",
        ))
        .stdout(predicate::str::contains("Detected text:").not());

    assert!(dir.path().join("pets_objects.png").exists());
}

#[test]
fn test_analyze_json_report_without_image() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "all.png");

    let mut cmd = cargo_bin_cmd!("glance");
    cmd.arg("analyze")
        .arg(&image)
        .arg("--result")
        .arg(fixture())
        .arg("--json")
        .arg("--no-image");

    let output = cmd.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let sections: Vec<_> = report["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["section"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(sections, vec!["caption", "tags", "objects", "text"]);
    assert!(!dir.path().join("all_annotated.png").exists());
}

#[test]
fn test_analyze_writes_combined_annotation() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "all.png");

    let mut cmd = cargo_bin_cmd!("glance");
    cmd.arg("analyze")
        .arg(&image)
        .arg("--result")
        .arg(fixture())
        .arg("--clamp-labels");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("Image analysis results:\nCaption:\n"));
    assert!(dir.path().join("all_annotated.png").exists());
}

#[test]
fn test_missing_credentials_fail() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path(), "photo.png");

    let mut cmd = cargo_bin_cmd!("glance");
    cmd.current_dir(dir.path())
        .env_remove("VISION_ENDPOINT")
        .env_remove("VISION_KEY")
        .arg("ocr")
        .arg(&image);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing configuration: VISION_ENDPOINT"));
}

#[test]
fn test_missing_image_fails() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("glance");
    cmd.arg("ocr")
        .arg(dir.path().join("nope.png"))
        .arg("--result")
        .arg(fixture());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to open image"));
}
