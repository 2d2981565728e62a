//! CLI command integration tests.
//!
//! These tests run the `ziplens` binary against archives written to a
//! temporary directory.

#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

mod common;

/// Creates a test archive file on disk.
fn create_test_archive_file(name: &str, entries: &[(&str, &[u8])]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let archive_path = temp_dir.path().join(name);
    std::fs::write(&archive_path, common::create_zip(entries)).expect("Failed to write archive");
    (temp_dir, archive_path)
}

fn ziplens(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ziplens"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run ziplens")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// =============================================================================
// List Command Tests
// =============================================================================

#[test]
fn test_list_human() {
    let (_dir, archive) = create_test_archive_file("site.zip", &common::sample_project());
    let output = ziplens(&["list", archive.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("site/index.html"));
    assert!(text.contains("site/fonts/inter.woff2"));
    assert!(text.contains("6 files, 5 directories"));
}

#[test]
fn test_list_json_with_filter() {
    let (_dir, archive) = create_test_archive_file("site.zip", &common::sample_project());
    let output = ziplens(&[
        "--format",
        "json",
        "list",
        archive.to_str().unwrap(),
        "--include",
        "site/*.js",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["path"], "site/js/app.js");
    assert_eq!(items[0]["kind"], "text");
    assert_eq!(items[0]["language"], "javascript");
}

#[test]
fn test_list_warns_on_decode_failure() {
    let (_dir, archive) = create_test_archive_file("bad.zip", &[("latin1.txt", b"caf\xe9")]);
    let output = ziplens(&["list", archive.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_list_rejects_non_zip_name() {
    let (_dir, archive) = create_test_archive_file("site.rar", &common::sample_project());
    let output = ziplens(&["list", archive.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(255));
}

#[test]
fn test_list_corrupt_archive() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("broken.zip");
    std::fs::write(&archive, b"not a zip at all").unwrap();

    let output = ziplens(&["list", archive.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_list_missing_file() {
    let output = ziplens(&["list", "/nonexistent/path/archive.zip"]);
    assert_eq!(output.status.code(), Some(5));
}

// =============================================================================
// Cat and Info Tests
// =============================================================================

#[test]
fn test_cat_text_and_binary() {
    let (_dir, archive) = create_test_archive_file("site.zip", &common::sample_project());

    let output = ziplens(&["cat", archive.to_str().unwrap(), "README.md"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"# Sample\n");

    let output = ziplens(&["cat", archive.to_str().unwrap(), "site/fonts/inter.woff2"]);
    assert_eq!(output.stdout, b"wOF2\x00\x01\x00\x00");
}

#[test]
fn test_cat_directory_fails() {
    let (_dir, archive) = create_test_archive_file("site.zip", &common::sample_project());
    let output = ziplens(&["cat", archive.to_str().unwrap(), "site/"]);
    assert_eq!(output.status.code(), Some(255));
}

#[test]
fn test_info_json() {
    let (_dir, archive) = create_test_archive_file("site.zip", &common::sample_project());
    let output = ziplens(&["-f", "json", "info", archive.to_str().unwrap()]);

    let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["name"], "site.zip");
    assert_eq!(info["entry_count"], 11);
    assert_eq!(info["text_files"], 4);
    assert_eq!(info["images"], 1);
    assert_eq!(info["binary_files"], 1);
}

// =============================================================================
// Edit Command Tests
// =============================================================================

#[test]
fn test_edit_writes_default_output() {
    let (dir, archive) = create_test_archive_file("site.zip", &common::sample_project());
    let output = ziplens(&[
        "edit",
        archive.to_str().unwrap(),
        "site/index.html",
        "--content",
        "<h1>new</h1>",
    ]);
    assert_eq!(output.status.code(), Some(0));

    let edited = std::fs::read(dir.path().join("site_edited.zip")).unwrap();
    let files = common::read_zip(&edited);
    let index = files.iter().find(|(p, _)| p == "site/index.html").unwrap();
    assert_eq!(index.1, b"<h1>new</h1>");
    assert_eq!(files.len(), 6);
}

#[test]
fn test_edit_from_file_to_explicit_output() {
    let (dir, archive) = create_test_archive_file("site.zip", &common::sample_project());
    let replacement = dir.path().join("app.js");
    std::fs::write(&replacement, "export default 42;\n").unwrap();
    let target = dir.path().join("out.zip");

    let output = ziplens(&[
        "edit",
        archive.to_str().unwrap(),
        "site/js/app.js",
        "--from",
        replacement.to_str().unwrap(),
        "-o",
        target.to_str().unwrap(),
        "--stored",
    ]);
    assert_eq!(output.status.code(), Some(0));

    let files = common::read_zip(&std::fs::read(&target).unwrap());
    let app = files.iter().find(|(p, _)| p == "site/js/app.js").unwrap();
    assert_eq!(app.1, b"export default 42;\n");
}

#[test]
fn test_edit_binary_entry_rejected() {
    let (dir, archive) = create_test_archive_file("site.zip", &common::sample_project());
    let output = ziplens(&[
        "edit",
        archive.to_str().unwrap(),
        "site/img/logo.png",
        "--content",
        "x",
    ]);
    assert_eq!(output.status.code(), Some(255));
    assert!(!dir.path().join("site_edited.zip").exists());
}
