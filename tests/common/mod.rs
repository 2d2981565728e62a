//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};
use ziplens::{ArchiveModel, SessionStore, Upload};

/// Creates an in-memory ZIP archive.
///
/// Paths ending in `/` are added as explicit directory entries; everything
/// else is a deflated file with the given bytes.
pub fn create_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, data) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, options)
                .expect("Failed to add directory");
        } else {
            writer.start_file(*name, options).expect("Failed to start file");
            writer.write_all(data).expect("Failed to write file");
        }
    }

    writer.finish().expect("Failed to finish zip").into_inner()
}

/// Wraps archive bytes as an upload named `name`.
pub fn upload(name: &str, bytes: Vec<u8>) -> Upload {
    Upload::new(name, bytes).expect("Failed to create upload")
}

/// Builds a model from archive entries.
pub fn load_model(entries: &[(&str, &[u8])]) -> ArchiveModel {
    let upload = upload("fixture.zip", create_zip(entries));
    futures::executor::block_on(ArchiveModel::from_upload(upload)).expect("Failed to build model")
}

/// Builds a model from raw archive bytes.
pub fn load_model_from(name: &str, bytes: Vec<u8>) -> ArchiveModel {
    futures::executor::block_on(ArchiveModel::from_upload(upload(name, bytes)))
        .expect("Failed to build model")
}

/// Creates a session with the archive loaded.
pub fn load_session(entries: &[(&str, &[u8])]) -> SessionStore {
    let mut session = SessionStore::new();
    let upload = upload("fixture.zip", create_zip(entries));
    futures::executor::block_on(session.open_upload(upload)).expect("Failed to load archive");
    session
}

/// Reads every file of a ZIP back as (name, bytes) pairs in archive order.
pub fn read_zip(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("Failed to open zip");
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).expect("Failed to read entry");
            let mut data = Vec::new();
            file.read_to_end(&mut data).expect("Failed to read data");
            (file.name().to_string(), data)
        })
        .filter(|(name, _)| !name.ends_with('/'))
        .collect()
}

/// A small web project used across tests.
pub fn sample_project() -> Vec<(&'static str, &'static [u8])> {
    vec![
        ("site/", b""),
        ("site/index.html", b"<!doctype html><p>hi</p>"),
        ("site/css/style.css", b"body { margin: 0 }"),
        ("site/js/app.js", b"console.log('app')"),
        ("site/img/logo.png", b"\x89PNG\r\n\x1a\n\x00\x00"),
        ("site/fonts/inter.woff2", b"wOF2\x00\x01\x00\x00"),
        ("README.md", b"# Sample\n"),
    ]
}
