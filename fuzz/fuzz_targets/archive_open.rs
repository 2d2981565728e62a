//! Fuzz target for building a model from arbitrary upload bytes.
//!
//! Exercises container parsing, tree construction and export with malformed
//! or adversarial input, looking for panics or hangs.
//!
//! Run with: cargo +nightly fuzz run archive_open

#![no_main]

use libfuzzer_sys::fuzz_target;
use ziplens::{ArchiveModel, ExportOptions, ExportMethod, Upload, export_archive};

fuzz_target!(|data: &[u8]| {
    let Ok(upload) = Upload::new("fuzz.zip", data.to_vec()) else {
        return;
    };

    // Corrupt containers are expected to fail cleanly
    let Ok(model) = futures::executor::block_on(ArchiveModel::from_upload(upload)) else {
        return;
    };

    // Tree and index must agree for anything that parsed
    assert_eq!(model.walk().count(), model.len() - 1);
    for entry in model.walk() {
        assert!(model.contains(entry.path()));
        assert!(model.parent(entry.path()).is_some());
    }

    let options = ExportOptions::new().method(ExportMethod::Stored);
    let _ = export_archive(&model, &options);
});
