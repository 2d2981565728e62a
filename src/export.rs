//! Archive serialization.
//!
//! Re-encodes a loaded model as a new ZIP. Every file entry is written once,
//! in index order, so the same model always produces the same bytes:
//!
//! - text entries are written from their current content, except decode
//!   failures that were never edited, which keep their original bytes;
//! - image entries are written from their decoded blob;
//! - binary entries are copied from the original upload.
//!
//! Directories are not written as separate entries; readers rebuild them
//! from the file paths.

use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::model::{ArchiveModel, Entry, EntryContent};
use crate::options::{ExportMethod, ExportOptions};
use crate::session::SessionStore;
use crate::{EntryKind, Error, Result};

/// A serialized archive ready to be saved or downloaded.
#[must_use = "exported archive bytes should be saved"]
#[derive(Debug, Clone, Default)]
pub struct ExportedArchive {
    /// Output file name derived from the upload name.
    pub file_name: String,
    /// The ZIP bytes.
    pub bytes: Vec<u8>,
    /// Number of file entries written.
    pub entries_written: usize,
    /// Number of those entries whose content came from an edit.
    pub entries_edited: usize,
    /// Total uncompressed bytes written.
    pub total_bytes: u64,
}

impl ExportedArchive {
    /// Returns the compression ratio (archive bytes / uncompressed bytes).
    pub fn compression_ratio(&self) -> f64 {
        if self.total_bytes == 0 {
            1.0
        } else {
            self.bytes.len() as f64 / self.total_bytes as f64
        }
    }
}

/// Serializes a model into a new ZIP.
///
/// # Errors
///
/// Returns [`Error::MissingOriginal`] if a binary entry (or an unreadable
/// entry with no decoded content) cannot be read back from the original
/// upload, and [`Error::Export`] if the writer fails.
pub async fn serialize(model: &ArchiveModel, options: &ExportOptions) -> Result<ExportedArchive> {
    let file_options = file_options(options);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut result = ExportedArchive {
        file_name: options.output_name(model.upload_name()),
        ..Default::default()
    };

    for entry in model.files() {
        let data = entry_bytes(model, entry).await?;

        writer
            .start_file(entry.path(), file_options)
            .map_err(|e| Error::Export(format!("cannot add '{}': {}", entry.path(), e)))?;
        writer
            .write_all(&data)
            .map_err(|e| Error::Export(format!("cannot write '{}': {}", entry.path(), e)))?;

        result.entries_written += 1;
        if entry.is_edited() {
            result.entries_edited += 1;
        }
        result.total_bytes += data.len() as u64;
    }

    result.bytes = writer
        .finish()
        .map_err(|e| Error::Export(e.to_string()))?
        .into_inner();

    log::info!(
        "Exported '{}': {} entries ({} edited), {} -> {} bytes",
        result.file_name,
        result.entries_written,
        result.entries_edited,
        result.total_bytes,
        result.bytes.len()
    );
    Ok(result)
}

/// Blocking form of [`serialize`].
///
/// Sources backed by an in-memory upload resolve reads immediately, so this
/// does not park the thread in practice.
pub fn export_archive(model: &ArchiveModel, options: &ExportOptions) -> Result<ExportedArchive> {
    futures::executor::block_on(serialize(model, options))
}

fn file_options(options: &ExportOptions) -> SimpleFileOptions {
    let base = SimpleFileOptions::default().last_modified_time(zip::DateTime::default());
    match options.compression_method() {
        ExportMethod::Deflated if options.compression_level() == 0 => {
            base.compression_method(CompressionMethod::Stored)
        }
        ExportMethod::Deflated => base
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(options.compression_level()))),
        ExportMethod::Stored => base.compression_method(CompressionMethod::Stored),
    }
}

/// Picks the bytes written for one file entry.
async fn entry_bytes(model: &ArchiveModel, entry: &Entry) -> Result<Vec<u8>> {
    let in_memory = match (entry.kind(), entry.content()) {
        (EntryKind::Text, Some(EntryContent::Text(_))) if entry.is_decode_failure() => None,
        (EntryKind::Text | EntryKind::Image, Some(content)) => Some(content.to_bytes()),
        _ => None,
    };
    if let Some(bytes) = in_memory {
        return Ok(bytes.to_vec());
    }

    model.read_original(entry).await.map_err(|e| {
        log::warn!("No original bytes for '{}': {}", entry.path(), e);
        Error::MissingOriginal {
            path: entry.path().to_string(),
        }
    })
}

impl SessionStore {
    /// Serializes the loaded archive and clears every tab's dirty flag.
    ///
    /// On failure the dirty flags are left as they were.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoArchiveLoaded`] without a model, otherwise the
    /// errors of [`serialize`].
    pub fn export(&mut self, options: &ExportOptions) -> Result<ExportedArchive> {
        let model = self.model().ok_or(Error::NoArchiveLoaded)?;
        let exported = export_archive(model, options)?;
        self.clear_dirty_all();
        Ok(exported)
    }
}
