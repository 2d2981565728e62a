//! Upload boundary and the archive decoding capability.
//!
//! An [`Upload`] is the raw blob handed over by a file picker or a drop
//! event. [`ZipSource`] opens it as a ZIP container and implements
//! [`ArchiveSource`], the capability the model builder consumes: an ordered
//! entry listing plus an asynchronous per-entry byte reader.
//!
//! The same source is retained by the built model as the original byte
//! source, so binary entries that are never decoded at load time can be
//! copied into the exported archive later.

use std::io::{Cursor, Read};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use zip::ZipArchive;

use crate::{Error, Result};

/// A raw upload: file name plus bytes.
#[derive(Clone)]
pub struct Upload {
    name: String,
    bytes: Arc<[u8]>,
}

impl Upload {
    /// Accepts an upload, rejecting anything not named `*.zip`.
    ///
    /// The check happens before any parsing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedUpload`] for other file names.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Result<Self> {
        let name = name.into();
        if !is_zip_name(&name) {
            log::warn!("Rejected upload '{}': not a .zip file", name);
            return Err(Error::UnsupportedUpload { name });
        }
        Ok(Self {
            name,
            bytes: bytes.into(),
        })
    }

    /// Returns the upload's file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the uploaded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the upload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true for an empty upload.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Returns true if a file name has a `.zip` extension (any case).
pub fn is_zip_name(name: &str) -> bool {
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    name.len() > 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".zip"))
}

/// One entry as listed by the container, in container order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Relative `/`-separated path; directories end with `/`.
    pub path: String,
    /// Whether the container marks this entry as a directory.
    pub is_directory: bool,
    /// Uncompressed size recorded in the container.
    pub size: u64,
}

/// A decoded archive: ordered entries plus an async byte reader per entry.
///
/// Entries are read by their position in [`entries`](Self::entries), never
/// by name: the model may store a normalized path, and a container can list
/// the same name twice.
///
/// Reads must not change the listing. The model builder issues them
/// concurrently on a single thread and the exporter issues them again for
/// entries that were never decoded, so implementations must allow any
/// number of reads of the same entry.
pub trait ArchiveSource {
    /// The name of the upload this source was opened from.
    fn name(&self) -> &str;

    /// Entries in container order.
    fn entries(&self) -> &[SourceEntry];

    /// Reads the raw (decompressed) bytes of the entry at `index` in the
    /// listing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] if the index is past the listing,
    /// or [`Error::EntryRead`] if the bytes cannot be decompressed.
    fn read_entry(&self, index: usize) -> LocalBoxFuture<'_, Result<Vec<u8>>>;
}

/// An [`ArchiveSource`] backed by an in-memory ZIP container.
///
/// # Example
///
/// ```rust,no_run
/// use ziplens::{ArchiveSource, Upload, ZipSource};
///
/// let bytes = std::fs::read("bundle.zip")?;
/// let source = ZipSource::open(Upload::new("bundle.zip", bytes)?)?;
/// for entry in source.entries() {
///     println!("{} ({} bytes)", entry.path, entry.size);
/// }
/// # Ok::<(), ziplens::Error>(())
/// ```
#[derive(Clone)]
pub struct ZipSource {
    name: String,
    archive: ZipArchive<Cursor<Arc<[u8]>>>,
    entries: Vec<SourceEntry>,
}

impl ZipSource {
    /// Parses the upload's central directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArchiveParse`] if the bytes are not a readable ZIP
    /// container. Nothing is published on failure.
    pub fn open(upload: Upload) -> Result<Self> {
        if upload.is_empty() {
            return Err(Error::ArchiveParse("empty upload".into()));
        }
        let Upload { name, bytes } = upload;
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let file = archive.by_index_raw(index)?;
            entries.push(SourceEntry {
                path: file.name().to_string(),
                is_directory: file.is_dir(),
                size: file.size(),
            });
        }

        log::debug!("Opened '{}': {} container entries", name, entries.len());
        Ok(Self {
            name,
            archive,
            entries,
        })
    }

    /// Reads an entry synchronously by its position in the listing.
    pub fn read_entry_sync(&self, index: usize) -> Result<Vec<u8>> {
        let Some(listed) = self.entries.get(index) else {
            return Err(Error::EntryNotFound {
                path: format!("#{}", index),
            });
        };
        let read_error = |e: &dyn std::fmt::Display| Error::EntryRead {
            path: listed.path.clone(),
            reason: e.to_string(),
        };

        // ZipArchive clones share the parsed central directory.
        let mut archive = self.archive.clone();
        let mut file = archive.by_index(index).map_err(|e| read_error(&e))?;

        let mut data = Vec::with_capacity(file.size().min(64 * 1024 * 1024) as usize);
        file.read_to_end(&mut data).map_err(|e| read_error(&e))?;
        Ok(data)
    }
}

impl ArchiveSource for ZipSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> &[SourceEntry] {
        &self.entries
    }

    fn read_entry(&self, index: usize) -> LocalBoxFuture<'_, Result<Vec<u8>>> {
        async move { self.read_entry_sync(index) }.boxed_local()
    }
}

impl std::fmt::Debug for ZipSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipSource")
            .field("name", &self.name)
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn make_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, data) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(data).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_is_zip_name() {
        assert!(is_zip_name("bundle.zip"));
        assert!(is_zip_name("BUNDLE.ZIP"));
        assert!(is_zip_name("dir/bundle.Zip"));
        assert!(!is_zip_name(".zip"));
        assert!(!is_zip_name("bundle.zip.txt"));
        assert!(!is_zip_name("bundle.7z"));
        assert!(!is_zip_name("zip"));
    }

    #[test]
    fn test_upload_rejects_wrong_extension() {
        let err = Upload::new("image.png", vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedUpload { name } if name == "image.png"));
    }

    #[test]
    fn test_open_lists_entries_in_order() {
        let bytes = make_zip(&[("b.txt", b"bee"), ("dir/", b""), ("dir/a.bin", b"\x00\x01")]);
        let source = ZipSource::open(Upload::new("t.zip", bytes).unwrap()).unwrap();

        let paths: Vec<_> = source.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["b.txt", "dir/", "dir/a.bin"]);
        assert!(source.entries()[1].is_directory);
        assert_eq!(source.entries()[2].size, 2);
    }

    #[test]
    fn test_read_entry() {
        let bytes = make_zip(&[("hello.txt", b"Hello")]);
        let source = ZipSource::open(Upload::new("t.zip", bytes).unwrap()).unwrap();

        let data = futures::executor::block_on(source.read_entry(0)).unwrap();
        assert_eq!(data, b"Hello");

        let err = futures::executor::block_on(source.read_entry(1)).unwrap_err();
        assert!(matches!(err, Error::EntryNotFound { .. }));
    }

    #[test]
    fn test_read_backslash_name_by_index() {
        let bytes = make_zip(&[("dir\\note.txt", b"hello")]);
        let source = ZipSource::open(Upload::new("win.zip", bytes).unwrap()).unwrap();

        assert_eq!(source.entries()[0].path, "dir\\note.txt");
        assert_eq!(source.read_entry_sync(0).unwrap(), b"hello");
    }

    #[test]
    fn test_open_corrupt_container() {
        let upload = Upload::new("broken.zip", b"definitely not a zip".to_vec()).unwrap();
        let err = ZipSource::open(upload).unwrap_err();
        assert!(matches!(err, Error::ArchiveParse(_)));

        let upload = Upload::new("empty.zip", Vec::new()).unwrap();
        assert!(matches!(ZipSource::open(upload), Err(Error::ArchiveParse(_))));
    }
}
