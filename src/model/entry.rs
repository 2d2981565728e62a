//! Entry types for the in-memory archive model.

use std::sync::Arc;

use crate::archive_path::{extension_of, leaf_name, parent_path};
use crate::classify::{self, EntryKind};

/// Decoded content of a file entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContent {
    /// UTF-8 text (or the decode-failure sentinel).
    Text(String),
    /// An image blob tagged with its MIME type.
    Image(ImageBlob),
}

impl EntryContent {
    /// Returns the text, if this is text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            EntryContent::Text(text) => Some(text),
            EntryContent::Image(_) => None,
        }
    }

    /// Returns the image blob, if this is image content.
    pub fn as_image(&self) -> Option<&ImageBlob> {
        match self {
            EntryContent::Image(blob) => Some(blob),
            EntryContent::Text(_) => None,
        }
    }

    /// Returns the bytes this content exports as.
    pub fn to_bytes(&self) -> &[u8] {
        match self {
            EntryContent::Text(text) => text.as_bytes(),
            EntryContent::Image(blob) => blob.bytes(),
        }
    }
}

/// Opaque image bytes plus a MIME type derived from the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    bytes: Arc<[u8]>,
    mime: &'static str,
}

impl ImageBlob {
    /// Wraps bytes with a MIME type.
    pub fn new(bytes: impl Into<Arc<[u8]>>, mime: &'static str) -> Self {
        Self {
            bytes: bytes.into(),
            mime,
        }
    }

    /// Returns the raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the MIME type, e.g. `image/png`.
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// Returns the blob size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true for an empty blob.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One file or directory node of an archive.
///
/// Tree links are path references resolved through the owning
/// [`ArchiveModel`](super::ArchiveModel): `children` lists child paths in
/// first-encounter order and `parent` names the owning directory.
///
/// Only `content` and `size` ever change after a model is built, and only
/// through the session's edit operation.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    path: String,
    kind: EntryKind,
    content: Option<EntryContent>,
    size: u64,
    extension: Option<String>,
    children: Vec<String>,
    parent: Option<String>,
    source_index: Option<usize>,
    decode_failed: bool,
    edited: bool,
}

impl Entry {
    /// Creates the synthetic root directory.
    pub(crate) fn root() -> Self {
        Self::directory(String::new())
    }

    /// Creates a directory entry. `path` must end with `/` (or be empty).
    pub(crate) fn directory(path: String) -> Self {
        let parent = if path.is_empty() {
            None
        } else {
            Some(parent_path(&path).to_string())
        };
        Self {
            name: leaf_name(&path).to_string(),
            path,
            kind: EntryKind::Directory,
            content: None,
            size: 0,
            extension: None,
            children: Vec::new(),
            parent,
            source_index: None,
            decode_failed: false,
            edited: false,
        }
    }

    /// Creates a file entry whose kind comes from its extension.
    ///
    /// `source_index` is the entry's position in the source listing, which
    /// is how its original bytes are read back.
    pub(crate) fn file(path: String, size: u64, source_index: usize) -> Self {
        let name = leaf_name(&path).to_string();
        let extension = extension_of(&name);
        let kind = classify::classify(extension.as_deref());
        let parent = Some(parent_path(&path).to_string());
        Self {
            name,
            path,
            kind,
            content: None,
            size,
            extension,
            children: Vec::new(),
            parent,
            source_index: Some(source_index),
            decode_failed: false,
            edited: false,
        }
    }

    /// Returns the final path segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full path (trailing slash for directories, empty for root).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the entry kind.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns true for directories (including the root).
    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }

    /// Returns true for the synthetic root.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Returns the decoded content, if any.
    ///
    /// Directories and binary entries have none; binary bytes stay in the
    /// original archive.
    pub fn content(&self) -> Option<&EntryContent> {
        self.content.as_ref()
    }

    /// Returns the text content of a text entry.
    pub fn text(&self) -> Option<&str> {
        self.content.as_ref().and_then(EntryContent::as_text)
    }

    /// Returns the size in bytes (original size, or UTF-8 length after an edit).
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the lower-cased extension of a file.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Returns child paths in first-encounter order.
    pub fn child_paths(&self) -> &[String] {
        &self.children
    }

    /// Returns the owning directory's path (`None` for the root).
    pub fn parent_path(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Returns the position of a file's original member in the source
    /// listing. Directories have none.
    pub fn source_index(&self) -> Option<usize> {
        self.source_index
    }

    /// Returns true if the text could not be decoded and the content is
    /// the sentinel message.
    pub fn is_decode_failure(&self) -> bool {
        self.decode_failed
    }

    /// Returns true once the content was changed by an edit.
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    /// Returns the editor language tag for this entry.
    pub fn display_language(&self) -> &'static str {
        classify::display_language(self.extension())
    }

    /// Returns the MIME type for this entry's extension.
    pub fn mime_type(&self) -> &'static str {
        classify::mime_type(self.extension())
    }

    pub(crate) fn push_child(&mut self, path: String) {
        self.children.push(path);
    }

    pub(crate) fn set_decoded(&mut self, content: EntryContent, size: u64) {
        self.content = Some(content);
        self.size = size;
    }

    pub(crate) fn set_decode_failure(&mut self, message: String) {
        self.content = Some(EntryContent::Text(message));
        self.decode_failed = true;
    }

    pub(crate) fn mark_unreadable(&mut self) {
        self.decode_failed = true;
    }

    /// Replaces text content. Callers go through the session's edit
    /// operation so dirty tracking stays consistent.
    pub(crate) fn replace_text(&mut self, text: String) {
        self.size = text.len() as u64;
        self.content = Some(EntryContent::Text(text));
        self.decode_failed = false;
        self.edited = true;
    }
}

/// Formats a byte count the way the file tree shows it.
///
/// ```
/// use ziplens::format_size;
///
/// assert_eq!(format_size(512), "0.5 KB");
/// assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
/// ```
pub fn format_size(size: u64) -> String {
    let kb = size as f64 / 1024.0;
    if kb < 1024.0 {
        return format!("{:.1} KB", kb);
    }
    format!("{:.1} MB", kb / 1024.0)
}
