//! The in-memory archive model.
//!
//! An [`ArchiveModel`] owns every [`Entry`] of one upload in a single table
//! keyed by path. That table is the flat index and also the arena for the
//! directory tree: `children` and `parent` links are paths resolved through
//! it, so the tree has no ownership cycles and any entry is one lookup away.
//!
//! Models are built by [`ModelBuilder`] and are never re-parsed
//! incrementally; a new upload produces a new model.
//!
//! # Example
//!
//! ```rust,no_run
//! use ziplens::{ArchiveModel, Upload};
//!
//! let bytes = std::fs::read("site.zip")?;
//! let model = futures::executor::block_on(ArchiveModel::from_upload(Upload::new("site.zip", bytes)?))?;
//!
//! for entry in model.walk() {
//!     println!("{:indent$}{}", "", entry.name(), indent = entry.path().matches('/').count() * 2);
//! }
//! # Ok::<(), ziplens::Error>(())
//! ```

mod builder;
mod entry;

pub use builder::ModelBuilder;
pub use entry::{Entry, EntryContent, ImageBlob, format_size};

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::source::{ArchiveSource, Upload, ZipSource};
use crate::{EntryKind, Error, Result};

/// Index of the root entry in the arena.
const ROOT: usize = 0;

/// An uploaded archive: directory tree, flat index, and the original source.
pub struct ArchiveModel {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    source: Arc<dyn ArchiveSource>,
}

/// One visible line of the file tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// Nesting level; top-level entries are 0.
    pub depth: usize,
    /// The entry's path.
    pub path: String,
}

impl ArchiveModel {
    /// Opens an upload as ZIP and builds a model with default options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArchiveParse`](crate::Error::ArchiveParse) if the
    /// container cannot be read. Per-entry failures do not fail the build.
    pub async fn from_upload(upload: Upload) -> Result<Self> {
        let source = ZipSource::open(upload)?;
        Ok(ModelBuilder::new().build(Arc::new(source)).await)
    }

    pub(crate) fn with_root(source: Arc<dyn ArchiveSource>) -> Self {
        let mut index = HashMap::new();
        index.insert(String::new(), ROOT);
        Self {
            entries: vec![Entry::root()],
            index,
            source,
        }
    }

    /// Appends an entry and links it under its parent.
    ///
    /// The parent must already be present.
    pub(crate) fn insert(&mut self, entry: Entry) -> usize {
        let slot = self.entries.len();
        let parent = entry.parent_path().unwrap_or_default().to_string();
        let path = entry.path().to_string();
        self.entries.push(entry);
        self.index.insert(path.clone(), slot);
        if let Some(&parent_slot) = self.index.get(&parent) {
            self.entries[parent_slot].push_child(path);
        }
        slot
    }

    pub(crate) fn entry_at_mut(&mut self, slot: usize) -> &mut Entry {
        &mut self.entries[slot]
    }

    pub(crate) fn get_mut(&mut self, path: &str) -> Option<&mut Entry> {
        let slot = *self.index.get(path)?;
        self.entries.get_mut(slot)
    }

    /// Returns the synthetic root directory.
    pub fn root(&self) -> &Entry {
        &self.entries[ROOT]
    }

    /// Looks up an entry by path (the empty path is the root).
    pub fn get(&self, path: &str) -> Option<&Entry> {
        self.index.get(path).map(|&slot| &self.entries[slot])
    }

    /// Returns true if the path is in the index.
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Returns the children of a directory in first-encounter order.
    ///
    /// Unknown paths and files yield nothing.
    pub fn children(&self, path: &str) -> impl Iterator<Item = &Entry> + '_ {
        self.get(path)
            .map(|entry| entry.child_paths())
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.get(child))
    }

    /// Returns the owning directory of an entry (`None` for the root).
    pub fn parent(&self, path: &str) -> Option<&Entry> {
        self.get(path)?.parent_path().and_then(|p| self.get(p))
    }

    /// Returns all entries, root first, in index insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns all non-directory entries in index insertion order.
    pub fn files(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter().filter(|e| !e.is_directory())
    }

    /// Number of entries in the index, root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the archive has no entries besides the root.
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }

    /// Number of file entries.
    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    /// Number of entries of one kind.
    pub fn count_kind(&self, kind: EntryKind) -> usize {
        self.entries
            .iter()
            .skip(1)
            .filter(|e| e.kind() == kind)
            .count()
    }

    /// Iterates the tree depth-first in pre-order, excluding the root.
    pub fn walk(&self) -> impl Iterator<Item = &Entry> + '_ {
        let mut stack: Vec<&str> = self
            .root()
            .child_paths()
            .iter()
            .rev()
            .map(String::as_str)
            .collect();
        std::iter::from_fn(move || {
            let path = stack.pop()?;
            let entry = self.get(path)?;
            stack.extend(entry.child_paths().iter().rev().map(String::as_str));
            Some(entry)
        })
    }

    /// Flattens the tree into the rows a file tree shows: a directory's
    /// children appear only when its path is in `expanded`.
    pub fn visible_rows(&self, expanded: &HashSet<String>) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        self.collect_rows("", 0, expanded, &mut rows);
        rows
    }

    fn collect_rows(
        &self,
        path: &str,
        depth: usize,
        expanded: &HashSet<String>,
        rows: &mut Vec<TreeRow>,
    ) {
        for child in self.children(path) {
            rows.push(TreeRow {
                depth,
                path: child.path().to_string(),
            });
            if child.is_directory() && expanded.contains(child.path()) {
                self.collect_rows(child.path(), depth + 1, expanded, rows);
            }
        }
    }

    /// Returns the original byte source retained for export.
    pub fn source(&self) -> &dyn ArchiveSource {
        self.source.as_ref()
    }

    /// Reads a file's original bytes from the retained source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`](crate::Error::EntryNotFound) for
    /// directories and entries without a source member, or the source's
    /// read error.
    pub async fn read_original(&self, entry: &Entry) -> Result<Vec<u8>> {
        match entry.source_index() {
            Some(index) => self.source.read_entry(index).await,
            None => Err(Error::EntryNotFound {
                path: entry.path().to_string(),
            }),
        }
    }

    /// Returns the original upload's file name.
    pub fn upload_name(&self) -> &str {
        self.source.name()
    }

    /// Returns true if any entry was changed by an edit.
    pub fn has_edits(&self) -> bool {
        self.entries.iter().any(Entry::is_edited)
    }
}

impl std::fmt::Debug for ArchiveModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveModel")
            .field("upload", &self.upload_name())
            .field("entries", &self.entries.len())
            .finish()
    }
}
