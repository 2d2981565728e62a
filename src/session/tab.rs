//! Open-file tabs.

use crate::model::{ArchiveModel, Entry};

/// A tab: a reference to one file entry plus a dirty flag.
///
/// The tab id is the entry path, so a path has at most one tab. The entry
/// itself lives in the model; the tab only names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    id: String,
    dirty: bool,
}

impl Tab {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            id: path.to_string(),
            dirty: false,
        }
    }

    /// Returns the tab id, which is the entry path.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the path of the referenced entry.
    pub fn path(&self) -> &str {
        &self.id
    }

    /// Returns true if the entry was edited since the tab opened or the
    /// archive was last exported.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Resolves the referenced entry in a model.
    pub fn entry<'m>(&self, model: &'m ArchiveModel) -> Option<&'m Entry> {
        model.get(&self.id)
    }

    /// Returns the title shown on the tab: the file name, with a marker
    /// when dirty.
    pub fn title(&self) -> String {
        let name = crate::archive_path::leaf_name(&self.id);
        if self.dirty {
            format!("{} \u{2022}", name)
        } else {
            name.to_string()
        }
    }
}
