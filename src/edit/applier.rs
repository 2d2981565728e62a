//! The edit applier.

use std::fmt;

use crate::classify::EntryKind;
use crate::session::SessionStore;

/// Result of [`SessionStore::apply_edit`].
///
/// Every variant other than `Applied` means the session was left untouched.
#[must_use = "edit outcome should be checked to know whether content changed"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The content was replaced.
    Applied {
        /// Size before the edit.
        previous_size: u64,
        /// UTF-8 byte length of the new content.
        size: u64,
        /// True if an open tab for the path was marked dirty.
        tab_marked: bool,
    },
    /// The new content equals the current content.
    Unchanged,
    /// No archive is loaded.
    NoArchive,
    /// The path is not in the loaded archive.
    NotFound,
    /// The entry is not a text file.
    NotText(EntryKind),
}

impl EditOutcome {
    /// Returns true if the content was replaced.
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }
}

impl fmt::Display for EditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOutcome::Applied {
                previous_size,
                size,
                ..
            } => write!(f, "applied ({} -> {} bytes)", previous_size, size),
            EditOutcome::Unchanged => f.write_str("unchanged"),
            EditOutcome::NoArchive => f.write_str("no archive loaded"),
            EditOutcome::NotFound => f.write_str("entry not found"),
            EditOutcome::NotText(kind) => write!(f, "{} entries are not editable", kind),
        }
    }
}

impl SessionStore {
    /// Replaces the text content of a file entry.
    ///
    /// The entry's size becomes the UTF-8 length of `new_content` and the tab
    /// open on `path`, if any, is marked dirty. Nothing happens when no
    /// archive is loaded, the path is unknown or not a text file, or the
    /// content is identical to what is already there.
    pub fn apply_edit(&mut self, path: &str, new_content: String) -> EditOutcome {
        let Some(model) = self.model_mut() else {
            return EditOutcome::NoArchive;
        };
        let Some(entry) = model.get_mut(path) else {
            return EditOutcome::NotFound;
        };
        if entry.kind() != EntryKind::Text {
            return EditOutcome::NotText(entry.kind());
        }
        if entry.text() == Some(new_content.as_str()) {
            return EditOutcome::Unchanged;
        }

        let previous_size = entry.size();
        entry.replace_text(new_content);
        let size = entry.size();
        log::debug!("Edited '{}': {} -> {} bytes", path, previous_size, size);

        let tab_marked = self.mark_dirty(path, true);
        EditOutcome::Applied {
            previous_size,
            size,
            tab_marked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Upload;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn session(files: &[(&str, &[u8])]) -> SessionStore {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for (name, data) in files {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        let bytes = writer.finish().unwrap().into_inner();

        let mut session = SessionStore::new();
        futures::executor::block_on(session.open_upload(Upload::new("t.zip", bytes).unwrap()))
            .unwrap();
        session
    }

    #[test]
    fn test_apply_edit_updates_size_and_dirty() {
        let mut s = session(&[("a.txt", b"hello")]);
        s.open_tab("a.txt");

        let outcome = s.apply_edit("a.txt", "h\u{e9}llo!".to_string());
        assert_eq!(
            outcome,
            EditOutcome::Applied {
                previous_size: 5,
                size: 7,
                tab_marked: true
            }
        );
        let entry = s.model().unwrap().get("a.txt").unwrap();
        assert_eq!(entry.text(), Some("h\u{e9}llo!"));
        assert_eq!(entry.size(), 7);
        assert!(entry.is_edited());
        assert!(s.tab("a.txt").unwrap().is_dirty());
    }

    #[test]
    fn test_same_content_is_noop() {
        let mut s = session(&[("a.txt", b"hello")]);
        s.open_tab("a.txt");
        assert_eq!(s.apply_edit("a.txt", "hello".into()), EditOutcome::Unchanged);
        assert_eq!(s.apply_edit("a.txt", "hello".into()), EditOutcome::Unchanged);
        assert!(!s.tab("a.txt").unwrap().is_dirty());
        assert_eq!(s.model().unwrap().get("a.txt").unwrap().size(), 5);
    }

    #[test]
    fn test_empty_content_has_zero_size() {
        let mut s = session(&[("a.txt", b"hello")]);
        assert!(s.apply_edit("a.txt", String::new()).is_applied());
        assert_eq!(s.model().unwrap().get("a.txt").unwrap().size(), 0);
    }

    #[test]
    fn test_edit_without_tab() {
        let mut s = session(&[("a.txt", b"x")]);
        let outcome = s.apply_edit("a.txt", "y".into());
        assert!(matches!(
            outcome,
            EditOutcome::Applied {
                tab_marked: false,
                ..
            }
        ));
        assert!(!s.has_unsaved_changes());
    }

    #[test]
    fn test_rejections() {
        let mut empty = SessionStore::new();
        assert_eq!(empty.apply_edit("a.txt", "x".into()), EditOutcome::NoArchive);

        let mut s = session(&[("img.png", b"\x89PNG"), ("lib.so", b"\x7fELF"), ("d/a.md", b"")]);
        assert_eq!(s.apply_edit("nope.txt", "x".into()), EditOutcome::NotFound);
        assert_eq!(
            s.apply_edit("img.png", "x".into()),
            EditOutcome::NotText(EntryKind::Image)
        );
        assert_eq!(
            s.apply_edit("lib.so", "x".into()),
            EditOutcome::NotText(EntryKind::Binary)
        );
        assert_eq!(
            s.apply_edit("d/", "x".into()),
            EditOutcome::NotText(EntryKind::Directory)
        );
        assert!(!s.model().unwrap().has_edits());
    }

    #[test]
    fn test_edit_clears_decode_failure() {
        let mut s = session(&[("bad.txt", b"\xff\xfe")]);
        assert!(s.model().unwrap().get("bad.txt").unwrap().is_decode_failure());
        assert!(s.apply_edit("bad.txt", "fixed".into()).is_applied());
        let entry = s.model().unwrap().get("bad.txt").unwrap();
        assert!(!entry.is_decode_failure());
        assert_eq!(entry.text(), Some("fixed"));
    }
}
