//! Session state container.

use std::collections::HashSet;

use super::tab::Tab;
use crate::model::{ArchiveModel, Entry, TreeRow};
use crate::source::Upload;
use crate::{Error, Result};

/// Proof that a load was started, used to publish its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a load ticket must be passed to finish_load"]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    /// Returns the load generation this ticket belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Session state: the loaded model, tabs, current entry and expanded folders.
#[derive(Debug, Default)]
pub struct SessionStore {
    model: Option<ArchiveModel>,
    loading: bool,
    current: Option<String>,
    tabs: Vec<Tab>,
    active_tab: Option<String>,
    expanded: HashSet<String>,
    generation: u64,
}

impl SessionStore {
    /// Creates an empty session with no archive loaded.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Replaces the archive model and starts a fresh session.
    ///
    /// Tabs, the active tab, the current entry and the expanded folder set
    /// are all cleared.
    pub fn load_archive(&mut self, model: ArchiveModel) {
        log::info!(
            "Loaded '{}' ({} entries)",
            model.upload_name(),
            model.len() - 1
        );
        self.model = Some(model);
        self.tabs.clear();
        self.active_tab = None;
        self.current = None;
        self.expanded.clear();
    }

    /// Sets the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Returns true while an archive is being built.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Starts a load. Any load started earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Publishes the outcome of a load started with [`begin_load`].
    ///
    /// A successful build replaces the model. A failed build clears the
    /// loading flag, keeps the previous model, and returns the error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StaleLoad`] (without touching any state) if a newer
    /// load was started after this ticket was issued, or the build error.
    ///
    /// [`begin_load`]: Self::begin_load
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<ArchiveModel>) -> Result<()> {
        if ticket.generation != self.generation {
            log::warn!(
                "Discarding load {}: superseded by load {}",
                ticket.generation,
                self.generation
            );
            return Err(Error::StaleLoad {
                generation: ticket.generation,
            });
        }

        self.loading = false;
        match result {
            Ok(model) => {
                self.load_archive(model);
                Ok(())
            }
            Err(e) => {
                log::warn!("Load {} failed: {}", ticket.generation, e);
                Err(e)
            }
        }
    }

    /// Opens and builds an upload, then publishes it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArchiveParse`] for a corrupt container; the previous
    /// model stays active.
    pub async fn open_upload(&mut self, upload: Upload) -> Result<()> {
        let ticket = self.begin_load();
        let result = ArchiveModel::from_upload(upload).await;
        self.finish_load(ticket, result)
    }

    /// Returns the loaded model.
    pub fn model(&self) -> Option<&ArchiveModel> {
        self.model.as_ref()
    }

    pub(crate) fn model_mut(&mut self) -> Option<&mut ArchiveModel> {
        self.model.as_mut()
    }

    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    /// Toggles a directory's expanded state and returns the new state.
    ///
    /// Paths that are not directories in the loaded tree are ignored.
    pub fn toggle_folder_expansion(&mut self, path: &str) -> bool {
        let is_directory = self
            .model
            .as_ref()
            .and_then(|m| m.get(path))
            .is_some_and(Entry::is_directory);
        if !is_directory {
            return false;
        }

        if self.expanded.remove(path) {
            false
        } else {
            self.expanded.insert(path.to_string());
            true
        }
    }

    /// Returns true if the directory is expanded.
    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// Returns the expanded directory paths.
    pub fn expanded_folders(&self) -> &HashSet<String> {
        &self.expanded
    }

    /// Returns the file tree rows visible under the current expansion.
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        self.model
            .as_ref()
            .map(|m| m.visible_rows(&self.expanded))
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Selection and tabs
    // ------------------------------------------------------------------

    /// Makes an entry current without opening a tab (preview).
    ///
    /// Returns false if the path is not in the loaded model.
    pub fn select_entry(&mut self, path: &str) -> bool {
        if !self.model.as_ref().is_some_and(|m| m.contains(path)) {
            return false;
        }
        self.current = Some(path.to_string());
        true
    }

    /// Returns the current entry.
    pub fn current_entry(&self) -> Option<&Entry> {
        let path = self.current.as_deref()?;
        self.model.as_ref()?.get(path)
    }

    /// Returns the current entry's path.
    pub fn current_path(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Opens a tab for a file entry and activates it.
    ///
    /// If the path already has a tab, that tab is activated instead, so a
    /// path never has more than one tab. Returns false for unknown paths
    /// and directories.
    pub fn open_tab(&mut self, path: &str) -> bool {
        let is_file = self
            .model
            .as_ref()
            .and_then(|m| m.get(path))
            .is_some_and(|e| !e.is_directory());
        if !is_file {
            return false;
        }

        if !self.tabs.iter().any(|tab| tab.id() == path) {
            log::debug!("Opened tab '{}'", path);
            self.tabs.push(Tab::new(path));
        }
        self.active_tab = Some(path.to_string());
        self.current = Some(path.to_string());
        true
    }

    /// Activates an open tab and makes its entry current.
    ///
    /// Returns false if no tab has this id.
    pub fn activate_tab(&mut self, id: &str) -> bool {
        let Some(tab) = self.tabs.iter().find(|tab| tab.id() == id) else {
            return false;
        };
        let path = tab.path().to_string();
        self.active_tab = Some(path.clone());
        self.current = Some(path);
        true
    }

    /// Closes a tab.
    ///
    /// Closing the active tab activates the last remaining tab, or clears
    /// the active tab and current entry when none remain. Closing another
    /// tab leaves the active tab and current entry alone.
    pub fn close_tab(&mut self, id: &str) -> bool {
        let Some(position) = self.tabs.iter().position(|tab| tab.id() == id) else {
            return false;
        };
        self.tabs.remove(position);
        log::debug!("Closed tab '{}'", id);

        if self.active_tab.as_deref() == Some(id) {
            match self.tabs.last() {
                Some(last) => {
                    let path = last.path().to_string();
                    self.active_tab = Some(path.clone());
                    self.current = Some(path);
                }
                None => {
                    self.active_tab = None;
                    self.current = None;
                }
            }
        }
        true
    }

    /// Sets a tab's dirty flag. Returns false if no tab has this id.
    pub fn mark_dirty(&mut self, id: &str, dirty: bool) -> bool {
        match self.tabs.iter_mut().find(|tab| tab.id() == id) {
            Some(tab) => {
                tab.set_dirty(dirty);
                true
            }
            None => false,
        }
    }

    /// Clears every tab's dirty flag.
    pub fn clear_dirty_all(&mut self) {
        for tab in &mut self.tabs {
            tab.set_dirty(false);
        }
    }

    /// Returns the open tabs in open order.
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Returns the tab with the given id.
    pub fn tab(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id() == id)
    }

    /// Returns the active tab.
    pub fn active_tab(&self) -> Option<&Tab> {
        self.tab(self.active_tab.as_deref()?)
    }

    /// Returns the active tab's id.
    pub fn active_tab_id(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    /// Returns the dirty tabs in open order.
    pub fn dirty_tabs(&self) -> impl Iterator<Item = &Tab> + '_ {
        self.tabs.iter().filter(|tab| tab.is_dirty())
    }

    /// Returns true if any open tab is dirty.
    pub fn has_unsaved_changes(&self) -> bool {
        self.tabs.iter().any(Tab::is_dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelBuilder;
    use crate::source::{ArchiveSource, SourceEntry};
    use futures::FutureExt;
    use futures::future::LocalBoxFuture;
    use std::sync::Arc;

    struct ListingOnly(Vec<SourceEntry>);

    impl ArchiveSource for ListingOnly {
        fn name(&self) -> &str {
            "listing.zip"
        }

        fn entries(&self) -> &[SourceEntry] {
            &self.0
        }

        fn read_entry(&self, _index: usize) -> LocalBoxFuture<'_, Result<Vec<u8>>> {
            async move { Ok(Vec::new()) }.boxed_local()
        }
    }

    fn model(paths: &[&str]) -> ArchiveModel {
        let entries = paths
            .iter()
            .map(|p| SourceEntry {
                path: p.to_string(),
                is_directory: p.ends_with('/'),
                size: 0,
            })
            .collect();
        futures::executor::block_on(ModelBuilder::new().build(Arc::new(ListingOnly(entries))))
    }

    fn session(paths: &[&str]) -> SessionStore {
        let mut session = SessionStore::new();
        session.load_archive(model(paths));
        session
    }

    #[test]
    fn test_open_tab_dedup() {
        let mut s = session(&["a.txt", "b.txt"]);
        assert!(s.open_tab("a.txt"));
        assert!(s.open_tab("a.txt"));
        assert_eq!(s.tabs().len(), 1);
        assert_eq!(s.active_tab_id(), Some("a.txt"));
        assert_eq!(s.current_path(), Some("a.txt"));
    }

    #[test]
    fn test_open_tab_rejects_unknown_and_directories() {
        let mut s = session(&["dir/file.txt"]);
        assert!(!s.open_tab("nope.txt"));
        assert!(!s.open_tab("dir/"));
        assert!(s.tabs().is_empty());
        assert!(s.active_tab().is_none());
    }

    #[test]
    fn test_close_active_promotes_last() {
        let mut s = session(&["a.txt", "b.txt", "c.txt", "d.txt"]);
        for p in ["a.txt", "b.txt", "c.txt", "d.txt"] {
            s.open_tab(p);
        }
        s.activate_tab("b.txt");
        assert!(s.close_tab("b.txt"));
        assert_eq!(s.active_tab_id(), Some("d.txt"));
        assert_eq!(s.current_path(), Some("d.txt"));
    }

    #[test]
    fn test_close_inactive_keeps_selection() {
        let mut s = session(&["a.txt", "b.txt"]);
        s.open_tab("a.txt");
        s.open_tab("b.txt");
        assert!(s.close_tab("a.txt"));
        assert_eq!(s.active_tab_id(), Some("b.txt"));
        assert_eq!(s.current_path(), Some("b.txt"));
    }

    #[test]
    fn test_close_last_tab_clears() {
        let mut s = session(&["a.txt"]);
        s.open_tab("a.txt");
        assert!(s.close_tab("a.txt"));
        assert!(s.active_tab_id().is_none());
        assert!(s.current_entry().is_none());
        assert!(!s.close_tab("a.txt"));
    }

    #[test]
    fn test_activate_unknown_is_noop() {
        let mut s = session(&["a.txt"]);
        s.open_tab("a.txt");
        assert!(!s.activate_tab("zzz"));
        assert_eq!(s.active_tab_id(), Some("a.txt"));
    }

    #[test]
    fn test_select_entry_does_not_open_tab() {
        let mut s = session(&["a.txt", "b.txt"]);
        s.open_tab("a.txt");
        assert!(s.select_entry("b.txt"));
        assert_eq!(s.current_path(), Some("b.txt"));
        assert_eq!(s.active_tab_id(), Some("a.txt"));
        assert_eq!(s.tabs().len(), 1);
        assert!(!s.select_entry("missing"));
    }

    #[test]
    fn test_mark_dirty() {
        let mut s = session(&["a.txt"]);
        s.open_tab("a.txt");
        assert!(s.mark_dirty("a.txt", true));
        assert!(s.has_unsaved_changes());
        assert!(!s.mark_dirty("b.txt", true));
        s.clear_dirty_all();
        assert!(!s.has_unsaved_changes());
    }

    #[test]
    fn test_toggle_folder() {
        let mut s = session(&["src/lib.rs"]);
        assert!(s.toggle_folder_expansion("src/"));
        assert!(s.is_expanded("src/"));
        assert!(!s.toggle_folder_expansion("src/"));
        assert!(!s.is_expanded("src/"));

        assert!(!s.toggle_folder_expansion("src/lib.rs"));
        assert!(!s.toggle_folder_expansion("ghost/"));
        assert!(s.expanded_folders().is_empty());
    }

    #[test]
    fn test_load_archive_resets_session() {
        let mut s = session(&["dir/a.txt"]);
        s.toggle_folder_expansion("dir/");
        s.open_tab("dir/a.txt");
        s.mark_dirty("dir/a.txt", true);

        s.load_archive(model(&["other.txt"]));
        assert!(s.tabs().is_empty());
        assert!(s.active_tab_id().is_none());
        assert!(s.current_path().is_none());
        assert!(s.expanded_folders().is_empty());
        assert!(s.model().unwrap().contains("other.txt"));
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut s = SessionStore::new();
        let first = s.begin_load();
        let second = s.begin_load();

        let err = s.finish_load(first, Ok(model(&["old.txt"]))).unwrap_err();
        assert!(matches!(err, Error::StaleLoad { generation } if generation == first.generation()));
        assert!(s.model().is_none());
        assert!(s.is_loading());

        s.finish_load(second, Ok(model(&["new.txt"]))).unwrap();
        assert!(!s.is_loading());
        assert!(s.model().unwrap().contains("new.txt"));
    }

    #[test]
    fn test_failed_load_keeps_previous_model() {
        let mut s = session(&["keep.txt"]);
        s.open_tab("keep.txt");
        let ticket = s.begin_load();
        let err = s
            .finish_load(ticket, Err(Error::ArchiveParse("truncated".into())))
            .unwrap_err();
        assert!(matches!(err, Error::ArchiveParse(_)));
        assert!(!s.is_loading());
        assert!(s.model().unwrap().contains("keep.txt"));
        assert_eq!(s.tabs().len(), 1);
    }

    #[test]
    fn test_visible_rows_follow_expansion() {
        let mut s = session(&["a/x.txt", "a/b/y.txt", "z.txt"]);
        let rows: Vec<_> = s.visible_rows().into_iter().map(|r| r.path).collect();
        assert_eq!(rows, vec!["a/", "z.txt"]);

        s.toggle_folder_expansion("a/");
        let rows: Vec<_> = s.visible_rows().into_iter().map(|r| (r.depth, r.path)).collect();
        assert_eq!(
            rows,
            vec![
                (0, "a/".to_string()),
                (1, "a/x.txt".to_string()),
                (1, "a/b/".to_string()),
                (0, "z.txt".to_string()),
            ]
        );
    }
}
