//! Builds an [`ArchiveModel`] from an [`ArchiveSource`].

use std::sync::Arc;

use futures::future::join_all;

use super::{ArchiveModel, Entry, EntryContent, ImageBlob};
use crate::archive_path::EntryPath;
use crate::classify::{self, EntryKind};
use crate::options::BuildOptions;
use crate::source::ArchiveSource;

/// A decode scheduled for one text or image entry.
struct DecodeJob {
    slot: usize,
    source_index: usize,
    path: String,
    kind: EntryKind,
}

/// Builds archive models.
///
/// Entries are linked into the tree in container order. Every text and
/// image entry is then decoded concurrently, and the model is returned only
/// after all decodes have finished, so callers never observe a partially
/// decoded model.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use ziplens::{BuildOptions, ModelBuilder, Upload, ZipSource};
///
/// let bytes = std::fs::read("bundle.zip")?;
/// let source = ZipSource::open(Upload::new("bundle.zip", bytes)?)?;
/// let builder = ModelBuilder::with_options(BuildOptions::new().skip_hidden(false));
/// let model = futures::executor::block_on(builder.build(Arc::new(source)));
/// println!("{} files", model.file_count());
/// # Ok::<(), ziplens::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    options: BuildOptions,
}

impl ModelBuilder {
    /// Creates a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the given options.
    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Returns the builder's options.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Builds the model.
    ///
    /// This never fails for a source that could be opened: unusable names
    /// are skipped and per-entry decode failures become sentinel content.
    pub async fn build(&self, source: Arc<dyn ArchiveSource>) -> ArchiveModel {
        let mut model = ArchiveModel::with_root(Arc::clone(&source));
        let jobs = self.link_entries(&mut model, source.as_ref());

        log::debug!(
            "Decoding {} of {} entries from '{}'",
            jobs.len(),
            model.len() - 1,
            source.name()
        );

        let reads = jobs.iter().map(|job| source.read_entry(job.source_index));
        let results = join_all(reads).await;

        let mut failures = 0usize;
        for (job, result) in jobs.iter().zip(results) {
            if !self.apply_decode(&mut model, job, result) {
                failures += 1;
            }
        }

        log::info!(
            "Built model for '{}': {} entries, {} files, {} decode failures",
            source.name(),
            model.len() - 1,
            model.file_count(),
            failures
        );
        model
    }

    /// Links every accepted container entry into the tree and returns the
    /// decodes to schedule.
    fn link_entries(&self, model: &mut ArchiveModel, source: &dyn ArchiveSource) -> Vec<DecodeJob> {
        let mut jobs = Vec::new();

        for (source_index, item) in source.entries().iter().enumerate() {
            let raw = if item.is_directory && !item.path.ends_with('/') {
                format!("{}/", item.path)
            } else {
                item.path.clone()
            };

            let path = match EntryPath::new(&raw) {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("Skipping entry '{}': {}", item.path, e);
                    continue;
                }
            };

            if self.options.is_excluded(path.as_str()) {
                log::debug!("Excluded entry '{}'", path);
                continue;
            }

            if model.contains(path.as_str()) {
                // Directories implied by earlier files are already present.
                if !path.is_directory() {
                    log::warn!("Duplicate entry '{}' ignored", path);
                }
                continue;
            }

            for ancestor in path.ancestors() {
                if !model.contains(ancestor.as_str()) {
                    log::debug!("Synthesized directory '{}'", ancestor);
                    model.insert(Entry::directory(ancestor.into_string()));
                }
            }

            if path.is_directory() {
                model.insert(Entry::directory(path.into_string()));
                continue;
            }

            let entry = Entry::file(path.into_string(), item.size, source_index);
            let kind = entry.kind();
            let entry_path = entry.path().to_string();
            let slot = model.insert(entry);
            if matches!(kind, EntryKind::Text | EntryKind::Image) {
                jobs.push(DecodeJob {
                    slot,
                    source_index,
                    path: entry_path,
                    kind,
                });
            }
        }
        jobs
    }

    /// Stores one decode result. Returns false if the entry failed.
    fn apply_decode(
        &self,
        model: &mut ArchiveModel,
        job: &DecodeJob,
        result: crate::Result<Vec<u8>>,
    ) -> bool {
        let entry = model.entry_at_mut(job.slot);
        match (job.kind, result) {
            (EntryKind::Text, Ok(bytes)) => {
                let size = bytes.len() as u64;
                match String::from_utf8(bytes) {
                    Ok(text) => {
                        entry.set_decoded(EntryContent::Text(text), size);
                        true
                    }
                    Err(e) => {
                        log::warn!("Entry '{}' is not valid UTF-8: {}", job.path, e.utf8_error());
                        entry.set_decode_failure(format!(
                            "{}{}",
                            self.options.sentinel(),
                            e.utf8_error()
                        ));
                        false
                    }
                }
            }
            (EntryKind::Text, Err(e)) => {
                log::warn!("Failed to read text entry '{}': {}", job.path, e);
                entry.set_decode_failure(format!("{}{}", self.options.sentinel(), e));
                false
            }
            (_, Ok(bytes)) => {
                let size = bytes.len() as u64;
                let mime = classify::mime_type(entry.extension());
                entry.set_decoded(EntryContent::Image(ImageBlob::new(bytes, mime)), size);
                true
            }
            (_, Err(e)) => {
                log::warn!("Failed to read image entry '{}': {}", job.path, e);
                entry.mark_unreadable();
                false
            }
        }
    }
}
