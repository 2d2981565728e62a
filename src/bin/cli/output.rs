//! Output formatting for CLI operations.

use serde_json::json;
use ziplens::{ArchiveModel, Entry, EntryKind, ExportedArchive, format_size};

/// Trait for output formatting
pub trait OutputFormatter {
    /// Formats a list of entries; `tree` indents by depth instead of
    /// printing full paths
    fn format_list(&self, entries: &[&Entry], tree: bool) -> String;

    /// Formats archive information
    fn format_info(&self, model: &ArchiveModel) -> String;

    /// Formats the result of an edit-and-export run
    fn format_export(&self, edited: &str, output: &str, result: &ExportedArchive) -> String;
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_list(&self, entries: &[&Entry], tree: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("{:>10} {:<9} {}\n", "Size", "Kind", "Name"));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        let mut total_size: u64 = 0;
        let mut file_count = 0;
        let mut dir_count = 0;

        for entry in entries {
            let size_str = if entry.is_directory() {
                dir_count += 1;
                String::new()
            } else {
                file_count += 1;
                total_size += entry.size();
                format_size(entry.size())
            };

            let name = if tree {
                let depth = entry.path().trim_end_matches('/').matches('/').count();
                let suffix = if entry.is_directory() { "/" } else { "" };
                format!("{}{}{}", "  ".repeat(depth), entry.name(), suffix)
            } else {
                entry.path().to_string()
            };

            let marker = if entry.is_decode_failure() { " !" } else { "" };
            output.push_str(&format!(
                "{:>10} {:<9} {}{}\n",
                size_str,
                entry.kind(),
                name,
                marker
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{} files, {} directories, {} total\n",
            file_count,
            dir_count,
            format_size(total_size)
        ));

        output
    }

    fn format_info(&self, model: &ArchiveModel) -> String {
        let total: u64 = model.files().map(Entry::size).sum();
        let failures = model.files().filter(|e| e.is_decode_failure()).count();

        let mut output = String::new();
        output.push_str("Archive Information:\n");
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!("  Name:           {}\n", model.upload_name()));
        output.push_str(&format!("  Entries:        {}\n", model.len() - 1));
        output.push_str(&format!(
            "  Directories:    {}\n",
            model.count_kind(EntryKind::Directory)
        ));
        output.push_str(&format!(
            "  Text files:     {}\n",
            model.count_kind(EntryKind::Text)
        ));
        output.push_str(&format!(
            "  Images:         {}\n",
            model.count_kind(EntryKind::Image)
        ));
        output.push_str(&format!(
            "  Binary files:   {}\n",
            model.count_kind(EntryKind::Binary)
        ));
        output.push_str(&format!("  Total size:     {}\n", format_size(total)));
        if failures > 0 {
            output.push_str(&format!("  Undecodable:    {}\n", failures));
        }

        output
    }

    fn format_export(&self, edited: &str, output: &str, result: &ExportedArchive) -> String {
        format!(
            "Edited {}\nWrote {} ({} entries, {} -> {})\n",
            edited,
            output,
            result.entries_written,
            format_size(result.total_bytes),
            format_size(result.bytes.len() as u64)
        )
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_list(&self, entries: &[&Entry], _tree: bool) -> String {
        let items: Vec<_> = entries
            .iter()
            .map(|e| {
                json!({
                    "path": e.path(),
                    "name": e.name(),
                    "kind": e.kind().as_str(),
                    "size": e.size(),
                    "extension": e.extension(),
                    "language": e.display_language(),
                    "decode_failed": e.is_decode_failure(),
                })
            })
            .collect();

        serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_info(&self, model: &ArchiveModel) -> String {
        let obj = json!({
            "name": model.upload_name(),
            "entry_count": model.len() - 1,
            "directories": model.count_kind(EntryKind::Directory),
            "text_files": model.count_kind(EntryKind::Text),
            "images": model.count_kind(EntryKind::Image),
            "binary_files": model.count_kind(EntryKind::Binary),
            "total_size": model.files().map(Entry::size).sum::<u64>(),
            "decode_failures": model.files().filter(|e| e.is_decode_failure()).map(Entry::path).collect::<Vec<_>>(),
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_export(&self, edited: &str, output: &str, result: &ExportedArchive) -> String {
        let obj = json!({
            "edited": edited,
            "output": output,
            "file_name": result.file_name,
            "entries_written": result.entries_written,
            "entries_edited": result.entries_edited,
            "total_bytes": result.total_bytes,
            "archive_bytes": result.bytes.len(),
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Creates the appropriate formatter based on output format
pub fn create_formatter(format: super::OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        super::OutputFormat::Human => Box::new(HumanFormatter),
        super::OutputFormat::Json => Box::new(JsonFormatter),
    }
}
