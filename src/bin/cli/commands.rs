//! Command implementations for the CLI tool.

use std::io::Write;
use std::path::{Path, PathBuf};

use ziplens::{
    ArchiveModel, EditOutcome, EntryContent, ExportMethod, ExportOptions, SessionStore, Upload,
};

use crate::OutputFormat;
use crate::exit_codes::{ExitCode, error_to_exit_code};
use crate::file_selector::FileSelector;
use crate::output::create_formatter;

/// Configuration for the edit command.
pub struct EditConfig<'a> {
    pub archive_path: &'a Path,
    pub entry: &'a str,
    pub content: Option<String>,
    pub from_file: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub level: u8,
    pub stored: bool,
    pub format: OutputFormat,
}

/// List command implementation
pub fn list(
    archive_path: &Path,
    include: &[String],
    exclude: &[String],
    tree: bool,
    format: OutputFormat,
) -> ExitCode {
    let formatter = create_formatter(format);

    let selector = match FileSelector::new(include, exclude) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::BadArgs;
        }
    };

    let model = match open_model(archive_path) {
        Ok(m) => m,
        Err(code) => return code,
    };

    let entries: Vec<_> = model
        .walk()
        .filter(|e| selector.matches(e.path()))
        .collect();

    print!("{}", formatter.format_list(&entries, tree));

    if entries.iter().any(|e| e.is_decode_failure()) {
        ExitCode::Warning
    } else {
        ExitCode::Success
    }
}

/// Cat command implementation: writes one file's bytes to stdout
pub fn cat(archive_path: &Path, entry_path: &str) -> ExitCode {
    let model = match open_model(archive_path) {
        Ok(m) => m,
        Err(code) => return code,
    };

    let Some(entry) = model.get(entry_path) else {
        eprintln!("Error: entry not found: {}", entry_path);
        return ExitCode::BadArgs;
    };
    if entry.is_directory() {
        eprintln!("Error: {} is a directory", entry_path);
        return ExitCode::BadArgs;
    }

    let data = match entry.content() {
        Some(EntryContent::Text(text)) if !entry.is_decode_failure() => text.as_bytes().to_vec(),
        Some(EntryContent::Image(image)) => image.bytes().to_vec(),
        _ => match futures::executor::block_on(model.read_original(entry)) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error: {}", e);
                return error_to_exit_code(&e);
            }
        },
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(&data).and_then(|()| stdout.flush()) {
        eprintln!("Error: {}", e);
        return ExitCode::IoError;
    }

    ExitCode::Success
}

/// Info command implementation
pub fn info(archive_path: &Path, format: OutputFormat) -> ExitCode {
    let formatter = create_formatter(format);

    let model = match open_model(archive_path) {
        Ok(m) => m,
        Err(code) => return code,
    };

    print!("{}", formatter.format_info(&model));

    ExitCode::Success
}

/// Edit command implementation: replaces one text entry and exports the archive
pub fn edit(config: &EditConfig<'_>) -> ExitCode {
    let formatter = create_formatter(config.format);

    let content = match (&config.content, config.from_file) {
        (Some(text), None) => text.clone(),
        (None, Some(path)) => match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                return ExitCode::IoError;
            }
        },
        _ => {
            eprintln!("Error: exactly one of --content or --from is required");
            return ExitCode::BadArgs;
        }
    };

    let method = if config.stored {
        ExportMethod::Stored
    } else {
        ExportMethod::Deflated
    };
    let options = match ExportOptions::new().method(method).level(config.level) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::BadArgs;
        }
    };

    let mut session = SessionStore::new();
    let upload = match read_upload(config.archive_path) {
        Ok(u) => u,
        Err(code) => return code,
    };
    if let Err(e) = futures::executor::block_on(session.open_upload(upload)) {
        eprintln!("Error opening archive: {}", e);
        return error_to_exit_code(&e);
    }

    session.open_tab(config.entry);
    match session.apply_edit(config.entry, content) {
        EditOutcome::Applied { .. } | EditOutcome::Unchanged => {}
        outcome => {
            eprintln!("Error: cannot edit {}: {}", config.entry, outcome);
            return ExitCode::BadArgs;
        }
    }

    let exported = match session.export(&options) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {}", e);
            return error_to_exit_code(&e);
        }
    };

    let output_path = match config.output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(config.archive_path, &exported.file_name),
    };
    if let Err(e) = std::fs::write(&output_path, &exported.bytes) {
        eprintln!("Error writing {}: {}", output_path.display(), e);
        return ExitCode::IoError;
    }

    print!(
        "{}",
        formatter.format_export(
            config.entry,
            &output_path.display().to_string(),
            &exported
        )
    );

    ExitCode::Success
}

/// Places the exported file next to the input archive
fn default_output_path(archive_path: &Path, file_name: &str) -> PathBuf {
    match archive_path.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Reads an archive from disk as an upload
fn read_upload(path: &Path) -> Result<Upload, ExitCode> {
    let bytes = std::fs::read(path).map_err(|e| {
        eprintln!("Error reading {}: {}", path.display(), e);
        ExitCode::IoError
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Upload::new(name, bytes).map_err(|e| {
        eprintln!("Error: {}", e);
        error_to_exit_code(&e)
    })
}

/// Helper to open an archive and build its model
fn open_model(path: &Path) -> Result<ArchiveModel, ExitCode> {
    let upload = read_upload(path)?;
    futures::executor::block_on(ArchiveModel::from_upload(upload)).map_err(|e| {
        eprintln!("Error opening archive: {}", e);
        error_to_exit_code(&e)
    })
}
