//! Error types for archive model, session and export operations.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when loading, inspecting and re-exporting a ZIP archive,
//! along with a convenient [`Result<T>`] type alias.
//!
//! Not every failure is an error. A text entry that fails to decode becomes
//! sentinel content and the rest of the archive still loads, and session
//! operations on unknown tabs or paths are silent no-ops. The variants below
//! are the failures a caller has to show to the user.
//!
//! # Example
//!
//! ```rust
//! use ziplens::{Error, Upload};
//!
//! match Upload::new("notes.txt", b"hello".to_vec()) {
//!     Err(Error::UnsupportedUpload { name }) => println!("{} is not a .zip file", name),
//!     Err(e) => println!("Error: {}", e),
//!     Ok(_) => unreachable!(),
//! }
//! ```

use std::io;

/// The main error type for ziplens operations.
///
/// | Category | Variants | Typical Cause |
/// |----------|----------|---------------|
/// | Input | [`UnsupportedUpload`][Self::UnsupportedUpload] | Wrong file picked or dropped |
/// | Format | [`ArchiveParse`][Self::ArchiveParse] | Corrupt or truncated container |
/// | Entries | [`EntryNotFound`][Self::EntryNotFound], [`EntryRead`][Self::EntryRead] | Unreadable member |
/// | Export | [`MissingOriginal`][Self::MissingOriginal], [`Export`][Self::Export] | Re-encoding failed |
/// | Session | [`NoArchiveLoaded`][Self::NoArchiveLoaded], [`StaleLoad`][Self::StaleLoad] | Out-of-order use |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The upload was rejected before any parse attempt.
    ///
    /// Only files named `*.zip` are accepted. No session state changes.
    #[error("Unsupported upload '{name}': only .zip files can be opened")]
    UnsupportedUpload {
        /// The name of the rejected file.
        name: String,
    },

    /// The archive container is corrupt or unreadable as a whole.
    ///
    /// The previous model, if any, stays active.
    #[error("Invalid ZIP archive: {0}")]
    ArchiveParse(String),

    /// An entry name in the container cannot be used as a model path.
    ///
    /// The builder logs and skips such entries instead of failing.
    #[error("Invalid entry path: {0}")]
    InvalidEntryPath(String),

    /// An entry path was requested that the source does not contain.
    #[error("Entry not found: {path}")]
    EntryNotFound {
        /// The requested path.
        path: String,
    },

    /// A single entry could not be read from the container.
    #[error("Failed to read entry '{path}': {reason}")]
    EntryRead {
        /// The entry path.
        path: String,
        /// What went wrong.
        reason: String,
    },

    /// The original bytes of an untouched entry are not available for export.
    ///
    /// The download is not produced and session state is unchanged.
    #[error("Original bytes missing for entry '{path}'")]
    MissingOriginal {
        /// The entry path.
        path: String,
    },

    /// The output archive could not be encoded.
    #[error("Export failed: {0}")]
    Export(String),

    /// An operation needed a loaded archive but none is loaded.
    #[error("No archive loaded")]
    NoArchiveLoaded,

    /// A load finished after a newer upload had started; its result was dropped.
    #[error("Load {generation} was superseded by a newer upload")]
    StaleLoad {
        /// The generation of the discarded load.
        generation: u64,
    },
}

/// Container-level failures while opening an upload.
///
/// Uploads are parsed from memory, so reader I/O errors also mean malformed
/// data and map to [`Error::ArchiveParse`].
impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::ArchiveParse(e.to_string()),
            other => Error::ArchiveParse(other.to_string()),
        }
    }
}

impl Error {
    /// Returns true if this error leaves the session untouched and can be
    /// shown to the user as a simple message.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedUpload { .. }
                | Error::ArchiveParse(_)
                | Error::MissingOriginal { .. }
                | Error::Export(_)
        )
    }
}

/// A specialized Result type for ziplens operations.
pub type Result<T> = std::result::Result<T, Error>;
