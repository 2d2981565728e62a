//! Exit codes for the CLI tool.

use ziplens::Error;

/// Exit code constants
pub const SUCCESS: i32 = 0;
/// Operation completed with warnings
pub const WARNING: i32 = 1;
/// Fatal error occurred
pub const FATAL_ERROR: i32 = 2;
/// Archive format error
pub const BAD_ARCHIVE: i32 = 3;
/// I/O error
pub const IO_ERROR: i32 = 5;
/// Ctrl+C (128 + SIGINT)
pub const USER_INTERRUPT: i32 = 130;
/// Invalid command line arguments
pub const BAD_ARGS: i32 = 255;

/// Exit code enum for structured handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    Warning,
    FatalError,
    BadArchive,
    IoError,
    BadArgs,
}

impl ExitCode {
    /// Returns the numeric exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::Warning => WARNING,
            Self::FatalError => FATAL_ERROR,
            Self::BadArchive => BAD_ARCHIVE,
            Self::IoError => IO_ERROR,
            Self::BadArgs => BAD_ARGS,
        }
    }
}

/// Converts a ziplens error to an exit code
pub fn error_to_exit_code(error: &Error) -> ExitCode {
    match error {
        Error::Io(_) => ExitCode::IoError,
        Error::ArchiveParse(_) => ExitCode::BadArchive,
        Error::MissingOriginal { .. } | Error::EntryRead { .. } => ExitCode::BadArchive,
        Error::UnsupportedUpload { .. } => ExitCode::BadArgs,
        Error::InvalidEntryPath(_) | Error::EntryNotFound { .. } => ExitCode::BadArgs,
        Error::Export(_) => ExitCode::FatalError,
        // Future error variants - required by #[non_exhaustive]
        _ => ExitCode::FatalError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        let io = Error::Io(std::io::Error::other("disk"));
        assert_eq!(error_to_exit_code(&io), ExitCode::IoError);
        assert_eq!(
            error_to_exit_code(&Error::ArchiveParse("eof".into())),
            ExitCode::BadArchive
        );
        assert_eq!(
            error_to_exit_code(&Error::UnsupportedUpload {
                name: "a.rar".into()
            }),
            ExitCode::BadArgs
        );
        assert_eq!(error_to_exit_code(&Error::NoArchiveLoaded), ExitCode::FatalError);
        assert_eq!(ExitCode::BadArgs.code(), 255);
    }
}
