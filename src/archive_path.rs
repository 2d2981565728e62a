//! Entry path type with validation and tree helpers.
//!
//! Paths inside an archive are `/`-separated. Directory paths carry a
//! trailing slash, file paths do not, and the synthetic root is the empty
//! path. Every ancestor of a path can be derived from the path alone, which
//! is what lets the model synthesize directories that the container never
//! lists explicitly.

use crate::{Error, Result};
use std::fmt;

/// Maximum length for entry paths (in bytes).
const MAX_PATH_LENGTH: usize = 32768;

/// A validated entry path.
///
/// `EntryPath` accepts the names a ZIP container stores and rejects the ones
/// that cannot be placed in a tree:
/// - No NUL bytes
/// - Not absolute (does not start with `/`)
/// - No empty segments (no `//`), apart from the single trailing slash of a
///   directory
/// - No `.` or `..` segments
///
/// Backslashes written by some Windows tools are normalized to `/`.
///
/// # Examples
///
/// ```
/// use ziplens::EntryPath;
///
/// let path = EntryPath::new("src/main.TS").unwrap();
/// assert_eq!(path.name(), "main.TS");
/// assert_eq!(path.extension().as_deref(), Some("ts"));
/// assert_eq!(path.parent().as_str(), "src/");
///
/// let dir = EntryPath::new("src/").unwrap();
/// assert!(dir.is_directory());
/// assert_eq!(dir.name(), "src");
///
/// assert!(EntryPath::new("../secret").is_err());
/// assert!(EntryPath::new("/absolute").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryPath(String);

impl EntryPath {
    /// Creates a new `EntryPath`, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntryPath`] if the path is empty, absolute,
    /// contains NUL bytes, empty segments, or `.`/`..` segments.
    pub fn new(s: &str) -> Result<Self> {
        let normalized = s.replace('\\', "/");
        Self::validate(&normalized)?;
        Ok(Self(normalized))
    }

    /// The synthetic root path (empty string).
    pub fn root() -> Self {
        Self(String::new())
    }

    fn validate(s: &str) -> Result<()> {
        if s.contains('\0') {
            return Err(Error::InvalidEntryPath("contains NUL byte".into()));
        }
        if s.is_empty() {
            return Err(Error::InvalidEntryPath("empty path".into()));
        }
        if s.len() > MAX_PATH_LENGTH {
            return Err(Error::InvalidEntryPath(format!(
                "path exceeds maximum length of {} bytes",
                MAX_PATH_LENGTH
            )));
        }
        if s.starts_with('/') {
            return Err(Error::InvalidEntryPath(format!(
                "absolute path not allowed: {}",
                s
            )));
        }

        let body = s.strip_suffix('/').unwrap_or(s);
        for segment in body.split('/') {
            match segment {
                "" => {
                    return Err(Error::InvalidEntryPath(format!(
                        "empty segment in {}",
                        s
                    )));
                }
                "." | ".." => {
                    return Err(Error::InvalidEntryPath(format!(
                        "'{}' segment not allowed in {}",
                        segment, s
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns the path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the path and returns the inner string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns true for the synthetic root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if this path names a directory (trailing slash or root).
    pub fn is_directory(&self) -> bool {
        self.is_root() || self.0.ends_with('/')
    }

    /// Returns the final segment, without the trailing slash of a directory.
    pub fn name(&self) -> &str {
        leaf_name(&self.0)
    }

    /// Returns the owning directory path, which is the root for top-level
    /// entries. The root is its own parent.
    pub fn parent(&self) -> Self {
        Self(parent_path(&self.0).to_string())
    }

    /// Returns every ancestor directory below the root, outermost first.
    ///
    /// ```
    /// use ziplens::EntryPath;
    ///
    /// let path = EntryPath::new("a/b/c.txt").unwrap();
    /// let ancestors: Vec<_> = path.ancestors().map(|p| p.as_str().to_string()).collect();
    /// assert_eq!(ancestors, vec!["a/", "a/b/"]);
    /// ```
    pub fn ancestors(&self) -> impl Iterator<Item = EntryPath> + '_ {
        let body = self.0.strip_suffix('/').unwrap_or(&self.0);
        body.match_indices('/')
            .map(move |(idx, _)| Self(body[..=idx].to_string()))
    }

    /// Returns the number of segments (0 for the root).
    pub fn depth(&self) -> usize {
        if self.is_root() {
            return 0;
        }
        let body = self.0.strip_suffix('/').unwrap_or(&self.0);
        body.split('/').count()
    }

    /// Returns the lower-cased extension of a file path.
    ///
    /// Directories have no extension, and neither do names whose only dot is
    /// the leading one (e.g. `.gitignore`).
    pub fn extension(&self) -> Option<String> {
        if self.is_directory() {
            return None;
        }
        extension_of(self.name())
    }
}

/// Returns the final segment of a raw path string.
pub(crate) fn leaf_name(path: &str) -> &str {
    let body = path.strip_suffix('/').unwrap_or(path);
    body.rsplit('/').next().unwrap_or(body)
}

/// Returns the parent directory (with trailing slash) of a raw path string.
pub(crate) fn parent_path(path: &str) -> &str {
    let body = path.strip_suffix('/').unwrap_or(path);
    match body.rfind('/') {
        Some(idx) => &body[..=idx],
        None => "",
    }
}

/// Returns the lower-cased suffix after the last `.` of a file name.
pub(crate) fn extension_of(name: &str) -> Option<String> {
    let dot = name.rfind('.')?;
    if dot == 0 || dot + 1 == name.len() {
        return None;
    }
    Some(name[dot + 1..].to_ascii_lowercase())
}

impl AsRef<str> for EntryPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for EntryPath {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
