//! Options for building archive models and exporting archives.

use crate::{Error, Result};

/// Prefix written in front of the message stored as content for text
/// entries that could not be decoded.
pub const DEFAULT_DECODE_SENTINEL: &str = "[unable to decode file] ";

/// Metadata directories dropped from the tree by default.
pub const DEFAULT_RESERVED_PREFIXES: &[&str] = &["__MACOSX/"];

/// Highest compression level accepted by the ZIP deflate encoder.
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// Options controlling how container entries become model entries.
///
/// # Example
///
/// ```rust
/// use ziplens::BuildOptions;
///
/// let options = BuildOptions::new()
///     .reserved_prefix(".Trashes/")
///     .skip_hidden(false);
/// assert!(options.is_excluded(".Trashes/501/file"));
/// assert!(!options.is_excluded("src/.env"));
/// ```
#[derive(Debug, Clone)]
pub struct BuildOptions {
    reserved_prefixes: Vec<String>,
    skip_hidden: bool,
    decode_sentinel: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            reserved_prefixes: DEFAULT_RESERVED_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            skip_hidden: true,
            decode_sentinel: DEFAULT_DECODE_SENTINEL.to_string(),
        }
    }
}

impl BuildOptions {
    /// Creates options with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reserved metadata prefix. Paths starting with it are dropped.
    pub fn reserved_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reserved_prefixes.push(prefix.into());
        self
    }

    /// Removes all reserved prefixes, including the defaults.
    pub fn clear_reserved_prefixes(mut self) -> Self {
        self.reserved_prefixes.clear();
        self
    }

    /// Sets whether hidden entries nested under a visible parent are dropped.
    pub fn skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    /// Sets the sentinel prefix used as content for undecodable text entries.
    pub fn decode_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.decode_sentinel = sentinel.into();
        self
    }

    /// Returns the sentinel prefix.
    pub fn sentinel(&self) -> &str {
        &self.decode_sentinel
    }

    /// Returns true if a path is excluded from the tree and index.
    ///
    /// A path is excluded when it starts with a reserved prefix, or (with
    /// `skip_hidden`) when a dot-leading segment sits below a visible parent,
    /// i.e. the path contains `/.`. Top-level dotfiles are kept.
    pub fn is_excluded(&self, path: &str) -> bool {
        if self
            .reserved_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
        {
            return true;
        }
        self.skip_hidden && path.contains("/.")
    }
}

/// Compression applied to every exported file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMethod {
    /// Deflate at the configured level.
    #[default]
    Deflated,
    /// No compression.
    Stored,
}

/// Options controlling archive export.
///
/// Defaults to deflate at the maximum level with an `_edited` name suffix.
///
/// # Example
///
/// ```rust
/// use ziplens::{ExportMethod, ExportOptions};
///
/// let options = ExportOptions::new().method(ExportMethod::Stored).suffix("_v2");
/// assert_eq!(options.output_name("site.zip"), "site_v2.zip");
///
/// assert!(ExportOptions::new().level(12).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ExportOptions {
    method: ExportMethod,
    level: u8,
    suffix: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            method: ExportMethod::Deflated,
            level: MAX_COMPRESSION_LEVEL,
            suffix: "_edited".to_string(),
        }
    }
}

impl ExportOptions {
    /// Creates options with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression method.
    pub fn method(mut self, method: ExportMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the deflate level (0-9).
    ///
    /// Deflate has no level 0, so level 0 writes entries stored
    /// (uncompressed) instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Export`] for levels above 9.
    pub fn level(mut self, level: u8) -> Result<Self> {
        if level > MAX_COMPRESSION_LEVEL {
            return Err(Error::Export(format!(
                "compression level {} out of range 0-{}",
                level, MAX_COMPRESSION_LEVEL
            )));
        }
        self.level = level;
        Ok(self)
    }

    /// Sets the suffix inserted before the output name's extension.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Returns the compression method.
    pub fn compression_method(&self) -> ExportMethod {
        self.method
    }

    /// Returns the deflate level.
    pub fn compression_level(&self) -> u8 {
        self.level
    }

    /// Derives the output file name from the original upload name.
    ///
    /// The suffix goes before the last extension; names without one get the
    /// suffix appended.
    pub fn output_name(&self, original: &str) -> String {
        match original.rfind('.') {
            Some(dot) if dot > 0 => {
                format!("{}{}{}", &original[..dot], self.suffix, &original[dot..])
            }
            _ => format!("{}{}", original, self.suffix),
        }
    }
}
