//! Extension-based classification of archive entries.
//!
//! Classification never inspects content. A trailing slash makes an entry a
//! directory; otherwise the lower-cased extension is looked up in fixed
//! tables, and anything unmatched is [`EntryKind::Binary`].

use std::fmt;

/// Extensions decoded as UTF-8 text and routed to the editor.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "js", "jsx", "ts", "tsx", "html", "css", "json", "xml", "csv",
];

/// Extensions wrapped as image blobs for preview.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg", "webp", "bmp", "ico"];

/// Language tag used when no mapping exists.
pub const PLAINTEXT: &str = "plaintext";

/// Content classification of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A directory node. Has children, never content.
    Directory,
    /// UTF-8 text, editable.
    Text,
    /// Image data, preview only.
    Image,
    /// Anything else. Content stays in the original archive.
    Binary,
}

impl EntryKind {
    /// Returns true for [`EntryKind::Directory`].
    pub fn is_directory(self) -> bool {
        self == EntryKind::Directory
    }

    /// Returns the lower-case name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Directory => "directory",
            EntryKind::Text => "text",
            EntryKind::Image => "image",
            EntryKind::Binary => "binary",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a file by its extension.
///
/// The lookup is case-insensitive. `None` (no extension) is binary.
///
/// ```
/// use ziplens::classify::{classify, EntryKind};
///
/// assert_eq!(classify(Some("png")), EntryKind::Image);
/// assert_eq!(classify(Some("TS")), EntryKind::Text);
/// assert_eq!(classify(Some("xyz")), EntryKind::Binary);
/// assert_eq!(classify(None), EntryKind::Binary);
/// ```
pub fn classify(extension: Option<&str>) -> EntryKind {
    let Some(ext) = extension else {
        return EntryKind::Binary;
    };
    let ext = ext.to_ascii_lowercase();
    if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        EntryKind::Text
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        EntryKind::Image
    } else {
        EntryKind::Binary
    }
}

/// Classifies a raw entry path. A trailing slash is always a directory.
pub fn classify_path(path: &str) -> EntryKind {
    if path.is_empty() || path.ends_with('/') {
        return EntryKind::Directory;
    }
    let name = crate::archive_path::leaf_name(path);
    classify(crate::archive_path::extension_of(name).as_deref())
}

/// Maps an extension to the syntax-highlighting language id used by the
/// editor. Unmapped extensions are [`PLAINTEXT`].
///
/// ```
/// use ziplens::classify::display_language;
///
/// assert_eq!(display_language(Some("tsx")), "typescript");
/// assert_eq!(display_language(Some("png")), "plaintext");
/// assert_eq!(display_language(None), "plaintext");
/// ```
pub fn display_language(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return PLAINTEXT;
    };
    match ext.to_ascii_lowercase().as_str() {
        "js" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "html" => "html",
        "css" => "css",
        "json" => "json",
        "md" => "markdown",
        "xml" => "xml",
        _ => PLAINTEXT,
    }
}

/// Returns the MIME type used to tag image blobs.
///
/// Unknown extensions get `application/octet-stream`.
pub fn mime_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return "application/octet-stream";
    };
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_extensions() {
        for ext in TEXT_EXTENSIONS {
            assert_eq!(classify(Some(ext)), EntryKind::Text, "{}", ext);
        }
    }

    #[test]
    fn test_image_extensions_have_mime() {
        for ext in IMAGE_EXTENSIONS {
            assert_eq!(classify(Some(ext)), EntryKind::Image, "{}", ext);
            assert!(mime_type(Some(ext)).starts_with("image/"), "{}", ext);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify(Some("JSON")), EntryKind::Text);
        assert_eq!(classify(Some("Jpeg")), EntryKind::Image);
        assert_eq!(display_language(Some("JS")), "javascript");
    }

    #[test]
    fn test_classify_path() {
        assert_eq!(classify_path("dir/"), EntryKind::Directory);
        assert_eq!(classify_path("dir.png/"), EntryKind::Directory);
        assert_eq!(classify_path(""), EntryKind::Directory);
        assert_eq!(classify_path("a/b/logo.svg"), EntryKind::Image);
        assert_eq!(classify_path("README"), EntryKind::Binary);
        assert_eq!(classify_path("lib.so"), EntryKind::Binary);
        assert_eq!(classify_path(".txt"), EntryKind::Binary);
    }

    #[test]
    fn test_language_map() {
        assert_eq!(display_language(Some("ts")), "typescript");
        assert_eq!(display_language(Some("md")), "markdown");
        assert_eq!(display_language(Some("csv")), PLAINTEXT);
        assert_eq!(display_language(Some("txt")), PLAINTEXT);
        assert_eq!(display_language(Some("bin")), PLAINTEXT);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(EntryKind::Directory.to_string(), "directory");
        assert!(EntryKind::Directory.is_directory());
        assert!(!EntryKind::Text.is_directory());
    }
}
