//! Fuzz target for EntryPath::new with arbitrary string input.
//!
//! Run with: cargo +nightly fuzz run entry_path
//!
//! Properties checked for every accepted path:
//! - No `.` or `..` segments
//! - Not absolute
//! - No NUL bytes or backslashes
//! - Parent and ancestors stay within the path

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(path_str) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(path) = ziplens::EntryPath::new(path_str) else {
        return;
    };

    let normalized = path.as_str();
    assert!(
        !normalized
            .strip_suffix('/')
            .unwrap_or(normalized)
            .split('/')
            .any(|s| s == "." || s == ".." || s.is_empty()),
        "Bad segment accepted: {:?}",
        normalized
    );
    assert!(!normalized.starts_with('/'), "Absolute path accepted: {:?}", normalized);
    assert!(!normalized.contains('\0'), "NUL byte in path: {:?}", normalized);
    assert!(!normalized.contains('\\'), "Backslash survived: {:?}", normalized);

    for ancestor in path.ancestors() {
        assert!(normalized.starts_with(ancestor.as_str()));
        assert!(ancestor.is_directory());
    }
    assert!(normalized.starts_with(path.parent().as_str()));
});
