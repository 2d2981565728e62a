//! Entry selection using glob patterns.

use glob::Pattern;

/// Error type for file selector operations
#[derive(Debug)]
pub struct PatternError(pub String);

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid glob pattern: {}", self.0)
    }
}

impl std::error::Error for PatternError {}

/// Entry selector based on include and exclude glob patterns
pub struct FileSelector {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl FileSelector {
    /// Creates a new selector from pattern strings
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, PatternError> {
        let include = include
            .iter()
            .map(|p| Pattern::new(p).map_err(|e| PatternError(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        let exclude = exclude
            .iter()
            .map(|p| Pattern::new(p).map_err(|e| PatternError(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { include, exclude })
    }

    /// Checks if an entry path matches the selection criteria
    pub fn matches(&self, path: &str) -> bool {
        // If include patterns specified, at least one must match
        if !self.include.is_empty() && !self.include.iter().any(|p| p.matches(path)) {
            return false;
        }

        // None of the exclude patterns should match
        !self.exclude.iter().any(|p| p.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selector_matches_everything() {
        let selector = FileSelector::new(&[], &[]).unwrap();
        assert!(selector.matches("src/main.js"));
        assert!(selector.matches("assets/"));
    }

    #[test]
    fn test_include_and_exclude() {
        let selector =
            FileSelector::new(&["src/*".to_string()], &["*.min.js".to_string()]).unwrap();
        assert!(selector.matches("src/app.js"));
        assert!(!selector.matches("src/app.min.js"));
        assert!(!selector.matches("README.md"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(FileSelector::new(&["[".to_string()], &[]).is_err());
    }
}
