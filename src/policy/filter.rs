//! Selection of archive entries subject to content inspection.

use crate::core::config::ScannerConfig;

/// Matches entry names against a set of file extensions.
///
/// Matching is a case-insensitive suffix comparison. Extensions given
/// without a leading dot get one, so `"md"` and `".md"` are equivalent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFilter {
    extensions: Vec<String>,
}

impl ContentFilter {
    /// Creates a filter for the given extensions.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().trim().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        Self { extensions }
    }

    /// Creates the filter described by a scanner configuration.
    pub fn from_config(config: &ScannerConfig) -> Self {
        Self::new(&config.inspected_extensions)
    }

    /// Returns the normalized extensions.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns `true` if the named entry must be inspected.
    pub fn is_eligible(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::from_config(&ScannerConfig::default())
    }
}
