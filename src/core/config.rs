//! Scanner configuration.

use crate::core::error::{ScanError, ScanResult};

use serde::{Deserialize, Serialize};

/// Default maximum size of the compressed archive (10 MiB).
pub const DEFAULT_MAX_COMPRESSED_SIZE: u64 = 10 * 1024 * 1024;

/// Default maximum size of the decompressed archive (10 MiB).
pub const DEFAULT_MAX_UNCOMPRESSED_SIZE: u64 = 10 * 1024 * 1024;

/// Extensions inspected by default.
pub const DEFAULT_INSPECTED_EXTENSIONS: &[&str] = &[".md"];

/// Size limits and inspection policy for a chart scanner.
///
/// Fixed for the lifetime of a scanner. Deserializes from
/// `{"maxCompressedSize", "maxUncompressedSize", "inspectedExtensions"}`;
/// missing keys take their defaults.
///
/// # Examples
///
/// ```rust
/// use chartscan::ScannerConfig;
///
/// let config = ScannerConfig::new()
///     .with_max_compressed_size(1024 * 1024)
///     .with_inspected_extensions(vec![".md".into(), ".txt".into()]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerConfig {
    /// Maximum number of compressed bytes read from the input.
    pub max_compressed_size: u64,

    /// Maximum number of bytes produced by decompression.
    pub max_uncompressed_size: u64,

    /// File name suffixes whose content is inspected, matched case-insensitively.
    pub inspected_extensions: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_compressed_size: DEFAULT_MAX_COMPRESSED_SIZE,
            max_uncompressed_size: DEFAULT_MAX_UNCOMPRESSED_SIZE,
            inspected_extensions: DEFAULT_INSPECTED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl ScannerConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> ScanResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ScanError::configuration(format!("invalid scanner config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the maximum compressed size.
    pub fn with_max_compressed_size(mut self, size: u64) -> Self {
        self.max_compressed_size = size;
        self
    }

    /// Sets the maximum uncompressed size.
    pub fn with_max_uncompressed_size(mut self, size: u64) -> Self {
        self.max_uncompressed_size = size;
        self
    }

    /// Replaces the inspected extensions.
    pub fn with_inspected_extensions(mut self, extensions: Vec<String>) -> Self {
        self.inspected_extensions = extensions;
        self
    }

    /// Checks that both limits are non-zero and every extension is non-blank.
    pub fn validate(&self) -> ScanResult<()> {
        if self.max_compressed_size == 0 {
            return Err(ScanError::configuration(
                "maxCompressedSize must be greater than zero",
            ));
        }
        if self.max_uncompressed_size == 0 {
            return Err(ScanError::configuration(
                "maxUncompressedSize must be greater than zero",
            ));
        }
        if let Some(ext) = self
            .inspected_extensions
            .iter()
            .find(|e| e.trim().trim_start_matches('.').is_empty())
        {
            return Err(ScanError::configuration(format!(
                "invalid inspected extension {ext:?}"
            )));
        }
        Ok(())
    }
}
