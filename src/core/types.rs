//! Core types used throughout the chartscan library.
//!
//! This module defines the policies a chart archive can violate, the
//! structured violation value returned to callers, and the archive digest
//! attached to scan reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Message used for both size policies.
const TOO_LARGE: &str = "chart is too large";

/// A policy enforced by the chart scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// The compressed archive exceeds the maximum compressed size.
    CompressedArchiveSize,
    /// The decompressed archive exceeds the maximum uncompressed size.
    UncompressedArchiveSize,
    /// A documentation file contains markup the sanitizer would remove.
    MaliciousContent,
}

impl Policy {
    /// Returns the stable identifier of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompressedArchiveSize => "compressed-archive-size",
            Self::UncompressedArchiveSize => "uncompressed-archive-size",
            Self::MaliciousContent => "malicious-content",
        }
    }

    /// Returns `true` for the two archive size policies.
    pub fn is_size_policy(&self) -> bool {
        matches!(
            self,
            Self::CompressedArchiveSize | Self::UncompressedArchiveSize
        )
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected policy violation.
///
/// Size violations carry only the policy and a message; content violations
/// also carry the diff between the original and the sanitized file in
/// `context`. Callers distinguish the two by `policy`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{violation}")]
pub struct PolicyViolation {
    /// The violated policy.
    pub policy: Policy,

    /// Human-readable description of the violation.
    pub violation: String,

    /// Diff of the offending content, for content violations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl PolicyViolation {
    /// Creates a violation of the compressed archive size policy.
    pub fn compressed_size() -> Self {
        Self {
            policy: Policy::CompressedArchiveSize,
            violation: TOO_LARGE.to_string(),
            context: None,
        }
    }

    /// Creates a violation of the uncompressed archive size policy.
    pub fn uncompressed_size() -> Self {
        Self {
            policy: Policy::UncompressedArchiveSize,
            violation: TOO_LARGE.to_string(),
            context: None,
        }
    }

    /// Creates a malicious content violation for the named file.
    pub fn malicious_content(file_name: &str, diff: impl Into<String>) -> Self {
        Self {
            policy: Policy::MaliciousContent,
            violation: format!("chart contains malicious content in file: {file_name}"),
            context: Some(diff.into()),
        }
    }

    /// Returns the number of lines in the diff context (zero if absent).
    pub fn diff_line_count(&self) -> usize {
        self.context.as_deref().map_or(0, |c| c.lines().count())
    }
}

/// BLAKE3 digest of a compressed chart archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchiveHash {
    /// Hex-encoded BLAKE3 hash.
    pub blake3: String,
}

impl ArchiveHash {
    /// Computes the digest of the given archive bytes.
    pub fn compute(data: &[u8]) -> Self {
        Self {
            blake3: blake3::hash(data).to_hex().to_string(),
        }
    }
}

impl fmt::Display for ArchiveHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blake3:{}", self.blake3)
    }
}
