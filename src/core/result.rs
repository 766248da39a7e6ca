//! Scan report returned when an archive passes every policy.

use crate::core::types::ArchiveHash;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The result of a scan that found no violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Unique identifier for this scan.
    pub id: String,

    /// Digest of the compressed archive.
    pub archive_hash: ArchiveHash,

    /// Size of the compressed archive in bytes.
    pub compressed_size: u64,

    /// Size of the decompressed tar stream in bytes.
    pub uncompressed_size: u64,

    /// Number of archive entries walked.
    pub entries_seen: usize,

    /// Number of entries whose content was inspected.
    pub entries_inspected: usize,

    /// When the scan started.
    pub started_at: DateTime<Utc>,

    /// When the scan completed.
    pub completed_at: DateTime<Utc>,

    /// How long the scan took.
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl ScanReport {
    /// Returns the compression ratio of the archive (uncompressed / compressed).
    pub fn expansion_ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 0.0;
        }
        self.uncompressed_size as f64 / self.compressed_size as f64
    }
}

/// Serde helper for Duration serialization.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
