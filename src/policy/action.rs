//! Caller-side actions derived from scan results.

use crate::core::{Policy, ScanReport, ScanResult};

use serde::{Deserialize, Serialize};

/// What an upload pipeline should do with a scanned chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolicyAction {
    /// Accept the chart.
    Allow,

    /// Reject the chart outright.
    Reject {
        /// Reason for rejecting.
        reason: String,
    },

    /// Hold the chart until a human has reviewed the flagged content.
    RequireManualReview {
        /// Reason for the review.
        reason: String,
        /// Patch showing what the sanitizer would remove.
        diff: String,
    },
}

impl PolicyAction {
    /// Maps a scan result to an action.
    ///
    /// Oversized archives and unreadable archives are rejected; malicious
    /// content is held for review with its diff; clean charts are allowed.
    pub fn from_scan(result: &ScanResult<ScanReport>) -> Self {
        let err = match result {
            Ok(_) => return Self::Allow,
            Err(err) => err,
        };

        match err.violation() {
            Some(violation) if violation.policy == Policy::MaliciousContent => {
                Self::RequireManualReview {
                    reason: violation.violation.clone(),
                    diff: violation.context.clone().unwrap_or_default(),
                }
            }
            Some(violation) => Self::Reject {
                reason: format!("{} ({})", violation.violation, violation.policy),
            },
            None => Self::Reject {
                reason: err.to_string(),
            },
        }
    }

    /// Returns true if this action allows the chart through.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns true if this action rejects the chart.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Reject { .. })
    }

    /// Returns true if this action requires manual review.
    pub fn requires_review(&self) -> bool {
        matches!(self, Self::RequireManualReview { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArchiveHash, PolicyViolation, ScanError};
    use chrono::Utc;
    use std::io;
    use std::time::Duration;

    fn clean_report() -> ScanReport {
        ScanReport {
            id: "scan".into(),
            archive_hash: ArchiveHash::compute(b""),
            compressed_size: 0,
            uncompressed_size: 0,
            entries_seen: 0,
            entries_inspected: 0,
            started_at: Utc::now(),
            completed_at: Utc::now(),
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_clean_scan_is_allowed() {
        assert!(PolicyAction::from_scan(&Ok(clean_report())).is_allowed());
    }

    #[test]
    fn test_size_violation_is_rejected() {
        let result = Err(PolicyViolation::compressed_size().into());
        let action = PolicyAction::from_scan(&result);
        assert_eq!(
            action,
            PolicyAction::Reject {
                reason: "chart is too large (compressed-archive-size)".into()
            }
        );
    }

    #[test]
    fn test_malicious_content_requires_review() {
        let result = Err(PolicyViolation::malicious_content("README.md", "-<script>\n").into());
        match PolicyAction::from_scan(&result) {
            PolicyAction::RequireManualReview { reason, diff } => {
                assert!(reason.contains("README.md"));
                assert_eq!(diff, "-<script>\n");
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_operational_error_is_rejected() {
        let result = Err(ScanError::extract(io::Error::new(
            io::ErrorKind::InvalidData,
            "checksum mismatch",
        )));
        let action = PolicyAction::from_scan(&result);
        assert!(action.is_rejected());
        assert!(!action.requires_review());
    }
}
