//! Audit event types and emission functions.

use crate::core::{PolicyViolation, ScanError, ScanReport};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit record of a finished scan, suitable for persisting as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanAuditEvent {
    /// Event type.
    pub event_type: String,

    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,

    /// Unique scan ID.
    pub scan_id: String,

    /// Outcome: `clean`, `violation` or `error`.
    pub outcome: String,

    /// Violated policy, for violations.
    pub policy: Option<String>,

    /// Violation or error message.
    pub message: Option<String>,

    /// Archive hash (BLAKE3), for clean scans.
    pub archive_hash_blake3: Option<String>,
}

impl ScanAuditEvent {
    /// Builds the audit record for a scan result.
    pub fn from_result(scan_id: &str, result: &Result<ScanReport, ScanError>) -> Self {
        let (outcome, policy, message, hash) = match result {
            Ok(report) => ("clean", None, None, Some(report.archive_hash.blake3.clone())),
            Err(ScanError::Violation(v)) => (
                "violation",
                Some(v.policy.to_string()),
                Some(v.violation.clone()),
                None,
            ),
            Err(err) => ("error", None, Some(err.to_string()), None),
        };

        Self {
            event_type: "scan_result".to_string(),
            timestamp: Utc::now(),
            scan_id: scan_id.to_string(),
            outcome: outcome.to_string(),
            policy,
            message,
            archive_hash_blake3: hash,
        }
    }
}

/// Emits an audit event for a scan starting.
pub fn emit_scan_started(scan_id: &str, compressed_size: u64) {
    tracing::info!(
        target: "chartscan::audit",
        event_type = "scan_started",
        scan_id = %scan_id,
        compressed_size,
        "Chart scan started"
    );
}

/// Emits an audit event for a scan that found no violation.
pub fn emit_scan_completed(report: &ScanReport) {
    tracing::info!(
        target: "chartscan::audit",
        event_type = "scan_completed",
        scan_id = %report.id,
        archive_hash_blake3 = %report.archive_hash.blake3,
        compressed_size = report.compressed_size,
        uncompressed_size = report.uncompressed_size,
        entries_seen = report.entries_seen,
        entries_inspected = report.entries_inspected,
        duration_ms = report.duration.as_millis() as u64,
        "Chart scan completed"
    );
}

/// Emits an audit event for a policy violation.
///
/// The diff itself is only logged at debug level.
pub fn emit_policy_violation(scan_id: &str, violation: &PolicyViolation) {
    tracing::warn!(
        target: "chartscan::audit",
        event_type = "policy_violation",
        scan_id = %scan_id,
        policy = %violation.policy,
        violation = %violation.violation,
        diff_lines = violation.diff_line_count(),
        "Chart violates policy"
    );

    if let Some(context) = &violation.context {
        tracing::debug!(
            target: "chartscan::audit",
            scan_id = %scan_id,
            diff = %context,
            "Policy violation context"
        );
    }
}

/// Emits an audit event for a scan aborted by an operational error.
pub fn emit_scan_failed(scan_id: &str, error: &ScanError) {
    tracing::error!(
        target: "chartscan::audit",
        event_type = "scan_failed",
        scan_id = %scan_id,
        error = %error,
        "Chart scan failed"
    );
}

/// Emits the audit event matching a scan result, followed by the
/// [`ScanAuditEvent`] record as a JSON field.
pub fn emit_scan_result(scan_id: &str, result: &Result<ScanReport, ScanError>) {
    match result {
        Ok(report) => emit_scan_completed(report),
        Err(ScanError::Violation(violation)) => emit_policy_violation(scan_id, violation),
        Err(error) => emit_scan_failed(scan_id, error),
    }

    emit_audit_record(&ScanAuditEvent::from_result(scan_id, result));
}

/// Emits a persisted-form audit record.
pub fn emit_audit_record(event: &ScanAuditEvent) {
    match serde_json::to_string(event) {
        Ok(record) => tracing::info!(
            target: "chartscan::audit",
            event_type = %event.event_type,
            scan_id = %event.scan_id,
            outcome = %event.outcome,
            record = %record,
            "Chart scan recorded"
        ),
        Err(e) => tracing::warn!(
            target: "chartscan::audit",
            scan_id = %event.scan_id,
            error = %e,
            "Failed to serialize audit record"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_audit_event_for_violation() {
        let result = Err(PolicyViolation::malicious_content("README.md", "-x\n").into());
        let event = ScanAuditEvent::from_result("scan-1", &result);

        assert_eq!(event.outcome, "violation");
        assert_eq!(event.policy.as_deref(), Some("malicious-content"));
        assert!(event.message.unwrap().contains("README.md"));
        assert!(event.archive_hash_blake3.is_none());
    }

    #[test]
    fn test_audit_record_serializes_outcome() {
        let result = Err(PolicyViolation::uncompressed_size().into());
        let event = ScanAuditEvent::from_result("scan-3", &result);
        let record = serde_json::to_string(&event).unwrap();

        assert!(record.contains("\"outcome\":\"violation\""));
        assert!(record.contains("\"policy\":\"uncompressed-archive-size\""));
        emit_scan_result("scan-3", &result);
    }

    #[test]
    fn test_audit_event_for_error() {
        let result = Err(ScanError::read(io::Error::new(io::ErrorKind::Other, "boom")));
        let event = ScanAuditEvent::from_result("scan-2", &result);

        assert_eq!(event.outcome, "error");
        assert!(event.policy.is_none());
        assert!(event.message.unwrap().contains("failed to read chart archive"));
    }
}
