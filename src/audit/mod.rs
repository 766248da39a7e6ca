//! Structured audit logging for chart scans.
//!
//! Events are emitted through `tracing` with the `chartscan::audit` target
//! and can be captured by any subscriber (JSON file, OpenTelemetry, etc.).

mod events;

pub use events::{
    emit_audit_record, emit_policy_violation, emit_scan_completed, emit_scan_failed,
    emit_scan_result, emit_scan_started, ScanAuditEvent,
};
