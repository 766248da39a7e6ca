//! Core types for the chartscan library.
//!
//! - [`types`] - Policies, violations and archive digests
//! - [`error`] - The scan error channel
//! - [`config`] - Scanner limits and inspection policy
//! - [`bounded`] - Size-bounded reading
//! - [`result`] - The report returned by a successful scan

pub mod bounded;
pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use bounded::{bounded_copy, BoundedCopy};
pub use config::ScannerConfig;
pub use error::{ScanError, ScanResult};
pub use result::ScanReport;
pub use types::{ArchiveHash, Policy, PolicyViolation};
