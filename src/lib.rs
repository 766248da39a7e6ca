//! # Chartscan
//!
//! A bounded-resource security scanner for chart archives (gzip-compressed
//! tar bundles).
//!
//! ## Overview
//!
//! Chartscan rejects archives that are unsafe to accept from untrusted
//! uploaders:
//!
//! - Archives larger than a compressed size limit
//! - Archives that decompress past an uncompressed size limit (decompression bombs)
//! - Documentation files containing markup an HTML sanitizer would strip
//!   (scripts, event handlers, dangerous URLs)
//!
//! Content violations carry a unified diff of what the sanitizer removed, so
//! a reviewer can see the offending markup.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chartscan::{ChartScanner, Policy};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scanner = ChartScanner::new();
//! let archive = std::fs::read("mychart-0.1.0.tgz")?;
//!
//! match scanner.scan(archive.as_slice()) {
//!     Ok(report) => println!("chart is clean ({} files inspected)", report.entries_inspected),
//!     Err(err) => match err.violation() {
//!         Some(v) if v.policy == Policy::MaliciousContent => {
//!             println!("{}", v.violation);
//!             println!("{}", v.context.as_deref().unwrap_or_default());
//!         }
//!         Some(v) => println!("rejected: {} ({})", v.violation, v.policy),
//!         None => return Err(err.into()),
//!     },
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `default` - Includes tokio runtime support
//! - `tokio-runtime` - `ChartScanner::scan_async` with a deadline
//!
//! ## Architecture
//!
//! - **Core**: Policies, violations, errors, configuration and bounded reading
//! - **Archive**: Bounded gzip decompression and lazy tar traversal
//! - **Policy**: Entry filtering, the sanitization-diff check and caller actions
//! - **Scanner**: The pipeline tying the stages together
//! - **Audit**: Structured logging of scan outcomes

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod archive;
pub mod audit;
pub mod core;
pub mod policy;
pub mod scanner;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types at the crate root
pub use crate::core::{
    bounded_copy, ArchiveHash, BoundedCopy, Policy, PolicyViolation, ScanError, ScanReport,
    ScanResult, ScannerConfig,
};

pub use crate::policy::{ContentFilter, PolicyAction, SanitizationCheck, Sanitizer};
pub use crate::scanner::{ChartScanner, ChartScannerBuilder};

/// Prelude module for convenient imports.
///
/// ```rust
/// use chartscan::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        ArchiveHash, Policy, PolicyViolation, ScanError, ScanReport, ScanResult, ScannerConfig,
    };
    pub use crate::policy::{PatchRenderer, PolicyAction, Sanitizer};
    pub use crate::scanner::{ChartScanner, ChartScannerBuilder};
}
