//! Chart scanning orchestration.
//!
//! [`ChartScanner`] runs the full pipeline: bounded read of the compressed
//! input, bounded decompression, lazy tar traversal, content filtering and
//! the sanitization-diff check.

mod chart_scanner;

pub use chart_scanner::{ChartScanner, ChartScannerBuilder};
