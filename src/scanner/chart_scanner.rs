//! The chart scanner pipeline.

use crate::archive::{decompress_bounded, ChartArchive};
use crate::audit;
use crate::core::{
    bounded_copy, ArchiveHash, PolicyViolation, ScanError, ScanReport, ScanResult, ScannerConfig,
};
use crate::policy::{
    ContentFilter, PatchRenderer, SanitizationCheck, Sanitizer, UgcSanitizer, UnifiedDiffRenderer,
};

use chrono::Utc;
use std::io::Read;
use std::sync::Arc;
use std::time::Instant;

/// Builder for creating a `ChartScanner`.
#[derive(Debug, Default)]
pub struct ChartScannerBuilder {
    config: ScannerConfig,
    sanitizer: Option<Arc<dyn Sanitizer>>,
    renderer: Option<Arc<dyn PatchRenderer>>,
}

impl ChartScannerBuilder {
    /// Creates a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the default UGC sanitizer.
    pub fn with_sanitizer<S: Sanitizer + 'static>(mut self, sanitizer: S) -> Self {
        self.sanitizer = Some(Arc::new(sanitizer));
        self
    }

    /// Replaces the default unified diff renderer.
    pub fn with_patch_renderer<P: PatchRenderer + 'static>(mut self, renderer: P) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Builds the scanner, validating the configuration.
    pub fn build(self) -> ScanResult<ChartScanner> {
        self.config.validate()?;

        let sanitizer = self.sanitizer.unwrap_or_else(|| Arc::new(UgcSanitizer));
        let renderer = self
            .renderer
            .unwrap_or_else(|| Arc::new(UnifiedDiffRenderer::new()));

        Ok(ChartScanner {
            filter: ContentFilter::from_config(&self.config),
            check: SanitizationCheck::new(sanitizer, renderer),
            config: self.config,
        })
    }
}

/// Scans chart archives for oversized payloads and malicious documentation.
///
/// The scanner holds only immutable configuration, so one instance can serve
/// concurrent callers as long as each supplies its own input stream.
///
/// # Examples
///
/// ```rust,no_run
/// use chartscan::{ChartScanner, Policy};
/// use std::fs::File;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let scanner = ChartScanner::new();
/// match scanner.scan(File::open("nginx-1.0.0.tgz")?) {
///     Ok(report) => println!("clean: {}", report.archive_hash),
///     Err(err) if err.policy() == Some(Policy::MaliciousContent) => {
///         let violation = err.violation().unwrap();
///         println!("{}\n{}", violation.violation, violation.context.as_deref().unwrap_or(""));
///     }
///     Err(err) => return Err(err.into()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChartScanner {
    config: ScannerConfig,
    filter: ContentFilter,
    check: SanitizationCheck,
}

impl ChartScanner {
    /// Creates a scanner with the default configuration.
    pub fn new() -> Self {
        let config = ScannerConfig::default();
        Self {
            filter: ContentFilter::from_config(&config),
            check: SanitizationCheck::default(),
            config,
        }
    }

    /// Creates a new builder.
    pub fn builder() -> ChartScannerBuilder {
        ChartScannerBuilder::new()
    }

    /// Returns the scanner's configuration.
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Scans a gzip-compressed chart archive.
    ///
    /// Stops at the first policy violation or operational error. The reader
    /// is consumed up to the compressed size limit plus one byte.
    pub fn scan<R: Read>(&self, mut reader: R) -> ScanResult<ScanReport> {
        let scan_id = uuid::Uuid::new_v4().to_string();
        let result = self.run(&scan_id, &mut reader);
        audit::emit_scan_result(&scan_id, &result);
        result
    }

    fn run<R: Read>(&self, scan_id: &str, reader: &mut R) -> ScanResult<ScanReport> {
        let started = Instant::now();
        let started_at = Utc::now();

        let compressed =
            bounded_copy(reader, self.config.max_compressed_size).map_err(ScanError::read)?;
        if compressed.exceeded {
            return Err(PolicyViolation::compressed_size().into());
        }
        audit::emit_scan_started(scan_id, compressed.len());

        let decompressed =
            decompress_bounded(&compressed.bytes, self.config.max_uncompressed_size)?;
        if decompressed.exceeded {
            return Err(PolicyViolation::uncompressed_size().into());
        }

        let archive_hash = ArchiveHash::compute(&compressed.bytes);
        let compressed_size = compressed.len();
        drop(compressed);

        let mut archive = ChartArchive::new(&decompressed.bytes);
        let mut entries_seen = 0;
        let mut entries_inspected = 0;

        for entry in archive.walk()? {
            let mut entry = entry?;
            entries_seen += 1;

            if entry.is_dir() || !self.filter.is_eligible(entry.name()) {
                tracing::debug!(scan_id = %scan_id, entry = %entry.name(), "Skipping entry");
                continue;
            }

            let content = entry.read_content()?;
            entries_inspected += 1;
            tracing::debug!(
                scan_id = %scan_id,
                entry = %entry.name(),
                size = content.len(),
                sanitizer = %self.check.sanitizer().name(),
                "Inspecting entry"
            );

            self.check.check(entry.name(), &content)?;
        }

        Ok(ScanReport {
            id: scan_id.to_string(),
            archive_hash,
            compressed_size,
            uncompressed_size: decompressed.len(),
            entries_seen,
            entries_inspected,
            started_at,
            completed_at: Utc::now(),
            duration: started.elapsed(),
        })
    }
}

impl Default for ChartScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Async adapter for use inside a tokio runtime.
#[cfg(feature = "tokio-runtime")]
mod async_scan {
    use super::*;
    use std::time::Duration;

    impl ChartScanner {
        /// Runs [`ChartScanner::scan`] on the blocking thread pool with a deadline.
        ///
        /// On timeout the caller gets [`ScanError::Timeout`]; the blocking
        /// scan itself still runs to completion, bounded by the size limits.
        pub async fn scan_async<R>(&self, reader: R, timeout: Duration) -> ScanResult<ScanReport>
        where
            R: Read + Send + 'static,
        {
            let scanner = self.clone();
            let task = tokio::task::spawn_blocking(move || scanner.scan(reader));

            match tokio::time::timeout(timeout, task).await {
                Ok(Ok(result)) => result,
                Ok(Err(join_error)) => Err(ScanError::internal(format!(
                    "scan task failed: {join_error}"
                ))),
                Err(_) => Err(ScanError::Timeout { elapsed: timeout }),
            }
        }
    }
}
