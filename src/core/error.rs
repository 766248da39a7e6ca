//! Error types for the chartscan library.
//!
//! Scans fail through a single channel, [`ScanError`], which carries two
//! distinct families: operational errors (the archive could not be read or
//! decoded) and policy violations (the archive was read and rejected).
//! The library never panics; all errors are returned as `Result` values.

use crate::core::types::{Policy, PolicyViolation};

use std::io;
use std::time::Duration;
use thiserror::Error;

/// The main error type for scan operations.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The archive violates one of the scanner's policies.
    #[error(transparent)]
    Violation(#[from] PolicyViolation),

    /// The input stream could not be read.
    #[error("failed to read chart archive: {source}")]
    Read {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The input is not a gzip stream.
    #[error("failed to open chart gzip archive: {source}")]
    OpenArchive {
        /// Underlying decoder failure.
        #[source]
        source: io::Error,
    },

    /// The gzip stream is corrupt past its header.
    #[error("failed to decompress chart archive: {source}")]
    Decompress {
        /// Underlying decoder failure.
        #[source]
        source: io::Error,
    },

    /// The decompressed data is not a valid tar archive.
    #[error("failed to extract chart archive: {source}")]
    Extract {
        /// Underlying tar failure.
        #[source]
        source: io::Error,
    },

    /// A single entry's content could not be read.
    #[error("failed to extract file {name:?} from chart archive: {source}")]
    ExtractFile {
        /// Name of the entry inside the archive.
        name: String,
        /// Underlying tar failure.
        #[source]
        source: io::Error,
    },

    /// The scanner configuration is invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// An async scan did not finish before its deadline.
    #[error("scan timed out after {elapsed:?}")]
    Timeout {
        /// The deadline that elapsed.
        elapsed: Duration,
    },

    /// An internal error occurred.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl ScanError {
    /// Returns `true` if this error is a policy violation rather than an
    /// operational failure.
    pub fn is_violation(&self) -> bool {
        matches!(self, Self::Violation(_))
    }

    /// Returns the policy violation, if this error is one.
    pub fn violation(&self) -> Option<&PolicyViolation> {
        match self {
            Self::Violation(violation) => Some(violation),
            _ => None,
        }
    }

    /// Returns the violated policy, if this error is a policy violation.
    pub fn policy(&self) -> Option<Policy> {
        self.violation().map(|v| v.policy)
    }

    /// Consumes the error, returning the policy violation if it is one.
    pub fn into_violation(self) -> Option<PolicyViolation> {
        match self {
            Self::Violation(violation) => Some(violation),
            _ => None,
        }
    }

    /// Creates a `Read` error.
    pub fn read(source: io::Error) -> Self {
        Self::Read { source }
    }

    /// Creates an `Extract` error.
    pub fn extract(source: io::Error) -> Self {
        Self::Extract { source }
    }

    /// Creates an `ExtractFile` error.
    pub fn extract_file(name: impl Into<String>, source: io::Error) -> Self {
        Self::ExtractFile {
            name: name.into(),
            source,
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// A specialized `Result` type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;
