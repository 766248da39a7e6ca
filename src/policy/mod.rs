//! Content policy for chart archives.
//!
//! [`ContentFilter`] decides which entries are inspected,
//! [`SanitizationCheck`] inspects them, and [`PolicyAction`] turns a scan
//! result into a decision for the caller.

mod action;
mod diff;
mod filter;
mod sanitize;

pub use action::PolicyAction;
pub use diff::{PatchRenderer, UnifiedDiffRenderer};
pub use filter::ContentFilter;
pub use sanitize::{SanitizationCheck, Sanitizer, UgcSanitizer};
