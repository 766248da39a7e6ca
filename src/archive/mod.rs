//! Chart archive intake.
//!
//! A chart archive is a gzip-compressed tar stream. [`decompress`] turns the
//! compressed buffer into a size-bounded tar buffer and [`walker`] iterates
//! its entries lazily.

pub mod decompress;
pub mod walker;

pub use decompress::decompress_bounded;
pub use walker::{ArchiveEntry, ArchiveWalker, ChartArchive};
