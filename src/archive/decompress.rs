//! Bounded gzip decompression.

use crate::core::bounded::{bounded_copy, BoundedCopy};
use crate::core::error::{ScanError, ScanResult};

use flate2::read::MultiGzDecoder;
use std::io;

/// Decompresses a gzip buffer, keeping at most `limit` bytes of output.
///
/// The returned copy has `exceeded` set when the decompressed stream is
/// longer than `limit`. Errors before the gzip header is parsed are
/// reported as [`ScanError::OpenArchive`], later ones as
/// [`ScanError::Decompress`]. The decoder is released before returning.
pub fn decompress_bounded(compressed: &[u8], limit: u64) -> ScanResult<BoundedCopy> {
    if compressed.is_empty() {
        return Err(ScanError::OpenArchive {
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "empty gzip stream"),
        });
    }

    let mut decoder = MultiGzDecoder::new(compressed);
    let copied = bounded_copy(&mut decoder, limit);
    let header_parsed = decoder.header().is_some();
    drop(decoder);

    copied.map_err(|source| {
        if header_parsed {
            ScanError::Decompress { source }
        } else {
            ScanError::OpenArchive { source }
        }
    })
}
