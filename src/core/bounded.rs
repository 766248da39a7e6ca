//! Size-bounded reading.
//!
//! [`bounded_copy`] is the scanner's defence against oversized and
//! decompression-bomb archives: it never buffers more than the limit, and it
//! tells a stream that ended exactly at the limit apart from one that was cut
//! off by it.

use std::io::{self, Read};

/// Bytes read by [`bounded_copy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedCopy {
    /// The bytes copied from the source, at most `limit` of them.
    pub bytes: Vec<u8>,

    /// Whether the source had more data after `limit` bytes.
    pub exceeded: bool,
}

impl BoundedCopy {
    /// Returns the number of bytes copied.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Returns `true` if nothing was copied.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Copies at most `limit` bytes from `source` into memory.
///
/// `exceeded` is set only when `limit` bytes were copied and the source can
/// still produce at least one more byte. A source holding exactly `limit`
/// bytes is not exceeded. Nothing past the single probe byte is read.
pub fn bounded_copy<R: Read + ?Sized>(source: &mut R, limit: u64) -> io::Result<BoundedCopy> {
    let mut bytes = Vec::new();
    (&mut *source).take(limit).read_to_end(&mut bytes)?;

    let exceeded = if (bytes.len() as u64) < limit {
        false
    } else {
        has_more(source)?
    };

    Ok(BoundedCopy { bytes, exceeded })
}

fn has_more<R: Read + ?Sized>(source: &mut R) -> io::Result<bool> {
    let mut probe = [0u8; 1];
    loop {
        match source.read(&mut probe) {
            Ok(n) => return Ok(n > 0),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
