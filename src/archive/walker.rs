//! Lazy, forward-only traversal of a decompressed chart archive.

use crate::core::error::{ScanError, ScanResult};

use std::io::Read;

/// A tar archive held in memory.
pub struct ChartArchive<'d> {
    archive: tar::Archive<&'d [u8]>,
}

impl<'d> ChartArchive<'d> {
    /// Wraps a decompressed tar stream.
    pub fn new(tar_bytes: &'d [u8]) -> Self {
        Self {
            archive: tar::Archive::new(tar_bytes),
        }
    }

    /// Starts the single forward pass over the archive's entries.
    pub fn walk(&mut self) -> ScanResult<ArchiveWalker<'_, 'd>> {
        let entries = self.archive.entries().map_err(ScanError::extract)?;
        Ok(ArchiveWalker { entries })
    }
}

/// Iterator over archive entries.
///
/// Yields entries one at a time; content is only read on request.
/// A malformed header ends the walk with [`ScanError::Extract`].
pub struct ArchiveWalker<'a, 'd> {
    entries: tar::Entries<'a, &'d [u8]>,
}

impl<'a, 'd> Iterator for ArchiveWalker<'a, 'd> {
    type Item = ScanResult<ArchiveEntry<'a, 'd>>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.entries.next()? {
            Ok(entry) => entry,
            Err(e) => return Some(Err(ScanError::extract(e))),
        };
        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        Some(Ok(ArchiveEntry { name, inner: entry }))
    }
}

/// A single archive entry.
pub struct ArchiveEntry<'a, 'd> {
    name: String,
    inner: tar::Entry<'a, &'d [u8]>,
}

impl ArchiveEntry<'_, '_> {
    /// Returns the entry's path inside the archive.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for directory entries.
    ///
    /// Every other entry type, including ones this reader does not know,
    /// is treated as file content.
    pub fn is_dir(&self) -> bool {
        self.inner.header().entry_type().is_dir()
    }

    /// Returns the content size recorded in the entry header.
    pub fn size(&self) -> u64 {
        self.inner.size()
    }

    /// Reads the entry's full content.
    pub fn read_content(&mut self) -> ScanResult<Vec<u8>> {
        let mut content = Vec::new();
        self.inner
            .read_to_end(&mut content)
            .map_err(|e| ScanError::extract_file(self.name.clone(), e))?;
        Ok(content)
    }
}

impl std::fmt::Debug for ArchiveEntry<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveEntry")
            .field("name", &self.name)
            .field("size", &self.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{tar_archive, tar_archive_typed};

    #[test]
    fn test_walks_entries_in_order() {
        let tar = tar_archive(&[
            ("chart/Chart.yaml", "name: demo\n"),
            ("chart/README.md", "# Demo\n"),
        ]);
        let mut archive = ChartArchive::new(&tar);

        let mut seen = Vec::new();
        for entry in archive.walk().unwrap() {
            let mut entry = entry.unwrap();
            assert!(!entry.is_dir());
            let content = entry.read_content().unwrap();
            seen.push((entry.name().to_string(), content));
        }

        assert_eq!(
            seen,
            vec![
                ("chart/Chart.yaml".to_string(), b"name: demo\n".to_vec()),
                ("chart/README.md".to_string(), b"# Demo\n".to_vec()),
            ]
        );
    }

    #[test]
    fn test_skipping_content_does_not_desync() {
        let values = "v".repeat(2000);
        let tar = tar_archive(&[
            ("chart/values.yaml", values.as_str()),
            ("chart/README.md", "docs\n"),
        ]);
        let mut archive = ChartArchive::new(&tar);
        let names: Vec<String> = archive
            .walk()
            .unwrap()
            .map(|e| e.unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["chart/values.yaml", "chart/README.md"]);
    }

    #[test]
    fn test_empty_stream_has_no_entries() {
        let mut archive = ChartArchive::new(&[]);
        assert_eq!(archive.walk().unwrap().count(), 0);
    }

    #[test]
    fn test_garbage_header_is_extract_error() {
        let garbage = vec![b'x'; 512];
        let mut archive = ChartArchive::new(&garbage);
        let first = archive.walk().unwrap().next().unwrap();
        assert!(matches!(first, Err(ScanError::Extract { .. })));
    }

    #[test]
    fn test_non_regular_entries_keep_their_body() {
        let tar = tar_archive_typed(&[
            ("chart/docs.md/", tar::EntryType::Directory, b"".as_slice()),
            ("chart/README.md", tar::EntryType::Continuous, b"contiguous\n".as_slice()),
            ("chart/NOTES.md", tar::EntryType::new(b'Z'), b"vendor\n".as_slice()),
        ]);
        let mut archive = ChartArchive::new(&tar);

        let mut seen = Vec::new();
        for entry in archive.walk().unwrap() {
            let mut entry = entry.unwrap();
            let is_dir = entry.is_dir();
            seen.push((is_dir, entry.read_content().unwrap()));
        }

        assert_eq!(
            seen,
            vec![
                (true, Vec::new()),
                (false, b"contiguous\n".to_vec()),
                (false, b"vendor\n".to_vec()),
            ]
        );
    }
}
