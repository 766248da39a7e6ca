//! Fixture builders for chart archives used across unit tests.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Gzip-compresses `data`.
pub(crate) fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("gzip write");
    encoder.finish().expect("gzip finish")
}

/// Builds an uncompressed tar stream of text files, in the given order.
pub(crate) fn tar_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let raw: Vec<(&str, &[u8])> = entries
        .iter()
        .map(|(name, content)| (*name, content.as_bytes()))
        .collect();
    tar_archive_raw(&raw)
}

/// Builds an uncompressed tar stream of arbitrary files, in the given order.
pub(crate) fn tar_archive_raw(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let typed: Vec<(&str, tar::EntryType, &[u8])> = entries
        .iter()
        .map(|(name, content)| (*name, tar::EntryType::Regular, *content))
        .collect();
    tar_archive_typed(&typed)
}

/// Builds an uncompressed tar stream with an explicit header type per entry.
///
/// Symlink entries point at `README.txt`.
pub(crate) fn tar_archive_typed(entries: &[(&str, tar::EntryType, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, entry_type, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(*entry_type);
        header.set_size(content.len() as u64);
        header.set_mode(if entry_type.is_dir() { 0o755 } else { 0o644 });
        if entry_type.is_symlink() {
            header.set_link_name("README.txt").expect("tar link name");
        }
        builder
            .append_data(&mut header, name, *content)
            .expect("tar append");
    }
    builder.into_inner().expect("tar finish")
}

/// Builds a gzip-compressed chart archive of text files.
pub(crate) fn chart_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    gzip(&tar_archive(entries))
}
