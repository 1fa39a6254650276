// SPDX-License-Identifier: MPL-2.0
//! On-disk store for downloaded image bytes.
//!
//! Files are named by the BLAKE3 hash of the image URL, so any URL maps to a
//! safe, fixed-length file name. Entries are never expired; deleting the
//! directory clears the cache.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File extension of cached entries (content is stored as received).
const ENTRY_EXTENSION: &str = "img";

#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the entry for `url`, whether or not it exists.
    #[must_use]
    pub fn entry_path(&self, url: &str) -> PathBuf {
        let hash = blake3::hash(url.as_bytes()).to_hex();
        self.dir.join(format!("{hash}.{ENTRY_EXTENSION}"))
    }

    /// Returns the stored bytes for `url`, or `None` if nothing is stored.
    pub fn read(&self, url: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.entry_path(url)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Stores `bytes` for `url`, creating the cache directory if needed.
    ///
    /// Writes to a uniquely named temporary file first, so readers never see
    /// a partial entry and concurrent writers of one URL never share it.
    pub fn write(&self, url: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.entry_path(url);
        let tmp = path.with_extension(format!("{}.part", Uuid::new_v4().simple()));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path).inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })
    }

    /// Removes the entry for `url`; missing entries are not an error.
    pub fn remove(&self, url: &str) -> io::Result<()> {
        match fs::remove_file(self.entry_path(url)) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const URL: &str = "https://images.dog.ceo/breeds/akita/512px-Ainu-Dog.jpg";

    #[test]
    fn write_then_read_returns_bytes() {
        let dir = tempdir().expect("temp dir");
        let cache = DiskCache::new(dir.path().join("images"));

        cache.write(URL, b"jpeg bytes").expect("write entry");
        assert_eq!(cache.read(URL).expect("read entry"), Some(b"jpeg bytes".to_vec()));
    }

    #[test]
    fn missing_entry_reads_none() {
        let dir = tempdir().expect("temp dir");
        let cache = DiskCache::new(dir.path().to_path_buf());
        assert_eq!(cache.read(URL).expect("read"), None);
    }

    #[test]
    fn entry_names_are_hashes() {
        let cache = DiskCache::new(PathBuf::from("/cache"));
        let path = cache.entry_path(URL);
        let name = path.file_name().and_then(|n| n.to_str()).expect("utf8 name");
        assert_eq!(name.len(), 64 + 1 + ENTRY_EXTENSION.len());
        assert_ne!(cache.entry_path(URL), cache.entry_path("https://example.com/other.jpg"));
    }

    #[test]
    fn concurrent_writes_of_one_url_all_succeed() {
        let dir = tempdir().expect("temp dir");
        let cache = DiskCache::new(dir.path().to_path_buf());

        std::thread::scope(|scope| {
            let writers: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cache.write(URL, b"same bytes")))
                .collect();
            for writer in writers {
                writer.join().expect("writer thread").expect("write entry");
            }
        });

        assert_eq!(cache.read(URL).expect("read"), Some(b"same bytes".to_vec()));
        let leftovers = fs::read_dir(dir.path())
            .expect("list cache dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "part"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempdir().expect("temp dir");
        let cache = DiskCache::new(dir.path().to_path_buf());
        cache.write(URL, b"x").expect("write");
        cache.remove(URL).expect("first remove");
        cache.remove(URL).expect("second remove");
        assert_eq!(cache.read(URL).expect("read"), None);
    }
}
