//! Ephemeral storage backend

use std::fs::File;
use std::io::{self, Seek, SeekFrom};

use crate::error::Result;
use crate::location::Location;
use crate::stream::TextStream;

use super::{closed_error, StorageBackend};

/// Storage backend for ephemeral resources.
///
/// The backing store is an unnamed temp file with no guaranteed fixed
/// location; the operating system reclaims it when the handle is released.
pub struct TempBackend {
    file: Option<File>,
}

impl TempBackend {
    /// True only for strings with the exact `tmp://` prefix.
    pub fn test(location: &Location) -> bool {
        matches!(location, Location::Url(url) if url.starts_with(Location::TMP_SCHEME))
    }

    /// Allocate a fresh ephemeral backing store.
    ///
    /// If the location is an open stream, its full contents are copied in as
    /// a one-time seed, not a live alias: later writes to the backend never
    /// touch the original stream.
    pub fn open(location: Location) -> Result<Self> {
        let mut file = tempfile::tempfile()?;

        if let Location::Stream(mut stream) = location {
            stream.rewind()?;
            io::copy(&mut stream, &mut file)?;
            tracing::debug!("seeded temp backend from an open stream");
        }

        Ok(Self { file: Some(file) })
    }

    pub(super) fn open_boxed(location: Location) -> Result<Box<dyn StorageBackend>> {
        Ok(Box::new(Self::open(location)?))
    }

    fn file(&mut self) -> io::Result<&mut File> {
        self.file.as_mut().ok_or_else(closed_error)
    }
}

impl StorageBackend for TempBackend {
    fn put(&mut self, data: &mut dyn TextStream) -> Result<()> {
        let file = self.file()?;
        file.rewind()?;
        data.rewind()?;
        file.set_len(0)?;
        io::copy(data, file)?;
        Ok(())
    }

    fn append(&mut self, data: &mut dyn TextStream) -> Result<()> {
        let file = self.file()?;
        file.seek(SeekFrom::End(0))?;
        data.rewind()?;
        io::copy(data, file)?;
        Ok(())
    }

    fn get(&mut self) -> Result<&mut dyn TextStream> {
        let file = self.file()?;
        file.rewind()?;
        Ok(file)
    }

    fn close(&mut self) {
        if let Some(file) = self.file.take() {
            if let Err(e) = file.sync_all() {
                tracing::warn!("failed to flush temp backend on close: {}", e);
            }
        }
    }
}

impl Drop for TempBackend {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn stream(content: &str) -> Cursor<Vec<u8>> {
        Cursor::new(content.as_bytes().to_vec())
    }

    fn read_all(backend: &mut TempBackend) -> String {
        let handle = backend.get().unwrap();
        let mut content = String::new();
        handle.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_predicate_accepts_only_tmp_urls() {
        assert!(TempBackend::test(&Location::from("tmp://scratch")));
        assert!(!TempBackend::test(&Location::from("file:///tmp/x.txt")));
        assert!(!TempBackend::test(&Location::from(std::path::PathBuf::from(
            "/tmp/x.txt"
        ))));
    }

    #[test]
    fn test_fresh_store_is_empty() {
        let mut backend = TempBackend::open(Location::from("tmp://fresh")).unwrap();
        assert_eq!(read_all(&mut backend), "");
    }

    #[test]
    fn test_stream_location_seeds_contents() {
        let seed: Box<dyn TextStream> = Box::new(stream("seeded content"));
        let mut backend = TempBackend::open(Location::from(seed)).unwrap();
        assert_eq!(read_all(&mut backend), "seeded content");
    }

    #[test]
    fn test_seed_is_a_copy_not_an_alias() {
        let mut original = stream("original");
        original.rewind().unwrap();
        let seed: Box<dyn TextStream> = Box::new(original.clone());
        let mut backend = TempBackend::open(Location::from(seed)).unwrap();

        backend.put(&mut stream("replaced")).unwrap();

        let mut untouched = String::new();
        original.read_to_string(&mut untouched).unwrap();
        assert_eq!(untouched, "original");
        assert_eq!(read_all(&mut backend), "replaced");
    }

    #[test]
    fn test_put_then_get_round_trips() {
        let mut backend = TempBackend::open(Location::from("tmp://rt")).unwrap();
        backend.put(&mut stream("abc123")).unwrap();
        assert_eq!(read_all(&mut backend), "abc123");
    }

    #[test]
    fn test_put_truncates_previous_content() {
        let mut backend = TempBackend::open(Location::from("tmp://tr")).unwrap();
        backend.put(&mut stream("a much longer first write")).unwrap();
        backend.put(&mut stream("short")).unwrap();
        assert_eq!(read_all(&mut backend), "short");
    }

    #[test]
    fn test_append_adds_after_prior_end() {
        let mut backend = TempBackend::open(Location::from("tmp://ap")).unwrap();
        backend.put(&mut stream("head")).unwrap();
        backend.append(&mut stream("tail")).unwrap();
        assert_eq!(read_all(&mut backend), "headtail");
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut backend = TempBackend::open(Location::from("tmp://cl")).unwrap();
        backend.close();
        backend.close();
        assert!(backend.get().is_err());
    }
}
