//! Filesystem storage backend

use std::fs::{File, OpenOptions};
use std::io::{self, Seek};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::location::Location;
use crate::stream::TextStream;

use super::{closed_error, StorageBackend};

/// Storage backend for resources that resolve to a real filesystem path.
///
/// The file is opened once in read/append/create mode and the handle is held
/// for the backend's lifetime, never reopened per operation. Content persists
/// across the process.
pub struct FileBackend {
    path: PathBuf,
    file: Option<File>,
}

impl FileBackend {
    /// True for path locations and strings with the exact `file://` prefix.
    pub fn test(location: &Location) -> bool {
        match location {
            Location::Path(_) => true,
            Location::Url(url) => url.starts_with(Location::FILE_SCHEME),
            Location::Stream(_) => false,
        }
    }

    /// Open a backend for a location accepted by [`FileBackend::test`].
    ///
    /// A URL location has its `file://` prefix stripped; whatever remains is
    /// the path.
    pub fn open(location: Location) -> Result<Self> {
        let path = match location {
            Location::Path(path) => path,
            Location::Url(url) => match url.strip_prefix(Location::FILE_SCHEME) {
                Some(rest) => PathBuf::from(rest),
                None => return Err(Error::UnsupportedProtocol(url)),
            },
            Location::Stream(_) => {
                return Err(Error::UnsupportedProtocol("<open text stream>".to_string()))
            }
        };

        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)?;
        tracing::debug!("opened file backend at {}", path.display());

        Ok(Self {
            path,
            file: Some(file),
        })
    }

    pub(super) fn open_boxed(location: Location) -> Result<Box<dyn StorageBackend>> {
        Ok(Box::new(Self::open(location)?))
    }

    fn file(&mut self) -> io::Result<&mut File> {
        self.file.as_mut().ok_or_else(closed_error)
    }
}

impl StorageBackend for FileBackend {
    fn put(&mut self, data: &mut dyn TextStream) -> Result<()> {
        let file = self.file()?;
        file.rewind()?;
        data.rewind()?;
        // Append-mode writes land at end of file; truncating first puts that
        // end at offset 0.
        file.set_len(0)?;
        io::copy(data, file)?;
        Ok(())
    }

    fn append(&mut self, data: &mut dyn TextStream) -> Result<()> {
        let file = self.file()?;
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
                tracing::warn!(
                    "failed to flush file backend at {} on close: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for FileBackend {
    fn drop(&mut self) {
        self.close();
    }
}
