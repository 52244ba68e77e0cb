//! File-style text stream abstraction
//!
//! Every storage backend owns exactly one stream implementing [`TextStream`],
//! and every payload handed to a backend arrives as one. The trait is
//! blanket-implemented, so plain files, in-memory cursors, and `tempfile`
//! handles all qualify without wrapper types.

use std::io::{Cursor, Read, Seek, Write};

use crate::error::Result;

/// A seekable, readable, writable byte stream holding text data.
///
/// Implemented automatically for anything file-like: `std::fs::File`,
/// `Cursor<Vec<u8>>`, boxed trait objects, and so on.
pub trait TextStream: Read + Write + Seek + Send {}

impl<T: Read + Write + Seek + Send + ?Sized> TextStream for T {}

/// Materialize an owned string into a stream backends can copy from.
///
/// An in-memory cursor is preferred. If the buffer allocation fails, the data
/// is spooled into an unnamed temp file instead; the caller sees a working
/// stream either way, and the degradation is only logged.
pub(crate) fn materialize_string(data: String) -> Result<Box<dyn TextStream>> {
    let mut buf = Vec::new();
    if buf.try_reserve_exact(data.len()).is_ok() {
        buf.extend_from_slice(data.as_bytes());
        return Ok(Box::new(Cursor::new(buf)));
    }

    tracing::warn!(
        "failed to allocate in-memory buffer for string of length {}, spooling to temp file",
        data.len()
    );
    let mut file = tempfile::tempfile()?;
    file.write_all(data.as_bytes())?;
    file.rewind()?;
    Ok(Box::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialized_stream_reads_from_offset_zero() {
        let mut stream = materialize_string("hello stream".to_string()).unwrap();
        let mut content = String::new();
        stream.read_to_string(&mut content).unwrap();
        assert_eq!(content, "hello stream");
    }

    #[test]
    fn test_materialized_stream_is_seekable() {
        let mut stream = materialize_string("0123456789".to_string()).unwrap();
        stream.seek(std::io::SeekFrom::Start(5)).unwrap();
        let mut tail = String::new();
        stream.read_to_string(&mut tail).unwrap();
        assert_eq!(tail, "56789");
    }

    #[test]
    fn test_materialized_stream_empty_string() {
        let mut stream = materialize_string(String::new()).unwrap();
        let mut content = String::new();
        stream.read_to_string(&mut content).unwrap();
        assert!(content.is_empty());
    }
}
