//! Per-resource proxy
//!
//! A [`ResourceProxy`] wraps exactly one resolved storage backend and exposes
//! format-normalized get/put over it, independent of what the backend is. It
//! carries the read-only flag (immutable after construction) and the rendered
//! originating location for error messages.

use std::io::{Cursor, Read};
use std::str::FromStr;

use crate::backend::{self, StorageBackend};
use crate::error::{Error, Result};
use crate::location::Location;
use crate::stream::{materialize_string, TextStream};

/// Format selector for [`ResourceProxy::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GetAs {
    /// Read the full content into an owned `String`
    #[default]
    Str,
    /// Copy the full content into a fresh in-memory buffer the caller owns
    Buffer,
    /// Borrow the backend's own rewound handle
    FileHandle,
}

impl GetAs {
    /// The legal selector literals, in the order they are documented.
    pub const FORMATS: [&'static str; 3] = ["str", "buffer", "file_handle"];
}

impl FromStr for GetAs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "str" => Ok(GetAs::Str),
            "buffer" => Ok(GetAs::Buffer),
            "file_handle" => Ok(GetAs::FileHandle),
            other => Err(Error::UnsupportedGetAsFormat(other.to_string())),
        }
    }
}

/// Payload accepted by `put`, `append`, and the resolver's `save`: an owned
/// string or an open text stream.
pub enum WriteData {
    /// Owned string data
    Str(String),
    /// Open text stream; rewound and drained by the backend
    Stream(Box<dyn TextStream>),
}

impl From<&str> for WriteData {
    fn from(data: &str) -> Self {
        WriteData::Str(data.to_string())
    }
}

impl From<String> for WriteData {
    fn from(data: String) -> Self {
        WriteData::Str(data)
    }
}

impl From<Box<dyn TextStream>> for WriteData {
    fn from(stream: Box<dyn TextStream>) -> Self {
        WriteData::Stream(stream)
    }
}

/// Content retrieved from a resource, shaped by the [`GetAs`] selector.
pub enum Retrieved<'a> {
    /// Owned string content
    Str(String),
    /// Owned in-memory copy, rewound to offset 0. Mutating it does not
    /// affect the backend.
    Buffer(Cursor<Vec<u8>>),
    /// Borrowed view over the backend's single open handle, rewound to
    /// offset 0. The caller must not close it and must not hold it across
    /// other operations on the same resource.
    FileHandle(&'a mut dyn TextStream),
}

impl std::fmt::Debug for Retrieved<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Retrieved::Str(content) => f.debug_tuple("Str").field(content).finish(),
            Retrieved::Buffer(buffer) => f.debug_tuple("Buffer").field(buffer).finish(),
            Retrieved::FileHandle(_) => f.debug_tuple("FileHandle").finish(),
        }
    }
}

impl<'a> Retrieved<'a> {
    /// Unwrap the `"str"` shape.
    pub fn into_string(self) -> Option<String> {
        match self {
            Retrieved::Str(content) => Some(content),
            _ => None,
        }
    }

    /// Unwrap the `"buffer"` shape.
    pub fn into_buffer(self) -> Option<Cursor<Vec<u8>>> {
        match self {
            Retrieved::Buffer(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Unwrap the `"file_handle"` shape.
    pub fn into_handle(self) -> Option<&'a mut dyn TextStream> {
        match self {
            Retrieved::FileHandle(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Uniform get/put interface over one storage backend instance.
pub struct ResourceProxy {
    location: String,
    read_only: bool,
    backend: Box<dyn StorageBackend>,
}

impl std::fmt::Debug for ResourceProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceProxy")
            .field("location", &self.location)
            .field("read_only", &self.read_only)
            .finish_non_exhaustive()
    }
}

impl ResourceProxy {
    /// Resolve a backend for `location` and wrap it.
    ///
    /// Fails with [`Error::UnsupportedProtocol`] when no backend accepts the
    /// location; the error carries the location's rendered form.
    pub fn new(location: Location, read_only: bool) -> Result<Self> {
        let rendered = location.to_string();
        let descriptor = backend::resolve(&location)
            .ok_or_else(|| Error::UnsupportedProtocol(rendered.clone()))?;
        tracing::debug!(
            "resolved backend '{}' for location {}",
            descriptor.name,
            rendered
        );
        let backend = descriptor.open(location)?;

        Ok(Self {
            location: rendered,
            read_only,
            backend,
        })
    }

    /// Overwrite the resource with `data`.
    ///
    /// Fails with [`Error::ReadOnly`] if the proxy was constructed read-only.
    pub fn put(&mut self, data: impl Into<WriteData>) -> Result<()> {
        let mut stream = self.writable_stream(data.into())?;
        self.backend.put(&mut *stream)
    }

    /// Append `data` after the resource's current end of stream.
    ///
    /// Subject to the same read-only gate as [`ResourceProxy::put`].
    pub fn append(&mut self, data: impl Into<WriteData>) -> Result<()> {
        let mut stream = self.writable_stream(data.into())?;
        self.backend.append(&mut *stream)
    }

    /// Retrieve the resource content in the requested shape.
    pub fn get(&mut self, as_a: GetAs) -> Result<Retrieved<'_>> {
        match as_a {
            GetAs::Str => Ok(Retrieved::Str(self.get_str()?)),
            GetAs::Buffer => {
                let stream = self.backend.get()?;
                let mut copy = Vec::new();
                stream.read_to_end(&mut copy)?;
                Ok(Retrieved::Buffer(Cursor::new(copy)))
            }
            GetAs::FileHandle => Ok(Retrieved::FileHandle(self.backend.get()?)),
        }
    }

    /// Read the full content into an owned string (the `"str"` shape).
    pub fn get_str(&mut self) -> Result<String> {
        let stream = self.backend.get()?;
        let mut content = String::new();
        stream.read_to_string(&mut content)?;
        Ok(content)
    }

    /// Borrow the backend's own handle, rewound to offset 0 (the
    /// `"file_handle"` shape).
    pub fn get_handle(&mut self) -> Result<&mut dyn TextStream> {
        self.backend.get()
    }

    /// Whether writes through this proxy are rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Rendered form of the originating location, for diagnostics.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Close the underlying backend.
    pub(crate) fn close(&mut self) {
        self.backend.close();
    }

    fn writable_stream(&self, data: WriteData) -> Result<Box<dyn TextStream>> {
        if self.read_only {
            return Err(Error::ReadOnly(self.location.clone()));
        }
        match data {
            WriteData::Str(content) => materialize_string(content),
            WriteData::Stream(stream) => Ok(stream),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_proxy(key: &str) -> ResourceProxy {
        ResourceProxy::new(Location::Url(format!("tmp://{}", key)), false).unwrap()
    }

    #[test]
    fn test_get_as_parses_legal_selectors() {
        assert_eq!("str".parse::<GetAs>().unwrap(), GetAs::Str);
        assert_eq!("buffer".parse::<GetAs>().unwrap(), GetAs::Buffer);
        assert_eq!("file_handle".parse::<GetAs>().unwrap(), GetAs::FileHandle);
    }

    #[test]
    fn test_get_as_rejects_unknown_selector() {
        let err = "bogus".parse::<GetAs>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedGetAsFormat(ref s) if s == "bogus"));
        let message = err.to_string();
        assert!(message.contains("bogus"));
        for format in GetAs::FORMATS {
            assert!(message.contains(format));
        }
    }

    #[test]
    fn test_default_selector_is_str() {
        assert_eq!(GetAs::default(), GetAs::Str);
    }

    #[test]
    fn test_unsupported_protocol_carries_rendered_location() {
        let err = ResourceProxy::new(Location::from("ftp://host/res"), false).unwrap_err();
        assert!(matches!(err, Error::UnsupportedProtocol(ref loc) if loc == "ftp://host/res"));
    }

    #[test]
    fn test_put_then_get_str_round_trips() {
        let mut proxy = temp_proxy("rt");
        proxy.put("abc123").unwrap();
        assert_eq!(proxy.get_str().unwrap(), "abc123");
    }

    #[test]
    fn test_put_accepts_a_stream_payload() {
        let mut proxy = temp_proxy("sp");
        let payload: Box<dyn TextStream> =
            Box::new(Cursor::new(b"from a stream".to_vec()));
        proxy.put(WriteData::from(payload)).unwrap();
        assert_eq!(proxy.get_str().unwrap(), "from a stream");
    }

    #[test]
    fn test_read_only_rejects_put_but_permits_get() {
        let mut proxy =
            ResourceProxy::new(Location::from("tmp://ro"), true).unwrap();
        assert!(proxy.is_read_only());

        let err = proxy.put("nope").unwrap_err();
        assert!(matches!(err, Error::ReadOnly(_)));

        assert_eq!(proxy.get_str().unwrap(), "");
    }

    #[test]
    fn test_read_only_rejects_append() {
        let mut proxy =
            ResourceProxy::new(Location::from("tmp://ro2"), true).unwrap();
        assert!(matches!(proxy.append("nope"), Err(Error::ReadOnly(_))));
    }

    #[test]
    fn test_buffer_is_an_isolated_copy() {
        let mut proxy = temp_proxy("iso");
        proxy.put("stable").unwrap();

        let mut buffer = proxy.get(GetAs::Buffer).unwrap().into_buffer().unwrap();
        buffer.write_all(b"XXXXXX").unwrap();

        assert_eq!(proxy.get_str().unwrap(), "stable");
    }

    #[test]
    fn test_file_handle_aliases_backend_stream() {
        let mut proxy = temp_proxy("fh");
        proxy.put("via handle").unwrap();

        let handle = proxy.get(GetAs::FileHandle).unwrap().into_handle().unwrap();
        let mut content = String::new();
        handle.read_to_string(&mut content).unwrap();
        assert_eq!(content, "via handle");
    }

    #[test]
    fn test_append_preserves_prior_content() {
        let mut proxy = temp_proxy("ap");
        proxy.put("head").unwrap();
        proxy.append("tail").unwrap();
        assert_eq!(proxy.get_str().unwrap(), "headtail");
    }

    #[test]
    fn test_location_accessor_renders_original() {
        let proxy = temp_proxy("loc");
        assert_eq!(proxy.location(), "tmp://loc");
    }
}
