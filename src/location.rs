//! Resource location descriptors
//!
//! A [`Location`] says where a resource's bytes live: a raw URL string, a
//! filesystem path, or an already-open text stream. Locations are consumed by
//! backend constructors; the proxy keeps only their rendered form for error
//! messages.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::stream::TextStream;

/// Where a resource's bytes live.
pub enum Location {
    /// Raw URL string: `file://…`, `tmp://…`, or unrecognized
    Url(String),
    /// Filesystem path, routed to the file backend
    Path(PathBuf),
    /// Open text stream, routed to the temp backend and copied in once
    Stream(Box<dyn TextStream>),
}

impl Location {
    /// Exact, case-sensitive scheme prefix for filesystem URLs.
    pub const FILE_SCHEME: &'static str = "file://";

    /// Exact, case-sensitive scheme prefix for ephemeral URLs. The suffix is
    /// not interpreted (commonly the resource key, for debuggability only).
    pub const TMP_SCHEME: &'static str = "tmp://";
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Url(url) => write!(f, "{}", url),
            Location::Path(path) => write!(f, "{}", path.display()),
            Location::Stream(_) => write!(f, "<open text stream>"),
        }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Url(url) => f.debug_tuple("Url").field(url).finish(),
            Location::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Location::Stream(_) => f.write_str("Stream(<open text stream>)"),
        }
    }
}

impl From<&str> for Location {
    fn from(url: &str) -> Self {
        Location::Url(url.to_string())
    }
}

impl From<String> for Location {
    fn from(url: String) -> Self {
        Location::Url(url)
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Location::Path(path)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Location::Path(path.to_path_buf())
    }
}

impl From<Box<dyn TextStream>> for Location {
    fn from(stream: Box<dyn TextStream>) -> Self {
        Location::Stream(stream)
    }
}
