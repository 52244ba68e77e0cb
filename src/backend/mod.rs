//! Pluggable storage backend architecture
//!
//! Defines the [`StorageBackend`] trait for storage-medium-specific
//! read/write, plus the ordered descriptor registry that maps a
//! [`Location`] to the backend able to serve it.
//!
//! ```text
//! Location ──▶ resolve() ──▶ BackendDescriptor ──▶ open() ──▶ Box<dyn StorageBackend>
//!                 │
//!                 └─ open stream? short-circuit to the temp backend
//! ```

mod file;
mod temp;

pub use file::FileBackend;
pub use temp::TempBackend;

use std::io;

use crate::error::Result;
use crate::location::Location;
use crate::stream::TextStream;

/// Storage-medium-specific read/write strategy for one kind of location.
///
/// Each backend instance owns exactly one open stream, released by
/// [`StorageBackend::close`] or on drop. All other methods error once the
/// backend is closed.
pub trait StorageBackend: Send {
    /// Overwrite the stored content with the bytes of `data`.
    ///
    /// The backing stream is rewound and truncated, `data` is rewound, and
    /// its full contents are copied in.
    fn put(&mut self, data: &mut dyn TextStream) -> Result<()>;

    /// Copy the bytes of `data` onto the current end of the backing stream,
    /// without truncation. `data` is rewound first.
    fn append(&mut self, data: &mut dyn TextStream) -> Result<()>;

    /// Borrow the backing stream, rewound to offset 0.
    ///
    /// The borrow aliases the backend's single open handle: the caller must
    /// not close it, and must not hold it across other operations on the
    /// same backend (there is one shared cursor).
    fn get(&mut self) -> Result<&mut dyn TextStream>;

    /// Release the backing handle. Idempotent; close failures are logged and
    /// suppressed, never propagated.
    fn close(&mut self);
}

/// A registered backend: its name, selection predicate, and constructor.
pub struct BackendDescriptor {
    /// Backend name, used in logs
    pub name: &'static str,
    test: fn(&Location) -> bool,
    open: fn(Location) -> Result<Box<dyn StorageBackend>>,
}

impl BackendDescriptor {
    /// Run this backend's selection predicate. Pure, never panics.
    pub fn test(&self, location: &Location) -> bool {
        (self.test)(location)
    }

    /// Construct a backend instance for a location this descriptor accepted.
    pub fn open(&self, location: Location) -> Result<Box<dyn StorageBackend>> {
        (self.open)(location)
    }
}

/// Every backend, in selection order. Order is significant: more specific
/// predicates must come before looser ones, and it is fixed here and nowhere
/// else.
static BACKENDS: [BackendDescriptor; 2] = [
    BackendDescriptor {
        name: "temp",
        test: TempBackend::test,
        open: TempBackend::open_boxed,
    },
    BackendDescriptor {
        name: "file",
        test: FileBackend::test,
        open: FileBackend::open_boxed,
    },
];

/// Index of the temp backend in [`BACKENDS`], used by the open-stream fast
/// path in [`resolve`].
const TEMP: usize = 0;

/// Select the backend for a location.
///
/// An already-open text stream short-circuits to the temp backend: it is data
/// to be copied, not a reference to a named resource. Otherwise the first
/// descriptor whose predicate accepts the location wins. `None` means no
/// backend matched; reacting to that is the caller's decision.
pub fn resolve(location: &Location) -> Option<&'static BackendDescriptor> {
    if matches!(location, Location::Stream(_)) {
        return Some(&BACKENDS[TEMP]);
    }

    let descriptor = BACKENDS.iter().find(|d| d.test(location));
    if descriptor.is_none() {
        let candidates: Vec<&str> = BACKENDS.iter().map(|d| d.name).collect();
        tracing::warn!(
            "location {} failed the selection predicate of every backend in {:?}",
            location,
            candidates
        );
    }
    descriptor
}

/// Error returned by backend operations after `close`.
pub(crate) fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "storage backend already closed")
}
