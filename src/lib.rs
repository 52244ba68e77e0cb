//! Name-addressable resource abstraction layer.
//!
//! Callers register a logical key against a backing location — an in-process
//! buffer, a filesystem path, or an open file-style handle — and thereafter
//! read and write that resource uniformly, regardless of its physical
//! backing.
//!
//! ## Architecture
//!
//! ```text
//! define(key, location)
//!        │
//!        ▼
//! ┌──────────────────┐     ┌─────────────────────────────┐
//! │ ResourceResolver │────▶│ backend::resolve(&location) │
//! │   key → proxy    │     │  ordered descriptor list    │
//! └────────┬─────────┘     └──────────────┬──────────────┘
//!          │                              │
//!          ▼                              ▼
//! ┌──────────────────┐     ┌─────────────────────────────┐
//! │  ResourceProxy   │────▶│  FileBackend / TempBackend  │
//! │  read-only flag, │     │    one open handle each     │
//! │  get/put shapes  │     └─────────────────────────────┘
//! └──────────────────┘
//! ```
//!
//! ## Location grammar
//!
//! - `file://<path>` — filesystem backend; content persists across the
//!   process.
//! - `tmp://<anything>` — ephemeral backend; the suffix is not interpreted.
//! - a filesystem path value — filesystem backend.
//! - an open text stream — ephemeral backend, contents copied in once.
//! - any other string — [`Error::UnsupportedProtocol`].
//!
//! ## Example
//!
//! ```
//! use resource_resolver::ResourceResolver;
//!
//! # fn main() -> resource_resolver::Result<()> {
//! let mut resolver = ResourceResolver::new();
//! resolver.define("scratch", None)?;
//! resolver.save("scratch", "abc123")?;
//! assert_eq!(resolver.get("scratch")?, "abc123");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`resolver`]: keyed registry of proxies, singleton accessor
//! - [`proxy`]: per-resource proxy with format-normalized get/put
//! - [`backend`]: pluggable storage backends and their selection registry
//! - [`location`]: location descriptors
//! - [`stream`]: file-style text stream abstraction
//! - [`tabular`]: CSV convenience helpers layered on the resolver

pub mod backend;
pub mod error;
pub mod location;
pub mod proxy;
pub mod resolver;
pub mod stream;
pub mod tabular;

pub use error::{Error, Result};
pub use location::Location;
pub use proxy::{GetAs, ResourceProxy, Retrieved, WriteData};
pub use resolver::{global, DefineOptions, ResourceResolver};
pub use stream::TextStream;
