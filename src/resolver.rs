//! Keyed registry of resource proxies
//!
//! The [`ResourceResolver`] is the single point of definition and lookup for
//! all resources in a process: `define` binds a key to a location, `get` and
//! `save` move data through the proxy built for that key. A process-wide
//! singleton accessor exists alongside free instantiation; prefer passing an
//! explicit resolver in new code.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use crate::error::{Error, Result};
use crate::location::Location;
use crate::proxy::{GetAs, ResourceProxy, Retrieved, WriteData};
use crate::stream::TextStream;

/// Options for [`ResourceResolver::define_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefineOptions {
    /// Replace an existing entry instead of failing with `DuplicateKey`
    pub overwrite: bool,
    /// Reject all writes through the new proxy
    pub read_only: bool,
}

/// Resolves resources by name.
///
/// Every defined key holds exactly one live proxy with exactly one live
/// backend; replacing or clearing an entry closes its backend before the
/// entry is dropped.
pub struct ResourceResolver {
    resources: HashMap<String, ResourceProxy>,
}

impl ResourceResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }

    /// Define a resource under `key` with default options.
    ///
    /// When `location` is `None`, an ephemeral `tmp://<key>` location is
    /// synthesized, so every defined key has some backing store.
    pub fn define(&mut self, key: &str, location: Option<Location>) -> Result<()> {
        self.define_with(key, location, DefineOptions::default())
    }

    /// Define a resource under `key`.
    ///
    /// Fails with [`Error::DuplicateKey`] if the key exists and
    /// `options.overwrite` is false. On overwrite, the displaced proxy's
    /// backend is closed before the new entry lands.
    pub fn define_with(
        &mut self,
        key: &str,
        location: Option<Location>,
        options: DefineOptions,
    ) -> Result<()> {
        if self.resources.contains_key(key) && !options.overwrite {
            return Err(Error::DuplicateKey(key.to_string()));
        }

        let location =
            location.unwrap_or_else(|| Location::Url(format!("tmp://{}", key)));
        let proxy = ResourceProxy::new(location, options.read_only)?;
        tracing::debug!("defined resource '{}' at {}", key, proxy.location());

        if let Some(mut replaced) = self.resources.insert(key.to_string(), proxy) {
            replaced.close();
        }
        Ok(())
    }

    /// Return the resource content as a string (the default `"str"` shape).
    pub fn get(&mut self, key: &str) -> Result<String> {
        self.proxy_mut(key)?.get_str()
    }

    /// Return the resource content in the requested shape; `as_a` must be
    /// one of `"str"`, `"buffer"`, `"file_handle"`.
    pub fn get_as(&mut self, key: &str, as_a: &str) -> Result<Retrieved<'_>> {
        let as_a: GetAs = as_a.parse()?;
        self.proxy_mut(key)?.get(as_a)
    }

    /// Borrow the backend handle for a resource, rewound to offset 0.
    ///
    /// Equivalent to `get_as(key, "file_handle")` without the selector
    /// string. The handle aliases the backend's single open stream; the
    /// caller must not close it.
    pub fn handle(&mut self, key: &str) -> Result<&mut dyn TextStream> {
        self.proxy_mut(key)?.get_handle()
    }

    /// Overwrite the resource with the supplied string or stream.
    pub fn save(&mut self, key: &str, data: impl Into<WriteData>) -> Result<()> {
        self.proxy_mut(key)?.put(data)
    }

    /// Whether `key` is defined. Pure lookup, no side effects.
    pub fn has(&self, key: &str) -> bool {
        self.resources.contains_key(key)
    }

    /// Drop every entry, closing each backend.
    pub fn clear(&mut self) {
        for (_, mut proxy) in self.resources.drain() {
            proxy.close();
        }
    }

    fn proxy_mut(&mut self, key: &str) -> Result<&mut ResourceProxy> {
        self.resources
            .get_mut(key)
            .ok_or_else(|| Error::UndefinedResource(key.to_string()))
    }
}

impl Default for ResourceResolver {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: OnceLock<Mutex<ResourceResolver>> = OnceLock::new();

/// Process-wide resolver instance.
///
/// Lazily initialized on the first call; every later call returns the same
/// instance, and calling before any other initialization is safe. The mutex
/// serializes definitions against lookups; one lock guards the whole mapping.
pub fn global() -> &'static Mutex<ResourceResolver> {
    GLOBAL.get_or_init(|| Mutex::new(ResourceResolver::new()))
}
