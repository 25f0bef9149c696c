//! # Validator Catalog
//!
//! Maps validator names to handles. Registry bindings persist only the
//! validator's name; restoring a snapshot or applying a config resolves each
//! name through a catalog. Every lookup of the same name yields the same
//! capability.

use std::collections::BTreeMap;

use crate::traits::ValidatorHandle;

/// A name → validator handle table.
#[derive(Debug, Clone, Default)]
pub struct ValidatorCatalog {
    entries: BTreeMap<String, ValidatorHandle>,
}

impl ValidatorCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in mock validators: `echo`, `blob`, `mock`, `reject`.
    #[cfg(feature = "mock")]
    pub fn builtin() -> Self {
        use crate::mock::{BlobValidator, EchoValidator, MockValidator, RejectingValidator};

        let mut catalog = Self::new();
        catalog.insert(ValidatorHandle::new("echo", EchoValidator));
        catalog.insert(ValidatorHandle::new("blob", BlobValidator));
        catalog.insert(ValidatorHandle::new("mock", MockValidator));
        catalog.insert(ValidatorHandle::new("reject", RejectingValidator));
        catalog
    }

    /// Add a handle under its own name, replacing any previous entry.
    pub fn insert(&mut self, handle: ValidatorHandle) -> Option<ValidatorHandle> {
        self.entries.insert(handle.name().to_string(), handle)
    }

    /// Look up a handle by name.
    pub fn get(&self, name: &str) -> Option<ValidatorHandle> {
        self.entries.get(name).cloned()
    }

    /// Names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
