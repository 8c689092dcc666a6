//! Test doubles for generator tests.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    cell::RefCell,
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use botforge_core::{Persist, WriteResult};
use botforge_fragments::{Fragment, FragmentError, FragmentStore};

/// A store whose backing connection is always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

impl FailingStore {
    fn error() -> FragmentError {
        FragmentError::unavailable(
            "failing store",
            io::Error::new(io::ErrorKind::ConnectionRefused, "store offline"),
        )
    }
}

impl FragmentStore for FailingStore {
    fn get(&self, _id: &str) -> botforge_fragments::Result<Fragment> {
        Err(Self::error())
    }

    fn ids(&self) -> botforge_fragments::Result<Vec<String>> {
        Err(Self::error())
    }

    fn location(&self) -> &str {
        "failing store"
    }
}

/// Wraps a store and counts lookups per fragment id.
pub struct CountingStore<S> {
    inner: S,
    lookups: RefCell<HashMap<String, usize>>,
}

impl<S: FragmentStore> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            lookups: RefCell::new(HashMap::new()),
        }
    }

    /// How many times `id` was requested.
    pub fn lookups(&self, id: &str) -> usize {
        self.lookups.borrow().get(id).copied().unwrap_or(0)
    }
}

impl<S: FragmentStore> FragmentStore for CountingStore<S> {
    fn get(&self, id: &str) -> botforge_fragments::Result<Fragment> {
        *self.lookups.borrow_mut().entry(id.to_string()).or_default() += 1;
        self.inner.get(id)
    }

    fn ids(&self) -> botforge_fragments::Result<Vec<String>> {
        self.inner.ids()
    }

    fn location(&self) -> &str {
        self.inner.location()
    }
}

/// Keeps writes in memory instead of touching the filesystem.
#[derive(Debug, Default)]
pub struct RecordingPersist {
    writes: RefCell<Vec<(PathBuf, String)>>,
}

impl RecordingPersist {
    /// Every `(path, content)` written so far, in order.
    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes.borrow().clone()
    }
}

impl Persist for RecordingPersist {
    fn persist(&self, path: &Path, content: &str) -> io::Result<WriteResult> {
        let mut writes = self.writes.borrow_mut();
        let existed = writes.iter().any(|(p, _)| p == path);
        writes.push((path.to_path_buf(), content.to_string()));
        Ok(if existed {
            WriteResult::Replaced
        } else {
            WriteResult::Created
        })
    }
}

/// Fails every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingPersist;

impl Persist for FailingPersist {
    fn persist(&self, _path: &Path, _content: &str) -> io::Result<WriteResult> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only output"))
    }
}
