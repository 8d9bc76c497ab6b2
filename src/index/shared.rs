//! A [`MemoryIndex`] shared between a background indexer and completion requests.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::entry::{EntryGroup, IndexEntry, TypeRef};
use super::memory::MemoryIndex;
use super::symbol_index::SymbolIndex;
use crate::base::NestingPath;
use crate::error::IndexError;

/// Cheap-to-clone handle; every clone sees the same index.
///
/// Each [`SymbolIndex`] call holds the read lock for exactly that call, so a
/// writer can interleave between two reads of one completion request.
#[derive(Clone, Debug, Default)]
pub struct SharedIndex {
    inner: Arc<RwLock<MemoryIndex>>,
}

impl SharedIndex {
    pub fn new(index: MemoryIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Read access for bulk inspection.
    pub fn read(&self) -> RwLockReadGuard<'_, MemoryIndex> {
        self.inner.read()
    }

    /// Write access for the indexer.
    pub fn write(&self) -> RwLockWriteGuard<'_, MemoryIndex> {
        self.inner.write()
    }

    /// Copy of the current contents, detached from later writes.
    pub fn snapshot(&self) -> MemoryIndex {
        self.inner.read().clone()
    }
}

impl SymbolIndex for SharedIndex {
    fn get(&self, name: &str) -> Option<EntryGroup> {
        self.inner.read().get(name)
    }

    fn prefix_search(&self, query: &str, nesting: Option<&NestingPath>) -> Vec<EntryGroup> {
        self.inner.read().prefix_search(query, nesting)
    }

    fn resolve(&self, name: &str, nesting: &NestingPath) -> Option<EntryGroup> {
        self.inner.read().resolve(name, nesting)
    }

    fn follow_aliased_namespace(&self, name: &str) -> Result<String, IndexError> {
        self.inner.read().follow_aliased_namespace(name)
    }

    fn method_candidates(
        &self,
        name: Option<&str>,
        owner: &TypeRef,
    ) -> Result<Vec<Arc<IndexEntry>>, IndexError> {
        self.inner.read().method_candidates(name, owner)
    }

    fn field_candidates(
        &self,
        name: &str,
        owner: &TypeRef,
    ) -> Result<Vec<Arc<IndexEntry>>, IndexError> {
        self.inner.read().field_candidates(name, owner)
    }

    fn path_candidates(&self, fragment: &str) -> Vec<String> {
        self.inner.read().path_candidates(fragment)
    }
}
