//! The read-only index interface consumed by the completion core.

use std::sync::Arc;

use super::entry::{EntryGroup, IndexEntry, TypeRef};
use crate::base::NestingPath;
use crate::error::IndexError;

/// Project-wide symbol lookups.
///
/// Implementations may be updated concurrently by an indexer; every call is
/// a point-in-time read and two calls need not agree. The completion core
/// never mutates an index.
pub trait SymbolIndex {
    /// Exact lookup by fully-qualified name.
    fn get(&self, name: &str) -> Option<EntryGroup>;

    /// Groups whose name starts with `query`.
    ///
    /// With a nesting, `query` is tried under every enclosing scope from the
    /// innermost outward and then at the top level; results keep that order
    /// and each name appears once. Without a nesting, `query` is matched
    /// verbatim.
    fn prefix_search(&self, query: &str, nesting: Option<&NestingPath>) -> Vec<EntryGroup>;

    /// Resolve `name` the way a reference written inside `nesting` binds.
    fn resolve(&self, name: &str, nesting: &NestingPath) -> Option<EntryGroup>;

    /// Rewrite aliased namespace segments of `name` to their real names.
    fn follow_aliased_namespace(&self, name: &str) -> Result<String, IndexError>;

    /// Methods available on `owner` (declared on it or an ancestor).
    ///
    /// `None` lists every method; `Some(prefix)` filters by name prefix.
    fn method_candidates(
        &self,
        name: Option<&str>,
        owner: &TypeRef,
    ) -> Result<Vec<Arc<IndexEntry>>, IndexError>;

    /// Instance-scoped fields of `owner` whose name starts with `name`.
    fn field_candidates(
        &self,
        name: &str,
        owner: &TypeRef,
    ) -> Result<Vec<Arc<IndexEntry>>, IndexError>;

    /// Loadable module identifiers matching `fragment` exactly or by prefix.
    fn path_candidates(&self, fragment: &str) -> Vec<String>;
}
