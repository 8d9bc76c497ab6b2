//! In-memory symbol index.
//!
//! Holds what an indexer has discovered and answers the lookups the
//! completion core needs. Building the entries is the indexer's job; this
//! type only stores them.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

use super::entry::{EntryGroup, EntryKind, IndexEntry, MemberKind, TypeRef};
use super::symbol_index::SymbolIndex;
use crate::base::NestingPath;
use crate::base::constants::{NAMESPACE_SEPARATOR, ROOT_TYPE};
use crate::base::names::{join, strip_absolute};
use crate::error::IndexError;

// ============================================================================
// MEMORY INDEX
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct MemoryIndex {
    /// Namespace, constant and alias entries by qualified name.
    /// Ordered so that prefix search is a range scan.
    entries: BTreeMap<Arc<str>, Vec<Arc<IndexEntry>>>,
    /// Member entries by owner type name, in insertion order.
    members: FxHashMap<Arc<str>, Vec<Arc<IndexEntry>>>,
    /// Loadable module identifiers -> declaring file (if known).
    require_paths: BTreeMap<String, Option<PathBuf>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Entries with an existing name join that name's group.
    pub fn insert(&mut self, entry: IndexEntry) {
        let entry = Arc::new(entry);
        match &entry.kind {
            EntryKind::Member { owner, .. } => {
                let owner: Arc<str> = match owner {
                    Some(owner) => owner.name.clone(),
                    None => Arc::from(ROOT_TYPE),
                };
                self.members.entry(owner).or_default().push(entry);
            }
            _ => {
                let (name, _) = strip_absolute(&entry.name);
                let key: Arc<str> = Arc::from(name);
                self.entries.entry(key).or_default().push(entry);
            }
        }
    }

    /// Register a loadable module identifier (e.g. `"json/ext"`).
    pub fn add_require_path(&mut self, path: impl Into<String>, file: Option<PathBuf>) {
        self.require_paths.insert(path.into(), file);
    }

    /// Drop every entry and require path declared in `file`.
    pub fn remove_file(&mut self, file: &Path) {
        let declared_in = |entry: &Arc<IndexEntry>| entry.path() == Some(file);

        for group in self.entries.values_mut() {
            group.retain(|e| !declared_in(e));
        }
        self.entries.retain(|_, group| !group.is_empty());

        for members in self.members.values_mut() {
            members.retain(|e| !declared_in(e));
        }
        self.members.retain(|_, members| !members.is_empty());

        self.require_paths
            .retain(|_, declared| declared.as_deref() != Some(file));

        tracing::debug!("[INDEX] removed entries declared in {}", file.display());
    }

    /// Number of named groups (namespaces, constants, aliases).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.members.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.members.values().map(Vec::len).sum()
    }

    fn group(&self, name: &str) -> Option<EntryGroup> {
        self.entries
            .get(name)
            .and_then(|entries| EntryGroup::new(entries.clone()))
    }

    fn first_entry(&self, name: &str) -> Option<&Arc<IndexEntry>> {
        self.entries.get(name).and_then(|entries| entries.first())
    }

    /// Groups whose key starts with `query`, in key order.
    fn scan_prefix<'a>(&'a self, query: &'a str) -> impl Iterator<Item = EntryGroup> + 'a {
        self.entries
            .range::<str, _>((Bound::Included(query), Bound::Unbounded))
            .take_while(move |(name, _)| name.starts_with(query))
            .filter_map(|(_, entries)| EntryGroup::new(entries.clone()))
    }

    /// Exact lookup, falling back to the de-aliased spelling.
    fn direct_or_aliased(&self, name: &str) -> Result<Option<EntryGroup>, IndexError> {
        if let Some(group) = self.group(name) {
            return Ok(Some(group));
        }
        let real = self.follow_aliased_namespace(name)?;
        Ok(self.group(&real))
    }

    fn resolve_checked(
        &self,
        name: &str,
        nesting: &NestingPath,
        through_ancestors: bool,
    ) -> Result<Option<EntryGroup>, IndexError> {
        let (name, absolute) = strip_absolute(name);
        if name.is_empty() {
            return Ok(None);
        }
        if absolute {
            return self.direct_or_aliased(name);
        }

        // Enclosing lexical scopes, innermost first; the top level comes last,
        // after the ancestors of the innermost namespace.
        for scope in nesting.scopes_innermost_first().filter(|s| !s.is_empty()) {
            let candidate = join(&scope, name);
            if let Some(group) = self.direct_or_aliased(&candidate)? {
                tracing::trace!("[RESOLVE] '{}' bound lexically as '{}'", name, candidate);
                return Ok(Some(group));
            }
        }

        if through_ancestors && !nesting.is_top_level() {
            if let Some(group) = self.lookup_ancestor_chain(name, &nesting.joined())? {
                return Ok(Some(group));
            }
        }

        self.direct_or_aliased(name)
    }

    fn lookup_ancestor_chain(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<EntryGroup>, IndexError> {
        let ancestors = match self.linearized_ancestors_of(namespace) {
            Ok(ancestors) => ancestors,
            Err(IndexError::NamespaceNotIndexed(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        for ancestor in ancestors.iter().skip(1) {
            let candidate = join(ancestor, name);
            if let Some(group) = self.direct_or_aliased(&candidate)? {
                tracing::trace!("[RESOLVE] '{}' found on ancestor '{}'", name, ancestor);
                return Ok(Some(group));
            }
        }
        Ok(None)
    }

    /// `name` followed by its mixins (last included first) and then its
    /// superclass chain. Unknown mixins and superclasses are skipped.
    pub fn linearized_ancestors_of(&self, name: &str) -> Result<Vec<Arc<str>>, IndexError> {
        let mut ancestors = Vec::new();
        let mut seen = FxHashSet::default();
        self.linearize(name, &mut ancestors, &mut seen)?;
        Ok(ancestors)
    }

    fn linearize(
        &self,
        name: &str,
        out: &mut Vec<Arc<str>>,
        seen: &mut FxHashSet<Arc<str>>,
    ) -> Result<(), IndexError> {
        let (name, _) = strip_absolute(name);
        let real = self.follow_aliased_namespace(name)?;
        let (key, entries) = self
            .entries
            .get_key_value(real.as_str())
            .filter(|(_, entries)| entries.iter().any(|e| e.is_namespace()))
            .ok_or_else(|| IndexError::NamespaceNotIndexed(name.to_string()))?;

        if !seen.insert(key.clone()) {
            return Ok(());
        }
        out.push(key.clone());

        // Reopenings contribute their mixins; the first declared superclass wins.
        let mut mixins = Vec::new();
        let mut parent = None;
        for entry in entries {
            if let EntryKind::Namespace {
                superclass,
                mixins: declared,
                ..
            } = &entry.kind
            {
                mixins.extend(declared.iter().cloned());
                if parent.is_none() {
                    parent = superclass.clone();
                }
            }
        }

        // Ancestor names bind lexically only; walking ancestors here would recurse.
        let scope = NestingPath::new(key.split(NAMESPACE_SEPARATOR));
        for mixin in mixins.iter().rev().chain(parent.iter()) {
            let Some(group) = self.resolve_checked(mixin, &scope, false)? else {
                tracing::trace!("[INDEX] ancestor '{}' of '{}' is not indexed", mixin, key);
                continue;
            };
            match self.linearize(group.name(), out, seen) {
                Ok(()) | Err(IndexError::NamespaceNotIndexed(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Members of `kind` visible on `owner`, one per name, closest ancestor first.
    fn member_candidates(
        &self,
        kind: MemberKind,
        name: Option<&str>,
        owner: &TypeRef,
    ) -> Result<Vec<Arc<IndexEntry>>, IndexError> {
        let ancestors = self.linearized_ancestors_of(&owner.name)?;
        let mut found: IndexMap<Arc<str>, Arc<IndexEntry>> = IndexMap::new();

        for ancestor in &ancestors {
            let Some(members) = self.members.get(ancestor) else {
                continue;
            };
            for member in members {
                if member.member_kind() != Some(kind) {
                    continue;
                }
                if name.is_some_and(|prefix| !member.name.starts_with(prefix)) {
                    continue;
                }
                found
                    .entry(member.name.clone())
                    .or_insert_with(|| member.clone());
            }
        }

        Ok(found.into_values().collect())
    }
}

impl FromIterator<IndexEntry> for MemoryIndex {
    fn from_iter<T: IntoIterator<Item = IndexEntry>>(iter: T) -> Self {
        let mut index = MemoryIndex::new();
        index.extend(iter);
        index
    }
}

impl Extend<IndexEntry> for MemoryIndex {
    fn extend<T: IntoIterator<Item = IndexEntry>>(&mut self, iter: T) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl SymbolIndex for MemoryIndex {
    fn get(&self, name: &str) -> Option<EntryGroup> {
        let (name, _) = strip_absolute(name);
        self.group(name)
    }

    fn prefix_search(&self, query: &str, nesting: Option<&NestingPath>) -> Vec<EntryGroup> {
        let Some(nesting) = nesting else {
            return self.scan_prefix(query).collect();
        };

        let mut seen: FxHashSet<Arc<str>> = FxHashSet::default();
        let mut results = Vec::new();
        for depth in nesting.depths_innermost_first() {
            let scoped = nesting.qualify(depth, query);
            for group in self.scan_prefix(&scoped) {
                if seen.insert(group.first().name.clone()) {
                    results.push(group);
                }
            }
        }
        results
    }

    fn resolve(&self, name: &str, nesting: &NestingPath) -> Option<EntryGroup> {
        match self.resolve_checked(name, nesting, true) {
            Ok(group) => group,
            Err(e) => {
                tracing::debug!("[RESOLVE] '{}' in '{}': {}", name, nesting, e);
                None
            }
        }
    }

    fn follow_aliased_namespace(&self, name: &str) -> Result<String, IndexError> {
        let mut current = strip_absolute(name).0.to_string();
        let mut visited: FxHashSet<String> = FxHashSet::default();

        loop {
            let parts: Vec<&str> = current.split(NAMESPACE_SEPARATOR).collect();
            let mut rewritten = None;

            // Longest aliased leading run of segments.
            for end in (1..=parts.len()).rev() {
                let head = parts[..end].join(NAMESPACE_SEPARATOR);
                let Some(target) = self.first_entry(&head).and_then(|e| e.alias_target()) else {
                    if self.entries.contains_key(head.as_str()) {
                        // A real namespace shadows any alias further out.
                        break;
                    }
                    continue;
                };
                if !visited.insert(head.clone()) {
                    return Err(IndexError::UnresolvableAlias(name.to_string()));
                }
                let rest = parts[end..].join(NAMESPACE_SEPARATOR);
                rewritten = Some(join(strip_absolute(target).0, &rest));
                break;
            }

            match rewritten {
                Some(next) => current = next,
                None => return Ok(current),
            }
        }
    }

    fn method_candidates(
        &self,
        name: Option<&str>,
        owner: &TypeRef,
    ) -> Result<Vec<Arc<IndexEntry>>, IndexError> {
        self.member_candidates(MemberKind::Method, name, owner)
    }

    fn field_candidates(
        &self,
        name: &str,
        owner: &TypeRef,
    ) -> Result<Vec<Arc<IndexEntry>>, IndexError> {
        self.member_candidates(MemberKind::Field, Some(name), owner)
    }

    fn path_candidates(&self, fragment: &str) -> Vec<String> {
        self.require_paths
            .range::<str, _>((Bound::Included(fragment), Bound::Unbounded))
            .take_while(|(path, _)| path.starts_with(fragment))
            .map(|(path, _)| path.clone())
            .collect()
    }
}
