//! Namespace resolution for bare and qualified references being typed.
//!
//! `Foo::Ba` is split into the namespace prefix `Foo` and the incomplete tail
//! `Ba`. The prefix is resolved from the cursor and de-aliased; the tail is
//! then prefix-searched inside the real namespace. Results keep the prefix as
//! the user spelled it, so an alias stays an alias in the inserted text.

use crate::base::constants::NAMESPACE_SEPARATOR;
use crate::base::names::{
    is_partial_name, is_within, join, split_last, strip_absolute, strip_namespace,
};
use crate::base::NestingPath;
use crate::error::{CompletionResult, IndexError};
use crate::index::{EntryGroup, SymbolIndex};

use super::context::ReferenceContext;

/// A reference as typed, split for lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamespaceQuery<'a> {
    /// The text without the absolute marker.
    pub typed: &'a str,
    pub absolute: bool,
    /// Everything before the last separator (`Foo` in `Foo::Ba`).
    pub namespace: &'a str,
    /// The incomplete last segment (`Ba` in `Foo::Ba`).
    pub tail: &'a str,
}

impl<'a> NamespaceQuery<'a> {
    pub fn parse(text: &'a str) -> Self {
        let (typed, absolute) = strip_absolute(text);
        let (namespace, tail) = split_last(typed);
        Self {
            typed,
            absolute,
            namespace,
            tail,
        }
    }

    /// Every segment typed so far is an identifier.
    pub fn is_well_formed(&self) -> bool {
        is_partial_name(self.typed)
    }

    fn is_qualified(&self) -> bool {
        !self.namespace.is_empty()
    }
}

/// One namespace-level entry that matches a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceMatch {
    pub group: EntryGroup,
    /// The name as the user would spell it (alias spelling preserved).
    pub display_name: String,
}

impl NamespaceMatch {
    /// Fully-qualified name of the matched entry.
    pub fn target(&self) -> &str {
        self.group.name()
    }
}

/// Entries matching `query` that are visible from the cursor.
///
/// An unresolvable namespace prefix yields no matches; that is not an error.
pub fn resolve_namespace(
    index: &dyn SymbolIndex,
    context: &ReferenceContext,
    query: &NamespaceQuery<'_>,
) -> CompletionResult<Vec<NamespaceMatch>> {
    if !query.is_well_formed() {
        tracing::debug!("[COMPLETE] '{}' is not a name", query.typed);
        return Ok(Vec::new());
    }

    let top_level = NestingPath::top_level();
    let lookup_nesting = if query.absolute {
        &top_level
    } else {
        &context.nesting
    };

    if !query.is_qualified() {
        let groups = index.prefix_search(query.tail, Some(lookup_nesting));
        return Ok(groups
            .into_iter()
            .filter(|group| is_visible(context, group))
            .map(|group| NamespaceMatch {
                display_name: group.name().to_string(),
                group,
            })
            .collect());
    }

    let Some(real_namespace) = resolve_real_namespace(index, lookup_nesting, query)? else {
        tracing::debug!(
            "[COMPLETE] namespace '{}' does not resolve in '{}'",
            query.namespace,
            lookup_nesting
        );
        return Ok(Vec::new());
    };

    // The real namespace is fully qualified, so the search is not rescoped.
    let search = format!("{real_namespace}{NAMESPACE_SEPARATOR}{}", query.tail);
    let groups = index.prefix_search(&search, None);
    tracing::trace!("[COMPLETE] '{}' -> {} group(s)", search, groups.len());

    Ok(groups
        .into_iter()
        .filter(|group| is_visible(context, group))
        .filter_map(|group| {
            let member = strip_namespace(group.name(), &real_namespace)?;
            Some(NamespaceMatch {
                display_name: join(query.namespace, member),
                group,
            })
        })
        .collect())
}

/// The de-aliased, fully-qualified name of the query's namespace prefix.
fn resolve_real_namespace(
    index: &dyn SymbolIndex,
    nesting: &NestingPath,
    query: &NamespaceQuery<'_>,
) -> CompletionResult<Option<String>> {
    let Some(group) = index.resolve(query.namespace, nesting) else {
        return Ok(None);
    };
    // `resolve` already rewrites aliased paths; only an alias entry itself
    // still needs following.
    let Some(target) = group.first().alias_target() else {
        return Ok(Some(group.name().to_string()));
    };
    match index.follow_aliased_namespace(target) {
        Ok(real) => Ok(Some(real)),
        Err(IndexError::UnresolvableAlias(alias)) => {
            tracing::debug!("[COMPLETE] alias '{}' does not resolve", alias);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Private entries are visible inside their declaring namespace and below.
fn is_visible(context: &ReferenceContext, group: &EntryGroup) -> bool {
    let first = group.first();
    !first.is_private() || is_within(&context.enclosing_name, first.declaring_namespace())
}
