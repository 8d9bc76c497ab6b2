//! Qualified-name helpers and the lexical nesting path.

use std::fmt;

use smol_str::SmolStr;

use super::constants::{ABSOLUTE_MARKER, NAMESPACE_SEPARATOR};

/// Ordered list of enclosing namespace names at the cursor, outermost first.
///
/// An empty path denotes the top level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NestingPath {
    segments: Vec<SmolStr>,
}

impl NestingPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(|s| SmolStr::new(s.as_ref()))
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// The empty nesting.
    pub fn top_level() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_top_level(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    /// The first `depth` segments joined with `::`. Depth is clamped.
    pub fn prefix(&self, depth: usize) -> String {
        let depth = depth.min(self.segments.len());
        self.segments[..depth].join(NAMESPACE_SEPARATOR)
    }

    /// The whole nesting joined with `::` (empty at top level).
    pub fn joined(&self) -> String {
        self.prefix(self.depth())
    }

    /// `<prefix(depth)>::<name>`, or bare `name` at depth zero.
    pub fn qualify(&self, depth: usize, name: &str) -> String {
        let prefix = self.prefix(depth);
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}{NAMESPACE_SEPARATOR}{name}")
        }
    }

    /// Depths from innermost to outermost, ending with the global scope (0).
    pub fn depths_innermost_first(&self) -> impl Iterator<Item = usize> {
        (0..=self.segments.len()).rev()
    }

    /// Scope names from innermost to outermost, ending with `""` (global).
    ///
    /// Every lookup that walks lexical scopes uses this order.
    pub fn scopes_innermost_first(&self) -> impl Iterator<Item = String> + '_ {
        self.depths_innermost_first().map(|depth| self.prefix(depth))
    }
}

impl fmt::Display for NestingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// Split `name` at its last separator into `(namespace, tail)`.
///
/// A name without separator has an empty namespace. A name ending in the
/// separator has an empty tail.
pub fn split_last(name: &str) -> (&str, &str) {
    match name.rfind(NAMESPACE_SEPARATOR) {
        Some(idx) => (&name[..idx], &name[idx + NAMESPACE_SEPARATOR.len()..]),
        None => ("", name),
    }
}

/// The namespace that declares `name`, if it is qualified.
pub fn parent_of(name: &str) -> Option<&str> {
    name.rfind(NAMESPACE_SEPARATOR).map(|idx| &name[..idx])
}

/// `name` without its leading `namespace::`, if it has one.
pub fn strip_namespace<'a>(name: &'a str, namespace: &str) -> Option<&'a str> {
    if namespace.is_empty() {
        return Some(name);
    }
    name.strip_prefix(namespace)?.strip_prefix(NAMESPACE_SEPARATOR)
}

/// Join two qualified-name fragments, skipping empty ones.
pub fn join(namespace: &str, name: &str) -> String {
    match (namespace.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (_, true) => namespace.to_string(),
        _ => format!("{namespace}{NAMESPACE_SEPARATOR}{name}"),
    }
}

/// Whether `name` lies inside `namespace` (or is `namespace` itself).
pub fn is_within(name: &str, namespace: &str) -> bool {
    namespace.is_empty() || name == namespace || strip_namespace(name, namespace).is_some()
}

/// Whether `segment` is one identifier (Unicode Standard Annex #31, `_` may start it).
pub fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    }
}

/// Whether a partially typed qualified name is well formed: every segment is
/// an identifier, except that the last one may still be empty.
pub fn is_partial_name(name: &str) -> bool {
    let segments: Vec<&str> = name.split(NAMESPACE_SEPARATOR).collect();
    let Some((last, leading)) = segments.split_last() else {
        return true;
    };
    leading.iter().all(|s| is_identifier(s)) && (last.is_empty() || is_identifier(last))
}

/// Remove the absolute-reference marker, reporting whether it was present.
pub fn strip_absolute(name: &str) -> (&str, bool) {
    match name.strip_prefix(ABSOLUTE_MARKER) {
        Some(rest) => (rest, true),
        None => (name, false),
    }
}
