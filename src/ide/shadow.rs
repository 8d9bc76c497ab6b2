//! Shadow and conflict resolution: how a namespace candidate must be spelled.
//!
//! A candidate's name is shortened relative to the enclosing scopes only when
//! the short spelling still binds to the same entry from the cursor. When no
//! relative spelling is safe, or when a conflicting entry of the same name
//! exists in an enclosing scope, the candidate is inserted absolutely (`::X`).
//!
//! Each call builds fresh strings; two candidates from one entry never share
//! an edit.

use crate::base::NestingPath;
use crate::base::constants::{ABSOLUTE_MARKER, NAMESPACE_SEPARATOR};
use crate::base::names::{join, strip_namespace};
use crate::index::SymbolIndex;

use super::context::ReferenceContext;

/// What gets inserted and filtered for one candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spelling {
    pub insertion_text: String,
    pub filter_text: String,
    /// The spelling carries the absolute marker.
    pub absolute: bool,
}

impl Spelling {
    fn relative(text: &str) -> Self {
        Self {
            insertion_text: text.to_string(),
            filter_text: text.to_string(),
            absolute: false,
        }
    }

    /// `short` is inserted. The filter keeps the longer form when the typed
    /// text already spells out `scope`, so it still matches what the editor
    /// has in the range.
    fn shortened(short: &str, display_name: &str, typed: &str, scope: &str) -> Self {
        let spelled_out = typed
            .strip_prefix(scope)
            .is_some_and(|rest| rest.starts_with(NAMESPACE_SEPARATOR));
        Self {
            insertion_text: short.to_string(),
            filter_text: if spelled_out { display_name } else { short }.to_string(),
            absolute: false,
        }
    }

    fn absolute(text: &str) -> Self {
        let marked = format!("{ABSOLUTE_MARKER}{text}");
        Self {
            insertion_text: marked.clone(),
            filter_text: marked,
            absolute: true,
        }
    }
}

/// Spell the candidate `display_name`, whose index entry is `target`.
///
/// `typed` is the reference as typed, without the absolute marker;
/// `typed_absolute` says whether the marker was present.
pub fn spell(
    index: &dyn SymbolIndex,
    context: &ReferenceContext,
    typed: &str,
    typed_absolute: bool,
    display_name: &str,
    target: &str,
) -> Spelling {
    // An absolute reference stays absolute and is never shortened.
    if typed_absolute {
        return Spelling::absolute(display_name);
    }

    let nesting = &context.nesting;
    if top_level_conflict(index, nesting, target) {
        tracing::trace!("[SHADOW] '{}' conflicts with an enclosing definition", target);
        return Spelling::absolute(display_name);
    }

    if !nesting.joined().starts_with(typed) {
        if let Some((scope, short)) = shortest_safe_form(index, nesting, display_name, target) {
            return Spelling::shortened(short, display_name, typed, &scope);
        }
    }

    if binds_to(index, nesting, display_name, target) {
        Spelling::relative(display_name)
    } else {
        tracing::trace!("[SHADOW] '{}' is shadowed at '{}'", display_name, nesting);
        Spelling::absolute(display_name)
    }
}

/// The shortest spelling, relative to an enclosing scope, that still binds to
/// `target`, together with that scope. Scopes are tried innermost first, so
/// the first safe form is the shortest; a shadowed short form falls back to
/// the next longer one.
fn shortest_safe_form<'a>(
    index: &dyn SymbolIndex,
    nesting: &NestingPath,
    display_name: &'a str,
    target: &str,
) -> Option<(String, &'a str)> {
    for scope in nesting.scopes_innermost_first().filter(|s| !s.is_empty()) {
        let Some(short) = strip_namespace(display_name, &scope) else {
            continue;
        };
        if binds_to(index, nesting, short, target) {
            return Some((scope, short));
        }
        tracing::trace!("[SHADOW] '{}' from '{}' binds elsewhere", short, scope);
    }
    None
}

/// `spelling`, written at `nesting`, resolves to the entry named `target`.
fn binds_to(index: &dyn SymbolIndex, nesting: &NestingPath, spelling: &str, target: &str) -> bool {
    index
        .resolve(spelling, nesting)
        .is_some_and(|group| group.name() == target)
}

/// Whether `name` also exists qualified by some enclosing scope.
///
/// Conservative: any such entry marks the candidate absolute, even one that
/// may be the same symbol reached another way.
pub fn top_level_conflict(index: &dyn SymbolIndex, nesting: &NestingPath, name: &str) -> bool {
    nesting.scopes_innermost_first().any(|scope| {
        let scoped = join(&scope, name);
        scoped != name && index.get(&scoped).is_some()
    })
}
