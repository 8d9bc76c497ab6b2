//! Error types for index lookups and completion constructs.

use thiserror::Error;

/// Conditions reported by a [`SymbolIndex`](crate::index::SymbolIndex).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The owner type of a member lookup is unknown to the index.
    #[error("namespace `{0}` is not indexed")]
    NamespaceNotIndexed(String),

    /// Following an alias chain loops back onto an alias already visited.
    #[error("alias `{0}` does not resolve to a namespace")]
    UnresolvableAlias(String),
}

/// Reasons a single construct produced no candidates.
///
/// None of these reach the caller of [`Completer::visit`](crate::ide::Completer::visit);
/// they are logged and the construct yields nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// A node that must carry a source range does not.
    #[error("{construct} node has no source location")]
    MissingLocation { construct: &'static str },

    /// Relative path completion without a known editing file.
    #[error("no document path to resolve relative paths against")]
    MissingDocumentPath,

    #[error(transparent)]
    Index(#[from] IndexError),
}

impl CompletionError {
    pub fn missing_location(construct: &'static str) -> Self {
        Self::MissingLocation { construct }
    }
}

pub type CompletionResult<T> = Result<T, CompletionError>;
