//! Index entries — the symbols a [`SymbolIndex`](super::SymbolIndex) knows about.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::base::Span;
use crate::base::names::parent_of;

/// Whether a namespace is a class or a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamespaceKind {
    Class,
    Module,
}

/// Kind of member declared on a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Field,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A receiver type as produced by the type inferrer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Fully-qualified name of the type.
    pub name: Arc<str>,
}

impl TypeRef {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }
}

/// Where an entry is declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryLocation {
    pub path: PathBuf,
    pub span: Span,
}

impl EntryLocation {
    pub fn new(path: impl Into<PathBuf>, span: Span) -> Self {
        Self {
            path: path.into(),
            span,
        }
    }

    /// File name component of the path, falling back to the full path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Namespace {
        kind: NamespaceKind,
        /// Declared parent class, as written.
        superclass: Option<Arc<str>>,
        /// Included modules in declaration order.
        mixins: Vec<Arc<str>>,
    },
    Constant,
    /// A namespace bound under another name (`Foo = Baz`).
    Alias { target: Arc<str> },
    Member {
        owner: Option<TypeRef>,
        kind: MemberKind,
        /// Rendered parameter list, for methods.
        signature: Option<Arc<str>>,
    },
}

/// A named symbol known to the index.
///
/// Namespaces, constants and aliases carry fully-qualified names; members
/// carry their bare name and record the owner separately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: Arc<str>,
    pub kind: EntryKind,
    pub visibility: Visibility,
    pub location: Option<EntryLocation>,
    pub comments: Option<Arc<str>>,
}

impl IndexEntry {
    fn new(name: impl Into<Arc<str>>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            location: None,
            comments: None,
        }
    }

    pub fn class(name: impl Into<Arc<str>>) -> Self {
        Self::new(
            name,
            EntryKind::Namespace {
                kind: NamespaceKind::Class,
                superclass: None,
                mixins: Vec::new(),
            },
        )
    }

    pub fn module(name: impl Into<Arc<str>>) -> Self {
        Self::new(
            name,
            EntryKind::Namespace {
                kind: NamespaceKind::Module,
                superclass: None,
                mixins: Vec::new(),
            },
        )
    }

    pub fn constant(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, EntryKind::Constant)
    }

    pub fn alias(name: impl Into<Arc<str>>, target: impl Into<Arc<str>>) -> Self {
        Self::new(
            name,
            EntryKind::Alias {
                target: target.into(),
            },
        )
    }

    pub fn method(name: impl Into<Arc<str>>, owner: impl Into<Arc<str>>) -> Self {
        Self::new(
            name,
            EntryKind::Member {
                owner: Some(TypeRef::new(owner)),
                kind: MemberKind::Method,
                signature: None,
            },
        )
    }

    pub fn field(name: impl Into<Arc<str>>, owner: impl Into<Arc<str>>) -> Self {
        Self::new(
            name,
            EntryKind::Member {
                owner: Some(TypeRef::new(owner)),
                kind: MemberKind::Field,
                signature: None,
            },
        )
    }

    /// Set the declared superclass. No effect on non-namespace entries.
    pub fn with_superclass(mut self, parent: impl Into<Arc<str>>) -> Self {
        if let EntryKind::Namespace { superclass, .. } = &mut self.kind {
            *superclass = Some(parent.into());
        }
        self
    }

    /// Add an included module. No effect on non-namespace entries.
    pub fn with_mixin(mut self, module: impl Into<Arc<str>>) -> Self {
        if let EntryKind::Namespace { mixins, .. } = &mut self.kind {
            mixins.push(module.into());
        }
        self
    }

    /// Set the rendered parameter list. No effect on non-member entries.
    pub fn with_signature(mut self, params: impl Into<Arc<str>>) -> Self {
        if let EntryKind::Member { signature, .. } = &mut self.kind {
            *signature = Some(params.into());
        }
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn private(self) -> Self {
        self.with_visibility(Visibility::Private)
    }

    pub fn with_location(mut self, location: EntryLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_comments(mut self, comments: impl Into<Arc<str>>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self.kind, EntryKind::Namespace { .. })
    }

    pub fn alias_target(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Alias { target } => Some(target),
            _ => None,
        }
    }

    pub fn member_kind(&self) -> Option<MemberKind> {
        match &self.kind {
            EntryKind::Member { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn owner(&self) -> Option<&TypeRef> {
        match &self.kind {
            EntryKind::Member { owner, .. } => owner.as_ref(),
            _ => None,
        }
    }

    pub fn signature(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Member { signature, .. } => signature.as_deref(),
            _ => None,
        }
    }

    /// The namespace that declares this entry.
    ///
    /// Members are declared by their owner; everything else by the parent
    /// segment of its qualified name (empty for top-level names).
    pub fn declaring_namespace(&self) -> &str {
        match self.owner() {
            Some(owner) => &owner.name,
            None => parent_of(&self.name).unwrap_or(""),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.location.as_ref().map(|loc| loc.path.as_path())
    }
}

/// All entries sharing one name (redefinitions and reopenings), in index order.
///
/// Never empty: [`EntryGroup::new`] refuses an empty list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryGroup {
    entries: Arc<[Arc<IndexEntry>]>,
}

impl EntryGroup {
    pub fn new(entries: Vec<Arc<IndexEntry>>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        Some(Self {
            entries: entries.into(),
        })
    }

    /// The entry used for kind and visibility decisions.
    pub fn first(&self) -> &Arc<IndexEntry> {
        &self.entries[0]
    }

    pub fn name(&self) -> &str {
        &self.first().name
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<IndexEntry>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}
