//! Candidate records handed to the protocol layer, and how they are built.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::base::{CompletionConfig, Span};
use crate::index::{EntryGroup, EntryKind, EntryLocation, IndexEntry, MemberKind, NamespaceKind};

use super::shadow::Spelling;

/// Kind of completion candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    Class,
    Module,
    Constant,
    /// An alias or anything else that is not one of the above.
    Reference,
    Method,
    Field,
    File,
}

impl CandidateKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CandidateKind::Method => 2,     // Method
            CandidateKind::Field => 5,      // Field
            CandidateKind::Class => 7,      // Class
            CandidateKind::Module => 9,     // Module
            CandidateKind::File => 17,      // File
            CandidateKind::Reference => 18, // Reference
            CandidateKind::Constant => 21,  // Constant
        }
    }

    fn of_entry(entry: &IndexEntry) -> Self {
        match &entry.kind {
            EntryKind::Namespace {
                kind: NamespaceKind::Class,
                ..
            } => CandidateKind::Class,
            EntryKind::Namespace {
                kind: NamespaceKind::Module,
                ..
            } => CandidateKind::Module,
            EntryKind::Constant => CandidateKind::Constant,
            EntryKind::Member {
                kind: MemberKind::Method,
                ..
            } => CandidateKind::Method,
            EntryKind::Member {
                kind: MemberKind::Field,
                ..
            } => CandidateKind::Field,
            EntryKind::Alias { .. } => CandidateKind::Reference,
        }
    }
}

/// A completion candidate and the edit that applies it.
///
/// Built once and never changed after it reaches a [`CandidateCollector`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateEdit {
    /// Shown in the completion list.
    pub label: String,
    /// Replaces the text in `range`.
    pub insertion_text: String,
    /// Matched against what the user typed.
    pub filter_text: String,
    pub range: Span,
    pub kind: CandidateKind,
    /// Markdown.
    pub documentation: Option<String>,
    /// Defining files, or a method's parameter list.
    pub detail: Option<String>,
    /// Declaring type, for members.
    pub owner: Option<String>,
}

impl CandidateEdit {
    /// A candidate that inserts and filters on its label.
    pub fn new(label: impl Into<String>, kind: CandidateKind, range: Span) -> Self {
        let label = label.into();
        Self {
            insertion_text: label.clone(),
            filter_text: label.clone(),
            label,
            range,
            kind,
            documentation: None,
            detail: None,
            owner: None,
        }
    }

    pub fn with_insertion_text(mut self, text: impl Into<String>) -> Self {
        self.insertion_text = text.into();
        self
    }

    pub fn with_filter_text(mut self, text: impl Into<String>) -> Self {
        self.filter_text = text.into();
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

/// Candidate for a namespace, constant or alias group.
pub(crate) fn namespace_candidate(
    label: &str,
    spelling: Spelling,
    range: Span,
    group: &EntryGroup,
    config: &CompletionConfig,
) -> Option<CandidateEdit> {
    if label.is_empty() {
        return None;
    }
    let entries: Vec<&IndexEntry> = group.iter().map(Arc::as_ref).collect();
    let mut candidate = CandidateEdit::new(label, CandidateKind::of_entry(group.first()), range)
        .with_insertion_text(spelling.insertion_text)
        .with_filter_text(spelling.filter_text)
        .with_documentation(markdown(label, &entries, config));
    if let Some(files) = defining_files(&entries) {
        candidate = candidate.with_detail(files);
    }
    Some(candidate)
}

/// Candidate for a method or field.
pub(crate) fn member_candidate(
    entry: &IndexEntry,
    range: Span,
    config: &CompletionConfig,
) -> Option<CandidateEdit> {
    if entry.name.is_empty() {
        return None;
    }
    let kind = CandidateKind::of_entry(entry);
    let title = match entry.signature() {
        Some(signature) => format!("{}{}", entry.name, signature),
        None => entry.name.to_string(),
    };
    let mut candidate = CandidateEdit::new(&*entry.name, kind, range)
        .with_documentation(markdown(&title, &[entry], config));

    let detail = match kind {
        CandidateKind::Method => entry.signature().map(str::to_string),
        _ => defining_files(&[entry]),
    };
    if let Some(detail) = detail {
        candidate = candidate.with_detail(detail);
    }
    if let Some(owner) = entry.owner() {
        candidate = candidate.with_owner(&*owner.name);
    }
    Some(candidate)
}

/// Candidate for a loadable path.
pub(crate) fn path_candidate(path: &str, range: Span) -> Option<CandidateEdit> {
    if path.is_empty() {
        return None;
    }
    Some(CandidateEdit::new(path, CandidateKind::File, range))
}

fn defining_files(entries: &[&IndexEntry]) -> Option<String> {
    let files: Vec<String> = entries
        .iter()
        .filter_map(|e| e.location.as_ref())
        .map(EntryLocation::file_name)
        .collect();
    (!files.is_empty()).then(|| files.join(", "))
}

/// Markdown documentation: a fenced title, the defining locations, then comments.
fn markdown(title: &str, entries: &[&IndexEntry], config: &CompletionConfig) -> String {
    let mut doc = format!("```{}\n{}\n```", config.documentation_language, title);

    let links: Vec<String> = entries
        .iter()
        .filter_map(|e| e.location.as_ref())
        .map(location_link)
        .collect();
    if !links.is_empty() {
        let _ = write!(doc, "\n\n**Definitions**: {}", links.join(" | "));
    }

    let comments: Vec<&str> = entries
        .iter()
        .filter_map(|e| e.comments.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if !comments.is_empty() {
        let _ = write!(doc, "\n\n{}", comments.join("\n\n"));
    }
    doc
}

/// `[file.rb](file:///abs/file.rb#L3,1-5,4)` with 1-based lines and columns.
fn location_link(location: &EntryLocation) -> String {
    let target = if location.path.is_absolute() {
        format!("file://{}", location.path.display())
    } else {
        location.path.display().to_string()
    };
    let span = location.span;
    format!(
        "[{}]({}#L{},{}-{},{})",
        location.file_name(),
        target,
        span.start.line + 1,
        span.start.column + 1,
        span.end.line + 1,
        span.end.column + 1
    )
}

// ============================================================================
// OUTPUT SINK
// ============================================================================

/// Append-only, ordered output of one completion request.
#[derive(Clone, Debug, Default)]
pub struct CandidateCollector {
    items: Vec<CandidateEdit>,
}

impl CandidateCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate. Candidates with an empty label are dropped.
    pub fn push(&mut self, candidate: CandidateEdit) {
        if candidate.label.is_empty() {
            tracing::warn!("[COMPLETE] dropped candidate with empty label");
            return;
        }
        self.items.push(candidate);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateEdit> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[CandidateEdit] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CandidateEdit> {
        self.items
    }
}

impl Extend<CandidateEdit> for CandidateCollector {
    fn extend<T: IntoIterator<Item = CandidateEdit>>(&mut self, iter: T) {
        for candidate in iter {
            self.push(candidate);
        }
    }
}

impl IntoIterator for CandidateCollector {
    type Item = CandidateEdit;
    type IntoIter = std::vec::IntoIter<CandidateEdit>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
