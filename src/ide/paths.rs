//! Path reference completion for `require` and `require_relative`.
//!
//! Both styles replace only the string literal's content. Results are sorted
//! lexicographically and deduplicated, so repeated requests over an unchanged
//! index and file tree give identical output.

use std::collections::BTreeSet;
use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

use crate::base::CompletionConfig;
use crate::error::{CompletionError, CompletionResult};
use crate::index::SymbolIndex;

use super::candidate::{CandidateEdit, path_candidate};
use super::context::ReferenceContext;
use super::syntax::StringLiteral;

/// Candidates from the index's registry of loadable paths.
pub fn require_candidates(
    index: &dyn SymbolIndex,
    literal: &StringLiteral,
    config: &CompletionConfig,
) -> CompletionResult<Vec<CandidateEdit>> {
    let range = literal
        .content_span
        .ok_or_else(|| CompletionError::missing_location("require argument"))?;
    let paths: BTreeSet<String> = index.path_candidates(&literal.content).into_iter().collect();
    Ok(limited(paths, config)
        .filter_map(|path| path_candidate(&path, range))
        .collect())
}

/// Candidates from the file tree around the editing file.
pub fn require_relative_candidates(
    context: &ReferenceContext,
    literal: &StringLiteral,
    config: &CompletionConfig,
) -> CompletionResult<Vec<CandidateEdit>> {
    let range = literal
        .content_span
        .ok_or_else(|| CompletionError::missing_location("require_relative argument"))?;
    let document = context
        .document_path
        .as_deref()
        .ok_or(CompletionError::MissingDocumentPath)?;
    let origin = document
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let paths = relative_paths(origin, &literal.content, config);
    Ok(paths
        .into_iter()
        .filter_map(|path| path_candidate(&path, range))
        .collect())
}

/// Source files under `origin` matching the typed `fragment`, spelled
/// relative to `origin` and without their extension.
///
/// An empty fragment, or one ending in `/`, lists every file below it.
/// Otherwise both directories and files starting with the fragment match.
/// Leading `./` and `../` segments move the search base and are kept in the
/// results. Hidden files and directories are skipped.
pub fn relative_paths(origin: &Path, fragment: &str, config: &CompletionConfig) -> Vec<String> {
    let (lead, rest) = split_relative_lead(fragment);
    let base = origin.join(lead);

    let Some(matcher) = build_matcher(rest, &config.source_extension) else {
        return Vec::new();
    };

    let extension = config.dotted_extension();
    let found: BTreeSet<String> = WalkDir::new(&base)
        .follow_links(config.follow_symlinks)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::trace!("[PATHS] skipped unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(&base).ok()?;
            let relative = slash_separated(relative);
            if !matcher.is_match(&relative) {
                return None;
            }
            let stem = relative.strip_suffix(&extension)?;
            Some(format!("{lead}{stem}"))
        })
        .collect();

    tracing::debug!(
        "[PATHS] '{}' under {} -> {} file(s)",
        fragment,
        base.display(),
        found.len()
    );
    limited(found, config).collect()
}

fn build_matcher(rest: &str, extension: &str) -> Option<GlobSet> {
    let typed = globset::escape(rest);
    let extension = globset::escape(extension);
    let patterns = if rest.is_empty() || rest.ends_with('/') {
        vec![format!("{typed}**/*.{extension}")]
    } else {
        vec![
            format!("{typed}*/**/*.{extension}"),
            format!("**/{typed}*.{extension}"),
        ]
    };

    let mut builder = GlobSetBuilder::new();
    for pattern in &patterns {
        match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(err) => {
                tracing::debug!("[PATHS] invalid pattern '{}': {}", pattern, err);
                return None;
            }
        }
    }
    builder.build().ok()
}

/// Split leading `./` and `../` segments off `fragment`.
fn split_relative_lead(fragment: &str) -> (&str, &str) {
    let mut rest = fragment;
    while let Some(next) = rest
        .strip_prefix("./")
        .or_else(|| rest.strip_prefix("../"))
    {
        rest = next;
    }
    (&fragment[..fragment.len() - rest.len()], rest)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

fn slash_separated(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn limited(
    paths: BTreeSet<String>,
    config: &CompletionConfig,
) -> impl Iterator<Item = String> {
    let limit = config.max_path_results.unwrap_or(usize::MAX);
    paths.into_iter().take(limit)
}
