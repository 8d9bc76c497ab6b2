//! Path completion for `require` and `require_relative`.

use std::fs;
use std::path::Path;

use nestor::base::CompletionConfig;
use nestor::ide::{
    CallNode, CandidateEdit, CandidateKind, Completer, CompletionNode, EnclosingTypeInferrer,
    ReferenceContext, StringLiteral,
};
use nestor::index::MemoryIndex;
use rstest::rstest;
use tempfile::TempDir;

use crate::helpers::candidate_assertions::*;
use crate::helpers::index_fixtures::*;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "# frozen_string_literal: true\n").unwrap();
}

/// A project with `app/main.rb` as the editing file.
fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for file in [
        "app/main.rb",
        "app/models/user.rb",
        "app/models/order.rb",
        "app/models/concerns/auditable.rb",
        "app/mailer.rb",
        "app/README.md",
        "config/boot.rb",
    ] {
        touch(dir.path(), file);
    }
    dir
}

/// `require_relative "<content>"` with the content starting at column 17.
fn require_relative(content: &str) -> CompletionNode {
    let literal = StringLiteral::new(content, line_span(0, 17, 17 + content.len()));
    CompletionNode::Call(CallNode::named("require_relative").with_string_argument(literal))
}

fn complete_relative(dir: &TempDir, content: &str) -> Vec<CandidateEdit> {
    let index = MemoryIndex::new();
    let ctx = ReferenceContext::default().with_document_path(dir.path().join("app/main.rb"));
    Completer::new(&index, &EnclosingTypeInferrer, &ctx)
        .complete(&require_relative(content))
        .unwrap()
}

// =============================================================================
// REGISTRY
// =============================================================================

#[test]
fn test_require_offers_registered_paths() {
    let index = shop_index();
    let range = line_span(0, 9, 13);
    let call = CallNode::named("require").with_string_argument(StringLiteral::new("json", range));
    let found = Completer::new(&index, &EnclosingTypeInferrer, &ReferenceContext::default())
        .complete(&CompletionNode::Call(call))
        .unwrap();

    assert_eq!(labels(&found), vec!["json", "json/add/core"]);
    for c in &found {
        assert_eq!(c.range, range);
        assert_eq!(c.kind, CandidateKind::File);
        assert_eq!(c.insertion_text, c.label);
    }
}

// =============================================================================
// FILE TREE
// =============================================================================

#[rstest]
#[case("", vec!["mailer", "main", "models/concerns/auditable", "models/order", "models/user"])]
#[case("models/", vec!["models/concerns/auditable", "models/order", "models/user"])]
#[case("mo", vec!["models/concerns/auditable", "models/order", "models/user"])]
#[case("ma", vec!["mailer", "main"])]
#[case("models/o", vec!["models/order"])]
#[case("../co", vec!["../config/boot"])]
#[case("zzz", vec![])]
fn test_require_relative_fragments(#[case] content: &str, #[case] expected: Vec<&str>) {
    let dir = project();
    let found = complete_relative(&dir, content);
    assert_eq!(labels(&found), expected);
}

#[test]
fn test_require_relative_range_is_literal_content() {
    let dir = project();
    let found = complete_relative(&dir, "models/");
    assert!(!found.is_empty());
    for c in &found {
        assert_eq!(c.range, line_span(0, 17, 24));
    }
}

#[test]
fn test_require_relative_is_deterministic() {
    let dir = project();
    let first = complete_relative(&dir, "");
    let second = complete_relative(&dir, "");
    assert_eq!(first, second);

    let mut sorted = labels(&first);
    sorted.sort();
    assert_eq!(labels(&first), sorted);
}

#[test]
fn test_require_relative_respects_source_extension() {
    let dir = project();
    let index = MemoryIndex::new();
    let ctx = ReferenceContext::default().with_document_path(dir.path().join("app/main.rb"));
    let config = CompletionConfig::default().with_source_extension(".md");
    let found = Completer::new(&index, &EnclosingTypeInferrer, &ctx)
        .with_config(config)
        .complete(&require_relative("RE"))
        .unwrap();
    assert_eq!(labels(&found), vec!["README"]);
}

#[test]
fn test_require_relative_without_document_yields_nothing() {
    let index = MemoryIndex::new();
    let ctx = ReferenceContext::default();
    let completer = Completer::new(&index, &EnclosingTypeInferrer, &ctx);
    assert!(completer.complete(&require_relative("mo")).is_err());

    let mut out = nestor::ide::CandidateCollector::new();
    completer.visit(&require_relative("mo"), &mut out);
    assert!(out.is_empty());
}

#[cfg(unix)]
#[test]
fn test_require_relative_follows_symlinks_only_when_configured() {
    let dir = project();
    touch(dir.path(), "shared/lib/util.rb");
    std::os::unix::fs::symlink(dir.path().join("shared"), dir.path().join("app/vendor")).unwrap();

    assert!(complete_relative(&dir, "vendor/").is_empty());

    let index = MemoryIndex::new();
    let ctx = ReferenceContext::default().with_document_path(dir.path().join("app/main.rb"));
    let found = Completer::new(&index, &EnclosingTypeInferrer, &ctx)
        .with_config(CompletionConfig::default().with_follow_symlinks(true))
        .complete(&require_relative("vendor/"))
        .unwrap();
    assert_eq!(labels(&found), vec!["vendor/lib/util"]);
}
