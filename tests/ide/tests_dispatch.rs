//! Dispatch across constructs, batching, and the type-checker switch.

use std::path::PathBuf;
use std::thread;

use nestor::base::{CompletionConfig, NestingPath};
use nestor::ide::{
    CallNode, CallOperator, CandidateCollector, Completer, CompletionNode, ContextProvider,
    EnclosingTypeInferrer, FieldAccessKind, Receiver, ReferenceContext, StringLiteral,
    completions,
};
use nestor::index::{IndexEntry, SharedIndex};

use crate::helpers::candidate_assertions::*;
use crate::helpers::index_fixtures::*;

struct CartBody;

impl ContextProvider for CartBody {
    fn nesting(&self) -> NestingPath {
        NestingPath::new(["Shop", "Cart"])
    }

    fn enclosing_name(&self) -> String {
        "Shop::Cart".to_string()
    }

    fn document_path(&self) -> Option<PathBuf> {
        Some(PathBuf::from("/project/app/cart.rb"))
    }
}

fn mixed_nodes() -> Vec<CompletionNode> {
    vec![
        CompletionNode::namespace_read("Li", line_span(1, 4, 6)),
        CompletionNode::Call(CallNode::named("ad").with_message_span(line_span(2, 4, 6))),
        CompletionNode::field("@disc", FieldAccessKind::Read, line_span(3, 4, 9)),
        CompletionNode::Call(
            CallNode::named("require")
                .with_string_argument(StringLiteral::new("se", line_span(4, 9, 11))),
        ),
    ]
}

#[test]
fn test_batch_keeps_node_order() {
    let index = shop_index();
    let ctx = ReferenceContext::from_provider(&CartBody, None, false);
    let found = completions(
        &index,
        &EnclosingTypeInferrer,
        &ctx,
        CompletionConfig::default(),
        &mixed_nodes(),
    );
    assert_eq!(
        labels(&found),
        vec!["Shop::Cart::Line", "add", "@discount", "set"]
    );
    assert_eq!(candidate(&found, "Shop::Cart::Line").insertion_text, "Line");
}

#[test]
fn test_type_checker_keeps_fields_and_paths() {
    let index = shop_index();
    let ctx = ReferenceContext::from_provider(&CartBody, None, true);
    let found = completions(
        &index,
        &EnclosingTypeInferrer,
        &ctx,
        CompletionConfig::default(),
        &mixed_nodes(),
    );
    assert_eq!(labels(&found), vec!["@discount", "set"]);
}

#[test]
fn test_scope_access_on_namespace_receiver() {
    let index = shop_index();
    let ctx = ReferenceContext::new(NestingPath::top_level());
    let call = CallNode::unnamed().with_receiver(
        Receiver::Namespace {
            name: "Shop::Cart".to_string(),
            span: Some(line_span(0, 0, 10)),
        },
        CallOperator::Scope,
        Some(line_span(0, 10, 12)),
    );
    let mut out = CandidateCollector::new();
    Completer::new(&index, &EnclosingTypeInferrer, &ctx)
        .visit(&CompletionNode::Call(call), &mut out);

    let found = out.into_items();
    assert_eq!(labels(&found), vec!["Shop::Cart::Line"]);
    assert_eq!(found[0].range, line_span(0, 0, 12));
}

#[test]
fn test_broken_node_does_not_stop_the_batch() {
    let index = shop_index();
    let ctx = ReferenceContext::from_provider(&CartBody, None, false);
    let nodes = vec![
        CompletionNode::NamespaceRead {
            name: "Li".to_string(),
            span: None,
        },
        CompletionNode::field("@items", FieldAccessKind::Write, line_span(3, 4, 10)),
    ];
    let found = completions(
        &index,
        &EnclosingTypeInferrer,
        &ctx,
        CompletionConfig::default(),
        &nodes,
    );
    assert_eq!(labels(&found), vec!["@items"]);
}

#[test]
fn test_shared_index_sees_indexer_updates() {
    let shared = SharedIndex::new(shop_index());
    let ctx = ReferenceContext::from_provider(&CartBody, None, false);
    let node = CompletionNode::namespace_read("Ch", line_span(0, 0, 2));

    let before = completions(
        &shared,
        &EnclosingTypeInferrer,
        &ctx,
        CompletionConfig::default(),
        std::slice::from_ref(&node),
    );
    assert!(before.is_empty());

    let indexer = shared.clone();
    thread::spawn(move || {
        indexer.write().insert(IndexEntry::class("Shop::Checkout"));
    })
    .join()
    .unwrap();

    let after = completions(
        &shared,
        &EnclosingTypeInferrer,
        &ctx,
        CompletionConfig::default(),
        std::slice::from_ref(&node),
    );
    assert_eq!(labels(&after), vec!["Shop::Checkout"]);
    assert_eq!(insertions(&after), vec!["Checkout"]);
}
