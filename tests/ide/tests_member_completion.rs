//! Member completion: methods and fields of the receiver's type.

use nestor::base::{Position, Span};
use nestor::ide::{
    CallNode, CallOperator, CandidateEdit, CandidateKind, Completer, CompletionNode,
    EnclosingTypeInferrer, FieldAccessKind, Receiver, ReferenceContext,
};
use nestor::index::TypeRef;
use rstest::rstest;

use crate::helpers::candidate_assertions::*;
use crate::helpers::index_fixtures::*;

fn cart_type(_: &ReferenceContext, _: &CompletionNode) -> Option<TypeRef> {
    Some(TypeRef::new("Shop::Cart"))
}

/// `cart.<message>` on line 5, receiver at columns 4..8, operator at 8..9.
fn cart_call(message: Option<&str>, operator: CallOperator) -> CallNode {
    let operator_end = match operator {
        CallOperator::SafeNavigation => 10,
        _ => 9,
    };
    let mut call = CallNode::unnamed().with_receiver(
        Receiver::Expression,
        operator,
        Some(line_span(5, 8, operator_end)),
    );
    if let Some(message) = message {
        call.message = Some(message.to_string());
        call = call.with_message_span(line_span(5, operator_end, operator_end + message.len()));
    }
    call
}

fn complete(ctx: &ReferenceContext, node: &CompletionNode) -> Vec<CandidateEdit> {
    let index = shop_index();
    Completer::new(&index, &cart_type, ctx).complete(node).unwrap()
}

// =============================================================================
// METHODS
// =============================================================================

#[test]
fn test_partial_method_name() {
    let call = cart_call(Some("a"), CallOperator::Dot);
    let found = complete(&context_in(&[]), &CompletionNode::Call(call));

    assert_eq!(labels(&found), vec!["add", "apply_coupon"]);
    for c in &found {
        assert_eq!(c.range, line_span(5, 9, 10));
        assert_eq!(c.kind, CandidateKind::Method);
    }
    assert_eq!(candidate(&found, "add").detail.as_deref(), Some("(item, qty = 1)"));
}

#[test]
fn test_inherited_methods_follow_own_methods() {
    let call = cart_call(None, CallOperator::Dot);
    let found = complete(&context_in(&[]), &CompletionNode::Call(call));
    assert_eq!(labels(&found), vec!["add", "apply_coupon", "total"]);
    assert_eq!(candidate(&found, "total").owner.as_deref(), Some("Shop::Pricing"));
}

#[rstest]
#[case(CallOperator::Dot, 9)]
#[case(CallOperator::SafeNavigation, 10)]
fn test_access_trigger_inserts_after_operator(
    #[case] operator: CallOperator,
    #[case] column: usize,
) {
    // The parser attaches whatever follows the operator as the message.
    let call = cart_call(Some("end"), operator);
    let ctx = context_in(&[]).with_trigger('.');
    let found = complete(&ctx, &CompletionNode::Call(call));

    assert_eq!(labels(&found), vec!["add", "apply_coupon", "total"]);
    for c in &found {
        assert_eq!(c.range, Span::empty_at(Position::new(5, column)));
    }
}

#[test]
fn test_unknown_receiver_yields_nothing() {
    let index = shop_index();
    let call = cart_call(Some("a"), CallOperator::Dot);
    let found = Completer::new(&index, &EnclosingTypeInferrer, &context_in(&["Shop", "Cart"]))
        .complete(&CompletionNode::Call(call))
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_unindexed_receiver_yields_nothing() {
    let index = shop_index();
    let external = |_: &ReferenceContext, _: &CompletionNode| Some(TypeRef::new("Vendor::Client"));
    let call = cart_call(Some("a"), CallOperator::Dot);
    let found = Completer::new(&index, &external, &context_in(&[]))
        .complete(&CompletionNode::Call(call))
        .unwrap();
    assert!(found.is_empty());
}

#[rstest]
#[case(None, true)]
#[case(Some(Receiver::SelfRef), true)]
#[case(Some(Receiver::Expression), false)]
fn test_private_methods_need_self_receiver(
    #[case] receiver: Option<Receiver>,
    #[case] offered: bool,
) {
    let index = shop_index();
    let mut call = CallNode::named("au").with_message_span(line_span(2, 9, 11));
    if let Some(receiver) = receiver {
        call = call.with_receiver(receiver, CallOperator::Dot, Some(line_span(2, 8, 9)));
    }
    let found = Completer::new(&index, &cart_type, &context_in(&["Shop", "Cart"]))
        .complete(&CompletionNode::Call(call))
        .unwrap();
    assert_eq!(labels(&found).contains(&"audit_log"), offered);
}

// =============================================================================
// FIELDS
// =============================================================================

#[rstest]
#[case(FieldAccessKind::Read)]
#[case(FieldAccessKind::Write)]
#[case(FieldAccessKind::OperatorWrite)]
#[case(FieldAccessKind::AndWrite)]
#[case(FieldAccessKind::OrWrite)]
#[case(FieldAccessKind::Target)]
fn test_field_access_kinds_complete_alike(#[case] access: FieldAccessKind) {
    let index = shop_index();
    let span = line_span(7, 4, 9);
    let node = CompletionNode::field("@item", access, span);
    let found = Completer::new(&index, &EnclosingTypeInferrer, &context_in(&["Shop", "Cart"]))
        .complete(&node)
        .unwrap();

    assert_eq!(labels(&found), vec!["@items", "@item_count"]);
    for c in &found {
        assert_eq!(c.range, span);
        assert_eq!(c.kind, CandidateKind::Field);
    }
}

#[test]
fn test_fields_outside_any_type_yield_nothing() {
    let index = shop_index();
    let node = CompletionNode::field("@item", FieldAccessKind::Read, line_span(0, 0, 5));
    let found = Completer::new(&index, &EnclosingTypeInferrer, &context_in(&[]))
        .complete(&node)
        .unwrap();
    assert!(found.is_empty());
}
