//! Member resolution: methods and fields of an inferred receiver type.

use std::borrow::Cow;
use std::sync::Arc;

use crate::base::constants::FIELD_SIGIL;
use crate::base::{CompletionConfig, Span};
use crate::error::{CompletionError, CompletionResult, IndexError};
use crate::index::{IndexEntry, SymbolIndex, TypeRef};

use super::candidate::{CandidateEdit, member_candidate};
use super::context::{ReferenceContext, TypeInferrer};
use super::syntax::{CallNode, CallOperator, CompletionNode};

/// Method candidates for `call`, the call inside `node`.
///
/// When the request was triggered by the access operator, or nothing has
/// been typed after it, every method is listed and the edit is a zero-width
/// insertion right after the operator.
pub fn method_candidates(
    index: &dyn SymbolIndex,
    inferrer: &dyn TypeInferrer,
    context: &ReferenceContext,
    node: &CompletionNode,
    call: &CallNode,
    config: &CompletionConfig,
) -> CompletionResult<Vec<CandidateEdit>> {
    let name = if context.is_access_trigger() {
        None
    } else {
        call.message.as_deref().filter(|m| !m.is_empty())
    };
    let range = match name {
        Some(_) => call
            .message_span
            .ok_or_else(|| CompletionError::missing_location("call message"))?,
        None => {
            let operator = call
                .operator_span
                .ok_or_else(|| CompletionError::missing_location("call operator"))?;
            Span::empty_at(operator.end)
        }
    };

    let Some(receiver) = inferrer.infer_receiver_type(context, node) else {
        tracing::debug!(
            "[COMPLETE] receiver type before '{}' is unknown",
            call.operator.map_or("", CallOperator::as_str)
        );
        return Ok(Vec::new());
    };
    let Some(methods) = lookup(index.method_candidates(name, &receiver), &receiver)? else {
        return Ok(Vec::new());
    };

    let allow_private = call.has_self_receiver();
    Ok(methods
        .iter()
        .filter(|method| allow_private || !method.is_private())
        .filter_map(|method| member_candidate(method, range, config))
        .collect())
}

/// Field candidates for a field access named `name` so far.
///
/// The sigil is added when the caller's tree reports bare names.
pub fn field_candidates(
    index: &dyn SymbolIndex,
    inferrer: &dyn TypeInferrer,
    context: &ReferenceContext,
    node: &CompletionNode,
    name: &str,
    span: Option<Span>,
    config: &CompletionConfig,
) -> CompletionResult<Vec<CandidateEdit>> {
    let range = span.ok_or_else(|| CompletionError::missing_location(node.construct()))?;

    let Some(receiver) = inferrer.infer_receiver_type(context, node) else {
        tracing::debug!("[COMPLETE] no owner type for field '{}'", name);
        return Ok(Vec::new());
    };
    let name: Cow<'_, str> = if name.starts_with(FIELD_SIGIL) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{FIELD_SIGIL}{name}"))
    };
    let Some(fields) = lookup(index.field_candidates(&name, &receiver), &receiver)? else {
        return Ok(Vec::new());
    };

    Ok(fields
        .iter()
        .filter_map(|field| member_candidate(field, range, config))
        .collect())
}

/// An unindexed receiver type is an empty answer, not a failure.
fn lookup(
    result: Result<Vec<Arc<IndexEntry>>, IndexError>,
    receiver: &TypeRef,
) -> CompletionResult<Option<Vec<Arc<IndexEntry>>>> {
    match result {
        Ok(entries) => Ok(Some(entries)),
        Err(IndexError::NamespaceNotIndexed(_)) => {
            tracing::debug!("[COMPLETE] receiver type '{}' is not indexed", receiver.name);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
