//! Completion entry point: routes each construct at the cursor to its resolver.

use crate::base::constants::{NAMESPACE_SEPARATOR, REQUIRE, REQUIRE_RELATIVE};
use crate::base::{CompletionConfig, Span};
use crate::error::{CompletionError, CompletionResult};
use crate::index::SymbolIndex;

use super::candidate::{CandidateCollector, CandidateEdit, namespace_candidate};
use super::context::{ReferenceContext, TypeInferrer};
use super::members::{field_candidates, method_candidates};
use super::namespace::{NamespaceQuery, resolve_namespace};
use super::paths::{require_candidates, require_relative_candidates};
use super::shadow::spell;
use super::syntax::{CallNode, CompletionNode};

/// Produces candidates for one request.
///
/// Holds no state between requests; build one per request with that
/// request's [`ReferenceContext`].
pub struct Completer<'a> {
    index: &'a dyn SymbolIndex,
    inferrer: &'a dyn TypeInferrer,
    context: &'a ReferenceContext,
    config: CompletionConfig,
}

impl<'a> Completer<'a> {
    pub fn new(
        index: &'a dyn SymbolIndex,
        inferrer: &'a dyn TypeInferrer,
        context: &'a ReferenceContext,
    ) -> Self {
        Self {
            index,
            inferrer,
            context,
            config: CompletionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    /// Append the candidates for `node` to `out`.
    ///
    /// Never fails: a construct that cannot be completed adds nothing.
    pub fn visit(&self, node: &CompletionNode, out: &mut CandidateCollector) {
        match self.complete(node) {
            Ok(candidates) => {
                tracing::debug!(
                    "[COMPLETE] {} -> {} candidate(s)",
                    node.construct(),
                    candidates.len()
                );
                out.extend(candidates);
            }
            Err(err @ CompletionError::MissingLocation { .. }) => {
                tracing::warn!("[COMPLETE] {}", err);
            }
            Err(err) => {
                tracing::debug!("[COMPLETE] {} yields nothing: {}", node.construct(), err);
            }
        }
    }

    /// Candidates for `node`, or why there are none.
    pub fn complete(&self, node: &CompletionNode) -> CompletionResult<Vec<CandidateEdit>> {
        match node {
            CompletionNode::NamespaceRead { name, span } => {
                self.complete_namespace(name, *span, node.construct())
            }
            CompletionNode::NamespacePath { path, span } => {
                self.complete_namespace(path, *span, node.construct())
            }
            CompletionNode::Call(call) => self.complete_call(node, call),
            CompletionNode::FieldAccess { name, span, .. } => field_candidates(
                self.index,
                self.inferrer,
                self.context,
                node,
                name,
                *span,
                &self.config,
            ),
        }
    }

    fn complete_call(
        &self,
        node: &CompletionNode,
        call: &CallNode,
    ) -> CompletionResult<Vec<CandidateEdit>> {
        // `Foo::` parses as a call on the namespace `Foo`.
        if let Some((receiver, receiver_span)) = call.namespace_scope_receiver() {
            let start =
                receiver_span.ok_or_else(|| CompletionError::missing_location("scope receiver"))?;
            let end = call
                .operator_span
                .ok_or_else(|| CompletionError::missing_location("scope operator"))?;
            let typed = format!("{receiver}{NAMESPACE_SEPARATOR}");
            return self.complete_namespace(&typed, Some(start.to(end)), "scope access");
        }

        match call.message.as_deref() {
            Some(REQUIRE) => match &call.string_argument {
                Some(literal) => require_candidates(self.index, literal, &self.config),
                None => Ok(Vec::new()),
            },
            Some(REQUIRE_RELATIVE) => match &call.string_argument {
                Some(literal) => require_relative_candidates(self.context, literal, &self.config),
                None => Ok(Vec::new()),
            },
            _ if self.context.type_checker_active => {
                tracing::trace!("[COMPLETE] methods deferred to the type checker");
                Ok(Vec::new())
            }
            _ => method_candidates(
                self.index,
                self.inferrer,
                self.context,
                node,
                call,
                &self.config,
            ),
        }
    }

    fn complete_namespace(
        &self,
        typed: &str,
        span: Option<Span>,
        construct: &'static str,
    ) -> CompletionResult<Vec<CandidateEdit>> {
        if self.context.type_checker_active {
            tracing::trace!("[COMPLETE] namespaces deferred to the type checker");
            return Ok(Vec::new());
        }
        let range = span.ok_or_else(|| CompletionError::missing_location(construct))?;

        let query = NamespaceQuery::parse(typed);
        let matches = resolve_namespace(self.index, self.context, &query)?;

        Ok(matches
            .iter()
            .filter_map(|found| {
                let spelling = spell(
                    self.index,
                    self.context,
                    query.typed,
                    query.absolute,
                    &found.display_name,
                    found.target(),
                );
                namespace_candidate(
                    &found.display_name,
                    spelling,
                    range,
                    &found.group,
                    &self.config,
                )
            })
            .collect())
    }
}

/// Candidates for every node, in order.
pub fn completions(
    index: &dyn SymbolIndex,
    inferrer: &dyn TypeInferrer,
    context: &ReferenceContext,
    config: CompletionConfig,
    nodes: &[CompletionNode],
) -> Vec<CandidateEdit> {
    let completer = Completer::new(index, inferrer, context).with_config(config);
    let mut out = CandidateCollector::new();
    for node in nodes {
        completer.visit(node, &mut out);
    }
    out.into_items()
}
