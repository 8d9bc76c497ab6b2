//! Per-request context and the collaborators that supply it.

use std::path::PathBuf;

use crate::base::NestingPath;
use crate::base::constants::{ACCESS_OPERATOR, ROOT_TYPE};
use crate::index::TypeRef;

use super::syntax::CompletionNode;

/// Everything the resolvers know about where the cursor is.
///
/// Built once per completion request and only read afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceContext {
    /// Fully-qualified name of the innermost enclosing namespace.
    pub enclosing_name: String,
    pub nesting: NestingPath,
    /// Character that triggered the request, if any.
    pub trigger_character: Option<char>,
    /// An external type checker owns namespace and method completion.
    pub type_checker_active: bool,
    /// The file being edited; relative path completion starts from its directory.
    pub document_path: Option<PathBuf>,
}

impl ReferenceContext {
    /// Context for `nesting`, with the enclosing name taken from it.
    pub fn new(nesting: NestingPath) -> Self {
        Self {
            enclosing_name: nesting.joined(),
            nesting,
            ..Self::default()
        }
    }

    pub fn from_provider(
        provider: &dyn ContextProvider,
        trigger_character: Option<char>,
        type_checker_active: bool,
    ) -> Self {
        Self {
            enclosing_name: provider.enclosing_name(),
            nesting: provider.nesting(),
            trigger_character,
            type_checker_active,
            document_path: provider.document_path(),
        }
    }

    pub fn with_enclosing_name(mut self, name: impl Into<String>) -> Self {
        self.enclosing_name = name.into();
        self
    }

    pub fn with_trigger(mut self, trigger: char) -> Self {
        self.trigger_character = Some(trigger);
        self
    }

    pub fn with_type_checker(mut self, active: bool) -> Self {
        self.type_checker_active = active;
        self
    }

    pub fn with_document_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_path = Some(path.into());
        self
    }

    /// The request was triggered by typing the member access operator.
    pub fn is_access_trigger(&self) -> bool {
        self.trigger_character == Some(ACCESS_OPERATOR)
    }

    /// Type of `self` at the cursor.
    pub fn enclosing_type(&self) -> TypeRef {
        if self.enclosing_name.is_empty() {
            TypeRef::new(ROOT_TYPE)
        } else {
            TypeRef::new(self.enclosing_name.as_str())
        }
    }
}

/// Supplies lexical information for the cursor position.
pub trait ContextProvider {
    /// Enclosing namespace names, outermost first.
    fn nesting(&self) -> NestingPath;

    /// Fully-qualified name of the innermost enclosing namespace.
    fn enclosing_name(&self) -> String;

    fn document_path(&self) -> Option<PathBuf> {
        None
    }
}

/// Infers the type of the receiver of a member access.
pub trait TypeInferrer {
    fn infer_receiver_type(
        &self,
        context: &ReferenceContext,
        node: &CompletionNode,
    ) -> Option<TypeRef>;
}

impl<F> TypeInferrer for F
where
    F: Fn(&ReferenceContext, &CompletionNode) -> Option<TypeRef>,
{
    fn infer_receiver_type(
        &self,
        context: &ReferenceContext,
        node: &CompletionNode,
    ) -> Option<TypeRef> {
        self(context, node)
    }
}

/// Types `self`, implicit receivers and fields as the enclosing namespace.
///
/// Explicit receivers other than `self` are left unknown.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnclosingTypeInferrer;

impl TypeInferrer for EnclosingTypeInferrer {
    fn infer_receiver_type(
        &self,
        context: &ReferenceContext,
        node: &CompletionNode,
    ) -> Option<TypeRef> {
        match node {
            CompletionNode::FieldAccess { .. } => Some(context.enclosing_type()),
            CompletionNode::Call(call) if call.has_self_receiver() => {
                Some(context.enclosing_type())
            }
            _ => None,
        }
    }
}
