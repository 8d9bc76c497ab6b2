//! The syntax constructs completion reacts to.
//!
//! The caller's visitor maps its own tree onto these; nothing here parses.

use crate::base::Span;
use crate::base::constants::{NAMESPACE_SEPARATOR, SAFE_ACCESS_OPERATOR};

/// A construct at the cursor that can produce candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionNode {
    /// A bare namespace or constant reference (`Fo`, `::Fo`).
    NamespaceRead { name: String, span: Option<Span> },
    /// A qualified reference (`Foo::B`, `::Foo::B`).
    NamespacePath { path: String, span: Option<Span> },
    Call(CallNode),
    /// Any read or write of an instance-scoped field (`@na`).
    FieldAccess {
        name: String,
        access: FieldAccessKind,
        span: Option<Span>,
    },
}

impl CompletionNode {
    pub fn namespace_read(name: impl Into<String>, span: Span) -> Self {
        Self::NamespaceRead {
            name: name.into(),
            span: Some(span),
        }
    }

    pub fn namespace_path(path: impl Into<String>, span: Span) -> Self {
        Self::NamespacePath {
            path: path.into(),
            span: Some(span),
        }
    }

    pub fn field(name: impl Into<String>, access: FieldAccessKind, span: Span) -> Self {
        Self::FieldAccess {
            name: name.into(),
            access,
            span: Some(span),
        }
    }

    /// Short name of the construct, for diagnostics.
    pub fn construct(&self) -> &'static str {
        match self {
            Self::NamespaceRead { .. } => "namespace reference",
            Self::NamespacePath { .. } => "namespace path",
            Self::Call(_) => "call",
            Self::FieldAccess { access, .. } => access.construct(),
        }
    }
}

/// How a field is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldAccessKind {
    Read,
    Write,
    /// `@a += 1`
    OperatorWrite,
    /// `@a &&= x`
    AndWrite,
    /// `@a ||= x`
    OrWrite,
    /// Destructuring target (`@a, @b = pair`).
    Target,
}

impl FieldAccessKind {
    fn construct(self) -> &'static str {
        match self {
            Self::Read => "field read",
            Self::Write => "field write",
            Self::OperatorWrite => "field operator write",
            Self::AndWrite => "field and-write",
            Self::OrWrite => "field or-write",
            Self::Target => "field target",
        }
    }
}

/// Operator between a call's receiver and its message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOperator {
    /// `.`
    Dot,
    /// `&.`
    SafeNavigation,
    /// `::`
    Scope,
}

impl CallOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dot => ".",
            Self::SafeNavigation => SAFE_ACCESS_OPERATOR,
            Self::Scope => NAMESPACE_SEPARATOR,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Receiver {
    /// `self.foo`
    SelfRef,
    /// A namespace reference as written (`Foo::Bar` in `Foo::Bar.new`).
    Namespace { name: String, span: Option<Span> },
    /// Any other expression; its type comes from the inferrer.
    Expression,
}

/// A string literal argument, with the span of its content (no delimiters).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringLiteral {
    pub content: String,
    pub content_span: Option<Span>,
}

impl StringLiteral {
    pub fn new(content: impl Into<String>, content_span: Span) -> Self {
        Self {
            content: content.into(),
            content_span: Some(content_span),
        }
    }
}

/// A method call, possibly incomplete (`foo.`, `Foo::`, `require "js`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallNode {
    pub receiver: Option<Receiver>,
    pub operator: Option<CallOperator>,
    pub operator_span: Option<Span>,
    /// Message name as typed so far; `None` when nothing follows the operator.
    pub message: Option<String>,
    pub message_span: Option<Span>,
    pub span: Option<Span>,
    /// The first argument, when it is a plain string literal.
    pub string_argument: Option<StringLiteral>,
}

impl CallNode {
    /// A call with an implicit receiver.
    pub fn named(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// A call whose message has not been typed yet.
    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn with_receiver(
        mut self,
        receiver: Receiver,
        operator: CallOperator,
        operator_span: Option<Span>,
    ) -> Self {
        self.receiver = Some(receiver);
        self.operator = Some(operator);
        self.operator_span = operator_span;
        self
    }

    pub fn with_message_span(mut self, span: Span) -> Self {
        self.message_span = Some(span);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_string_argument(mut self, literal: StringLiteral) -> Self {
        self.string_argument = Some(literal);
        self
    }

    /// `self.foo` or bare `foo`.
    pub fn has_self_receiver(&self) -> bool {
        matches!(self.receiver, None | Some(Receiver::SelfRef))
    }

    /// The receiver when this is a scope access on a namespace (`Foo::`).
    pub fn namespace_scope_receiver(&self) -> Option<(&str, Option<Span>)> {
        match (&self.receiver, self.operator) {
            (Some(Receiver::Namespace { name, span }), Some(CallOperator::Scope)) => {
                Some((name.as_str(), *span))
            }
            _ => None,
        }
    }
}
