//! IDE features: completion candidates for the construct at the cursor.
//!
//! This module sits between the caller's syntax tree and the LSP server.
//! The caller maps the nodes at the cursor to [`CompletionNode`]s, describes
//! the cursor with a [`ReferenceContext`], and receives [`CandidateEdit`]s.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No LSP types**: Uses our own types, converted at LSP boundary
//! 3. **Never fails**: A construct that cannot be completed yields nothing
//!
//! ## Usage
//!
//! ```ignore
//! use nestor::ide::{
//!     CandidateCollector, Completer, CompletionNode, EnclosingTypeInferrer, ReferenceContext,
//! };
//! use nestor::base::{NestingPath, Span};
//!
//! let context = ReferenceContext::new(NestingPath::new(["Foo"]));
//! let completer = Completer::new(&index, &EnclosingTypeInferrer, &context);
//!
//! let mut out = CandidateCollector::new();
//! completer.visit(&CompletionNode::namespace_read("B", Span::from_coords(3, 4, 3, 5)), &mut out);
//! ```

mod candidate;
mod completion;
mod context;
mod members;
mod namespace;
mod paths;
mod shadow;
mod syntax;

pub use candidate::{CandidateCollector, CandidateEdit, CandidateKind};
pub use completion::{Completer, completions};
pub use context::{ContextProvider, EnclosingTypeInferrer, ReferenceContext, TypeInferrer};
pub use namespace::{NamespaceMatch, NamespaceQuery, resolve_namespace};
pub use paths::relative_paths;
pub use shadow::{Spelling, spell, top_level_conflict};
pub use syntax::{
    CallNode, CallOperator, CompletionNode, FieldAccessKind, Receiver, StringLiteral,
};
