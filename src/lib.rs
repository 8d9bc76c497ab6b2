//! # nestor-base
//!
//! Completion-resolution core for a language server: scope-aware namespace
//! completion with alias following and shadow detection, receiver-typed
//! member completion, and path reference completion.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Completion entry point, resolvers, candidate builder
//!   ↓
//! index     → SymbolIndex interface, in-memory and shared indexes
//!   ↓
//! base      → Primitives (Span/Position, NestingPath, CompletionConfig)
//! ```
//!
//! `error` sits beside `base` and is used by every layer.

// ============================================================================
// MODULES (dependency order: base → index → ide)
// ============================================================================

/// Foundation types: Span/Position, NestingPath, name helpers, configuration
pub mod base;

/// Error types for index lookups and completion constructs
pub mod error;

/// Symbol index: entries, lookup interface, in-memory implementation
pub mod index;

/// IDE features: completion
pub mod ide;

// Re-export foundation types
pub use base::{CompletionConfig, NestingPath, Position, Span};
pub use error::{CompletionError, CompletionResult, IndexError};
pub use ide::{
    CandidateEdit, CandidateKind, Completer, CompletionNode, ReferenceContext, completions,
};
pub use index::{IndexEntry, MemoryIndex, SharedIndex, SymbolIndex};
