//! Symbol index — the read-only lookup service completion runs against.
//!
//! ## Key Types
//!
//! - [`SymbolIndex`] — The lookup interface the completion core consumes
//! - [`IndexEntry`], [`EntryGroup`] — Indexed symbols, grouped by name
//! - [`MemoryIndex`] — In-memory implementation
//! - [`SharedIndex`] — `MemoryIndex` behind a read/write lock for a background indexer

mod entry;
mod memory;
mod shared;
mod symbol_index;

pub use entry::{
    EntryGroup, EntryKind, EntryLocation, IndexEntry, MemberKind, NamespaceKind, TypeRef,
    Visibility,
};
pub use memory::MemoryIndex;
pub use shared::SharedIndex;
pub use symbol_index::SymbolIndex;
