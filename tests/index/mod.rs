//! Index layer tests
//!
//! Tests for:
//! - Name resolution through lexical scopes, ancestors and aliases
//! - Prefix search order
//! - Member lookup across ancestors
