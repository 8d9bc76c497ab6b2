//! Foundation types for the completion core.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Span`] - Line/column positions for edits
//! - [`NestingPath`] - Lexical nesting at the cursor
//! - Qualified-name helpers and spelling constants
//! - [`CompletionConfig`] - Options
//!
//! This module has NO dependencies on other nestor modules.

mod config;
pub mod constants;
pub mod names;
mod position;

pub use config::CompletionConfig;
pub use names::NestingPath;
pub use position::{Position, Span};
