//! IDE feature tests
//!
//! Tests for:
//! - Namespace completion (shadowing, aliases, absolute references, visibility)
//! - Member completion (methods and fields)
//! - Path completion (require registry and relative file tree)
//! - Dispatch across constructs

pub mod tests_dispatch;
pub mod tests_member_completion;
pub mod tests_path_completion;
