//! Spelling constants of the host language's reference syntax.

/// Separator between namespace segments (`Foo::Bar`).
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Leading marker that makes a reference resolve from the top level (`::Bar`).
pub const ABSOLUTE_MARKER: &str = "::";

/// Member access operator (`recv.method`).
pub const ACCESS_OPERATOR: char = '.';

/// Safe-navigation access operator (`recv&.method`).
pub const SAFE_ACCESS_OPERATOR: &str = "&.";

/// Sigil that prefixes instance-scoped field names (`@name`).
pub const FIELD_SIGIL: char = '@';

/// Call name that loads a module from the registry of loadable paths.
pub const REQUIRE: &str = "require";

/// Call name that loads a file relative to the editing file.
pub const REQUIRE_RELATIVE: &str = "require_relative";

/// Root type used for receivers at the top level.
pub const ROOT_TYPE: &str = "Object";
