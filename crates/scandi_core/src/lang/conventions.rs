//! Shared compiler conventions (well-known names and depth sentinels).

/// Prefix of the label synthesized for an `:` (else) line.
pub const AUTO_ELSE_PREFIX: &str = "auto_else_";

/// Prefix of the name given to a conditional line.
pub const AUTO_IF_PREFIX: &str = "auto_if_";

/// Source file extension (without the dot).
pub const SOURCE_EXTENSION: &str = "scandi";

/// Depth of the global root scope.
pub const GLOBAL_DEPTH: i32 = -1;

/// Depth of a file scope.
pub const FILE_DEPTH: i32 = 0;

/// Name of the global root scope.
pub const GLOBAL_SCOPE_NAME: &str = "global";

/// Build the synthesized else-label name for a source line.
pub fn auto_else_name(line: usize) -> String {
    format!("{AUTO_ELSE_PREFIX}{line}")
}

/// Build the synthesized conditional name for a source line.
pub fn auto_if_name(line: usize) -> String {
    format!("{AUTO_IF_PREFIX}{line}")
}

/// Check whether a label name was synthesized from an else line.
pub fn is_auto_else(name: &str) -> bool {
    name.starts_with(AUTO_ELSE_PREFIX)
}
