//! Lexical rules for constant identifiers and constant paths.
//!
//! A constant name starts with an uppercase letter and continues with letters,
//! digits, underscores, or any non-ASCII character. A constant path is one or
//! more constant names joined by `::`, optionally absolute (leading `::`).
//!
//! Temporary names are rejected when they match the path rule so that a
//! temporary name can never be mistaken for a resolved one.

use crate::name::PATH_SEPARATOR;

/// Check if `name` is a valid bindable constant identifier.
///
/// # Examples
///
/// ```
/// use constpath_core::is_constant_name;
///
/// assert!(is_constant_name("Object"));
/// assert!(is_constant_name("HTTP_Client2"));
/// assert!(!is_constant_name("object"));
/// assert!(!is_constant_name("Foo::Bar"));
/// assert!(!is_constant_name(""));
/// ```
pub fn is_constant_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric() || !c.is_ascii())
}

/// Check if `path` is a constant path (`A`, `A::B`, `::A::B`).
///
/// Empty segments anywhere other than the absolute prefix make the whole
/// string a non-path, as does a single `:`.
pub fn is_constant_path(path: &str) -> bool {
    let relative = path.strip_prefix(PATH_SEPARATOR).unwrap_or(path);
    if relative.is_empty() {
        return false;
    }
    relative.split(PATH_SEPARATOR).all(is_constant_name)
}

/// Split a constant path into its segments, dropping the absolute prefix.
///
/// Returns `None` when `path` is not a constant path.
pub fn split_constant_path(path: &str) -> Option<Vec<&str>> {
    if !is_constant_path(path) {
        return None;
    }
    let relative = path.strip_prefix(PATH_SEPARATOR).unwrap_or(path);
    Some(relative.split(PATH_SEPARATOR).collect())
}
