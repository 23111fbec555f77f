//! Token names from variable paths.
//!
//! Figma groups variables with slashes (`color/blue-60`, `spacing/3`). Tokens
//! only keep the leaf, except that a leaf whose direct parent group is `color`
//! gets a `color-` prefix: Tailwind detects theme colors by that prefix, but in
//! Figma it would just be clutter.

use crate::error::NamingError;

/// The parent group that triggers the `color-` prefix.
pub const COLOR_GROUP: &str = "color";

/// Derives a token name from a slash-delimited variable path.
///
/// # Example
///
/// ```rust
/// use lookbook::name_of;
///
/// assert_eq!(name_of("color/blue-60").unwrap(), "color-blue-60");
/// assert_eq!(name_of("color/blue/60").unwrap(), "60");
/// assert_eq!(name_of("spacing/3").unwrap(), "3");
/// ```
///
/// # Errors
///
/// Returns [`NamingError::EmptyLeaf`] when the last segment is empty, as for
/// `""` or `"color/"`.
pub fn name_of(path: &str) -> Result<String, NamingError> {
    let mut segments = path.rsplit('/');
    let leaf = segments.next().unwrap_or_default();
    if leaf.is_empty() {
        return Err(NamingError::EmptyLeaf {
            path: path.to_string(),
        });
    }

    match segments.next() {
        Some(COLOR_GROUP) => Ok(format!("{}-{}", COLOR_GROUP, leaf)),
        _ => Ok(leaf.to_string()),
    }
}
