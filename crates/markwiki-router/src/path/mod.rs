//! Path utilities for validation and normalization
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
/// - Must not be empty
///
/// # Examples
///
/// ```
/// use markwiki_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/workspace/notes"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("workspace")); // Missing leading /
/// assert!(!is_valid_path("/workspace/")); // Trailing /
/// assert!(!is_valid_path("/workspace//notes")); // Double //
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalize a path to canonical form
///
/// Returns `Cow::Borrowed` when the input is already canonical.
///
/// - Trailing slashes: `/workspace/` → `/workspace`
/// - Double slashes: `/workspace//notes` → `/workspace/notes`
/// - Backslashes: `\workspace\notes` → `/workspace/notes`
/// - Missing leading slash: `workspace` → `/workspace`
///
/// # Examples
///
/// ```
/// use markwiki_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/workspace"), Cow::Borrowed("/workspace")));
/// assert_eq!(normalize_path("workspace/notes/"), "/workspace/notes");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Splits a path into its non-empty segments
///
/// ```
/// use markwiki_router::path::segments;
///
/// let segs: Vec<&str> = segments("/workspace/notes/").collect();
/// assert_eq!(segs, vec!["workspace", "notes"]);
/// ```
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_path() {
        assert!(is_valid_path("/"));
        assert!(is_valid_path("/conflict-resolver"));
        assert!(is_valid_path("/workspace/notes/edit/a.md"));

        assert!(!is_valid_path(""));
        assert!(!is_valid_path("conflict-resolver"));
        assert!(!is_valid_path("/workspace/"));
        assert!(!is_valid_path("/workspace//notes"));
        assert!(!is_valid_path("/workspace\\notes"));
    }

    #[test]
    fn test_normalize_path_borrowed_when_canonical() {
        let path = normalize_path("/workspace/notes");
        assert!(matches!(path, Cow::Borrowed("/workspace/notes")));

        let path = normalize_path("/");
        assert!(matches!(path, Cow::Borrowed("/")));
    }

    #[test]
    fn test_normalize_path_repairs() {
        assert_eq!(normalize_path("/workspace/"), "/workspace");
        assert_eq!(normalize_path("/workspace///notes"), "/workspace/notes");
        assert_eq!(normalize_path("\\workspace\\notes"), "/workspace/notes");
        assert_eq!(normalize_path("workspace"), "/workspace");
        assert_eq!(normalize_path("//"), "/");
    }

    #[test]
    fn test_segments_skip_empty() {
        assert_eq!(segments("/").count(), 0);
        let segs: Vec<&str> = segments("//a///b").collect();
        assert_eq!(segs, vec!["a", "b"]);
    }
}
