//! Path resolution
//!
//! Paths are absolute, `/`-separated strings. Empty segments are ignored, so
//! `//a///b/` and `/a/b` name the same thing. The root is `/` (or the empty string).
//!
//! Resolution splits a path into its directory segments and a final leaf name,
//! then walks the tree from the root. It never looks at entries: callers decide
//! what the leaf means (a file, or a directory).

use super::node::Directory;

/// Split a path into directory segments and the leaf name.
///
/// The leaf is empty only for the root path.
pub fn split(path: &str) -> (Vec<&str>, &str) {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let leaf = segments.pop().unwrap_or("");
    (segments, leaf)
}

/// Normalize a path into the canonical `/a/b/c` form.
pub fn normalize(path: &str) -> String {
    let (mut segments, leaf) = split(path);
    if !leaf.is_empty() {
        segments.push(leaf);
    }
    format!("/{}", segments.join("/"))
}

/// Join `path` against `cwd`. Absolute paths are returned normalized,
/// relative ones are appended to `cwd`. `.` and `..` are evaluated, and
/// `..` at the root stays at the root.
pub fn join(cwd: &str, path: &str) -> String {
    let base = if path.starts_with('/') { "" } else { cwd };

    let mut stack: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            segment => stack.push(segment),
        }
    }
    format!("/{}", stack.join("/"))
}

/// Walk to the parent directory of `path`, creating any missing directory
/// along the way, and return it together with the leaf name.
///
/// No permission is checked here: shaping the namespace is unguarded.
pub(crate) fn resolve_or_create<'a, 'p>(
    root: &'a mut Directory,
    path: &'p str,
) -> (&'a mut Directory, &'p str) {
    let (segments, leaf) = split(path);
    let mut current = root;
    for segment in segments {
        current = current.get_or_create_dir(segment);
    }
    (current, leaf)
}

/// Walk to the parent directory of `path` without creating anything.
/// Returns `None` if an intermediate directory is missing.
pub(crate) fn lookup<'a, 'p>(
    root: &'a Directory,
    path: &'p str,
) -> Option<(&'a Directory, &'p str)> {
    let (segments, leaf) = split(path);
    let mut current = root;
    for segment in segments {
        current = current.get_dir(segment)?;
    }
    Some((current, leaf))
}

/// Mutable flavor of [`lookup`].
pub(crate) fn lookup_mut<'a, 'p>(
    root: &'a mut Directory,
    path: &'p str,
) -> Option<(&'a mut Directory, &'p str)> {
    let (segments, leaf) = split(path);
    let mut current = root;
    for segment in segments {
        current = current.get_dir_mut(segment)?;
    }
    Some((current, leaf))
}
