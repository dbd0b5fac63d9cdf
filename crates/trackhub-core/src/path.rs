//! Canonical slash-delimited path handling.
//!
//! Every path in TrackHub is absolute, uses `/` as separator, has no
//! trailing slash (except the root `/` itself) and contains no empty
//! segments. Record paths name files; index paths name directories.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// The root directory.
pub const ROOT: &str = "/";

/// Iterate over the non-empty segments of a path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Number of non-empty segments. The root has depth 0.
pub fn depth(path: &str) -> usize {
    segments(path).count()
}

/// Normalize a directory path: leading slash, no trailing slash, no empty
/// segments. Blank input is the root.
pub fn normalize_dir(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for segment in segments(path.trim()) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Whether `path` is the root directory.
pub fn is_root(path: &str) -> bool {
    segments(path).next().is_none()
}

/// Join a directory and a single child name.
pub fn join(dir: &str, name: &str) -> String {
    if is_root(dir) {
        format!("/{name}")
    } else {
        format!("{}/{name}", dir.trim_end_matches('/'))
    }
}

/// The prefix every direct or nested child of `dir` starts with.
///
/// `"/"` for the root, otherwise `dir + "/"`.
pub fn child_prefix(dir: &str) -> String {
    if is_root(dir) {
        ROOT.to_string()
    } else {
        format!("{}/", dir.trim_end_matches('/'))
    }
}

/// Parent directory of a path; `None` for the root.
pub fn parent_of(path: &str) -> Option<String> {
    let parts: Vec<&str> = segments(path).collect();
    match parts.split_last() {
        None => None,
        Some((_, rest)) if rest.is_empty() => Some(ROOT.to_string()),
        Some((_, rest)) => Some(format!("/{}", rest.join("/"))),
    }
}

/// Last segment of a path; `None` for the root.
pub fn leaf_name(path: &str) -> Option<&str> {
    segments(path).last()
}

/// One directory implied by a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorDir {
    /// Absolute directory path.
    pub full_path: String,
    /// Directory containing this one (`/` for top-level directories).
    pub parent_path: String,
    /// Last segment.
    pub name: String,
    /// Number of segments in `full_path`.
    pub depth: usize,
}

/// Every proper ancestor directory of a file path, outermost first.
///
/// The root itself is not included. The last element, when present, is the
/// directory literally containing the file.
///
/// ```
/// use trackhub_core::path::ancestors;
/// let dirs: Vec<String> = ancestors("/A/B/song.mp3")
///     .into_iter()
///     .map(|d| d.full_path)
///     .collect();
/// assert_eq!(dirs, vec!["/A", "/A/B"]);
/// ```
pub fn ancestors(file_path: &str) -> Vec<AncestorDir> {
    let parts: Vec<&str> = segments(file_path).collect();
    let Some((_, dirs)) = parts.split_last() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(dirs.len());
    let mut current = String::new();
    for (i, name) in dirs.iter().enumerate() {
        let parent_path = if current.is_empty() {
            ROOT.to_string()
        } else {
            current.clone()
        };
        current.push('/');
        current.push_str(name);
        out.push(AncestorDir {
            full_path: current.clone(),
            parent_path,
            name: (*name).to_string(),
            depth: i + 1,
        });
    }
    out
}

/// Percent-decode a raw path once. Malformed escapes leave the input as is.
pub fn decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains('%') {
        return Cow::Borrowed(raw);
    }
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(raw),
    }
}

/// Decode and normalize a file path. Returns `None` when there is no file
/// segment: blank input, the root, or a directory entry ending in `/`.
pub fn canonical_file_path(raw: &str) -> Option<String> {
    let decoded = decode(raw.trim());
    if decoded.ends_with('/') {
        return None;
    }
    let normalized = normalize_dir(&decoded);
    if is_root(&normalized) {
        None
    } else {
        Some(normalized)
    }
}

/// Whether `path` lies exactly one segment below `dir`.
pub fn is_direct_child(dir: &str, path: &str) -> bool {
    let prefix = child_prefix(dir);
    match path.strip_prefix(prefix.as_str()) {
        Some(rest) => !rest.is_empty() && !rest.contains('/'),
        None => false,
    }
}
