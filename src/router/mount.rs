//! Mounted sub-application prefixes.
//!
//! A mounted route delegates an entire path-prefix subtree to another
//! routing unit. Prefixes are scanned in registration order; the first
//! prefix whose `peek_match` succeeds wins. On a hit, the consumed portion
//! of the path becomes the delegate's script name and the remainder becomes
//! its path, so the mounted application sees paths relative to its mount
//! point.

use std::sync::Arc;

use crate::pattern::{ParamVec, SegmentPattern};

/// The script-name/path split computed for a mounted match.
///
/// The transport layer appends `script_name` to its accumulated script
/// prefix and re-invokes the mounted application with `path_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountMatch {
    /// The verbatim portion of the request path consumed by the prefix;
    /// empty for an application mounted at `/`.
    pub script_name: String,
    /// The remaining path handed to the delegate, `/` when nothing remains.
    pub path_info: String,
}

/// Ordered list of (prefix pattern, endpoint) pairs.
pub(crate) struct MountTable<T> {
    entries: Vec<(SegmentPattern, Arc<T>)>,
}

impl<T> MountTable<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, prefix: SegmentPattern, endpoint: Arc<T>) {
        self.entries.push((prefix, endpoint));
    }

    /// Prefix-match `path` against the mounted prefixes, first registered
    /// first tried, and compute the delegation split for the winner.
    pub(crate) fn resolve(&self, path: &str) -> Option<(Arc<T>, MountMatch, ParamVec)> {
        for (prefix, endpoint) in &self.entries {
            let Some((matched, captures)) = prefix.peek_match(path) else {
                continue;
            };

            let mount = if matched.is_empty() {
                // Mounted at the root: the delegate owns the whole path and
                // no script prefix accumulates.
                MountMatch {
                    script_name: String::new(),
                    path_info: path.to_string(),
                }
            } else {
                let suffix = &path[matched.len()..];
                MountMatch {
                    script_name: matched.to_string(),
                    path_info: if suffix.is_empty() {
                        "/".to_string()
                    } else {
                        suffix.to_string()
                    },
                }
            };

            return Some((Arc::clone(endpoint), mount, captures));
        }
        None
    }
}

impl<T> Default for MountTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
