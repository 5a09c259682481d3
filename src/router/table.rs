//! The four lookup stores and the precedence policy across them.
//!
//! Routes are held by exactly one store, indexed by path shape:
//!
//! 1. `fixed` — literal-only paths, a plain per-method map
//! 2. `variable` — per-method tries for captured paths
//! 3. `globbed` — per-method ordered lists of glob patterns
//! 4. `mounted` — ordered prefix list for delegated sub-applications
//!
//! Lookup tries the stores in that order; the first hit wins. The globbed
//! and mounted lists preserve registration order, which breaks ties between
//! overlapping patterns (first registered, first matched).

use http::Method;
use std::collections::HashMap;
use std::sync::Arc;

use super::mount::{MountMatch, MountTable};
use super::trie::Trie;
use crate::errors::RegisterError;
use crate::pattern::{ParamVec, SegmentPattern};

/// A successful store lookup.
pub(crate) enum TableHit<T> {
    /// An ordinary route: endpoint plus accumulated captures.
    Endpoint {
        endpoint: Arc<T>,
        captures: ParamVec,
    },
    /// A mounted prefix: the caller must delegate using the rewritten
    /// script-name/path split.
    Mounted {
        endpoint: Arc<T>,
        mount: MountMatch,
        captures: ParamVec,
    },
}

pub(crate) struct RouteTable<T> {
    fixed: HashMap<Method, HashMap<String, Arc<T>>>,
    variable: HashMap<Method, Trie<T>>,
    globbed: HashMap<Method, Vec<(SegmentPattern, Arc<T>)>>,
    mounted: MountTable<T>,
}

impl<T> RouteTable<T> {
    pub(crate) fn new() -> Self {
        Self {
            fixed: HashMap::new(),
            variable: HashMap::new(),
            globbed: HashMap::new(),
            mounted: MountTable::new(),
        }
    }

    pub(crate) fn add_fixed(
        &mut self,
        method: Method,
        path: String,
        endpoint: Arc<T>,
    ) -> Result<(), RegisterError> {
        let routes = self.fixed.entry(method.clone()).or_default();
        if routes.contains_key(&path) {
            return Err(RegisterError::DuplicateRoute { method, path });
        }
        routes.insert(path, endpoint);
        Ok(())
    }

    pub(crate) fn add_variable(
        &mut self,
        method: Method,
        pattern: &SegmentPattern,
        endpoint: Arc<T>,
    ) -> Result<(), RegisterError> {
        self.variable
            .entry(method.clone())
            .or_default()
            .insert(pattern, endpoint)
            .map_err(|_| RegisterError::DuplicateRoute {
                method,
                path: pattern.template().to_string(),
            })
    }

    pub(crate) fn add_globbed(
        &mut self,
        method: Method,
        pattern: SegmentPattern,
        endpoint: Arc<T>,
    ) {
        self.globbed
            .entry(method)
            .or_default()
            .push((pattern, endpoint));
    }

    pub(crate) fn add_mounted(&mut self, prefix: SegmentPattern, endpoint: Arc<T>) {
        self.mounted.push(prefix, endpoint);
    }

    /// Swap the endpoint of an already-registered route in place, keeping
    /// its position in order-sensitive stores. Returns `false` when no such
    /// route exists.
    pub(crate) fn replace(
        &mut self,
        method: &Method,
        pattern: &SegmentPattern,
        path: &str,
        endpoint: Arc<T>,
    ) -> bool {
        if pattern.has_glob() {
            self.globbed
                .get_mut(method)
                .and_then(|routes| {
                    routes
                        .iter_mut()
                        .find(|(existing, _)| existing.template() == pattern.template())
                })
                .map(|entry| entry.1 = endpoint)
                .is_some()
        } else if pattern.is_fixed() {
            match self.fixed.get_mut(method) {
                Some(routes) if routes.contains_key(path) => {
                    routes.insert(path.to_string(), endpoint);
                    true
                }
                _ => false,
            }
        } else {
            self.variable
                .get_mut(method)
                .is_some_and(|trie| trie.replace(pattern, endpoint))
        }
    }

    /// Resolve (method, path) in fixed → variable → globbed → mounted
    /// precedence; the first hit wins.
    pub(crate) fn lookup(&self, method: &Method, path: &str) -> Option<TableHit<T>> {
        if let Some(endpoint) = self.fixed.get(method).and_then(|routes| routes.get(path)) {
            return Some(TableHit::Endpoint {
                endpoint: Arc::clone(endpoint),
                captures: ParamVec::new(),
            });
        }

        if let Some((endpoint, captures)) = self
            .variable
            .get(method)
            .and_then(|trie| trie.find(path))
        {
            return Some(TableHit::Endpoint { endpoint, captures });
        }

        if let Some(routes) = self.globbed.get(method) {
            for (pattern, endpoint) in routes {
                if let Some(captures) = pattern.match_exact(path) {
                    return Some(TableHit::Endpoint {
                        endpoint: Arc::clone(endpoint),
                        captures,
                    });
                }
            }
        }

        let (endpoint, mount, captures) = self.mounted.resolve(path)?;
        Some(TableHit::Mounted {
            endpoint,
            mount,
            captures,
        })
    }

    /// True when `path` matches a fixed or variable route under any method
    /// other than `method`. Globbed and mounted routes do not participate;
    /// they are not method-exclusive.
    pub(crate) fn method_not_allowed(&self, method: &Method, path: &str) -> bool {
        let fixed_hit = self
            .fixed
            .iter()
            .any(|(m, routes)| m != method && routes.contains_key(path));
        if fixed_hit {
            return true;
        }

        self.variable
            .iter()
            .any(|(m, trie)| m != method && trie.matches(path))
    }
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
