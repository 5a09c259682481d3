//! Per-method trie for parameterized routes.
//!
//! One trie exists per HTTP method. Each node owns its literal children
//! (keyed by exact segment text) plus dynamic edges for capture segments;
//! a node that terminates a registered route carries the endpoint as a leaf.
//!
//! ## Matching
//!
//! Lookup walks the path one segment at a time, always preferring the
//! literal child over a dynamic edge. When a literal descent dead-ends, the
//! search backtracks and retries the dynamic edges at the same depth, so
//! `/users/new` and `/users/:id` can coexist with the literal route winning
//! for `/users/new`. Captures accumulate in a transient vector carried by
//! the traversal, never in the nodes, so concurrent lookups share the tree
//! without synchronization.

use regex::Regex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

use crate::pattern::{ParamVec, SegmentPattern, Token, MAX_INLINE_PARAMS};

/// Marker returned when a leaf is already bound at the insertion point,
/// i.e. the identical method+path was registered twice.
#[derive(Debug)]
pub(crate) struct LeafOccupied;

/// A capture continuation: the edge records the variable name and the
/// constraint checked at match time before the segment is accepted.
struct DynamicEdge<T> {
    name: Arc<str>,
    constraint: Option<Regex>,
    node: Node<T>,
}

struct Node<T> {
    children: HashMap<String, Node<T>>,
    dynamic: Vec<DynamicEdge<T>>,
    leaf: Option<Arc<T>>,
}

impl<T> Node<T> {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            dynamic: Vec::new(),
            leaf: None,
        }
    }

    fn literal_child(&mut self, text: &str) -> &mut Node<T> {
        self.children
            .entry(text.to_string())
            .or_insert_with(Node::new)
    }

    /// Descend into the dynamic edge for (name, constraint), creating it if
    /// absent. Edges are distinct per (name, constraint) pair so routes with
    /// different variable names at the same position keep their own names.
    fn dynamic_child(&mut self, name: &Arc<str>, constraint: &Option<Regex>) -> &mut Node<T> {
        let constraint_src = constraint.as_ref().map(Regex::as_str);
        let idx = self
            .dynamic
            .iter()
            .position(|edge| {
                edge.name.as_ref() == name.as_ref()
                    && edge.constraint.as_ref().map(Regex::as_str) == constraint_src
            })
            .unwrap_or_else(|| {
                self.dynamic.push(DynamicEdge {
                    name: Arc::clone(name),
                    constraint: constraint.clone(),
                    node: Node::new(),
                });
                self.dynamic.len() - 1
            });
        &mut self.dynamic[idx].node
    }

    fn search(&self, segments: &[&str], captures: &mut ParamVec) -> Option<Arc<T>> {
        let Some((segment, remaining)) = segments.split_first() else {
            return self.leaf.clone();
        };

        // Literal beats dynamic at every depth.
        if let Some(child) = self.children.get(*segment) {
            if let Some(endpoint) = child.search(remaining, captures) {
                return Some(endpoint);
            }
        }

        for edge in &self.dynamic {
            if let Some(re) = &edge.constraint {
                if !re.is_match(segment) {
                    continue;
                }
            }
            captures.push((Arc::clone(&edge.name), (*segment).to_string()));
            if let Some(endpoint) = edge.node.search(remaining, captures) {
                return Some(endpoint);
            }
            // Backtrack: drop the capture when this branch fails.
            captures.pop();
        }

        None
    }
}

/// Trie of variable (captured) routes for one HTTP method.
pub(crate) struct Trie<T> {
    root: Node<T>,
}

impl<T> Trie<T> {
    pub(crate) fn new() -> Self {
        Self { root: Node::new() }
    }

    /// Insert a compiled pattern, binding `endpoint` at the terminal node.
    pub(crate) fn insert(
        &mut self,
        pattern: &SegmentPattern,
        endpoint: Arc<T>,
    ) -> Result<(), LeafOccupied> {
        let mut node = &mut self.root;
        for token in pattern.tokens() {
            node = match token {
                Token::Literal(text) => node.literal_child(text),
                Token::Capture { name, constraint } => node.dynamic_child(name, constraint),
                // Glob patterns are classified into the globbed store before
                // they can reach a trie.
                Token::Glob { .. } => unreachable!("glob patterns never enter the trie"),
            };
        }
        if node.leaf.is_some() {
            return Err(LeafOccupied);
        }
        node.leaf = Some(endpoint);
        Ok(())
    }

    /// Overwrite the endpoint at an existing leaf. Returns `false` when no
    /// leaf is bound for the pattern, leaving the trie untouched.
    pub(crate) fn replace(&mut self, pattern: &SegmentPattern, endpoint: Arc<T>) -> bool {
        let mut node = &mut self.root;
        for token in pattern.tokens() {
            let next = match token {
                Token::Literal(text) => node.children.get_mut(text),
                Token::Capture { name, constraint } => {
                    let constraint_src = constraint.as_ref().map(Regex::as_str);
                    node.dynamic
                        .iter_mut()
                        .find(|edge| {
                            edge.name.as_ref() == name.as_ref()
                                && edge.constraint.as_ref().map(Regex::as_str) == constraint_src
                        })
                        .map(|edge| &mut edge.node)
                }
                Token::Glob { .. } => unreachable!("glob patterns never enter the trie"),
            };
            match next {
                Some(n) => node = n,
                None => return false,
            }
        }
        if node.leaf.is_none() {
            return false;
        }
        node.leaf = Some(endpoint);
        true
    }

    /// Walk `path`, accumulating captures; succeeds only when every segment
    /// is consumed and the final node is a leaf.
    pub(crate) fn find(&self, path: &str) -> Option<(Arc<T>, ParamVec)> {
        let segments: SmallVec<[&str; MAX_INLINE_PARAMS]> =
            path.split('/').filter(|s| !s.is_empty()).collect();
        let mut captures = ParamVec::new();
        let endpoint = self.root.search(&segments, &mut captures)?;
        Some((endpoint, captures))
    }

    /// True when `path` reaches any leaf; used for 405 detection.
    pub(crate) fn matches(&self, path: &str) -> bool {
        self.find(path).is_some()
    }
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}
