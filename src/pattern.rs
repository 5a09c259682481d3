//! Path template compilation, matching, and reverse expansion.
//!
//! A template is compiled once at registration time into a [`SegmentPattern`],
//! an immutable sequence of per-segment tokens:
//!
//! - `users` — a literal segment that must match exactly
//! - `:id` — a named capture matching one segment, optionally constrained by
//!   an anchored regex that must match the whole segment
//! - `*rest` — a trailing glob consuming all remaining segments, captured as
//!   one `/`-joined value
//!
//! ## Example
//!
//! ```rust
//! use trailhead::pattern::SegmentPattern;
//!
//! let pattern = SegmentPattern::compile("/users/:id", &[("id", r"\d+")]).unwrap();
//! let captures = pattern.match_exact("/users/42").unwrap();
//! assert_eq!(captures[0].1, "42");
//! assert!(pattern.match_exact("/users/abc").is_none());
//! ```
//!
//! The same pattern expands in reverse via [`SegmentPattern::expand`], which
//! percent-encodes substituted values and hands unconsumed variables back to
//! the caller for query-string assembly.

use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;

use crate::errors::{ExpandError, PatternError};

/// Maximum number of path/query parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., `/users/:id/posts/:post_id`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Uses `SmallVec` to avoid heap allocation for routes with ≤8 params.
/// Param names use `Arc<str>` instead of `String` because names come from
/// the static routing table (known at startup), so cloning is an O(1)
/// refcount bump; values are per-request data and stay `String`.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// One token of a compiled template, covering exactly one path segment
/// (except [`Token::Glob`], which covers the whole remaining suffix).
#[derive(Debug, Clone)]
pub(crate) enum Token {
    /// Must equal the incoming segment byte-for-byte.
    Literal(String),
    /// Matches one segment, bound to `name`; the constraint, when present,
    /// is anchored and must match the entire segment.
    Capture {
        name: Arc<str>,
        constraint: Option<Regex>,
    },
    /// Consumes all remaining segments, joined back with `/`.
    Glob { name: Arc<str> },
}

/// An immutable, compiled path template.
///
/// Matching never mutates the pattern, so a `SegmentPattern` is safe to
/// share across request-handling threads once registration is done.
#[derive(Debug, Clone)]
pub struct SegmentPattern {
    template: String,
    tokens: Vec<Token>,
}

impl SegmentPattern {
    /// Compile `template` into a pattern.
    ///
    /// `constraints` maps capture names to regex sources; each is compiled
    /// anchored (`^(?:…)$`) so it must match a whole segment.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when a glob is not the final token, when a
    /// constraint names a variable the template never declares, or when a
    /// constraint regex does not compile.
    pub fn compile(template: &str, constraints: &[(&str, &str)]) -> Result<Self, PatternError> {
        let segments: Vec<&str> = template.split('/').filter(|s| !s.is_empty()).collect();
        let mut tokens = Vec::with_capacity(segments.len());
        let mut used_constraints: Vec<&str> = Vec::new();

        for (idx, segment) in segments.iter().enumerate() {
            if let Some(name) = segment.strip_prefix(':') {
                let constraint = match constraints.iter().find(|(key, _)| *key == name) {
                    Some((key, source)) => {
                        used_constraints.push(key);
                        Some(compile_constraint(name, source)?)
                    }
                    None => None,
                };
                tokens.push(Token::Capture {
                    name: Arc::from(name),
                    constraint,
                });
            } else if let Some(name) = segment.strip_prefix('*') {
                if idx + 1 != segments.len() {
                    return Err(PatternError::GlobNotLast {
                        template: template.to_string(),
                    });
                }
                tokens.push(Token::Glob {
                    name: Arc::from(name),
                });
            } else {
                tokens.push(Token::Literal((*segment).to_string()));
            }
        }

        if let Some((name, _)) = constraints
            .iter()
            .find(|(key, _)| !used_constraints.contains(key))
        {
            return Err(PatternError::UnknownConstraint {
                template: template.to_string(),
                name: (*name).to_string(),
            });
        }

        Ok(Self {
            template: template.to_string(),
            tokens,
        })
    }

    /// The template this pattern was compiled from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    pub(crate) fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// True when the final token is a glob.
    #[must_use]
    pub fn has_glob(&self) -> bool {
        matches!(self.tokens.last(), Some(Token::Glob { .. }))
    }

    /// True when the pattern has no captures and no glob, i.e. it can live
    /// in a plain literal-path map.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.tokens
            .iter()
            .all(|token| matches!(token, Token::Literal(_)))
    }

    /// True for the pattern compiled from `/` (no tokens at all).
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Match `path` exactly, token by token.
    ///
    /// Returns the accumulated captures on success, `None` on any mismatch
    /// or when segment counts disagree (unless a glob absorbs the rest).
    #[must_use]
    pub fn match_exact(&self, path: &str) -> Option<ParamVec> {
        let segments: SmallVec<[&str; MAX_INLINE_PARAMS]> =
            path.split('/').filter(|s| !s.is_empty()).collect();
        let mut captures = ParamVec::new();
        let mut idx = 0;

        for token in &self.tokens {
            match token {
                Token::Literal(text) => {
                    let segment = segments.get(idx)?;
                    if *segment != text.as_str() {
                        return None;
                    }
                    idx += 1;
                }
                Token::Capture { name, constraint } => {
                    let segment = segments.get(idx)?;
                    if let Some(re) = constraint {
                        if !re.is_match(segment) {
                            return None;
                        }
                    }
                    captures.push((Arc::clone(name), (*segment).to_string()));
                    idx += 1;
                }
                Token::Glob { name } => {
                    captures.push((Arc::clone(name), segments[idx..].join("/")));
                    idx = segments.len();
                }
            }
        }

        if idx == segments.len() {
            Some(captures)
        } else {
            None
        }
    }

    /// Match the pattern's non-glob tokens against a *prefix* of `path`.
    ///
    /// Returns the literal substring of `path` that was consumed, verbatim,
    /// plus the captures. The consumed substring (not the template text) is
    /// what mount delegation appends to the script name, so prefixes with
    /// dynamic segments like `/stations/:id` rewrite correctly.
    ///
    /// The root pattern consumes nothing and matches every path.
    #[must_use]
    pub fn peek_match<'p>(&self, path: &'p str) -> Option<(&'p str, ParamVec)> {
        let spans = segment_spans(path);
        let mut captures = ParamVec::new();
        let mut idx = 0;
        let mut consumed_end = 0;

        for token in &self.tokens {
            match token {
                Token::Literal(text) => {
                    let (start, end) = *spans.get(idx)?;
                    if &path[start..end] != text.as_str() {
                        return None;
                    }
                    consumed_end = end;
                    idx += 1;
                }
                Token::Capture { name, constraint } => {
                    let (start, end) = *spans.get(idx)?;
                    let segment = &path[start..end];
                    if let Some(re) = constraint {
                        if !re.is_match(segment) {
                            return None;
                        }
                    }
                    captures.push((Arc::clone(name), segment.to_string()));
                    consumed_end = end;
                    idx += 1;
                }
                // A glob never narrows a prefix match.
                Token::Glob { .. } => break,
            }
        }

        Some((&path[..consumed_end], captures))
    }

    /// Expand the pattern into a concrete path.
    ///
    /// Each capture and glob is substituted with the caller-supplied value,
    /// percent-encoded (glob values are encoded per segment, so their `/`
    /// separators survive). Variables the pattern does not consume are
    /// returned alongside the path, in caller order, so the URL layer can
    /// append them as a query string.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError`] naming the first missing required variable,
    /// or the first value that fails its constraint.
    pub fn expand(
        &self,
        variables: &[(&str, &str)],
    ) -> Result<(String, Vec<(String, String)>), ExpandError> {
        let mut path = String::new();
        let mut consumed: Vec<&str> = Vec::new();

        for token in &self.tokens {
            match token {
                Token::Literal(text) => {
                    path.push('/');
                    path.push_str(text);
                }
                Token::Capture { name, constraint } => {
                    let value = required_variable(variables, name)?;
                    if let Some(re) = constraint {
                        if !re.is_match(value) {
                            return Err(ExpandError::ConstraintViolation {
                                name: name.to_string(),
                                value: value.to_string(),
                            });
                        }
                    }
                    path.push('/');
                    path.push_str(&urlencoding::encode(value));
                    consumed.push(name);
                }
                Token::Glob { name } => {
                    let value = required_variable(variables, name)?;
                    path.push('/');
                    let mut first = true;
                    for segment in value.split('/') {
                        if !first {
                            path.push('/');
                        }
                        path.push_str(&urlencoding::encode(segment));
                        first = false;
                    }
                    consumed.push(name);
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }

        let leftover = variables
            .iter()
            .filter(|(key, _)| !consumed.contains(key))
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();

        Ok((path, leftover))
    }
}

fn compile_constraint(name: &str, source: &str) -> Result<Regex, PatternError> {
    Regex::new(&format!("^(?:{})$", source)).map_err(|err| PatternError::InvalidConstraint {
        name: name.to_string(),
        source: err,
    })
}

fn required_variable<'v>(variables: &[(&str, &'v str)], name: &str) -> Result<&'v str, ExpandError> {
    variables
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
        .ok_or_else(|| ExpandError::MissingVariable {
            name: name.to_string(),
        })
}

/// Byte spans of the non-empty segments of `path`, in order.
fn segment_spans(path: &str) -> SmallVec<[(usize, usize); MAX_INLINE_PARAMS]> {
    let mut spans = SmallVec::new();
    let mut start: Option<usize> = None;
    for (i, byte) in path.bytes().enumerate() {
        if byte == b'/' {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, path.len()));
    }
    spans
}
