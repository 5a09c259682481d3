//! Route matching and dispatch.
//!
//! The router resolves an incoming (method, path) pair to a registered
//! endpoint in two phases:
//!
//! 1. **Registration** — path templates are compiled into
//!    [`SegmentPattern`](crate::pattern::SegmentPattern)s and filed into
//!    the store matching their shape: a literal map for fixed paths, a
//!    per-method trie for captured paths, ordered lists for glob patterns
//!    and mounted prefixes.
//! 2. **Matching** — lookup walks the stores in fixed → variable →
//!    globbed → mounted precedence; the first hit wins, and literal
//!    segments beat captures at every trie depth.
//!
//! Matching is synchronous, bounded by path length, and allocation-light:
//! captures live in stack-backed vectors until a route actually matches.

mod core;
mod mount;
mod table;
#[cfg(test)]
mod tests;
mod trie;

pub use self::core::{EndpointResolver, RouteDef, RouteMatch, RouteOutcome, Router};
pub use self::mount::MountMatch;
