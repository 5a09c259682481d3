//! # Trailhead
//!
//! **Trailhead** is the request-routing core that sits beneath a
//! web-serving layer: it resolves an incoming (method, path) pair to a
//! registered endpoint plus the variables captured from the path, and —
//! in the reverse direction — expands a named route and a set of
//! variables back into a concrete path or absolute URL.
//!
//! ## Architecture
//!
//! - **[`pattern`]** — path template compilation (`/users/:id`,
//!   `/files/*rest`), exact and prefix matching, reverse expansion
//! - **[`router`]** — the registration surface, the per-method tries and
//!   companion lookup stores, and the dispatch entry point
//! - **[`url`]** — named-route path/URL generation with query-string
//!   assembly for leftover variables
//! - **[`errors`]** — registration and URL-generation error types
//! - **[`reload`]** — lock-free snapshot swapping for hot table
//!   replacement
//!
//! ## Matching precedence
//!
//! Lookup consults four stores in order, first hit wins:
//!
//! 1. fixed literal paths (exact map lookup)
//! 2. variable routes (per-method trie; literal segments beat captures at
//!    every depth, with backtracking)
//! 3. glob patterns, in registration order
//! 4. mounted prefixes, in registration order
//!
//! ## Quick start
//!
//! ```rust
//! use http::Method;
//! use trailhead::{RouteDef, RouteOutcome, Router};
//!
//! let mut router = Router::new();
//! router.add(RouteDef::get("/users/new"), "new_user").unwrap();
//! router
//!     .add(
//!         RouteDef::get("/users/:id").name("user").constraint("id", r"\d+"),
//!         "get_user",
//!     )
//!     .unwrap();
//!
//! // The literal route wins over the capture.
//! match router.route(&Method::GET, "/users/new", "") {
//!     RouteOutcome::Match(m) => assert_eq!(*m.endpoint, "new_user"),
//!     _ => panic!("expected a match"),
//! }
//!
//! // Named routes expand back into paths.
//! assert_eq!(router.path("user", &[("id", "23")]).unwrap(), "/users/23");
//! ```
//!
//! ## Boundaries
//!
//! Trailhead is not an HTTP server and executes no middleware: the
//! transport layer supplies the decoded path and raw query string, maps
//! [`RouteOutcome::NotFound`]/[`RouteOutcome::NotAllowed`] to 404/405
//! responses, invokes matched endpoints, and re-invokes mounted
//! applications with the rewritten script-name/path split the router
//! hands back.

pub mod errors;
pub mod pattern;
pub mod reload;
pub mod router;
mod scope;
pub mod url;

pub use errors::{ExpandError, PatternError, RegisterError, UrlError};
pub use pattern::{ParamVec, SegmentPattern, MAX_INLINE_PARAMS};
pub use reload::SharedRouter;
pub use router::{EndpointResolver, MountMatch, RouteDef, RouteMatch, RouteOutcome, Router};
pub use url::UrlGenerator;
