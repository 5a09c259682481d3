//! Router composition: registration surface and dispatch entry point.
//!
//! [`Router`] owns the route table, the named-route registry, and the
//! active registration scope. Registration happens once at startup; after
//! that every dispatch operation is read-only, synchronous, and safe for
//! unsynchronized concurrent use.

use http::Method;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

use super::mount::MountMatch;
use super::table::{RouteTable, TableHit};
use crate::errors::{RegisterError, UrlError};
use crate::pattern::{ParamVec, SegmentPattern};
use crate::scope::Scope;
use crate::url::{UrlGenerator, DEFAULT_BASE_URL};

/// Strategy for turning a declared destination into the endpoint handle
/// stored in the routing table.
///
/// The router never inspects endpoints beyond storing and returning them;
/// a resolver lets the declaration surface register lightweight
/// destination values (controller names, action identifiers) that resolve
/// to invocable handles at registration time. The default resolver is the
/// identity function.
pub trait EndpointResolver<T> {
    /// Resolve `to`, declared for the final compiled `path`, into the
    /// handle the routing table should store.
    fn resolve(&self, path: &str, to: T) -> T;
}

struct IdentityResolver;

impl<T> EndpointResolver<T> for IdentityResolver {
    fn resolve(&self, _path: &str, to: T) -> T {
        to
    }
}

/// A route declaration: method, template, optional name, constraints.
///
/// The resource/member/collection declaration sugar of a web layer
/// desugars into these values; this is the primitive registration surface.
#[derive(Debug, Clone)]
pub struct RouteDef {
    method: Method,
    path: String,
    name: Option<String>,
    constraints: Vec<(String, String)>,
}

impl RouteDef {
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            name: None,
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn patch(path: &str) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn options(path: &str) -> Self {
        Self::new(Method::OPTIONS, path)
    }

    #[must_use]
    pub fn trace(path: &str) -> Self {
        Self::new(Method::TRACE, path)
    }

    /// Declare a unique name for the route, making it addressable by the
    /// URL generator. The active scope's name prefix is prepended at
    /// registration time.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Constrain a path variable with a regex the captured segment must
    /// match in full.
    #[must_use]
    pub fn constraint(mut self, name: &str, regex: &str) -> Self {
        self.constraints.push((name.to_string(), regex.to_string()));
        self
    }
}

/// Result of successfully matching a request to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch<T> {
    /// The endpoint handle bound at registration time.
    pub endpoint: Arc<T>,
    /// Variables captured from the path.
    pub path_params: ParamVec,
    /// Parsed query-string parameters, in wire order.
    pub query_params: ParamVec,
    /// Present when the match came from a mounted prefix; carries the
    /// script-name/path split the transport needs for delegation.
    pub mount: Option<MountMatch>,
}

impl<T> RouteMatch<T> {
    /// Get a parameter by name. Path captures win over query parameters on
    /// key collision; within each list the last occurrence wins.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(key, _)| key.as_ref() == name)
            .or_else(|| {
                self.query_params
                    .iter()
                    .rfind(|(key, _)| key.as_ref() == name)
            })
            .map(|(_, value)| value.as_str())
    }

    /// Merge path and query parameters into one map, path winning on
    /// collision. This allocates; prefer [`RouteMatch::param`] in hot paths.
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        let mut merged = HashMap::new();
        for (key, value) in &self.query_params {
            merged.insert(key.to_string(), value.clone());
        }
        for (key, value) in &self.path_params {
            merged.insert(key.to_string(), value.clone());
        }
        merged
    }
}

/// Outcome of a dispatch attempt.
///
/// Failing to match is an expected, frequent condition, so the misses are
/// first-class values rather than errors: the transport layer maps
/// [`RouteOutcome::NotFound`] to a 404 response and
/// [`RouteOutcome::NotAllowed`] to a 405.
#[derive(Debug, Clone)]
pub enum RouteOutcome<T> {
    /// A route matched; invoke the endpoint with the merged parameters.
    Match(RouteMatch<T>),
    /// No route matches the path under any method.
    NotFound,
    /// The path is routable, but not under the requested method.
    NotAllowed,
}

/// The request-routing engine.
///
/// Generic over the opaque endpoint handle `T`. Registration (single
/// threaded, at startup) builds the lookup stores; dispatch never mutates
/// them, so a finished `Router` can be shared freely across request
/// threads. For hot replacement, swap a whole new instance via
/// [`SharedRouter`](crate::reload::SharedRouter) instead of mutating one
/// in place.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use trailhead::router::{RouteDef, RouteOutcome, Router};
///
/// let mut router = Router::new();
/// router.add(RouteDef::get("/pets/:id").name("pet"), "get_pet").unwrap();
///
/// match router.route(&Method::GET, "/pets/23", "") {
///     RouteOutcome::Match(m) => {
///         assert_eq!(*m.endpoint, "get_pet");
///         assert_eq!(m.param("id"), Some("23"));
///     }
///     _ => panic!("expected a match"),
/// }
/// assert_eq!(router.path("pet", &[("id", "23")]).unwrap(), "/pets/23");
/// ```
pub struct Router<T> {
    table: RouteTable<T>,
    urls: UrlGenerator,
    scope: Scope,
    resolver: Box<dyn EndpointResolver<T> + Send + Sync>,
    /// Paths whose HEAD entry is an implicit alias of a GET registration.
    /// An explicit HEAD route replaces the alias instead of colliding.
    head_aliases: HashSet<String>,
}

impl<T> Router<T> {
    /// A router generating absolute URLs against `http://localhost`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// A router generating absolute URLs against `base_url`.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            table: RouteTable::new(),
            urls: UrlGenerator::new(base_url),
            scope: Scope::root(),
            resolver: Box::new(IdentityResolver),
            head_aliases: HashSet::new(),
        }
    }

    /// Replace the endpoint resolver used for subsequent registrations.
    pub fn set_resolver(&mut self, resolver: impl EndpointResolver<T> + Send + Sync + 'static) {
        self.resolver = Box::new(resolver);
    }

    /// Register a route.
    ///
    /// The template is joined with the active scope's path prefix and
    /// compiled; the route lands in the store matching its shape (fixed,
    /// variable, or globbed). `GET` registrations also register an
    /// implicit, independent `HEAD` route sharing the same endpoint
    /// handle; an explicit `HEAD` route wins over the alias regardless of
    /// registration order.
    ///
    /// # Errors
    ///
    /// [`RegisterError`] when the template does not compile or the
    /// identical method+path is already registered. Registration errors
    /// are configuration mistakes and should abort startup.
    pub fn add(&mut self, def: RouteDef, to: T) -> Result<(), RegisterError> {
        let RouteDef {
            method,
            path,
            name,
            constraints,
        } = def;

        let full_path = self.scope.prefixed_path(&path);
        let constraint_refs: Vec<(&str, &str)> = constraints
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        let pattern = SegmentPattern::compile(&full_path, &constraint_refs)?;
        let endpoint = Arc::new(self.resolver.resolve(&full_path, to));

        if method == Method::HEAD && self.head_aliases.remove(&full_path) {
            // The slot holds an implicit alias from an earlier GET; the
            // explicit route takes it over in place.
            self.table
                .replace(&method, &pattern, &full_path, Arc::clone(&endpoint));
        } else {
            self.insert(method.clone(), &full_path, &pattern, Arc::clone(&endpoint))?;
        }
        if method == Method::GET
            && self
                .insert(Method::HEAD, &full_path, &pattern, endpoint)
                .is_ok()
        {
            self.head_aliases.insert(full_path.clone());
        }

        if let Some(name) = name {
            self.urls.add(self.scope.prefixed_name(&name), pattern);
        }

        debug!(method = %method, path = %full_path, "route registered");
        Ok(())
    }

    /// Mount another routing unit at the given path prefix.
    ///
    /// Every request under the prefix, regardless of method, delegates to
    /// `to`; the matched prefix becomes the delegate's script name. The
    /// prefix may contain dynamic segments.
    ///
    /// # Errors
    ///
    /// [`RegisterError`] when the prefix template does not compile.
    pub fn mount(&mut self, at: &str, to: T) -> Result<(), RegisterError> {
        let full_path = self.scope.prefixed_path(at);
        let prefix = SegmentPattern::compile(&full_path, &[])?;
        let endpoint = Arc::new(self.resolver.resolve(&full_path, to));
        self.table.add_mounted(prefix, endpoint);
        debug!(prefix = %full_path, "application mounted");
        Ok(())
    }

    /// Run a block of registrations under a nested scope.
    ///
    /// Routes registered inside the block inherit `prefix` as both a path
    /// prefix (joined with `/`) and a name prefix (joined with `_`). The
    /// caller's scope is restored on every exit path, including a failed
    /// registration inside the block.
    ///
    /// # Errors
    ///
    /// Propagates the first [`RegisterError`] returned by the block.
    pub fn scope<F>(&mut self, prefix: &str, block: F) -> Result<(), RegisterError>
    where
        F: FnOnce(&mut Self) -> Result<(), RegisterError>,
    {
        let saved = self.scope.clone();
        self.scope = saved.join(prefix);
        let result = block(self);
        self.scope = saved;
        result
    }

    /// Resolve a request to an endpoint.
    ///
    /// `path` must already be percent-decoded; `query` is the raw query
    /// string (with or without a leading `?`). Lookup precedence is fixed
    /// → variable → globbed → mounted, first hit wins.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str, query: &str) -> RouteOutcome<T> {
        debug!(method = %method, path = %path, "route match attempt");

        match self.table.lookup(method, path) {
            Some(TableHit::Endpoint { endpoint, captures }) => RouteOutcome::Match(RouteMatch {
                endpoint,
                path_params: captures,
                query_params: parse_query(query),
                mount: None,
            }),
            Some(TableHit::Mounted {
                endpoint,
                mount,
                captures,
            }) => {
                debug!(
                    script_name = %mount.script_name,
                    path_info = %mount.path_info,
                    "mounted prefix matched"
                );
                RouteOutcome::Match(RouteMatch {
                    endpoint,
                    path_params: captures,
                    query_params: parse_query(query),
                    mount: Some(mount),
                })
            }
            None => {
                if self.table.method_not_allowed(method, path) {
                    debug!(method = %method, path = %path, "method not allowed");
                    RouteOutcome::NotAllowed
                } else {
                    warn!(method = %method, path = %path, "no route matched");
                    RouteOutcome::NotFound
                }
            }
        }
    }

    /// Generate a relative path for a named route.
    ///
    /// # Errors
    ///
    /// [`UrlError`] when the name is unknown or expansion fails.
    pub fn path(&self, name: &str, variables: &[(&str, &str)]) -> Result<String, UrlError> {
        self.urls.path(name, variables)
    }

    /// Generate an absolute URL for a named route.
    ///
    /// # Errors
    ///
    /// [`UrlError`] when the name is unknown or expansion fails.
    pub fn url(&self, name: &str, variables: &[(&str, &str)]) -> Result<String, UrlError> {
        self.urls.url(name, variables)
    }

    fn insert(
        &mut self,
        method: Method,
        full_path: &str,
        pattern: &SegmentPattern,
        endpoint: Arc<T>,
    ) -> Result<(), RegisterError> {
        if pattern.has_glob() {
            self.table.add_globbed(method, pattern.clone(), endpoint);
            Ok(())
        } else if pattern.is_fixed() {
            self.table.add_fixed(method, full_path.to_string(), endpoint)
        } else {
            self.table.add_variable(method, pattern, endpoint)
        }
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_query(query: &str) -> ParamVec {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (Arc::from(key.as_ref()), value.into_owned()))
        .collect()
}
