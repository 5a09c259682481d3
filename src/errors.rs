//! Error types for route registration and URL generation.
//!
//! Registration errors ([`RegisterError`]) indicate a misconfigured routing
//! table and are expected to abort application startup. URL generation errors
//! ([`UrlError`]) are surfaced to whatever code requested the URL (typically a
//! template layer) and are recoverable there.
//!
//! A request that matches no route is *not* an error: dispatch reports
//! `NotFound`/`NotAllowed` as first-class outcomes on
//! [`RouteOutcome`](crate::router::RouteOutcome).

use http::Method;
use std::fmt;

/// A path template failed to compile.
#[derive(Debug, Clone)]
pub enum PatternError {
    /// A `*glob` token appeared anywhere but the final position.
    GlobNotLast {
        /// The offending template
        template: String,
    },
    /// A constraint was supplied for a variable the template never declares.
    UnknownConstraint {
        /// The offending template
        template: String,
        /// The constraint key with no matching capture
        name: String,
    },
    /// A constraint regex failed to compile.
    InvalidConstraint {
        /// The constrained variable name
        name: String,
        /// The regex compile error
        source: regex::Error,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::GlobNotLast { template } => {
                write!(
                    f,
                    "invalid route template '{}': a glob segment must be the last token",
                    template
                )
            }
            PatternError::UnknownConstraint { template, name } => {
                write!(
                    f,
                    "invalid route template '{}': constraint given for unknown variable '{}'",
                    template, name
                )
            }
            PatternError::InvalidConstraint { name, source } => {
                write!(
                    f,
                    "constraint for variable '{}' is not a valid regex: {}",
                    name, source
                )
            }
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::InvalidConstraint { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Route registration failed.
///
/// Both variants are configuration mistakes detected synchronously at
/// startup; neither is retried.
#[derive(Debug, Clone)]
pub enum RegisterError {
    /// The path template did not compile.
    Pattern(PatternError),
    /// The identical method+path pair was registered twice.
    DuplicateRoute {
        /// HTTP method of the colliding registration
        method: Method,
        /// Full (scope-prefixed) path of the colliding registration
        path: String,
    },
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterError::Pattern(err) => err.fmt(f),
            RegisterError::DuplicateRoute { method, path } => {
                write!(f, "route {} {} is already registered", method, path)
            }
        }
    }
}

impl std::error::Error for RegisterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegisterError::Pattern(err) => Some(err),
            RegisterError::DuplicateRoute { .. } => None,
        }
    }
}

impl From<PatternError> for RegisterError {
    fn from(err: PatternError) -> Self {
        RegisterError::Pattern(err)
    }
}

/// Reverse expansion of a pattern failed.
#[derive(Debug, Clone)]
pub enum ExpandError {
    /// A variable required by the template was not supplied.
    MissingVariable {
        /// The first missing variable name
        name: String,
    },
    /// A supplied value failed the variable's constraint.
    ConstraintViolation {
        /// The constrained variable name
        name: String,
        /// The rejected value
        value: String,
    },
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpandError::MissingVariable { name } => {
                write!(f, "missing required variable '{}'", name)
            }
            ExpandError::ConstraintViolation { name, value } => {
                write!(
                    f,
                    "value '{}' for variable '{}' does not satisfy its constraint",
                    value, name
                )
            }
        }
    }
}

impl std::error::Error for ExpandError {}

/// URL generation for a named route failed.
#[derive(Debug, Clone)]
pub enum UrlError {
    /// No route was registered under the requested name.
    UnknownRoute {
        /// The unregistered route name
        name: String,
    },
    /// The named route exists but could not be expanded.
    Expansion {
        /// The route name being expanded
        name: String,
        /// The underlying expansion failure
        source: ExpandError,
    },
}

impl fmt::Display for UrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlError::UnknownRoute { name } => {
                write!(f, "no route registered under the name '{}'", name)
            }
            UrlError::Expansion { name, source } => {
                write!(f, "cannot expand route '{}': {}", name, source)
            }
        }
    }
}

impl std::error::Error for UrlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UrlError::UnknownRoute { .. } => None,
            UrlError::Expansion { source, .. } => Some(source),
        }
    }
}
