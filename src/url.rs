//! Named-route URL generation.
//!
//! Every route registered with a name lands here as a (name, pattern) pair.
//! [`UrlGenerator::path`] expands a name back into a concrete path and
//! appends any unconsumed variables as a query string;
//! [`UrlGenerator::url`] prefixes the result with the configured base URL.

use std::collections::HashMap;

use crate::errors::UrlError;
use crate::pattern::SegmentPattern;

/// The base URL used when none is configured, matching the common local
/// development default.
pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Reverse registry from route name to compiled pattern.
pub struct UrlGenerator {
    base_url: String,
    named: HashMap<String, SegmentPattern>,
}

impl UrlGenerator {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            named: HashMap::new(),
        }
    }

    /// Register `pattern` under `name`.
    ///
    /// Re-registering a name silently replaces the previous pattern; the
    /// last registration wins. Downstream code relies on this override
    /// behavior, so a collision is deliberately not an error.
    pub fn add(&mut self, name: impl Into<String>, pattern: SegmentPattern) {
        self.named.insert(name.into(), pattern);
    }

    /// Expand the named route into a relative path.
    ///
    /// Variables not consumed by the pattern are appended as a query
    /// string, preserving caller-supplied order.
    ///
    /// # Errors
    ///
    /// [`UrlError::UnknownRoute`] when no route carries `name`;
    /// [`UrlError::Expansion`] when a required variable is missing or a
    /// value fails its constraint.
    pub fn path(&self, name: &str, variables: &[(&str, &str)]) -> Result<String, UrlError> {
        let pattern = self.named.get(name).ok_or_else(|| UrlError::UnknownRoute {
            name: name.to_string(),
        })?;

        let (mut path, leftover) =
            pattern
                .expand(variables)
                .map_err(|source| UrlError::Expansion {
                    name: name.to_string(),
                    source,
                })?;

        if !leftover.is_empty() {
            let mut serializer = url::form_urlencoded::Serializer::new(String::new());
            for (key, value) in &leftover {
                serializer.append_pair(key, value);
            }
            path.push('?');
            path.push_str(&serializer.finish());
        }

        Ok(path)
    }

    /// Expand the named route into an absolute URL.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`UrlGenerator::path`].
    pub fn url(&self, name: &str, variables: &[(&str, &str)]) -> Result<String, UrlError> {
        Ok(format!("{}{}", self.base_url, self.path(name, variables)?))
    }
}

impl Default for UrlGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
