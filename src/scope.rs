//! Registration scopes: a (path prefix, name prefix) pair applied to every
//! route registered inside a scoped block.
//!
//! Scopes are plain values. The router derives a nested scope for the
//! duration of a block and restores the caller's scope on every exit path,
//! so no global registration state exists.

/// The active registration prefixes.
///
/// Path prefixes compose by path joining with separator normalization,
/// never by raw concatenation; name prefixes compose with `_` and carry no
/// leading separator.
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    path_prefix: String,
    name_prefix: String,
}

impl Scope {
    pub(crate) fn root() -> Self {
        Self {
            path_prefix: "/".to_string(),
            name_prefix: String::new(),
        }
    }

    /// Derive the scope for a nested block.
    pub(crate) fn join(&self, prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        Self {
            path_prefix: join_paths(&self.path_prefix, trimmed),
            name_prefix: join_names(&self.name_prefix, trimmed),
        }
    }

    /// The full path for a template registered under this scope.
    pub(crate) fn prefixed_path(&self, path: &str) -> String {
        join_paths(&self.path_prefix, path.trim_matches('/'))
    }

    /// The full registry key for a route name declared under this scope.
    pub(crate) fn prefixed_name(&self, name: &str) -> String {
        join_names(&self.name_prefix, name)
    }
}

fn join_paths(prefix: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return prefix.to_string();
    }
    if prefix == "/" {
        format!("/{}", suffix)
    } else {
        format!("{}/{}", prefix, suffix)
    }
}

fn join_names(prefix: &str, suffix: &str) -> String {
    let suffix = suffix.replace('/', "_");
    if prefix.is_empty() {
        suffix
    } else if suffix.is_empty() {
        prefix.to_string()
    } else {
        format!("{}_{}", prefix, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_scope_leaves_paths_alone() {
        let scope = Scope::root();
        assert_eq!(scope.prefixed_path("/users"), "/users");
        assert_eq!(scope.prefixed_path("/"), "/");
        assert_eq!(scope.prefixed_name("users"), "users");
    }

    #[test]
    fn nested_scopes_compose_paths_and_names() {
        let scope = Scope::root().join("backend").join("/admin/");
        assert_eq!(scope.prefixed_path("/cats"), "/backend/admin/cats");
        assert_eq!(scope.prefixed_name("cats"), "backend_admin_cats");
    }

    #[test]
    fn root_template_under_scope_is_the_prefix() {
        let scope = Scope::root().join("v1");
        assert_eq!(scope.prefixed_path("/"), "/v1");
    }

    #[test]
    fn multi_segment_scope_prefix_flattens_into_names() {
        let scope = Scope::root().join("api/v2");
        assert_eq!(scope.prefixed_path("/pets"), "/api/v2/pets");
        assert_eq!(scope.prefixed_name("pets"), "api_v2_pets");
    }
}
