use super::error::HostError;
use axum::Router;
use axum::routing::MethodRouter;
use fxhash::FxHashSet;
use std::borrow::Cow;

/// A named collection of routes mounted together under one URL prefix.
///
/// Route conflicts are reported as [`HostError::DuplicateRoute`] instead of
/// the router's panic.
#[derive(Debug)]
pub struct Blueprint {
    name: Cow<'static, str>,
    url_prefix: String,
    router: Router,
    paths: Vec<String>,
    seen: FxHashSet<String>,
}

impl Blueprint {
    /// Creates an empty blueprint. `url_prefix` is normalized to start with `/`
    /// and to carry no trailing slash; an empty prefix mounts at the root.
    pub fn new(name: impl Into<Cow<'static, str>>, url_prefix: &str) -> Self {
        let trimmed = url_prefix.trim_matches('/');
        let url_prefix = if trimmed.is_empty() { String::new() } else { format!("/{trimmed}") };

        Self {
            name: name.into(),
            url_prefix,
            router: Router::new(),
            paths: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    /// Adds a static route relative to the blueprint prefix.
    ///
    /// # Errors
    /// [`HostError::InvalidRoute`] if `path` does not start with `/` or contains
    /// parameter syntax (`{`, `}`, `*`), [`HostError::DuplicateRoute`] if the path is
    /// already taken.
    pub fn route(&mut self, path: &str, handler: MethodRouter) -> Result<(), HostError> {
        if !path.starts_with('/') {
            return Err(HostError::InvalidRoute {
                message: format!("'{path}' must start with '/'").into(),
                context: Some(self.name.clone()),
            });
        }
        if path.contains(['{', '}', '*']) {
            return Err(HostError::InvalidRoute {
                message: format!("'{path}' must not contain '{{', '}}' or '*'").into(),
                context: Some(self.name.clone()),
            });
        }
        if !self.seen.insert(path.to_owned()) {
            return Err(HostError::DuplicateRoute {
                message: path.to_owned().into(),
                context: Some(self.name.clone()),
            });
        }

        self.router = std::mem::take(&mut self.router).route(path, handler);
        self.paths.push(path.to_owned());
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Registered paths in registration order, relative to the prefix.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Registered paths joined onto the prefix, as the dispatcher will see them.
    pub fn absolute_paths(&self) -> impl Iterator<Item = String> + '_ {
        self.paths.iter().map(|path| match (self.url_prefix.as_str(), path.as_str()) {
            ("", path) => path.to_owned(),
            (prefix, "/") => prefix.to_owned(),
            (prefix, path) => format!("{prefix}{path}"),
        })
    }

    pub(super) fn into_parts(self) -> (Cow<'static, str>, String, Router) {
        (self.name, self.url_prefix, self.router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[test]
    fn prefix_is_normalized() {
        assert_eq!(Blueprint::new("a", "admin/").url_prefix(), "/admin");
        assert_eq!(Blueprint::new("a", "/").url_prefix(), "");
    }

    #[test]
    fn duplicate_and_relative_paths_are_rejected() {
        let mut bp = Blueprint::new("admin", "/admin");
        bp.route("/users", get(|| async { "users" })).unwrap();

        assert!(matches!(
            bp.route("/users", get(|| async { "again" })),
            Err(HostError::DuplicateRoute { .. })
        ));
        assert!(matches!(
            bp.route("groups", get(|| async { "groups" })),
            Err(HostError::InvalidRoute { .. })
        ));
        assert_eq!(bp.paths(), ["/users"]);
    }

    #[test]
    fn parameter_syntax_is_rejected() {
        let mut bp = Blueprint::new("admin", "/admin");

        for path in ["/users{", "/{id}", "/files/{*rest}", "/a*"] {
            assert!(
                matches!(bp.route(path, get(|| async { "x" })), Err(HostError::InvalidRoute { .. })),
                "{path} should be rejected"
            );
        }
        assert!(bp.paths().is_empty());
    }

    #[test]
    fn absolute_paths_join_the_prefix() {
        let mut bp = Blueprint::new("admin", "/admin");
        bp.route("/", get(|| async { "index" })).unwrap();
        bp.route("/users", get(|| async { "users" })).unwrap();
        assert_eq!(bp.absolute_paths().collect::<Vec<_>>(), ["/admin", "/admin/users"]);

        let mut root = Blueprint::new("root", "");
        root.route("/", get(|| async { "index" })).unwrap();
        assert_eq!(root.absolute_paths().collect::<Vec<_>>(), ["/"]);
    }
}
