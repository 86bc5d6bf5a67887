use super::state::AppState;
use axum::Router;
use axum::routing::MethodRouter;
use std::borrow::Cow;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum BlueprintError {
    #[error("Blueprint '{name}' is already registered{}", format_context(.context))]
    Duplicate { name: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// A named group of routes registered onto the application as a unit.
///
/// Routes are added while building; once handed to a [`BlueprintRegistry`] the
/// group is no longer reachable for mutation.
///
/// ```rust
/// use axum::routing::get;
/// use snakeeyes_kernel::server::Blueprint;
///
/// let admin = Blueprint::new("admin").url_prefix("/admin").route("/", get(|| async { "ok" }));
/// assert_eq!(admin.name(), "admin");
/// assert_eq!(admin.prefix(), Some("/admin"));
/// assert_eq!(admin.paths().collect::<Vec<_>>(), vec!["/"]);
/// ```
#[must_use]
#[derive(Debug)]
pub struct Blueprint {
    name: Cow<'static, str>,
    url_prefix: Option<Cow<'static, str>>,
    paths: Vec<Cow<'static, str>>,
    router: Router<AppState>,
}

impl Blueprint {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into(), url_prefix: None, paths: Vec::new(), router: Router::new() }
    }

    /// Mounts every route of this group under `prefix`.
    ///
    /// A missing leading slash is added and trailing slashes are dropped;
    /// `"/"` or `""` mean no prefix.
    pub fn url_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_matches('/');
        self.url_prefix = if trimmed.is_empty() {
            None
        } else {
            Some(Cow::Owned(format!("/{trimmed}")))
        };
        self
    }

    pub fn route(
        mut self,
        path: impl Into<Cow<'static, str>>,
        method_router: MethodRouter<AppState>,
    ) -> Self {
        let path = path.into();
        self.router = self.router.route(&path, method_router);
        self.paths.push(path);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.url_prefix.as_deref()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(AsRef::as_ref)
    }
}

/// Ordered set of blueprints with unique names.
#[derive(Debug, Default)]
pub struct BlueprintRegistry {
    blueprints: Vec<Blueprint>,
}

impl BlueprintRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `blueprint`, rejecting a second group with the same name.
    ///
    /// # Errors
    /// Returns [`BlueprintError::Duplicate`] if the name is taken.
    pub fn register(&mut self, blueprint: Blueprint) -> Result<(), BlueprintError> {
        if self.contains(blueprint.name()) {
            return Err(BlueprintError::Duplicate { name: blueprint.name, context: None });
        }

        info!(
            blueprint = blueprint.name(),
            prefix = blueprint.prefix().unwrap_or("/"),
            routes = blueprint.paths.len(),
            "Blueprint registered"
        );
        self.blueprints.push(blueprint);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.blueprints.iter().any(|bp| bp.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blueprints.iter().map(Blueprint::name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// Folds every registered group into one router, in registration order.
    pub fn into_router(self) -> Router<AppState> {
        self.blueprints.into_iter().fold(Router::new(), |router, bp| match bp.url_prefix {
            Some(prefix) => router.nest(&prefix, bp.router),
            None => router.merge(bp.router),
        })
    }
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
