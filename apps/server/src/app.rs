use crate::error::{AppError, AppErrorExt};
use crate::router;
use axum::Router;
use snakeeyes_domain::config::AppConfig;
use snakeeyes_domain::constants::ENV_PREFIX;
use snakeeyes_kernel::config::{
    ConfigLoader, EnvSource, FileFormat, InstancePolicy, Settings, Source,
};
use snakeeyes_kernel::server::{AppState, BlueprintRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Base settings compiled into the binary.
const DEFAULT_SETTINGS: &str = include_str!("../config/settings.toml");

/// Instance settings location, relative to the working directory.
pub const DEFAULT_INSTANCE_PATH: &str = "instance/settings.toml";

/// A configured, ready-to-serve application.
///
/// Cloning is cheap and every clone serves the same settings. Nothing is bound
/// to the network until the application is handed to a [`Server`](crate::Server).
#[must_use]
#[derive(Debug, Clone)]
pub struct Application {
    state: AppState,
    router: Router,
    blueprints: Arc<[String]>,
}

impl Application {
    /// Returns a builder preloaded with the default layers:
    /// embedded base settings, optional `instance/settings.toml`, `SNAKEEYES_*` environment.
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::default()
    }

    /// The request router, with state and tracing applied.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.state.config
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Logs the resolved setting names and registered blueprints.
    ///
    /// Called once by [`ApplicationBuilder::build`]; a binary that installs its
    /// subscriber only after settings resolve calls it again to get the record.
    pub fn log_summary(&self) {
        if self.state.config.debug {
            debug!(keys = ?self.state.settings.keys().collect::<Vec<_>>(), "Resolved settings");
        }

        info!(
            debug = self.state.config.debug,
            testing = self.state.config.testing,
            blueprints = ?self.blueprints,
            "Application created"
        );
    }

    /// Names of the registered blueprints, in registration order.
    pub fn blueprints(&self) -> impl Iterator<Item = &str> {
        self.blueprints.iter().map(String::as_str)
    }
}

/// A fluent builder for [`Application`].
///
/// Sources are injected here rather than discovered, so tests and deployments
/// can point the factory at whatever files they need.
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug)]
pub struct ApplicationBuilder {
    base: Source,
    instance: Option<Source>,
    instance_policy: InstancePolicy,
    environment: Option<EnvSource>,
    overrides: Option<Settings>,
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self {
            base: Source::inline("config/settings.toml", DEFAULT_SETTINGS, FileFormat::Toml),
            instance: Some(Source::file(DEFAULT_INSTANCE_PATH)),
            instance_policy: InstancePolicy::Optional,
            environment: Some(EnvSource::new(ENV_PREFIX)),
            overrides: None,
        }
    }
}

impl ApplicationBuilder {
    /// Replaces the embedded base settings.
    pub fn base(mut self, source: impl Into<Source>) -> Self {
        self.base = source.into();
        self
    }

    pub fn base_file(self, path: impl Into<PathBuf>) -> Self {
        self.base(Source::file(path))
    }

    pub fn instance(mut self, source: impl Into<Source>) -> Self {
        self.instance = Some(source.into());
        self
    }

    pub fn instance_file(self, path: impl Into<PathBuf>) -> Self {
        self.instance(Source::file(path))
    }

    /// Skips the instance layer entirely.
    pub fn without_instance(mut self) -> Self {
        self.instance = None;
        self
    }

    pub const fn instance_policy(mut self, policy: InstancePolicy) -> Self {
        self.instance_policy = policy;
        self
    }

    pub fn environment(mut self, env: EnvSource) -> Self {
        self.environment = Some(env);
        self
    }

    /// Ignores `SNAKEEYES_*` variables; useful for hermetic tests.
    pub fn without_environment(mut self) -> Self {
        self.environment = None;
        self
    }

    /// Settings applied after every other layer.
    pub fn overrides(mut self, overrides: Settings) -> Self {
        self.overrides = Some(match self.overrides.take() {
            Some(existing) => existing.merged(overrides),
            None => overrides,
        });
        self
    }

    fn loader(self) -> Result<ConfigLoader, AppError> {
        let mut loader =
            ConfigLoader::builder().base(self.base).instance_policy(self.instance_policy);
        if let Some(instance) = self.instance {
            loader = loader.instance(instance);
        }
        if let Some(env) = self.environment {
            loader = loader.env_source(env);
        }
        if let Some(overrides) = self.overrides {
            loader = loader.overrides(overrides);
        }
        Ok(loader.build()?)
    }

    /// Resolves configuration, registers the `page` blueprint and wires the router.
    ///
    /// # Errors
    /// * [`AppError::Config`] if a required settings source is missing or malformed,
    ///   or a well-known setting has the wrong type.
    /// * [`AppError::Blueprint`] if route registration fails.
    pub fn build(self) -> Result<Application, AppError> {
        let settings = self.loader()?.resolve().context("resolving application settings")?;
        let state = AppState::new(settings)?;

        let mut registry = BlueprintRegistry::new();
        registry.register(snakeeyes_page::blueprint()).context("registering page blueprint")?;
        let blueprints: Arc<[String]> = registry.names().map(str::to_owned).collect();

        let router = router::init(state.clone(), registry);
        let application = Application { state, router, blueprints };
        application.log_summary();
        Ok(application)
    }
}

/// Creates an application with the default layers and an optional override mapping.
///
/// This is the factory used by the binary and the test harness; use
/// [`Application::builder`] to inject different sources.
///
/// # Errors
/// Propagates [`AppError::Config`] from configuration loading.
///
/// # Example
/// ```rust
/// use snakeeyes_kernel::config::Settings;
/// use snakeeyes_server::create_app;
///
/// let app = create_app(Some(Settings::new().with("DEBUG", false).with("TESTING", true)))?;
/// assert!(app.config().testing);
/// assert!(!app.config().debug);
/// # Ok::<(), snakeeyes_server::AppError>(())
/// ```
pub fn create_app(overrides: Option<Settings>) -> Result<Application, AppError> {
    let builder = Application::builder();
    match overrides {
        Some(overrides) => builder.overrides(overrides),
        None => builder,
    }
    .build()
}
