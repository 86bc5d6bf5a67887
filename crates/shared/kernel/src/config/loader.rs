use super::error::{ConfigLoadError, ConfigLoadErrorExt};
use super::settings::Settings;
use super::source::{EnvSource, Source};
use std::borrow::Cow;
use tracing::{debug, info};

/// How to treat an instance settings file that does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InstancePolicy {
    /// A missing instance file aborts resolution with [`ConfigLoadError::NotFound`].
    Required,
    /// A missing instance file is skipped. A present but malformed one still fails.
    #[default]
    Optional,
}

impl InstancePolicy {
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Required)
    }
}

/// Layered configuration resolver.
///
/// Layers are applied in a fixed order, each on top of the previous one:
/// 1. **Base**: required settings source.
/// 2. **Instance**: deployment-specific source, see [`InstancePolicy`].
/// 3. **Environment**: optional `PREFIX_*` variables.
/// 4. **Overrides**: explicit mapping, typically supplied by a test harness.
///
/// Resolution is all-or-nothing: if any layer fails, no [`Settings`] are produced.
///
/// # Example
/// ```rust
/// use snakeeyes_kernel::config::{ConfigLoader, FileFormat, InstancePolicy, Settings, Source};
///
/// let loader = ConfigLoader::builder()
///     .base(Source::inline("base", "DEBUG = true", FileFormat::Toml))
///     .instance(Source::file("instance/does-not-exist.toml"))
///     .instance_policy(InstancePolicy::Optional)
///     .overrides(Settings::new().with("TESTING", true))
///     .build()
///     .unwrap();
///
/// let settings = loader.resolve().unwrap();
/// assert_eq!(settings.get_bool("DEBUG"), Some(true));
/// assert_eq!(settings.get_bool("TESTING"), Some(true));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    base: Source,
    instance: Option<Source>,
    instance_policy: InstancePolicy,
    environment: Option<EnvSource>,
    overrides: Option<Settings>,
}

enum Layer<'a> {
    Base(&'a Source),
    Instance(&'a Source, InstancePolicy),
    Environment(&'a EnvSource),
    Overrides(&'a Settings),
}

impl Layer<'_> {
    const fn name(&self) -> &'static str {
        match self {
            Self::Base(_) => "base",
            Self::Instance(..) => "instance",
            Self::Environment(_) => "environment",
            Self::Overrides(_) => "overrides",
        }
    }

    fn load(&self) -> Result<Option<Settings>, ConfigLoadError> {
        match self {
            Self::Base(source) => source.load(true).context("base settings"),
            Self::Instance(source, policy) => {
                source.load(policy.is_required()).context("instance settings")
            }
            Self::Environment(env) => env.load().map(Some).context("environment settings"),
            Self::Overrides(settings) => Ok(Some((*settings).clone())),
        }
    }
}

impl ConfigLoader {
    pub fn builder() -> ConfigLoaderBuilder {
        ConfigLoaderBuilder::default()
    }

    fn layers(&self) -> Vec<Layer<'_>> {
        let mut layers = vec![Layer::Base(&self.base)];
        if let Some(instance) = &self.instance {
            layers.push(Layer::Instance(instance, self.instance_policy));
        }
        if let Some(env) = &self.environment {
            layers.push(Layer::Environment(env));
        }
        if let Some(overrides) = &self.overrides {
            layers.push(Layer::Overrides(overrides));
        }
        layers
    }

    /// Runs every layer in order and folds them into a fresh [`Settings`].
    ///
    /// # Errors
    /// * [`ConfigLoadError::NotFound`] if the base source, or a required instance source, is missing.
    /// * [`ConfigLoadError::Parse`] if any present source cannot be parsed.
    pub fn resolve(&self) -> Result<Settings, ConfigLoadError> {
        let settings = self.layers().into_iter().try_fold(Settings::new(), |mut acc, layer| {
            if let Some(resolved) = layer.load()? {
                debug!(layer = layer.name(), keys = resolved.len(), "Merging configuration layer");
                acc.merge(resolved);
            }
            Ok::<_, ConfigLoadError>(acc)
        })?;

        info!(base = %self.base.origin(), keys = settings.len(), "Configuration resolved");
        Ok(settings)
    }
}

/// A fluent builder for [`ConfigLoader`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ConfigLoaderBuilder {
    base: Option<Source>,
    instance: Option<Source>,
    instance_policy: InstancePolicy,
    environment: Option<EnvSource>,
    overrides: Option<Settings>,
}

impl ConfigLoaderBuilder {
    pub fn base(mut self, source: impl Into<Source>) -> Self {
        self.base = Some(source.into());
        self
    }

    pub fn instance(mut self, source: impl Into<Source>) -> Self {
        self.instance = Some(source.into());
        self
    }

    pub const fn instance_policy(mut self, policy: InstancePolicy) -> Self {
        self.instance_policy = policy;
        self
    }

    /// Enables the environment layer for variables named `{prefix}_*`.
    pub fn environment(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.environment = Some(EnvSource::new(prefix));
        self
    }

    pub fn env_source(mut self, env: EnvSource) -> Self {
        self.environment = Some(env);
        self
    }

    /// Merges `overrides` into any overrides already set on the builder.
    pub fn overrides(mut self, overrides: Settings) -> Self {
        self.overrides = Some(match self.overrides.take() {
            Some(existing) => existing.merged(overrides),
            None => overrides,
        });
        self
    }

    /// # Errors
    /// Returns [`ConfigLoadError::Invalid`] when no base source was provided.
    pub fn build(self) -> Result<ConfigLoader, ConfigLoadError> {
        let base = self.base.ok_or_else(|| ConfigLoadError::Invalid {
            message: "a base settings source is required".into(),
            context: None,
        })?;

        Ok(ConfigLoader {
            base,
            instance: self.instance,
            instance_policy: self.instance_policy,
            environment: self.environment,
            overrides: self.overrides,
        })
    }

    /// Shorthand for `build()?.resolve()`.
    pub fn resolve(self) -> Result<Settings, ConfigLoadError> {
        self.build()?.resolve()
    }
}

/// Resolves `base`, then `instance` (with its policy), then `overrides`.
///
/// The environment layer is not consulted; use [`ConfigLoader::builder`] for that.
pub fn resolve(
    base: Source,
    instance: Option<(Source, InstancePolicy)>,
    overrides: Option<Settings>,
) -> Result<Settings, ConfigLoadError> {
    let mut builder = ConfigLoader::builder().base(base);
    if let Some((source, policy)) = instance {
        builder = builder.instance(source).instance_policy(policy);
    }
    if let Some(overrides) = overrides {
        builder = builder.overrides(overrides);
    }
    builder.resolve()
}
