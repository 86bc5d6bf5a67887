use super::error::ConfigLoadError;
use super::settings::Settings;
use config::{Config, Environment, File, FileFormat};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a settings layer comes from.
#[derive(Debug, Clone)]
pub enum Source {
    /// A file on disk; the format is inferred from the extension
    /// (`.toml`, `.json`, `.yaml`/`.yml`, `.ini`).
    File(PathBuf),
    /// Settings text held in memory, typically embedded with `include_str!`.
    Inline { name: Cow<'static, str>, contents: Cow<'static, str>, format: FileFormat },
}

impl Source {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn inline(
        name: impl Into<Cow<'static, str>>,
        contents: impl Into<Cow<'static, str>>,
        format: FileFormat,
    ) -> Self {
        Self::Inline { name: name.into(), contents: contents.into(), format }
    }

    /// Human-readable origin used in logs and errors.
    #[must_use]
    pub fn origin(&self) -> Cow<'static, str> {
        match self {
            Self::File(path) => Cow::Owned(path.display().to_string()),
            Self::Inline { name, .. } => name.clone(),
        }
    }

    /// Reads the source. A missing file yields `Ok(None)` unless `required`.
    pub(crate) fn load(&self, required: bool) -> Result<Option<Settings>, ConfigLoadError> {
        match self {
            Self::File(path) => {
                if !path.is_file() {
                    if required {
                        return Err(ConfigLoadError::NotFound { path: path.clone(), context: None });
                    }
                    debug!(path = %path.display(), "Optional config source missing, skipping");
                    return Ok(None);
                }
                collect(File::from(path.as_path()).required(true), self.origin()).map(Some)
            }
            Self::Inline { contents, format, .. } => {
                collect(File::from_str(contents, *format), self.origin()).map(Some)
            }
        }
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

/// Process environment layer: `PREFIX_NAME=value` becomes setting `NAME`.
///
/// Values are parsed, so `SNAKEEYES_DEBUG=false` yields a boolean.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: Cow<'static, str>,
    vars: Option<config::Map<String, String>>,
}

impl EnvSource {
    pub fn new(prefix: impl Into<Cow<'static, str>>) -> Self {
        Self { prefix: prefix.into(), vars: None }
    }

    /// Reads from `vars` instead of the real process environment.
    #[must_use]
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub(crate) fn load(&self) -> Result<Settings, ConfigLoadError> {
        let env = Environment::with_prefix(&self.prefix).try_parsing(true).source(self.vars.clone());
        collect(env, Cow::Owned(format!("environment ({}_*)", self.prefix)))
    }
}

fn collect<S>(source: S, origin: Cow<'static, str>) -> Result<Settings, ConfigLoadError>
where
    S: config::Source + Send + Sync + 'static,
{
    Config::builder()
        .add_source(source)
        .build()
        .and_then(|config| config.try_deserialize::<Map<String, Value>>())
        .map(Settings::from)
        .map_err(|source| ConfigLoadError::Parse { origin, source, context: None })
}
