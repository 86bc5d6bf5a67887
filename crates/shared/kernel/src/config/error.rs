use std::borrow::Cow;
use std::path::PathBuf;

/// Errors raised while resolving the layered configuration.
///
/// Every variant carries an optional `context` that callers attach with
/// [`ConfigLoadErrorExt::context`] to say which layer was being loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// A required source does not exist on disk.
    #[error("Config source not found{}: {}", format_context(.context), .path.display())]
    NotFound { path: PathBuf, context: Option<Cow<'static, str>> },

    /// A source exists but could not be read or parsed.
    #[error("Config source '{origin}' is malformed{}: {source}", format_context(.context))]
    Parse {
        origin: Cow<'static, str>,
        source: config::ConfigError,
        context: Option<Cow<'static, str>>,
    },

    /// The merged settings do not match the requested typed shape.
    #[error("Config deserialization error{}: {source}", format_context(.context))]
    Deserialize { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The loader itself was misconfigured (e.g. no base source).
    #[error("Invalid config loader setup{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Adds `.context(...)` to results carrying a [`ConfigLoadError`].
pub trait ConfigLoadErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigLoadError>;
}

impl<T> ConfigLoadErrorExt<T> for Result<T, ConfigLoadError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                ConfigLoadError::NotFound { context: c, .. }
                | ConfigLoadError::Parse { context: c, .. }
                | ConfigLoadError::Deserialize { context: c, .. }
                | ConfigLoadError::Invalid { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl<T> ConfigLoadErrorExt<T> for Result<T, serde_json::Error> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigLoadError> {
        self.map_err(|source| ConfigLoadError::Deserialize { source, context: Some(context.into()) })
    }
}

impl From<serde_json::Error> for ConfigLoadError {
    #[inline]
    fn from(source: serde_json::Error) -> Self {
        Self::Deserialize { source, context: None }
    }
}

impl From<&'static str> for ConfigLoadError {
    #[inline]
    fn from(s: &'static str) -> Self {
        Self::Invalid { message: Cow::Borrowed(s), context: None }
    }
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
