use snakeeyes_kernel::config::ConfigLoadError;
use snakeeyes_kernel::server::BlueprintError;
use std::borrow::Cow;

/// Application factory error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error{}: {source}", format_context(.context))]
    Config { source: ConfigLoadError, context: Option<Cow<'static, str>> },

    #[error("Route registration error{}: {source}", format_context(.context))]
    Blueprint { source: BlueprintError, context: Option<Cow<'static, str>> },
}

pub trait AppErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, AppError>;
}

impl<T> AppErrorExt<T> for Result<T, AppError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                AppError::Config { context: c, .. } | AppError::Blueprint { context: c, .. } => {
                    *c = Some(context.into());
                }
            }
            e
        })
    }
}

impl<T> AppErrorExt<T> for Result<T, ConfigLoadError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, AppError> {
        self.map_err(|source| AppError::Config { source, context: Some(context.into()) })
    }
}

impl<T> AppErrorExt<T> for Result<T, BlueprintError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, AppError> {
        self.map_err(|source| AppError::Blueprint { source, context: Some(context.into()) })
    }
}

impl From<ConfigLoadError> for AppError {
    #[inline]
    fn from(source: ConfigLoadError) -> Self {
        Self::Config { source, context: None }
    }
}

impl From<BlueprintError> for AppError {
    #[inline]
    fn from(source: BlueprintError) -> Self {
        Self::Blueprint { source, context: None }
    }
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
