use crate::config::{ConfigLoadError, ConfigLoadErrorExt, Settings};
use axum::extract::FromRef;
use snakeeyes_domain::config::AppConfig;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug)]
pub struct AppStateInner {
    /// Every resolved setting, including ones the application does not know about.
    pub settings: Settings,
    /// Typed view over the well-known settings.
    pub config: AppConfig,
}

/// Shared, read-only state handed to every handler.
///
/// Cloning is an `Arc` bump; nothing inside is mutated after construction.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

impl AppState {
    /// Builds the state, validating the well-known settings against [`AppConfig`].
    ///
    /// # Errors
    /// Returns [`ConfigLoadError::Deserialize`] if a well-known setting has the wrong type
    /// (e.g. `DEBUG = "yes"`).
    pub fn new(settings: Settings) -> Result<Self, ConfigLoadError> {
        let config = settings.deserialize::<AppConfig>().context("well-known settings")?;
        Ok(Self { inner: Arc::new(AppStateInner { settings, config }) })
    }
}

impl Deref for AppState {
    type Target = AppStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<AppState> for Settings {
    fn from_ref(state: &AppState) -> Self {
        state.inner.settings.clone()
    }
}
