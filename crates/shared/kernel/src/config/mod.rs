//! Layered configuration loading.
//!
//! A [`ConfigLoader`] folds an ordered list of layers (base, instance,
//! environment, overrides) into one [`Settings`] mapping. Files are parsed by
//! the `config` crate; the merged result is a plain upper-cased key/value map
//! that can be viewed through a typed struct with [`Settings::deserialize`].

mod error;
mod loader;
mod settings;
mod source;

pub use config::FileFormat;
pub use error::{ConfigLoadError, ConfigLoadErrorExt};
pub use loader::{ConfigLoader, ConfigLoaderBuilder, InstancePolicy, resolve};
pub use settings::Settings;
pub use source::{EnvSource, Source};
