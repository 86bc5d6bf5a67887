//! Kernel utilities shared across the application.
//! Keep this crate lightweight: it owns configuration resolution and, behind the
//! `server` feature, the request-handling state and route groups.
//!
//! ## Config loading
//! ```rust
//! use snakeeyes_kernel::config::{ConfigLoader, FileFormat, Settings, Source};
//!
//! let settings = ConfigLoader::builder()
//!     .base(Source::inline("defaults", "DEBUG = true\nHELLO = \"hi\"", FileFormat::Toml))
//!     .overrides(Settings::new().with("DEBUG", false))
//!     .resolve()
//!     .unwrap();
//!
//! assert_eq!(settings.get_bool("DEBUG"), Some(false));
//! assert_eq!(settings.get_str("hello"), Some("hi"));
//! ```
pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub use snakeeyes_domain as domain;
