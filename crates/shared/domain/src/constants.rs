//! Well-known setting names and defaults.

/// Setting names recognised by the application.
pub mod keys {
    pub const DEBUG: &str = "DEBUG";
    pub const TESTING: &str = "TESTING";
    pub const SERVER_NAME: &str = "SERVER_NAME";
    pub const SECRET_KEY: &str = "SECRET_KEY";
    pub const HELLO: &str = "HELLO";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
}

/// Body served by the index route when `HELLO` is not configured.
pub const DEFAULT_GREETING: &str = "<h1>Hello World<h1>";

/// Prefix for environment variables picked up by the loader (`SNAKEEYES_HELLO`, ...).
pub const ENV_PREFIX: &str = "SNAKEEYES";

/// Name of the single route group registered by the application factory.
pub const PAGE_BLUEPRINT: &str = "page";
