//! # SnakeEyes Server
//!
//! Application factory and HTTP server for SnakeEyes, built on `Axum`.
//!
//! [`create_app`] resolves the layered configuration (embedded base settings,
//! the instance file, `SNAKEEYES_*` environment, then an optional override
//! mapping), registers the `page` blueprint and returns an [`Application`].
//! [`Server`] binds that application to `SERVER_NAME` and serves it.
//!
//! ## Example
//! ```no_run
//! use snakeeyes_server::{Server, create_app};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .application(create_app(None)?)
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

mod app;
mod error;
mod router;
mod server;

pub use app::{Application, ApplicationBuilder, DEFAULT_INSTANCE_PATH, create_app};
pub use error::{AppError, AppErrorExt};
pub use server::{Server, ServerBuilder};
