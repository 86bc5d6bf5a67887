use crate::app::Application;
use anyhow::{Context, Result};
use axum_server::Handle;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::lookup_host;
use tokio::signal;
use tracing::{error, info};

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    application: Option<Application>,
    address: Option<SocketAddr>,
    port: Option<u16>,
}

impl ServerBuilder {
    pub fn application(mut self, application: Application) -> Self {
        self.application = Some(application);
        self
    }

    /// Binds to `address` instead of resolving `SERVER_NAME`.
    pub const fn address(mut self, address: SocketAddr) -> Self {
        self.address = Some(address);
        self
    }

    /// Keeps the resolved host but replaces its port.
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Resolves the bind address and returns a server ready to run.
    ///
    /// # Errors
    /// Returns an error if no application was provided or `SERVER_NAME`
    /// does not resolve to a socket address.
    pub async fn build(self) -> Result<Server> {
        let application = self.application.context("Server requires an application")?;

        let mut address = match self.address {
            Some(address) => address,
            None => resolve_server_name(&application.config().server_name).await?,
        };
        if let Some(port) = self.port {
            address.set_port(port);
        }

        info!(address = %address, "Initializing server");
        Ok(Server { application, address })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    application: Application,
    address: SocketAddr,
}

impl Server {
    /// Returns a new [`ServerBuilder`].
    ///
    /// # Examples
    /// ```no_run
    /// # use snakeeyes_server::{Server, create_app};
    /// # async fn example() -> anyhow::Result<()> {
    /// Server::builder()
    ///     .application(create_app(None)?)
    ///     .port(8000)
    ///     .build()
    ///     .await?
    ///     .run()
    ///     .await
    /// # }
    /// ```
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    #[must_use]
    pub const fn address(&self) -> SocketAddr {
        self.address
    }

    #[must_use]
    pub const fn application(&self) -> &Application {
        &self.application
    }

    /// Serves HTTP until Ctrl+C or SIGTERM, then drains in-flight requests.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to its address.
    pub async fn run(self) -> Result<()> {
        let address = self.address;
        let app = self.application.into_router();

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        info!("Starting HTTP server on http://{address}");

        axum_server::bind(address)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .context("HTTP server failed")?;

        info!("Server shutdown complete");
        Ok(())
    }
}

async fn resolve_server_name(server_name: &str) -> Result<SocketAddr> {
    lookup_host(server_name)
        .await
        .with_context(|| format!("Invalid SERVER_NAME '{server_name}', expected host:port"))?
        .next()
        .with_context(|| format!("SERVER_NAME '{server_name}' did not resolve to any address"))
}

/// Listens for shutdown signals (Ctrl+C, SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res?,
        res = terminate => res?,
    }

    Ok(())
}
