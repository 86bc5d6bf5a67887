use anyhow::Context;
use clap::Parser;
use snakeeyes_kernel::config::InstancePolicy;
use snakeeyes_logger::{FileOutput, LevelFilter, Logger};
use snakeeyes_server::{Application, DEFAULT_INSTANCE_PATH, Server};
use std::path::PathBuf;

/// Serve the SnakeEyes application.
#[derive(Debug, Parser)]
#[command(name = "snakeeyes-server", version, about)]
struct Cli {
    /// Base settings file. Defaults to the settings compiled into the binary.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Instance settings file layered over the base settings.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_INSTANCE_PATH)]
    instance: PathBuf,

    /// Fail at startup if the instance settings file is missing.
    #[arg(long)]
    require_instance: bool,

    /// Port to bind, replacing the one in SERVER_NAME.
    #[arg(long, short)]
    port: Option<u16>,

    /// Also write rolling log files into this directory.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut builder = Application::builder().instance_file(&cli.instance);
    if let Some(config) = &cli.config {
        builder = builder.base_file(config);
    }
    if cli.require_instance {
        builder = builder.instance_policy(InstancePolicy::Required);
    }
    let app = builder.build().context("Failed to load application settings")?;

    let level: LevelFilter = app
        .config()
        .log_level
        .parse()
        .with_context(|| format!("Invalid LOG_LEVEL '{}'", app.config().log_level))?;
    let mut logger = Logger::builder(env!("CARGO_PKG_NAME")).level(level);
    if let Some(dir) = &cli.log_dir {
        logger = logger.file(FileOutput::new(dir));
    }
    let _log = logger.init()?;
    app.log_summary();

    let mut server = Server::builder().application(app);
    if let Some(port) = cli.port {
        server = server.port(port);
    }
    server.build().await?.run().await
}
