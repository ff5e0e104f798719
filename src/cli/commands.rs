//! CLI command implementations
//!
//! Configuration is read from the environment once, logging is installed,
//! and the command runs on a multi-threaded tokio runtime.

use std::sync::Arc;

use serde_json::json;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::{DatabaseConfig, ServiceConfig};
use crate::http_server::HttpServer;
use crate::permis::{InMemoryPermisRepository, PermisRepository, PermisService, PgPermisRepository};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command())
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let config = ServiceConfig::from_env()?;
    config.logging.init();

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    match cmd {
        Command::Serve { port, in_memory } => rt.block_on(serve(config, port, in_memory)),
        Command::Check => rt.block_on(check(&config.database)),
    }
}

/// Start the HTTP server and block until Ctrl-C.
///
/// The pool is opened once here, handed to the service, and closed after
/// the server has drained.
pub async fn serve(mut config: ServiceConfig, port: Option<u16>, in_memory: bool) -> CliResult<()> {
    if let Some(port) = port {
        config.http.port = port;
    }

    let pool = if in_memory {
        None
    } else {
        Some(connect(&config.database).await?)
    };

    let repository: Arc<dyn PermisRepository> = match &pool {
        Some(pool) => Arc::new(PgPermisRepository::new(pool.clone())),
        None => {
            warn!("records are kept in memory and lost on exit");
            Arc::new(InMemoryPermisRepository::new())
        }
    };

    let service = Arc::new(PermisService::new(repository));
    let server = HttpServer::new(config.http, service);
    let result = server.start(shutdown_signal()).await;

    if let Some(pool) = pool {
        pool.close().await;
        info!("database pool closed");
    }

    result.map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
}

/// Connect, run a trivial query, and report the outcome on stdout
pub async fn check(database: &DatabaseConfig) -> CliResult<()> {
    let pool = connect(database).await?;
    let service = PermisService::new(Arc::new(PgPermisRepository::new(pool.clone())));
    let outcome = service.ping().await;
    pool.close().await;

    outcome.map_err(|e| CliError::database_unreachable(e.to_string()))?;

    println!(
        "{}",
        json!({
            "database": database.database,
            "host": database.host,
            "port": database.port,
            "reachable": true,
        })
    );
    Ok(())
}

async fn connect(database: &DatabaseConfig) -> CliResult<PgPool> {
    info!(
        host = %database.host,
        port = database.port,
        database = %database.database,
        "connecting to PostgreSQL"
    );

    database.connect().await.map_err(|e| {
        CliError::database_unreachable(format!(
            "{}:{}/{}: {}",
            database.host, database.port, database.database, e
        ))
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
