//! # servicebayd — service bay daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize tracing
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use servicebay_adapter_http_axum::state::AppState;
use servicebay_adapter_storage_sqlite_sqlx::{
    SqliteAppointmentRepository, SqliteAutomobileRepository, SqliteTechnicianRepository,
};
use servicebay_app::services::appointment_service::AppointmentService;
use servicebay_app::services::automobile_service::AutomobileService;
use servicebay_app::services::technician_service::TechnicianService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = servicebay_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database.url.clone(),
    }
    .build()
    .await
    .context("failed to initialise database")?;
    let pool = db.pool().clone();

    // Repositories
    let technician_repo = SqliteTechnicianRepository::new(pool.clone());
    let appointment_repo = SqliteAppointmentRepository::new(pool.clone());
    let automobile_repo = SqliteAutomobileRepository::new(pool.clone());

    // Services
    let technician_service = TechnicianService::new(technician_repo);
    let appointment_service =
        AppointmentService::new(appointment_repo, SqliteTechnicianRepository::new(pool));
    let automobile_service = AutomobileService::new(automobile_repo);

    // HTTP
    let state = AppState::new(technician_service, appointment_service, automobile_service);
    let app = servicebay_adapter_http_axum::router::build(state);

    let bind_addr = config.server.bind;
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "servicebayd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("servicebayd stopped");
    Ok(())
}

/// Resolve once SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
