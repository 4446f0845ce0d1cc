//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use servicebay_app::ports::{AppointmentRepository, AutomobileRepository, TechnicianRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the JSON API under `/api` next to a `/health` probe.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<TR, AR, VR>(state: AppState<TR, AR, VR>) -> Router
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
