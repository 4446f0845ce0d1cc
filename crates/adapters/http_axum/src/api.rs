//! JSON REST API handler modules.
//!
//! Each route lists exactly the methods it serves; axum answers any other
//! method with `405 Method Not Allowed` before a handler runs.

#[allow(clippy::missing_errors_doc)]
pub mod appointments;
#[allow(clippy::missing_errors_doc)]
pub mod automobiles;
#[allow(clippy::missing_errors_doc)]
pub mod technicians;

use std::str::FromStr;

use axum::Router;
use axum::routing::{delete, get, put};

use servicebay_app::ports::{AppointmentRepository, AutomobileRepository, TechnicianRepository};
use servicebay_domain::error::{NotFoundError, ServiceBayError};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<TR, AR, VR>() -> Router<AppState<TR, AR, VR>>
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    Router::new()
        // Technicians
        .route(
            "/technicians",
            get(technicians::list::<TR, AR, VR>).post(technicians::create::<TR, AR, VR>),
        )
        .route(
            "/technicians/{id}",
            delete(technicians::delete::<TR, AR, VR>),
        )
        // Appointments
        .route(
            "/appointments",
            get(appointments::list::<TR, AR, VR>).post(appointments::create::<TR, AR, VR>),
        )
        .route(
            "/appointments/history",
            get(appointments::history::<TR, AR, VR>),
        )
        .route(
            "/appointments/{id}",
            put(appointments::update::<TR, AR, VR>).delete(appointments::delete::<TR, AR, VR>),
        )
        .route(
            "/appointments/delete/{id}",
            delete(appointments::delete::<TR, AR, VR>),
        )
        // Inventory mirror
        .route("/autos", get(automobiles::list::<TR, AR, VR>))
}

/// Parse a path id; anything that is not an id of the right shape cannot
/// address a record, so it is reported the same way as a missing one.
fn parse_id<I: FromStr>(raw: &str, entity: &'static str) -> Result<I, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::from(ServiceBayError::from(NotFoundError {
            entity,
            id: raw.to_owned(),
        }))
    })
}
