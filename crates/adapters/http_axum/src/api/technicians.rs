//! JSON REST handlers for technicians.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use servicebay_app::ports::{AppointmentRepository, AutomobileRepository, TechnicianRepository};
use servicebay_app::services::technician_service::ENTITY;
use servicebay_domain::error::ServiceBayError;
use servicebay_domain::id::TechnicianId;
use servicebay_domain::technician::NewTechnician;

use crate::error::ApiError;
use crate::state::AppState;
use crate::view::{TechnicianList, TechnicianView};

/// Returned for every failed create, whatever the cause.
pub const CREATE_FAILED: &str = "Make sure name and employee numbers are filled out!";

/// Returned when a delete is blocked by appointments.
pub const STILL_ASSIGNED: &str = "Technician is assigned to service appointments";

/// Request body for creating a technician.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTechnicianRequest {
    pub name: String,
    pub employee_number: i64,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<TechnicianList>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Ok(Json<TechnicianView>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    /// The technician as it was before deletion.
    Ok(Json<TechnicianView>),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/technicians`
pub async fn list<TR, AR, VR>(
    State(state): State<AppState<TR, AR, VR>>,
) -> Result<ListResponse, ApiError>
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    let technicians = state.technician_service.list_technicians().await?;
    Ok(ListResponse::Ok(Json(technicians.into_iter().collect())))
}

/// `POST /api/technicians`
pub async fn create<TR, AR, VR>(
    State(state): State<AppState<TR, AR, VR>>,
    payload: Result<Json<CreateTechnicianRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "invalid technician body");
        ApiError::bad_request(CREATE_FAILED)
    })?;

    let technician = NewTechnician::builder()
        .name(req.name)
        .employee_number(req.employee_number)
        .build()
        .map_err(|err| ApiError::from_write(err, CREATE_FAILED))?;

    let created = state
        .technician_service
        .create_technician(technician)
        .await
        .map_err(|err| ApiError::from_write(err, CREATE_FAILED))?;
    Ok(CreateResponse::Ok(Json(created.into())))
}

/// `DELETE /api/technicians/:id`
pub async fn delete<TR, AR, VR>(
    State(state): State<AppState<TR, AR, VR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    let technician_id: TechnicianId = super::parse_id(&id, ENTITY)?;
    let deleted = state
        .technician_service
        .delete_technician(technician_id)
        .await
        .map_err(|err| match err {
            ServiceBayError::Conflict(_) => ApiError::conflict(STILL_ASSIGNED),
            other => other.into(),
        })?;
    Ok(DeleteResponse::Ok(Json(deleted.into())))
}
