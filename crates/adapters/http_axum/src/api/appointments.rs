//! JSON REST handlers for service appointments.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use servicebay_app::ports::{AppointmentRepository, AutomobileRepository, TechnicianRepository};
use servicebay_app::services::appointment_service::ENTITY;
use servicebay_domain::appointment::{Appointment, AppointmentPatch, NewAppointment};
use servicebay_domain::error::ServiceBayError;
use servicebay_domain::id::{AppointmentId, TechnicianId};
use servicebay_domain::time::parse_date_time;

use crate::error::ApiError;
use crate::state::AppState;
use crate::view::{AppointmentList, AppointmentView, TechnicianIndex};

/// Returned for every failed create or update that is not a missing record.
pub const WRITE_FAILED: &str = "Make sure all fields are filled out properly!";

/// Returned when a create names a technician that does not exist.
pub const TECHNICIAN_NOT_FOUND: &str = "Technician not found";

/// Request body for scheduling an appointment.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateAppointmentRequest {
    #[serde(rename = "VIN")]
    pub vin: i64,
    pub owner: String,
    pub date_time: String,
    pub reason: String,
    #[serde(deserialize_with = "technician_id")]
    pub technician: i64,
    #[serde(default)]
    pub finished: bool,
}

/// Request body for patching an appointment. Absent fields are left as is.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateAppointmentRequest {
    #[serde(rename = "VIN")]
    pub vin: Option<i64>,
    pub owner: Option<String>,
    pub date_time: Option<String>,
    pub reason: Option<String>,
    pub finished: Option<bool>,
    #[serde(default, deserialize_with = "optional_technician_id")]
    pub technician: Option<i64>,
}

/// A technician reference as clients send it: a JSON integer, or a numeric
/// string when the value comes from a form `<select>`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTechnicianId {
    Number(i64),
    Text(String),
}

impl RawTechnicianId {
    fn parse(self) -> Option<i64> {
        match self {
            Self::Number(id) => Some(id),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

fn technician_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    RawTechnicianId::deserialize(deserializer)?
        .parse()
        .ok_or_else(|| D::Error::custom("technician must be an integer id"))
}

fn optional_technician_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    Option::<RawTechnicianId>::deserialize(deserializer)?
        .map(|raw| {
            raw.parse()
                .ok_or_else(|| D::Error::custom("technician must be an integer id"))
        })
        .transpose()
}

impl UpdateAppointmentRequest {
    fn into_patch(self) -> Result<AppointmentPatch, ServiceBayError> {
        Ok(AppointmentPatch {
            vin: self.vin,
            owner: self.owner,
            date_time: self.date_time.as_deref().map(parse_date_time).transpose()?,
            reason: self.reason,
            finished: self.finished,
            technician_id: self.technician.map(TechnicianId::new),
        })
    }
}

/// Possible responses from the list and history endpoints.
pub enum ListResponse {
    Ok(Json<AppointmentList>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create, update and delete endpoints.
pub enum DetailResponse {
    Ok(Json<AppointmentView>),
}

impl IntoResponse for DetailResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Expand a batch of appointments against the current technician table.
async fn expand_all<TR, AR, VR>(
    state: &AppState<TR, AR, VR>,
    appointments: Vec<Appointment>,
) -> Result<AppointmentList, ApiError>
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    let index: TechnicianIndex = state
        .technician_service
        .list_technicians()
        .await?
        .into_iter()
        .collect();
    let service_appointments = index.expand_all(appointments).map_err(|err| {
        tracing::error!(technician_id = %err.id, "appointment references a missing technician");
        ApiError::internal()
    })?;
    Ok(AppointmentList {
        service_appointments,
    })
}

/// Expand a single appointment by fetching its technician.
async fn expand_one<TR, AR, VR>(
    state: &AppState<TR, AR, VR>,
    appointment: Appointment,
) -> Result<AppointmentView, ApiError>
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    let technician = state
        .technician_service
        .get_technician(appointment.technician_id)
        .await
        .map_err(|err| match err {
            ServiceBayError::NotFound(err) => {
                tracing::error!(technician_id = %err.id, "appointment references a missing technician");
                ApiError::internal()
            }
            other => other.into(),
        })?;
    Ok(AppointmentView::expand(appointment, technician))
}

/// `GET /api/appointments`
pub async fn list<TR, AR, VR>(
    State(state): State<AppState<TR, AR, VR>>,
) -> Result<ListResponse, ApiError>
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    let appointments = state.appointment_service.list_appointments().await?;
    Ok(ListResponse::Ok(Json(expand_all(&state, appointments).await?)))
}

/// `GET /api/appointments/history`: finished appointments only.
pub async fn history<TR, AR, VR>(
    State(state): State<AppState<TR, AR, VR>>,
) -> Result<ListResponse, ApiError>
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    let appointments = state.appointment_service.list_history().await?;
    Ok(ListResponse::Ok(Json(expand_all(&state, appointments).await?)))
}

/// `POST /api/appointments`
///
/// The technician is resolved before the rest of the body is checked, so
/// an unknown technician is reported as such even when other fields are
/// also wrong.
pub async fn create<TR, AR, VR>(
    State(state): State<AppState<TR, AR, VR>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<DetailResponse, ApiError>
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "invalid appointment body");
        ApiError::bad_request(WRITE_FAILED)
    })?;

    let technician_id = body
        .get("technician")
        .cloned()
        .and_then(|raw| RawTechnicianId::deserialize(raw).ok())
        .and_then(RawTechnicianId::parse)
        .map(TechnicianId::new)
        .ok_or_else(|| ApiError::bad_request(WRITE_FAILED))?;

    let technician = state
        .technician_service
        .get_technician(technician_id)
        .await
        .map_err(|err| match err {
            ServiceBayError::NotFound(_) => ApiError::not_found(TECHNICIAN_NOT_FOUND),
            other => other.into(),
        })?;

    let req: CreateAppointmentRequest = serde_json::from_value(body).map_err(|err| {
        tracing::debug!(error = %err, "invalid appointment body");
        ApiError::bad_request(WRITE_FAILED)
    })?;

    let appointment = parse_date_time(&req.date_time)
        .map_err(ServiceBayError::from)
        .and_then(|date_time| {
            NewAppointment::builder()
                .vin(req.vin)
                .owner(req.owner)
                .date_time(date_time)
                .reason(req.reason)
                .finished(req.finished)
                .technician_id(technician.id)
                .build()
        })
        .map_err(|err| ApiError::from_write(err, WRITE_FAILED))?;

    let created = state
        .appointment_service
        .create_appointment(appointment)
        .await
        .map_err(|err| match err {
            ServiceBayError::NotFound(_) => ApiError::not_found(TECHNICIAN_NOT_FOUND),
            other => ApiError::from_write(other, WRITE_FAILED),
        })?;
    Ok(DetailResponse::Ok(Json(AppointmentView::expand(
        created, technician,
    ))))
}

/// `PUT /api/appointments/:id`
pub async fn update<TR, AR, VR>(
    State(state): State<AppState<TR, AR, VR>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAppointmentRequest>, JsonRejection>,
) -> Result<DetailResponse, ApiError>
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    let appointment_id: AppointmentId = super::parse_id(&id, ENTITY)?;
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "invalid appointment patch");
        ApiError::bad_request(WRITE_FAILED)
    })?;
    let patch = req
        .into_patch()
        .map_err(|err| ApiError::from_write(err, WRITE_FAILED))?;

    let updated = state
        .appointment_service
        .update_appointment(appointment_id, patch)
        .await
        .map_err(|err| ApiError::from_write(err, WRITE_FAILED))?;
    Ok(DetailResponse::Ok(Json(expand_one(&state, updated).await?)))
}

/// `DELETE /api/appointments/:id` and `DELETE /api/appointments/delete/:id`
pub async fn delete<TR, AR, VR>(
    State(state): State<AppState<TR, AR, VR>>,
    Path(id): Path<String>,
) -> Result<DetailResponse, ApiError>
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    let appointment_id: AppointmentId = super::parse_id(&id, ENTITY)?;
    let deleted = state
        .appointment_service
        .delete_appointment(appointment_id)
        .await?;
    Ok(DetailResponse::Ok(Json(expand_one(&state, deleted).await?)))
}
