//! JSON REST handler for the inventory mirror.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use servicebay_app::ports::{AppointmentRepository, AutomobileRepository, TechnicianRepository};

use crate::error::ApiError;
use crate::state::AppState;
use crate::view::AutomobileList;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<AutomobileList>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/autos`
pub async fn list<TR, AR, VR>(
    State(state): State<AppState<TR, AR, VR>>,
) -> Result<ListResponse, ApiError>
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    let autos = state.automobile_service.list_automobiles().await?;
    Ok(ListResponse::Ok(Json(autos.into_iter().collect())))
}
