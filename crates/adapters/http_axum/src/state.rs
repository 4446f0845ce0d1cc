//! Shared application state for axum handlers.

use std::sync::Arc;

use servicebay_app::ports::{AppointmentRepository, AutomobileRepository, TechnicianRepository};
use servicebay_app::services::appointment_service::AppointmentService;
use servicebay_app::services::automobile_service::AutomobileService;
use servicebay_app::services::technician_service::TechnicianService;

/// Application state shared across all axum handlers.
///
/// Generic over the technician (`TR`), appointment (`AR`) and automobile
/// (`VR`) repository types to avoid dynamic dispatch. `Clone` is implemented
/// manually so the repositories themselves do not need to be `Clone`; only
/// the `Arc` wrappers are cloned.
pub struct AppState<TR, AR, VR> {
    /// Technician service.
    pub technician_service: Arc<TechnicianService<TR>>,
    /// Appointment service; holds its own technician repository.
    pub appointment_service: Arc<AppointmentService<AR, TR>>,
    /// Inventory mirror service.
    pub automobile_service: Arc<AutomobileService<VR>>,
}

impl<TR, AR, VR> Clone for AppState<TR, AR, VR> {
    fn clone(&self) -> Self {
        Self {
            technician_service: Arc::clone(&self.technician_service),
            appointment_service: Arc::clone(&self.appointment_service),
            automobile_service: Arc::clone(&self.automobile_service),
        }
    }
}

impl<TR, AR, VR> AppState<TR, AR, VR>
where
    TR: TechnicianRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
    VR: AutomobileRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        technician_service: TechnicianService<TR>,
        appointment_service: AppointmentService<AR, TR>,
        automobile_service: AutomobileService<VR>,
    ) -> Self {
        Self {
            technician_service: Arc::new(technician_service),
            appointment_service: Arc::new(appointment_service),
            automobile_service: Arc::new(automobile_service),
        }
    }
}
