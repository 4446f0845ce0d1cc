//! Appointment service — scheduling, patching and cancelling service visits.

use servicebay_domain::appointment::{Appointment, AppointmentPatch, NewAppointment};
use servicebay_domain::error::{NotFoundError, ServiceBayError};
use servicebay_domain::id::AppointmentId;

use crate::ports::{AppointmentRepository, TechnicianRepository};

/// Display name used in not-found errors.
pub const ENTITY: &str = "Service appointment";

/// Application service for appointment operations.
///
/// Holds its own technician repository so that a new appointment's
/// technician reference can be resolved before anything is written.
pub struct AppointmentService<R, T> {
    repo: R,
    technicians: T,
}

impl<R, T> AppointmentService<R, T>
where
    R: AppointmentRepository,
    T: TechnicianRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(repo: R, technicians: T) -> Self {
        Self { repo, technicians }
    }

    /// Schedule a new appointment.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceBayError::NotFound`] (for `"Technician"`) when the
    /// referenced technician does not exist, [`ServiceBayError::Validation`]
    /// if invariants fail, or a storage error from the repositories.
    #[tracing::instrument(skip(self, appointment), fields(technician_id = %appointment.technician_id))]
    pub async fn create_appointment(
        &self,
        appointment: NewAppointment,
    ) -> Result<Appointment, ServiceBayError> {
        let technician_id = appointment.technician_id;
        if self.technicians.get_by_id(technician_id).await?.is_none() {
            return Err(NotFoundError {
                entity: crate::services::technician_service::ENTITY,
                id: technician_id.to_string(),
            }
            .into());
        }
        appointment.validate()?;
        self.repo.create(appointment).await
    }

    /// Look up an appointment by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceBayError::NotFound`] when no appointment with `id`
    /// exists, or a storage error from the repository.
    pub async fn get_appointment(&self, id: AppointmentId) -> Result<Appointment, ServiceBayError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: ENTITY,
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all appointments.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, ServiceBayError> {
        self.repo.get_all().await
    }

    /// List completed appointments only.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_history(&self) -> Result<Vec<Appointment>, ServiceBayError> {
        self.repo.get_finished().await
    }

    /// Apply a partial update and return the stored result.
    ///
    /// The technician reference in `patch` is written as given; the store's
    /// foreign key is the only check.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceBayError::NotFound`] when no appointment with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_appointment(
        &self,
        id: AppointmentId,
        patch: AppointmentPatch,
    ) -> Result<Appointment, ServiceBayError> {
        let mut appointment = self.get_appointment(id).await?;
        if patch.is_empty() {
            return Ok(appointment);
        }
        appointment.apply(patch);
        self.repo.update(appointment).await?;
        self.get_appointment(id).await
    }

    /// Delete an appointment and return the record as it was before deletion.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceBayError::NotFound`] when no appointment with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_appointment(
        &self,
        id: AppointmentId,
    ) -> Result<Appointment, ServiceBayError> {
        let appointment = self.get_appointment(id).await?;
        self.repo.delete(id).await?;
        Ok(appointment)
    }
}
