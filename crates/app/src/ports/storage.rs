//! Storage port — repository traits for persistence.
//!
//! Absence is reported as `Ok(None)`, never as an error. Identifiers are
//! assigned by the store, so `create` takes an unsaved value and returns
//! the persisted record.

use std::future::Future;

use servicebay_domain::appointment::{Appointment, NewAppointment};
use servicebay_domain::automobile::Automobile;
use servicebay_domain::error::ServiceBayError;
use servicebay_domain::id::{AppointmentId, TechnicianId};
use servicebay_domain::technician::{NewTechnician, Technician};

/// Repository for persisting and querying [`Technician`]s.
pub trait TechnicianRepository {
    /// Insert a technician and return it with its assigned id.
    fn create(
        &self,
        technician: NewTechnician,
    ) -> impl Future<Output = Result<Technician, ServiceBayError>> + Send;

    /// Get a technician by its unique identifier.
    fn get_by_id(
        &self,
        id: TechnicianId,
    ) -> impl Future<Output = Result<Option<Technician>, ServiceBayError>> + Send;

    /// Get all technicians.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Technician>, ServiceBayError>> + Send;

    /// Delete a technician by its unique identifier.
    ///
    /// Must fail with [`ServiceBayError::Conflict`] while any appointment
    /// still references the technician.
    fn delete(&self, id: TechnicianId) -> impl Future<Output = Result<(), ServiceBayError>> + Send;
}

/// Repository for the inventory mirror.
pub trait AutomobileRepository {
    /// Record a VIN seen in the upstream inventory.
    fn create(&self, vin: i64) -> impl Future<Output = Result<Automobile, ServiceBayError>> + Send;

    /// Get all mirrored automobiles.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Automobile>, ServiceBayError>> + Send;
}

/// Repository for persisting and querying [`Appointment`]s.
pub trait AppointmentRepository {
    /// Insert an appointment and return it with its assigned id.
    fn create(
        &self,
        appointment: NewAppointment,
    ) -> impl Future<Output = Result<Appointment, ServiceBayError>> + Send;

    /// Get an appointment by its unique identifier.
    fn get_by_id(
        &self,
        id: AppointmentId,
    ) -> impl Future<Output = Result<Option<Appointment>, ServiceBayError>> + Send;

    /// Get all appointments.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Appointment>, ServiceBayError>> + Send;

    /// Get the appointments whose `finished` flag is set.
    fn get_finished(
        &self,
    ) -> impl Future<Output = Result<Vec<Appointment>, ServiceBayError>> + Send;

    /// Overwrite a stored appointment with the given values.
    fn update(
        &self,
        appointment: Appointment,
    ) -> impl Future<Output = Result<Appointment, ServiceBayError>> + Send;

    /// Delete an appointment by its unique identifier.
    fn delete(&self, id: AppointmentId)
    -> impl Future<Output = Result<(), ServiceBayError>> + Send;
}
