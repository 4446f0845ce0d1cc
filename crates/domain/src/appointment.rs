//! Appointment — a scheduled service visit for one vehicle.
//!
//! An appointment references exactly one [`Technician`](crate::technician::Technician)
//! by id. The reference is checked when the appointment is created; later
//! reads trust it, and the store refuses to delete a technician that is
//! still referenced.

use serde::{Deserialize, Serialize};

use crate::error::{ServiceBayError, ValidationError};
use crate::id::{AppointmentId, TechnicianId};
use crate::time::Timestamp;

/// Longest accepted owner name.
pub const OWNER_MAX_LEN: usize = 30;

/// A persisted service appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub vin: i64,
    pub owner: String,
    pub date_time: Timestamp,
    pub reason: String,
    pub finished: bool,
    pub technician_id: TechnicianId,
}

impl Appointment {
    /// Overwrite every field present in `patch`, leaving the rest untouched.
    ///
    /// The patch is applied as-is: a new technician id is not resolved here.
    pub fn apply(&mut self, patch: AppointmentPatch) {
        if let Some(vin) = patch.vin {
            self.vin = vin;
        }
        if let Some(owner) = patch.owner {
            self.owner = owner;
        }
        if let Some(date_time) = patch.date_time {
            self.date_time = date_time;
        }
        if let Some(reason) = patch.reason {
            self.reason = reason;
        }
        if let Some(finished) = patch.finished {
            self.finished = finished;
        }
        if let Some(technician_id) = patch.technician_id {
            self.technician_id = technician_id;
        }
    }
}

/// Partial update for an [`Appointment`]; `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentPatch {
    pub vin: Option<i64>,
    pub owner: Option<String>,
    pub date_time: Option<Timestamp>,
    pub reason: Option<String>,
    pub finished: Option<bool>,
    pub technician_id: Option<TechnicianId>,
}

impl AppointmentPatch {
    /// Whether applying this patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// An appointment that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub vin: i64,
    pub owner: String,
    pub date_time: Timestamp,
    pub reason: String,
    pub finished: bool,
    pub technician_id: TechnicianId,
}

impl NewAppointment {
    /// Create a builder for constructing a [`NewAppointment`].
    #[must_use]
    pub fn builder() -> NewAppointmentBuilder {
        NewAppointmentBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceBayError::Validation`] when `owner` is longer than
    /// [`OWNER_MAX_LEN`] characters.
    pub fn validate(&self) -> Result<(), ServiceBayError> {
        if self.owner.chars().count() > OWNER_MAX_LEN {
            return Err(ValidationError::TooLong {
                field: "owner",
                max: OWNER_MAX_LEN,
            }
            .into());
        }
        Ok(())
    }

    /// Attach the id assigned by the store.
    #[must_use]
    pub fn with_id(self, id: AppointmentId) -> Appointment {
        Appointment {
            id,
            vin: self.vin,
            owner: self.owner,
            date_time: self.date_time,
            reason: self.reason,
            finished: self.finished,
            technician_id: self.technician_id,
        }
    }
}

/// Step-by-step builder for [`NewAppointment`].
#[derive(Debug, Default)]
pub struct NewAppointmentBuilder {
    vin: Option<i64>,
    owner: Option<String>,
    date_time: Option<Timestamp>,
    reason: Option<String>,
    finished: bool,
    technician_id: Option<TechnicianId>,
}

impl NewAppointmentBuilder {
    #[must_use]
    pub fn vin(mut self, vin: i64) -> Self {
        self.vin = Some(vin);
        self
    }

    #[must_use]
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    #[must_use]
    pub fn date_time(mut self, date_time: Timestamp) -> Self {
        self.date_time = Some(date_time);
        self
    }

    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn finished(mut self, finished: bool) -> Self {
        self.finished = finished;
        self
    }

    #[must_use]
    pub fn technician_id(mut self, technician_id: TechnicianId) -> Self {
        self.technician_id = Some(technician_id);
        self
    }

    /// Consume the builder, validate, and return a [`NewAppointment`].
    ///
    /// # Errors
    ///
    /// Returns [`ServiceBayError::Validation`] if a required field is missing
    /// or `owner` breaks its invariants.
    pub fn build(self) -> Result<NewAppointment, ServiceBayError> {
        let appointment = NewAppointment {
            vin: self.vin.ok_or(ValidationError::MissingField("VIN"))?,
            owner: self.owner.ok_or(ValidationError::MissingField("owner"))?,
            date_time: self
                .date_time
                .ok_or(ValidationError::MissingField("date_time"))?,
            reason: self.reason.ok_or(ValidationError::MissingField("reason"))?,
            finished: self.finished,
            technician_id: self
                .technician_id
                .ok_or(ValidationError::MissingField("technician"))?,
        };
        appointment.validate()?;
        Ok(appointment)
    }
}
