//! Technician — a shop employee that service appointments are assigned to.

use serde::{Deserialize, Serialize};

use crate::error::{ServiceBayError, ValidationError};
use crate::id::TechnicianId;

/// Longest accepted technician name.
pub const NAME_MAX_LEN: usize = 30;

/// A persisted technician.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub id: TechnicianId,
    pub name: String,
    pub employee_number: i64,
}

/// A technician that has not been stored yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTechnician {
    pub name: String,
    pub employee_number: i64,
}

impl NewTechnician {
    /// Create a builder for constructing a [`NewTechnician`].
    #[must_use]
    pub fn builder() -> NewTechnicianBuilder {
        NewTechnicianBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceBayError::Validation`] when `name` is longer than
    /// [`NAME_MAX_LEN`] characters. An empty name is accepted.
    pub fn validate(&self) -> Result<(), ServiceBayError> {
        if self.name.chars().count() > NAME_MAX_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: NAME_MAX_LEN,
            }
            .into());
        }
        Ok(())
    }

    /// Attach the id assigned by the store.
    #[must_use]
    pub fn with_id(self, id: TechnicianId) -> Technician {
        Technician {
            id,
            name: self.name,
            employee_number: self.employee_number,
        }
    }
}

/// Step-by-step builder for [`NewTechnician`].
#[derive(Debug, Default)]
pub struct NewTechnicianBuilder {
    name: Option<String>,
    employee_number: Option<i64>,
}

impl NewTechnicianBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn employee_number(mut self, employee_number: i64) -> Self {
        self.employee_number = Some(employee_number);
        self
    }

    /// Consume the builder, validate, and return a [`NewTechnician`].
    ///
    /// # Errors
    ///
    /// Returns [`ServiceBayError::Validation`] if `employee_number` is missing
    /// or `name` is missing or too long.
    pub fn build(self) -> Result<NewTechnician, ServiceBayError> {
        let technician = NewTechnician {
            name: self.name.ok_or(ValidationError::MissingField("name"))?,
            employee_number: self
                .employee_number
                .ok_or(ValidationError::MissingField("employee_number"))?,
        };
        technician.validate()?;
        Ok(technician)
    }
}
