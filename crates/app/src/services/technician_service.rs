//! Technician service — use-cases for managing technicians.

use servicebay_domain::error::{NotFoundError, ServiceBayError};
use servicebay_domain::id::TechnicianId;
use servicebay_domain::technician::{NewTechnician, Technician};

use crate::ports::TechnicianRepository;

/// Display name used in not-found errors.
pub const ENTITY: &str = "Technician";

/// Application service for technician operations.
pub struct TechnicianService<R> {
    repo: R,
}

impl<R: TechnicianRepository> TechnicianService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new technician after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceBayError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, technician), fields(employee_number = technician.employee_number))]
    pub async fn create_technician(
        &self,
        technician: NewTechnician,
    ) -> Result<Technician, ServiceBayError> {
        technician.validate()?;
        self.repo.create(technician).await
    }

    /// Look up a technician by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceBayError::NotFound`] when no technician with `id`
    /// exists, or a storage error from the repository.
    pub async fn get_technician(&self, id: TechnicianId) -> Result<Technician, ServiceBayError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: ENTITY,
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all technicians.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_technicians(&self) -> Result<Vec<Technician>, ServiceBayError> {
        self.repo.get_all().await
    }

    /// Delete a technician and return the record as it was before deletion.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceBayError::NotFound`] when no technician with `id`
    /// exists, [`ServiceBayError::Conflict`] while appointments still
    /// reference it, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_technician(&self, id: TechnicianId) -> Result<Technician, ServiceBayError> {
        let technician = self.get_technician(id).await?;
        self.repo.delete(id).await?;
        Ok(technician)
    }
}
