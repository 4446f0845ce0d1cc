//! Automobile service — read access to the inventory mirror.

use servicebay_domain::automobile::Automobile;
use servicebay_domain::error::ServiceBayError;

use crate::ports::AutomobileRepository;

/// Application service for the mirrored vehicle list.
pub struct AutomobileService<R> {
    repo: R,
}

impl<R: AutomobileRepository> AutomobileService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List every mirrored automobile.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_automobiles(&self) -> Result<Vec<Automobile>, ServiceBayError> {
        self.repo.get_all().await
    }
}
