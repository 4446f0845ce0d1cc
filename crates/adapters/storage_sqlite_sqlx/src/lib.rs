//! # servicebay-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `servicebay-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (sqlx embedded migrations under `./migrations`)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `servicebay-app` (for port traits) and `servicebay-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod appointment_repo;
mod automobile_repo;
mod error;
mod pool;
mod technician_repo;

pub use appointment_repo::SqliteAppointmentRepository;
pub use automobile_repo::SqliteAutomobileRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use technician_repo::SqliteTechnicianRepository;
