//! # servicebay-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API under `/api` (`/api/technicians`, `/api/appointments`,
//!   `/api/appointments/history`, `/api/autos`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Shape domain records into the wire JSON, expanding an appointment's
//!   technician reference into the full technician object ([`view`])
//! - Map application errors into `{"message": …}` bodies with a status code
//!
//! ## Dependency rule
//! Depends on `servicebay-app` (for port traits and services) and
//! `servicebay-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
pub mod view;
