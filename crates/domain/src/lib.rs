//! # servicebay-domain
//!
//! Pure domain model for the servicebay auto-service backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Technicians** (the people appointments are assigned to)
//! - Define **Automobiles** (the read-only mirror of the dealership inventory)
//! - Define **Appointments** (a vehicle, its owner, a reason and a technician)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod appointment;
pub mod automobile;
pub mod technician;
