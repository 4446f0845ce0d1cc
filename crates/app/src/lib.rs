//! # servicebay-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `TechnicianRepository` — create, lookup, list, delete technicians
//!   - `AppointmentRepository` — CRUD for appointments plus the finished-only listing
//!   - `AutomobileRepository` — read access to the inventory mirror
//! - Define **driving/inbound ports** as use-case structs:
//!   - `TechnicianService` — register, list, dismiss
//!   - `AppointmentService` — schedule, reschedule/patch, cancel, history
//!   - `AutomobileService` — list mirrored vehicles
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `servicebay-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
