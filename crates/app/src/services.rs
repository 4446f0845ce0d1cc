//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod appointment_service;
pub mod automobile_service;
pub mod technician_service;

#[cfg(test)]
mod in_memory;
