//! Automobile — a value object mirrored from the dealership inventory.
//!
//! Rows are written by whatever process keeps the mirror in sync; the
//! service shop only reads them to tell whether a VIN was sold in-house.

use serde::{Deserialize, Serialize};

use crate::id::AutomobileId;

/// A vehicle known to the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automobile {
    pub id: AutomobileId,
    pub vin: i64,
}
