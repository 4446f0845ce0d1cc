//! Typed identifier newtypes backed by store-assigned integers.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row id.
            #[must_use]
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Access the raw row id.
            #[must_use]
            pub fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Technician`](crate::technician::Technician).
    TechnicianId
);

define_id!(
    /// Unique identifier for an [`Automobile`](crate::automobile::Automobile).
    AutomobileId
);

define_id!(
    /// Unique identifier for an [`Appointment`](crate::appointment::Appointment).
    AppointmentId
);
