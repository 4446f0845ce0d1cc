//! Response shaping — domain records to wire JSON.
//!
//! Domain appointments only carry a technician id. Every appointment body
//! (list, history, or a single created/updated/deleted record) embeds the
//! full technician object instead, so the join happens here from a
//! [`TechnicianIndex`] built out of the technicians the handler fetched.
//! Technicians and mirrored automobiles have no relations and are rendered
//! flat.

use std::collections::HashMap;

use serde::Serialize;

use servicebay_domain::appointment::Appointment;
use servicebay_domain::automobile::Automobile;
use servicebay_domain::error::NotFoundError;
use servicebay_domain::id::{AppointmentId, AutomobileId, TechnicianId};
use servicebay_domain::technician::Technician;
use servicebay_domain::time::Timestamp;

/// `{id, name, employee_number}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechnicianView {
    pub id: TechnicianId,
    pub name: String,
    pub employee_number: i64,
}

impl From<Technician> for TechnicianView {
    fn from(value: Technician) -> Self {
        Self {
            id: value.id,
            name: value.name,
            employee_number: value.employee_number,
        }
    }
}

/// `{id, VIN}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutomobileView {
    pub id: AutomobileId,
    #[serde(rename = "VIN")]
    pub vin: i64,
}

impl From<Automobile> for AutomobileView {
    fn from(value: Automobile) -> Self {
        Self {
            id: value.id,
            vin: value.vin,
        }
    }
}

/// An appointment with its technician expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentView {
    pub id: AppointmentId,
    #[serde(rename = "VIN")]
    pub vin: i64,
    pub owner: String,
    pub date_time: Timestamp,
    pub reason: String,
    pub finished: bool,
    pub technician: TechnicianView,
}

impl AppointmentView {
    /// Join one appointment with its technician.
    ///
    /// The caller must pass the technician the appointment references.
    #[must_use]
    pub fn expand(appointment: Appointment, technician: Technician) -> Self {
        debug_assert_eq!(appointment.technician_id, technician.id);
        Self {
            id: appointment.id,
            vin: appointment.vin,
            owner: appointment.owner,
            date_time: appointment.date_time,
            reason: appointment.reason,
            finished: appointment.finished,
            technician: technician.into(),
        }
    }
}

/// Technicians keyed by id, for expanding many appointments at once.
#[derive(Debug, Default)]
pub struct TechnicianIndex(HashMap<TechnicianId, Technician>);

impl TechnicianIndex {
    /// Join every appointment with its technician, keeping input order.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for the first appointment whose technician
    /// is missing from the index.
    pub fn expand_all(
        &self,
        appointments: Vec<Appointment>,
    ) -> Result<Vec<AppointmentView>, NotFoundError> {
        appointments
            .into_iter()
            .map(|appointment| {
                let technician = self
                    .0
                    .get(&appointment.technician_id)
                    .cloned()
                    .ok_or_else(|| NotFoundError {
                        entity: "Technician",
                        id: appointment.technician_id.to_string(),
                    })?;
                Ok(AppointmentView::expand(appointment, technician))
            })
            .collect()
    }
}

impl FromIterator<Technician> for TechnicianIndex {
    fn from_iter<I: IntoIterator<Item = Technician>>(iter: I) -> Self {
        Self(iter.into_iter().map(|tech| (tech.id, tech)).collect())
    }
}

/// `{"technicians": [...]}`
#[derive(Debug, Serialize)]
pub struct TechnicianList {
    pub technicians: Vec<TechnicianView>,
}

impl FromIterator<Technician> for TechnicianList {
    fn from_iter<I: IntoIterator<Item = Technician>>(iter: I) -> Self {
        Self {
            technicians: iter.into_iter().map(TechnicianView::from).collect(),
        }
    }
}

/// `{"service_appointments": [...]}`
#[derive(Debug, Serialize)]
pub struct AppointmentList {
    pub service_appointments: Vec<AppointmentView>,
}

/// `{"autos": [...]}`
#[derive(Debug, Serialize)]
pub struct AutomobileList {
    pub autos: Vec<AutomobileView>,
}

impl FromIterator<Automobile> for AutomobileList {
    fn from_iter<I: IntoIterator<Item = Automobile>>(iter: I) -> Self {
        Self {
            autos: iter.into_iter().map(AutomobileView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn technician(id: i64, name: &str) -> Technician {
        Technician {
            id: TechnicianId::new(id),
            name: name.to_string(),
            employee_number: 1000 + id,
        }
    }

    fn appointment(id: i64, technician_id: i64) -> Appointment {
        Appointment {
            id: AppointmentId::new(id),
            vin: 42,
            owner: "Grace".to_string(),
            date_time: Utc.with_ymd_and_hms(2022, 8, 2, 10, 0, 0).unwrap(),
            reason: "brakes".to_string(),
            finished: false,
            technician_id: TechnicianId::new(technician_id),
        }
    }

    #[test]
    fn should_render_technician_flat() {
        let json = serde_json::to_value(TechnicianView::from(technician(1, "Ada"))).unwrap();
        assert_eq!(json, json!({"id": 1, "name": "Ada", "employee_number": 1001}));
    }

    #[test]
    fn should_render_automobile_with_uppercase_vin() {
        let view = AutomobileView::from(Automobile {
            id: AutomobileId::new(3),
            vin: 987_654,
        });
        let json = serde_json::to_value(view).unwrap();
        assert_eq!(json, json!({"id": 3, "VIN": 987_654}));
    }

    #[test]
    fn should_nest_technician_inside_appointment() {
        let view = AppointmentView::expand(appointment(5, 1), technician(1, "Ada"));
        let json = serde_json::to_value(view).unwrap();
        assert_eq!(
            json,
            json!({
                "id": 5,
                "VIN": 42,
                "owner": "Grace",
                "date_time": "2022-08-02T10:00:00Z",
                "reason": "brakes",
                "finished": false,
                "technician": {"id": 1, "name": "Ada", "employee_number": 1001},
            })
        );
    }

    #[test]
    fn should_expand_each_appointment_with_its_own_technician() {
        let index: TechnicianIndex = [technician(1, "Ada"), technician(2, "Linus")]
            .into_iter()
            .collect();

        let views = index
            .expand_all(vec![appointment(10, 2), appointment(11, 1)])
            .unwrap();

        assert_eq!(views[0].technician.name, "Linus");
        assert_eq!(views[1].technician.name, "Ada");
    }

    #[test]
    fn should_report_dangling_technician_reference() {
        let index: TechnicianIndex = std::iter::once(technician(1, "Ada")).collect();
        let err = index.expand_all(vec![appointment(10, 7)]).unwrap_err();
        assert_eq!(err.id, "7");
    }

    #[test]
    fn should_wrap_lists_in_resource_envelopes() {
        let technicians: TechnicianList = std::iter::once(technician(1, "Ada")).collect();
        let autos: AutomobileList = std::iter::empty().collect();
        let appointments = AppointmentList {
            service_appointments: Vec::new(),
        };

        assert!(serde_json::to_value(technicians).unwrap()["technicians"].is_array());
        assert_eq!(serde_json::to_value(autos).unwrap(), json!({"autos": []}));
        assert_eq!(
            serde_json::to_value(appointments).unwrap(),
            json!({"service_appointments": []})
        );
    }
}
