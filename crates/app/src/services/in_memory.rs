//! In-memory port implementations shared by the service tests.
//!
//! All repositories created from one [`InMemoryStore`] see the same data, so
//! the technician repository can refuse deletes the way a relational store
//! with a restricting foreign key would.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use servicebay_domain::appointment::{Appointment, NewAppointment};
use servicebay_domain::automobile::Automobile;
use servicebay_domain::error::{ConflictError, ServiceBayError};
use servicebay_domain::id::{AppointmentId, AutomobileId, TechnicianId};
use servicebay_domain::technician::{NewTechnician, Technician};

use crate::ports::{AppointmentRepository, AutomobileRepository, TechnicianRepository};

#[derive(Default)]
struct Tables {
    next_id: i64,
    technicians: BTreeMap<TechnicianId, Technician>,
    automobiles: BTreeMap<AutomobileId, Automobile>,
    appointments: BTreeMap<AppointmentId, Appointment>,
}

impl Tables {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn technicians(&self) -> InMemoryTechnicianRepo {
        InMemoryTechnicianRepo(self.clone())
    }

    pub fn automobiles(&self) -> InMemoryAutomobileRepo {
        InMemoryAutomobileRepo(self.clone())
    }

    pub fn appointments(&self) -> InMemoryAppointmentRepo {
        InMemoryAppointmentRepo(self.clone())
    }
}

pub struct InMemoryTechnicianRepo(InMemoryStore);
pub struct InMemoryAutomobileRepo(InMemoryStore);
pub struct InMemoryAppointmentRepo(InMemoryStore);

impl TechnicianRepository for InMemoryTechnicianRepo {
    fn create(
        &self,
        technician: NewTechnician,
    ) -> impl Future<Output = Result<Technician, ServiceBayError>> + Send {
        let mut tables = self.0.tables.lock().unwrap();
        let id = TechnicianId::new(tables.allocate());
        let technician = technician.with_id(id);
        tables.technicians.insert(id, technician.clone());
        async { Ok(technician) }
    }

    fn get_by_id(
        &self,
        id: TechnicianId,
    ) -> impl Future<Output = Result<Option<Technician>, ServiceBayError>> + Send {
        let result = self.0.tables.lock().unwrap().technicians.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Technician>, ServiceBayError>> + Send {
        let result: Vec<Technician> = self
            .0
            .tables
            .lock()
            .unwrap()
            .technicians
            .values()
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn delete(&self, id: TechnicianId) -> impl Future<Output = Result<(), ServiceBayError>> + Send {
        let mut tables = self.0.tables.lock().unwrap();
        let in_use = tables
            .appointments
            .values()
            .any(|appt| appt.technician_id == id);
        let result = if in_use {
            Err(ConflictError::InUse {
                entity: "Technician",
                id: id.to_string(),
            }
            .into())
        } else {
            tables.technicians.remove(&id);
            Ok(())
        };
        async { result }
    }
}

impl AutomobileRepository for InMemoryAutomobileRepo {
    fn create(&self, vin: i64) -> impl Future<Output = Result<Automobile, ServiceBayError>> + Send {
        let mut tables = self.0.tables.lock().unwrap();
        let id = AutomobileId::new(tables.allocate());
        let automobile = Automobile { id, vin };
        tables.automobiles.insert(id, automobile);
        async move { Ok(automobile) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Automobile>, ServiceBayError>> + Send {
        let result: Vec<Automobile> = self
            .0
            .tables
            .lock()
            .unwrap()
            .automobiles
            .values()
            .copied()
            .collect();
        async { Ok(result) }
    }
}

impl AppointmentRepository for InMemoryAppointmentRepo {
    fn create(
        &self,
        appointment: NewAppointment,
    ) -> impl Future<Output = Result<Appointment, ServiceBayError>> + Send {
        let mut tables = self.0.tables.lock().unwrap();
        let id = AppointmentId::new(tables.allocate());
        let appointment = appointment.with_id(id);
        tables.appointments.insert(id, appointment.clone());
        async { Ok(appointment) }
    }

    fn get_by_id(
        &self,
        id: AppointmentId,
    ) -> impl Future<Output = Result<Option<Appointment>, ServiceBayError>> + Send {
        let result = self.0.tables.lock().unwrap().appointments.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Appointment>, ServiceBayError>> + Send {
        let result: Vec<Appointment> = self
            .0
            .tables
            .lock()
            .unwrap()
            .appointments
            .values()
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn get_finished(
        &self,
    ) -> impl Future<Output = Result<Vec<Appointment>, ServiceBayError>> + Send {
        let result: Vec<Appointment> = self
            .0
            .tables
            .lock()
            .unwrap()
            .appointments
            .values()
            .filter(|appt| appt.finished)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn update(
        &self,
        appointment: Appointment,
    ) -> impl Future<Output = Result<Appointment, ServiceBayError>> + Send {
        self.0
            .tables
            .lock()
            .unwrap()
            .appointments
            .insert(appointment.id, appointment.clone());
        async { Ok(appointment) }
    }

    fn delete(
        &self,
        id: AppointmentId,
    ) -> impl Future<Output = Result<(), ServiceBayError>> + Send {
        self.0.tables.lock().unwrap().appointments.remove(&id);
        async { Ok(()) }
    }
}
