//! `SQLite` implementation of [`AppointmentRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use servicebay_app::ports::AppointmentRepository;
use servicebay_domain::appointment::{Appointment, NewAppointment};
use servicebay_domain::error::ServiceBayError;
use servicebay_domain::id::{AppointmentId, TechnicianId};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Appointment`].
struct Wrapper(Appointment);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Appointment> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let vin: i64 = row.try_get("vin")?;
        let owner: String = row.try_get("owner")?;
        let date_time: String = row.try_get("date_time")?;
        let reason: String = row.try_get("reason")?;
        let finished: bool = row.try_get("finished")?;
        let technician_id: i64 = row.try_get("technician_id")?;

        let date_time = chrono::DateTime::parse_from_rfc3339(&date_time)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(Appointment {
            id: AppointmentId::new(id),
            vin,
            owner,
            date_time,
            reason,
            finished,
            technician_id: TechnicianId::new(technician_id),
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO service_appointments (vin, owner, date_time, reason, finished, technician_id)
    VALUES (?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM service_appointments WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM service_appointments ORDER BY id";
const SELECT_FINISHED: &str =
    "SELECT * FROM service_appointments WHERE finished = 1 ORDER BY id";
const UPDATE: &str = r"
    UPDATE service_appointments
    SET vin = ?, owner = ?, date_time = ?, reason = ?, finished = ?, technician_id = ?
    WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM service_appointments WHERE id = ?";

/// `SQLite`-backed appointment repository.
pub struct SqliteAppointmentRepository {
    pool: SqlitePool,
}

impl SqliteAppointmentRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AppointmentRepository for SqliteAppointmentRepository {
    fn create(
        &self,
        appointment: NewAppointment,
    ) -> impl Future<Output = Result<Appointment, ServiceBayError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(appointment.vin)
                .bind(&appointment.owner)
                .bind(appointment.date_time.to_rfc3339())
                .bind(&appointment.reason)
                .bind(appointment.finished)
                .bind(appointment.technician_id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(appointment.with_id(AppointmentId::new(result.last_insert_rowid())))
        }
    }

    fn get_by_id(
        &self,
        id: AppointmentId,
    ) -> impl Future<Output = Result<Option<Appointment>, ServiceBayError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Appointment>, ServiceBayError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn get_finished(
        &self,
    ) -> impl Future<Output = Result<Vec<Appointment>, ServiceBayError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_FINISHED)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        appointment: Appointment,
    ) -> impl Future<Output = Result<Appointment, ServiceBayError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(appointment.vin)
                .bind(&appointment.owner)
                .bind(appointment.date_time.to_rfc3339())
                .bind(&appointment.reason)
                .bind(appointment.finished)
                .bind(appointment.technician_id.as_i64())
                .bind(appointment.id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(appointment)
        }
    }

    fn delete(
        &self,
        id: AppointmentId,
    ) -> impl Future<Output = Result<(), ServiceBayError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
