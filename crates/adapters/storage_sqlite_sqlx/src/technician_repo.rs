//! `SQLite` implementation of [`TechnicianRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use servicebay_app::ports::TechnicianRepository;
use servicebay_domain::error::{ConflictError, ServiceBayError};
use servicebay_domain::id::TechnicianId;
use servicebay_domain::technician::{NewTechnician, Technician};

use crate::error::{StorageError, is_foreign_key_violation};

/// Wrapper for converting database rows into domain [`Technician`].
struct Wrapper(Technician);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Technician> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let employee_number: i64 = row.try_get("employee_number")?;

        Ok(Self(Technician {
            id: TechnicianId::new(id),
            name,
            employee_number,
        }))
    }
}

const INSERT: &str = "INSERT INTO technicians (name, employee_number) VALUES (?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM technicians WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM technicians ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM technicians WHERE id = ?";

/// `SQLite`-backed technician repository.
pub struct SqliteTechnicianRepository {
    pool: SqlitePool,
}

impl SqliteTechnicianRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TechnicianRepository for SqliteTechnicianRepository {
    fn create(
        &self,
        technician: NewTechnician,
    ) -> impl Future<Output = Result<Technician, ServiceBayError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&technician.name)
                .bind(technician.employee_number)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(technician.with_id(TechnicianId::new(result.last_insert_rowid())))
        }
    }

    fn get_by_id(
        &self,
        id: TechnicianId,
    ) -> impl Future<Output = Result<Option<Technician>, ServiceBayError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Technician>, ServiceBayError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn delete(&self, id: TechnicianId) -> impl Future<Output = Result<(), ServiceBayError>> + Send {
        let pool = self.pool.clone();
        async move {
            match sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
            {
                Ok(_) => Ok(()),
                Err(err) if is_foreign_key_violation(&err) => Err(ConflictError::InUse {
                    entity: "Technician",
                    id: id.to_string(),
                }
                .into()),
                Err(err) => Err(StorageError::from(err).into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> (SqliteTechnicianRepository, SqlitePool) {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let pool = db.pool().clone();
        (SqliteTechnicianRepository::new(pool.clone()), pool)
    }

    fn test_technician(name: &str, employee_number: i64) -> NewTechnician {
        NewTechnician::builder()
            .name(name)
            .employee_number(employee_number)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_assign_id_and_retrieve_technician() {
        let (repo, _) = setup().await;

        let created = repo.create(test_technician("Ada", 1001)).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.employee_number, 1001);
    }

    #[tokio::test]
    async fn should_return_none_when_technician_not_found() {
        let (repo, _) = setup().await;
        let result = repo.get_by_id(TechnicianId::new(9999)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_technicians_in_creation_order() {
        let (repo, _) = setup().await;
        repo.create(test_technician("Ada", 1)).await.unwrap();
        repo.create(test_technician("Linus", 2)).await.unwrap();

        let names: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Ada", "Linus"]);
    }

    #[tokio::test]
    async fn should_delete_technician_when_unreferenced() {
        let (repo, _) = setup().await;
        let created = repo.create(test_technician("Ada", 1)).await.unwrap();

        repo.delete(created.id).await.unwrap();

        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_return_conflict_when_appointments_reference_technician() {
        let (repo, pool) = setup().await;
        let created = repo.create(test_technician("Ada", 1)).await.unwrap();
        sqlx::query(
            "INSERT INTO service_appointments (vin, owner, date_time, reason, technician_id) VALUES (1, 'Grace', '2022-08-02T10:00:00+00:00', 'brakes', ?)",
        )
        .bind(created.id.as_i64())
        .execute(&pool)
        .await
        .unwrap();

        let result = repo.delete(created.id).await;

        assert!(matches!(result, Err(ServiceBayError::Conflict(_))));
        assert!(repo.get_by_id(created.id).await.unwrap().is_some());
    }
}
