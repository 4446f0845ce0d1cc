//! `SQLite` implementation of [`AutomobileRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use servicebay_app::ports::AutomobileRepository;
use servicebay_domain::automobile::Automobile;
use servicebay_domain::error::ServiceBayError;
use servicebay_domain::id::AutomobileId;

use crate::error::StorageError;

struct Wrapper(Automobile);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let vin: i64 = row.try_get("vin")?;

        Ok(Self(Automobile {
            id: AutomobileId::new(id),
            vin,
        }))
    }
}

const INSERT: &str = "INSERT INTO automobiles (vin) VALUES (?)";
const SELECT_ALL: &str = "SELECT * FROM automobiles ORDER BY id";

/// `SQLite`-backed inventory mirror.
pub struct SqliteAutomobileRepository {
    pool: SqlitePool,
}

impl SqliteAutomobileRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AutomobileRepository for SqliteAutomobileRepository {
    fn create(&self, vin: i64) -> impl Future<Output = Result<Automobile, ServiceBayError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(vin)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Automobile {
                id: AutomobileId::new(result.last_insert_rowid()),
                vin,
            })
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Automobile>, ServiceBayError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
