//! Storage-specific error type wrapping sqlx errors.

use servicebay_domain::error::ServiceBayError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for ServiceBayError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Extended result codes `SQLite` reports for a foreign key refusal:
/// `SQLITE_CONSTRAINT_FOREIGNKEY`, and `SQLITE_CONSTRAINT_TRIGGER` when the
/// refusal comes from an `ON DELETE RESTRICT` action.
const FOREIGN_KEY_CODES: [&str; 2] = ["787", "1811"];

/// Whether `err` is `SQLite` refusing a write because of a foreign key.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    let sqlx::Error::Database(db) = err else {
        return false;
    };
    db.is_foreign_key_violation()
        || db
            .code()
            .is_some_and(|code| FOREIGN_KEY_CODES.iter().any(|fk| code == *fk))
}
