use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("The requested data was not found in the database.")]
    NotFound,

    #[error("Season {0} does not exist.")]
    SeasonNotFound(i32),

    #[error("The operation conflicts with existing data: {0}")]
    Conflict(String),
}

/// Postgres error codes that signal a data conflict rather than a failure:
/// 23503 foreign_key_violation, 23505 unique_violation, 23514 check_violation.
const CONFLICT_CODES: [&str; 3] = ["23503", "23505", "23514"];

/// Maps constraint violations to `Conflict` and `RowNotFound` to `NotFound`;
/// everything else stays a query error.
pub fn classify(err: sqlx::Error) -> DbError {
    if let sqlx::Error::RowNotFound = err {
        return DbError::NotFound;
    }
    if let sqlx::Error::Database(ref db_err) = err {
        if let Some(code) = db_err.code() {
            if CONFLICT_CODES.contains(&code.as_ref()) {
                return DbError::Conflict(db_err.message().to_string());
            }
        }
    }
    DbError::QueryError(err)
}
