use sqlx::postgres::PgDatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Resource not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Flattens a sqlx error into one log line, including the PostgreSQL
/// diagnostic fields when the server reported them.
pub fn error_details(err: &sqlx::Error) -> String {
    let Some(db_err) = err.as_database_error() else {
        return err.to_string();
    };

    match db_err.try_downcast_ref::<PgDatabaseError>() {
        Some(pg_err) => format!(
            "SQL Error: {}, Detail: {}, Where: {}, Code: {}",
            pg_err.message(),
            pg_err.detail().unwrap_or_default(),
            pg_err.r#where().unwrap_or_default(),
            pg_err.code(),
        ),
        None => db_err.message().to_string(),
    }
}

/// `map_err` adapter: logs the failure with the operation name, then wraps it.
pub(crate) fn log_db(operation: &'static str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |err| {
        tracing::error!(operation, "{}", error_details(&err));
        RepositoryError::Database(err)
    }
}
