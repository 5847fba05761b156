pub mod error;
pub mod repository;

pub use error::RepositoryError;

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::StorageConfig;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the shared pool. `DATABASE_URL`, when set, wins over the discrete
/// storage settings.
pub async fn create_pool(storage: &StorageConfig) -> Result<PgPool, sqlx::Error> {
    let options = PgPoolOptions::new()
        .max_connections(storage.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT);

    match std::env::var("DATABASE_URL") {
        Ok(database_url) => options.connect(&database_url).await,
        Err(_) => options.connect_with(connect_options(storage)).await,
    }
}

fn connect_options(storage: &StorageConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&storage.host)
        .port(storage.port)
        .username(&storage.user)
        .password(&storage.password)
        .database(&storage.dbname)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_options_from_storage() {
        let storage = StorageConfig {
            host: "db.internal".to_string(),
            port: 6543,
            user: "bus".to_string(),
            password: "secret".to_string(),
            dbname: "transit".to_string(),
            max_connections: 5,
        };

        let options = connect_options(&storage);

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "bus");
        assert_eq!(options.get_database(), Some("transit"));
    }
}
