mod callable;
pub mod db;
pub mod products;
pub mod token;
pub mod user;

pub use callable::*;

use crate::configuration::DatabaseSettings;
use crate::store::PgProductStore;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

async fn connect(database: &DatabaseSettings) -> Result<PgProductStore, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(Duration::from_secs(database.acquire_timeout_secs))
        .connect(&database.connection_string())
        .await?;

    Ok(PgProductStore::new(pool))
}
