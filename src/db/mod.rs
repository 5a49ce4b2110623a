pub mod audit_logs;
pub mod jobs;
pub mod proposals;
pub mod subscriptions;
pub mod users;

use sea_orm::{Database, DatabaseConnection};

/// Create a SeaORM database connection pool.
pub async fn create_pool(database_url: &str) -> DatabaseConnection {
    Database::connect(database_url)
        .await
        .expect("Failed to connect to database")
}
