pub use sea_orm_migration::prelude::*;

mod m20260310_000001_create_users_table;
mod m20260310_000002_create_jobs_table;
mod m20260310_000003_create_proposals_table;
mod m20260310_000004_create_subscriptions_table;
mod m20260310_000005_create_audit_logs_table;
mod m20260315_000001_add_query_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260310_000001_create_users_table::Migration),
            Box::new(m20260310_000002_create_jobs_table::Migration),
            Box::new(m20260310_000003_create_proposals_table::Migration),
            Box::new(m20260310_000004_create_subscriptions_table::Migration),
            Box::new(m20260310_000005_create_audit_logs_table::Migration),
            Box::new(m20260315_000001_add_query_indexes::Migration),
        ]
    }
}
