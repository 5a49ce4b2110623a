use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `audit_logs` table. Append-only: the application
/// inserts and queries, never updates or deletes.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Event slug, e.g. `admin/worker.suspended`.
    pub event_type: String,
    pub actor_subject: Option<String>,
    pub actor_email: Option<String>,
    pub target_user_id: Option<Uuid>,
    pub metadata: Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Query string for `GET /api/admin/audit-logs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogQuery {
    /// Exact slug, or a category wildcard like `admin/*`.
    pub event_type: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
