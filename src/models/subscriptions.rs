use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `subscriptions` table.
///
/// Single-slot ledger: one row per worker (`worker_id` unique), overwritten
/// on each reactivation. Expiry is applied lazily at read time; the stored
/// `is_active` flag is only mutated by activation and admin deactivation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub worker_id: Uuid,
    pub is_active: bool,
    pub started_at: Option<DateTimeUtc>,
    pub expires_at: Option<DateTimeUtc>,
    /// PayChangu transaction reference.
    pub transaction_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::WorkerId",
        to = "super::users::Column::Id"
    )]
    Worker,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Worker.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Effective activity at `now`: the stored flag AND an unexpired window.
    /// Reading never mutates the row.
    pub fn is_currently_active(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.is_some_and(|exp| now < exp)
    }
}

/// Effective status for a worker who may not have a ledger row at all.
pub fn is_currently_active(sub: Option<&Model>, now: DateTime<Utc>) -> bool {
    sub.is_some_and(|s| s.is_currently_active(now))
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPayment {
    pub transaction_id: String,
}

/// Body of `GET /api/subscription/status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTimeUtc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTimeUtc>,
}

impl SubscriptionStatus {
    pub fn inactive() -> Self {
        Self {
            is_active: false,
            started_at: None,
            expires_at: None,
        }
    }

    pub fn from_row(sub: &Model, now: DateTime<Utc>) -> Self {
        if !sub.is_currently_active(now) {
            return Self::inactive();
        }
        Self {
            is_active: true,
            started_at: sub.started_at,
            expires_at: sub.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn row(is_active: bool, expires_in: Duration) -> Model {
        let now = Utc::now();
        Model {
            id: Uuid::new_v4(),
            worker_id: Uuid::new_v4(),
            is_active,
            started_at: Some(now - Duration::days(10)),
            expires_at: Some(now + expires_in),
            transaction_id: Some("tx-123".to_string()),
            created_at: now - Duration::days(10),
            updated_at: None,
        }
    }

    #[test]
    fn active_until_just_before_expiry() {
        let sub = row(true, Duration::seconds(10));
        assert!(sub.is_currently_active(Utc::now()));
    }

    #[test]
    fn inactive_one_second_after_expiry() {
        let sub = row(true, Duration::seconds(-1));
        // The stored flag still says active; the read says otherwise.
        assert!(sub.is_active);
        assert!(!sub.is_currently_active(Utc::now()));
    }

    #[test]
    fn deactivated_row_is_inactive_even_inside_window() {
        let sub = row(false, Duration::days(20));
        assert!(!sub.is_currently_active(Utc::now()));
    }

    #[test]
    fn missing_row_is_inactive() {
        assert!(!is_currently_active(None, Utc::now()));
    }

    #[test]
    fn status_response_hides_window_when_expired() {
        let sub = row(true, Duration::seconds(-5));
        let status = SubscriptionStatus::from_row(&sub, Utc::now());
        assert!(!status.is_active);
        assert!(status.started_at.is_none());
        assert!(status.expires_at.is_none());
    }
}
