use chrono::{DateTime, Months, Utc};
use sea_orm::*;
use uuid::Uuid;

use crate::models::subscriptions;
use crate::models::users;

pub async fn find_by_worker(
    db: &DatabaseConnection,
    worker_id: Uuid,
) -> Result<Option<subscriptions::Model>, DbErr> {
    subscriptions::Entity::find()
        .filter(subscriptions::Column::WorkerId.eq(worker_id))
        .one(db)
        .await
}

/// Activate (or re-activate) a worker's subscription after a verified
/// payment. Single-slot ledger: the worker's existing row is overwritten;
/// a worker only ever has one row, created here on first activation.
pub async fn activate(
    db: &DatabaseConnection,
    worker_id: Uuid,
    transaction_id: String,
    now: DateTime<Utc>,
) -> Result<subscriptions::Model, DbErr> {
    let expires_at = now
        .checked_add_months(Months::new(1))
        .ok_or_else(|| DbErr::Custom("Subscription expiry out of range".to_string()))?;

    match find_by_worker(db, worker_id).await? {
        Some(existing) => {
            let mut active: subscriptions::ActiveModel = existing.into();
            active.is_active = Set(true);
            active.started_at = Set(Some(now));
            active.expires_at = Set(Some(expires_at));
            active.transaction_id = Set(Some(transaction_id));
            active.updated_at = Set(Some(now));
            active.update(db).await
        }
        None => {
            let new_sub = subscriptions::ActiveModel {
                id: Set(Uuid::new_v4()),
                worker_id: Set(worker_id),
                is_active: Set(true),
                started_at: Set(Some(now)),
                expires_at: Set(Some(expires_at)),
                transaction_id: Set(Some(transaction_id)),
                created_at: Set(now),
                updated_at: Set(None),
            };
            new_sub.insert(db).await
        }
    }
}

/// Admin-triggered force-deactivation. The window fields are left intact
/// for the record; only the flag flips.
pub async fn deactivate(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<subscriptions::Model, DbErr> {
    let sub = subscriptions::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Subscription not found".to_string()))?;

    let mut active: subscriptions::ActiveModel = sub.into();
    active.is_active = Set(false);
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await
}

/// All ledger rows joined with worker contact fields, for the back-office.
pub async fn list_all_with_workers(
    db: &DatabaseConnection,
) -> Result<Vec<(subscriptions::Model, Option<users::Model>)>, DbErr> {
    subscriptions::Entity::find()
        .find_also_related(users::Entity)
        .order_by_desc(subscriptions::Column::CreatedAt)
        .all(db)
        .await
}

/// Rows that are effectively active right now (flag set, window unexpired).
pub async fn count_active(db: &DatabaseConnection, now: DateTime<Utc>) -> Result<u64, DbErr> {
    subscriptions::Entity::find()
        .filter(subscriptions::Column::IsActive.eq(true))
        .filter(subscriptions::Column::ExpiresAt.gt(now))
        .count(db)
        .await
}
