use actix_web::{HttpResponse, web};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::auth::policy;
use crate::config::Config;
use crate::db::{
    audit_logs as audit_db, jobs as job_db, proposals as proposal_db,
    subscriptions as subscription_db, users as user_db,
};
use crate::error::ApiError;
use crate::events::{AuditEvent, EventSink, EventType};
use crate::models::audit_logs::AuditLogQuery;
use crate::models::jobs::JobStatus;
use crate::models::users::{Role, UserResponse};

/// GET /api/admin/workers
pub async fn get_workers(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    policy::require_admin(&user.0, &config.admin_email)?;

    let workers: Vec<UserResponse> = user_db::list_by_role(db.get_ref(), Role::Worker)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "workers": workers })))
}

/// GET /api/admin/employers
pub async fn get_employers(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    policy::require_admin(&user.0, &config.admin_email)?;

    let employers: Vec<UserResponse> = user_db::list_by_role(db.get_ref(), Role::Employer)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "employers": employers })))
}

/// GET /api/admin/jobs — every job with employer display fields.
pub async fn get_jobs(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    policy::require_admin(&user.0, &config.admin_email)?;

    let jobs = job_db::list_all_with_employers(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "jobs": jobs })))
}

/// GET /api/admin/subscriptions — the whole ledger with worker contacts.
pub async fn get_subscriptions(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    policy::require_admin(&user.0, &config.admin_email)?;

    let rows = subscription_db::list_all_with_workers(db.get_ref()).await?;
    let subscriptions: Vec<serde_json::Value> = rows
        .into_iter()
        .map(|(sub, worker)| {
            serde_json::json!({
                "subscription": sub,
                "worker": worker.map(UserResponse::from),
            })
        })
        .collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "subscriptions": subscriptions })))
}

/// PATCH /api/admin/subscriptions/deactivate/{subscription_id}
pub async fn deactivate_subscription(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    sink: web::Data<Arc<dyn EventSink>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    policy::require_admin(&user.0, &config.admin_email)?;

    let subscription_id = path.into_inner();
    let subscription = subscription_db::deactivate(db.get_ref(), subscription_id).await?;

    sink.publish(
        AuditEvent::new(EventType::SubscriptionDeactivated)
            .actor(user.0.subject.clone(), user.0.email.clone())
            .target(subscription.worker_id)
            .metadata(serde_json::json!({ "subscriptionId": subscription_id })),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Subscription deactivated",
        "subscription": subscription,
    })))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuspendBody {
    pub reason: Option<String>,
}

/// POST /api/admin/suspend/{user_id} — suspend a worker account. The
/// suspension gate then rejects every mutating route for that account.
pub async fn suspend_user(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    sink: web::Data<Arc<dyn EventSink>>,
    path: web::Path<Uuid>,
    body: Option<web::Json<SuspendBody>>,
) -> Result<HttpResponse, ApiError> {
    policy::require_admin(&user.0, &config.admin_email)?;

    let target_id = path.into_inner();
    let reason = body.and_then(|b| b.into_inner().reason);

    // Suspension is a worker-directed moderation action.
    let target = user_db::get_user_by_id(db.get_ref(), target_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    policy::require_role(&target, Role::Worker)
        .map_err(|_| ApiError::invalid("Only worker accounts can be suspended"))?;

    let suspended = user_db::suspend(db.get_ref(), target_id, reason.clone(), &user.0.email).await?;

    sink.publish(
        AuditEvent::new(EventType::WorkerSuspended)
            .actor(user.0.subject.clone(), user.0.email.clone())
            .target(target_id)
            .metadata(serde_json::json!({ "reason": reason })),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Worker suspended",
        "user": UserResponse::from(suspended),
    })))
}

/// POST /api/admin/unsuspend/{user_id}
pub async fn unsuspend_user(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    sink: web::Data<Arc<dyn EventSink>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    policy::require_admin(&user.0, &config.admin_email)?;

    let target_id = path.into_inner();
    let restored = user_db::unsuspend(db.get_ref(), target_id).await?;

    sink.publish(
        AuditEvent::new(EventType::WorkerUnsuspended)
            .actor(user.0.subject.clone(), user.0.email.clone())
            .target(target_id),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Worker unsuspended",
        "user": UserResponse::from(restored),
    })))
}

/// GET /api/admin/audit-logs?eventType&page&limit — newest first. The
/// eventType filter accepts an exact slug or a category wildcard (`admin/*`).
pub async fn get_audit_logs(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    query: web::Query<AuditLogQuery>,
) -> Result<HttpResponse, ApiError> {
    policy::require_admin(&user.0, &config.admin_email)?;

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).min(100);

    let (logs, total) =
        audit_db::list(db.get_ref(), query.event_type.as_deref(), page, limit).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "logs": logs,
        "page": page,
        "limit": limit,
        "total": total,
    })))
}

/// GET /api/admin/analytics — platform-wide counters for the dashboard.
pub async fn get_analytics(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    policy::require_admin(&user.0, &config.admin_email)?;

    let db = db.get_ref();
    let workers = user_db::count_by_role(db, Role::Worker).await?;
    let employers = user_db::count_by_role(db, Role::Employer).await?;
    let suspended = user_db::count_suspended(db).await?;
    let open_jobs = job_db::count_by_status(db, JobStatus::Open).await?;
    let assigned_jobs = job_db::count_by_status(db, JobStatus::Assigned).await?;
    let completed_jobs = job_db::count_by_status(db, JobStatus::Completed).await?;
    let cancelled_jobs = job_db::count_by_status(db, JobStatus::Cancelled).await?;
    let active_subscriptions = subscription_db::count_active(db, Utc::now()).await?;
    let proposals = proposal_db::count_all(db).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "workers": workers,
        "employers": employers,
        "suspendedUsers": suspended,
        "jobs": {
            "open": open_jobs,
            "assigned": assigned_jobs,
            "completed": completed_jobs,
            "cancelled": cancelled_jobs,
        },
        "activeSubscriptions": active_subscriptions,
        "proposals": proposals,
    })))
}
