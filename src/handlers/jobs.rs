use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::auth::policy;
use crate::db::jobs as job_db;
use crate::db::proposals as proposal_db;
use crate::error::ApiError;
use crate::events::{AuditEvent, EventSink, EventType};
use crate::models::jobs::{AssignWorker, CreateJob, JobIdBody};
use crate::models::proposals::SubmitProposal;
use crate::models::users::{Role, WorkerSummary};

/// POST /api/jobs/create — employer posts a new job, status Open.
pub async fn create_job(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateJob>,
) -> Result<HttpResponse, ApiError> {
    policy::require_role(&user.0, Role::Employer)?;
    policy::ensure_not_suspended(&user.0)?;

    let input = body.into_inner();
    if input.title.trim().is_empty()
        || input.description.trim().is_empty()
        || input.category.trim().is_empty()
        || input.district.trim().is_empty()
    {
        return Err(ApiError::invalid("Missing required job fields"));
    }

    let job = job_db::insert_job(db.get_ref(), input, user.0.id).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Job posted successfully",
        "job": job,
    })))
}

/// GET /api/jobs/open — worker browses all Open jobs with employer fields.
pub async fn get_open_jobs(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    policy::require_role(&user.0, Role::Worker)?;
    policy::ensure_not_suspended(&user.0)?;

    let jobs = job_db::list_open_with_employers(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "jobs": jobs })))
}

/// GET /api/jobs/my-jobs — employer's own jobs, each with its proposals.
pub async fn get_my_jobs(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    policy::require_role(&user.0, Role::Employer)?;
    policy::ensure_not_suspended(&user.0)?;

    let jobs = job_db::list_by_employer(db.get_ref(), user.0.id).await?;

    let mut enriched = Vec::with_capacity(jobs.len());
    for job in jobs {
        let proposals = proposal_db::list_for_job_with_workers(db.get_ref(), job.id).await?;
        enriched.push(serde_json::json!({
            "job": job,
            "proposals": proposals,
        }));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "jobs": enriched })))
}

/// GET /api/jobs/assigned — jobs assigned to the calling worker.
pub async fn get_assigned_jobs(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    policy::require_role(&user.0, Role::Worker)?;
    policy::ensure_not_suspended(&user.0)?;

    let jobs = job_db::list_assigned_to(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "jobs": jobs })))
}

/// POST /api/jobs/proposal — worker bids on an Open job.
///
/// Full gate order: role → suspension → active subscription. The duplicate
/// check here is a fast path; the (job_id, worker_id) unique index catches
/// concurrent duplicates and also maps to 409.
pub async fn submit_proposal(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    sink: web::Data<Arc<dyn EventSink>>,
    body: web::Json<SubmitProposal>,
) -> Result<HttpResponse, ApiError> {
    policy::require_role(&user.0, Role::Worker)?;
    policy::ensure_not_suspended(&user.0)?;
    policy::require_active_subscription(db.get_ref(), user.0.id).await?;

    let input = body.into_inner();
    if input.proposal_text.trim().is_empty() {
        return Err(ApiError::invalid("Proposal text is required"));
    }

    // A missing job and a closed job look the same to the caller.
    let job = job_db::get_job_by_id(db.get_ref(), input.job_id)
        .await?
        .ok_or_else(|| ApiError::invalid("Job not available"))?;
    job.ensure_open_for_proposals()?;

    if proposal_db::exists_for_job_and_worker(db.get_ref(), job.id, user.0.id).await? {
        return Err(ApiError::conflict("Proposal already submitted"));
    }

    let proposal =
        proposal_db::insert_proposal(db.get_ref(), job.id, user.0.id, input.proposal_text).await?;

    sink.publish(
        AuditEvent::new(EventType::ProposalSubmitted)
            .actor(user.0.subject.clone(), user.0.email.clone())
            .target(job.employer_id)
            .metadata(serde_json::json!({
                "jobId": job.id,
                "jobTitle": job.title,
                "workerName": user.0.full_name,
            })),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Proposal submitted successfully",
        "job": job,
        "proposal": proposal,
    })))
}

/// POST /api/jobs/assign — employer assigns a worker to their Open job.
///
/// The worker does not have to be a proposer; employers may hand-pick anyone.
pub async fn assign_worker(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    sink: web::Data<Arc<dyn EventSink>>,
    body: web::Json<AssignWorker>,
) -> Result<HttpResponse, ApiError> {
    policy::require_role(&user.0, Role::Employer)?;
    policy::ensure_not_suspended(&user.0)?;

    let input = body.into_inner();
    let job = job_db::get_job_by_id(db.get_ref(), input.job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    job.ensure_assignable(user.0.id)?;

    // The assignee must exist and be a worker.
    let worker = crate::db::users::get_user_by_id(db.get_ref(), input.worker_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Worker not found"))?;
    policy::require_role(&worker, Role::Worker)?;

    let job = job_db::assign_worker(db.get_ref(), job, worker.id).await?;

    sink.publish(
        AuditEvent::new(EventType::WorkerAssigned)
            .actor(user.0.subject.clone(), user.0.email.clone())
            .target(worker.id)
            .metadata(serde_json::json!({
                "jobId": job.id,
                "jobTitle": job.title,
                "employerName": user.0.full_name,
            })),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Worker assigned successfully",
        "job": job,
    })))
}

/// POST /api/jobs/complete — the assigned worker marks the job done.
pub async fn complete_job(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    sink: web::Data<Arc<dyn EventSink>>,
    body: web::Json<JobIdBody>,
) -> Result<HttpResponse, ApiError> {
    policy::require_role(&user.0, Role::Worker)?;
    policy::ensure_not_suspended(&user.0)?;

    let job = job_db::get_job_by_id(db.get_ref(), body.job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    job.ensure_completable_by(user.0.id)?;

    let job = job_db::complete(db.get_ref(), job).await?;

    sink.publish(
        AuditEvent::new(EventType::JobCompleted)
            .actor(user.0.subject.clone(), user.0.email.clone())
            .target(job.employer_id)
            .metadata(serde_json::json!({
                "jobId": job.id,
                "jobTitle": job.title,
                "workerName": user.0.full_name,
            })),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Job marked as completed",
        "job": job,
    })))
}

/// POST /api/jobs/cancel — employer cancels their job (Open or Assigned).
pub async fn cancel_job(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    sink: web::Data<Arc<dyn EventSink>>,
    body: web::Json<JobIdBody>,
) -> Result<HttpResponse, ApiError> {
    policy::require_role(&user.0, Role::Employer)?;
    policy::ensure_not_suspended(&user.0)?;

    let job = job_db::get_job_by_id(db.get_ref(), body.job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    job.ensure_cancellable(user.0.id)?;

    let job = job_db::cancel(db.get_ref(), job).await?;

    sink.publish(
        AuditEvent::new(EventType::JobCancelled)
            .actor(user.0.subject.clone(), user.0.email.clone())
            .metadata(serde_json::json!({
                "jobId": job.id,
                "jobTitle": job.title,
            })),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Job cancelled",
        "job": job,
    })))
}

/// GET /api/jobs/proposals/{job_id} — owning employer views a job's
/// proposals plus the assigned worker, if any.
pub async fn get_job_proposals(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    policy::require_role(&user.0, Role::Employer)?;
    policy::ensure_not_suspended(&user.0)?;

    let job_id = path.into_inner();
    let job = job_db::get_job_by_id(db.get_ref(), job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    job.ensure_owned_by(user.0.id)?;

    let proposals = proposal_db::list_for_job_with_workers(db.get_ref(), job_id).await?;

    let assigned_worker = match job.assigned_worker_id {
        Some(worker_id) => crate::db::users::get_user_by_id(db.get_ref(), worker_id)
            .await?
            .map(WorkerSummary::from),
        None => None,
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "proposals": proposals,
        "assignedWorker": assigned_worker,
    })))
}
