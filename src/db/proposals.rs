use sea_orm::*;
use uuid::Uuid;

use crate::models::proposals::{self, ProposalWithWorker};
use crate::models::users;

/// Fast-path duplicate check. The unique index on (job_id, worker_id) is
/// the real guarantee; a concurrent duplicate that slips past this read
/// still fails at insert time and is mapped to 409.
pub async fn exists_for_job_and_worker(
    db: &DatabaseConnection,
    job_id: Uuid,
    worker_id: Uuid,
) -> Result<bool, DbErr> {
    let existing = proposals::Entity::find()
        .filter(proposals::Column::JobId.eq(job_id))
        .filter(proposals::Column::WorkerId.eq(worker_id))
        .one(db)
        .await?;
    Ok(existing.is_some())
}

pub async fn insert_proposal(
    db: &DatabaseConnection,
    job_id: Uuid,
    worker_id: Uuid,
    proposal_text: String,
) -> Result<proposals::Model, DbErr> {
    let new_proposal = proposals::ActiveModel {
        id: Set(Uuid::new_v4()),
        job_id: Set(job_id),
        worker_id: Set(worker_id),
        proposal_text: Set(proposal_text),
        created_at: Set(chrono::Utc::now()),
    };

    new_proposal.insert(db).await
}

/// A job's proposals joined with worker display fields, oldest first.
pub async fn list_for_job_with_workers(
    db: &DatabaseConnection,
    job_id: Uuid,
) -> Result<Vec<ProposalWithWorker>, DbErr> {
    let rows = proposals::Entity::find()
        .filter(proposals::Column::JobId.eq(job_id))
        .find_also_related(users::Entity)
        .order_by_asc(proposals::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(proposal, worker)| ProposalWithWorker {
            proposal,
            worker: worker.map(Into::into),
        })
        .collect())
}

pub async fn count_all(db: &DatabaseConnection) -> Result<u64, DbErr> {
    proposals::Entity::find().count(db).await
}
