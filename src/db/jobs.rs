use sea_orm::*;
use uuid::Uuid;

use crate::models::jobs::{self, CreateJob, JobStatus, JobWithEmployer};
use crate::models::users;

/// Insert a new job (always starts Open, never assigned).
pub async fn insert_job(
    db: &DatabaseConnection,
    input: CreateJob,
    employer_id: Uuid,
) -> Result<jobs::Model, DbErr> {
    let new_job = jobs::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        category: Set(input.category),
        district: Set(input.district),
        area: Set(input.area),
        employer_id: Set(employer_id),
        status: Set(JobStatus::Open),
        assigned_worker_id: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_job.insert(db).await
}

pub async fn get_job_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<jobs::Model>, DbErr> {
    jobs::Entity::find_by_id(id).one(db).await
}

/// Open jobs joined with their employer's display fields, newest first.
pub async fn list_open_with_employers(
    db: &DatabaseConnection,
) -> Result<Vec<JobWithEmployer>, DbErr> {
    let rows = jobs::Entity::find()
        .filter(jobs::Column::Status.eq(JobStatus::Open))
        .find_also_related(users::Entity)
        .order_by_desc(jobs::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(job, employer)| JobWithEmployer {
            job,
            employer: employer.map(Into::into),
        })
        .collect())
}

pub async fn list_by_employer(
    db: &DatabaseConnection,
    employer_id: Uuid,
) -> Result<Vec<jobs::Model>, DbErr> {
    jobs::Entity::find()
        .filter(jobs::Column::EmployerId.eq(employer_id))
        .order_by_desc(jobs::Column::CreatedAt)
        .all(db)
        .await
}

/// Jobs currently or previously assigned to a worker, with employer fields.
pub async fn list_assigned_to(
    db: &DatabaseConnection,
    worker_id: Uuid,
) -> Result<Vec<JobWithEmployer>, DbErr> {
    let rows = jobs::Entity::find()
        .filter(jobs::Column::AssignedWorkerId.eq(worker_id))
        .find_also_related(users::Entity)
        .order_by_desc(jobs::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(job, employer)| JobWithEmployer {
            job,
            employer: employer.map(Into::into),
        })
        .collect())
}

/// All jobs with employer fields, for the admin back-office.
pub async fn list_all_with_employers(
    db: &DatabaseConnection,
) -> Result<Vec<JobWithEmployer>, DbErr> {
    let rows = jobs::Entity::find()
        .find_also_related(users::Entity)
        .order_by_desc(jobs::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(job, employer)| JobWithEmployer {
            job,
            employer: employer.map(Into::into),
        })
        .collect())
}

/// Persist the Open → Assigned transition.
pub async fn assign_worker(
    db: &DatabaseConnection,
    job: jobs::Model,
    worker_id: Uuid,
) -> Result<jobs::Model, DbErr> {
    let mut active: jobs::ActiveModel = job.into();
    active.status = Set(JobStatus::Assigned);
    active.assigned_worker_id = Set(Some(worker_id));
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await
}

/// Persist the Assigned → Completed transition.
pub async fn complete(db: &DatabaseConnection, job: jobs::Model) -> Result<jobs::Model, DbErr> {
    let mut active: jobs::ActiveModel = job.into();
    active.status = Set(JobStatus::Completed);
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await
}

/// Persist cancellation. The worker reference is cleared so the assignment
/// invariant (`assigned_worker_id` ⇔ Assigned/Completed) keeps holding.
pub async fn cancel(db: &DatabaseConnection, job: jobs::Model) -> Result<jobs::Model, DbErr> {
    let mut active: jobs::ActiveModel = job.into();
    active.status = Set(JobStatus::Cancelled);
    active.assigned_worker_id = Set(None);
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await
}

pub async fn count_by_status(db: &DatabaseConnection, status: JobStatus) -> Result<u64, DbErr> {
    jobs::Entity::find()
        .filter(jobs::Column::Status.eq(status))
        .count(db)
        .await
}
