use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// Job lifecycle status, stored as the uppercase strings the clients expect.
///
/// Transitions: Open → Assigned → Completed; Cancelled is terminal and
/// reachable from Open or Assigned (employer-initiated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum JobStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "ASSIGNED")]
    Assigned,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

/// SeaORM entity for the `jobs` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    pub district: String,
    pub area: Option<String>,
    pub employer_id: Uuid,
    pub status: JobStatus,
    /// Invariant: `Some` exactly when status is Assigned or Completed.
    pub assigned_worker_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EmployerId",
        to = "super::users::Column::Id"
    )]
    Employer,
    #[sea_orm(has_many = "super::proposals::Entity")]
    Proposals,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employer.def()
    }
}

impl Related<super::proposals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── State-machine guards ──
//
// Pure checks over a loaded job; handlers call these before persisting a
// transition so every rejection carries the right taxonomy variant.

impl Model {
    /// Proposals are only accepted while the job is Open.
    pub fn ensure_open_for_proposals(&self) -> Result<(), ApiError> {
        if self.status != JobStatus::Open {
            return Err(ApiError::invalid("Job is not open for proposals"));
        }
        Ok(())
    }

    /// Only the owning employer may assign, and only from Open. The chosen
    /// worker does not have to be a proposer — employers may hand-pick.
    pub fn ensure_assignable(&self, employer_id: Uuid) -> Result<(), ApiError> {
        if self.employer_id != employer_id {
            return Err(ApiError::forbidden("You do not own this job"));
        }
        if self.status != JobStatus::Open {
            return Err(ApiError::invalid("Only open jobs can be assigned"));
        }
        Ok(())
    }

    /// Only the assigned worker may complete, and only from Assigned.
    pub fn ensure_completable_by(&self, worker_id: Uuid) -> Result<(), ApiError> {
        if self.assigned_worker_id != Some(worker_id) {
            return Err(ApiError::forbidden("You are not assigned to this job"));
        }
        if self.status != JobStatus::Assigned {
            return Err(ApiError::invalid("Only assigned jobs can be completed"));
        }
        Ok(())
    }

    /// Only the owning employer may cancel, from Open or Assigned.
    pub fn ensure_cancellable(&self, employer_id: Uuid) -> Result<(), ApiError> {
        if self.employer_id != employer_id {
            return Err(ApiError::forbidden("You do not own this job"));
        }
        match self.status {
            JobStatus::Open | JobStatus::Assigned => Ok(()),
            _ => Err(ApiError::invalid("Job can no longer be cancelled")),
        }
    }

    /// Only the owning employer may view a job's proposals.
    pub fn ensure_owned_by(&self, employer_id: Uuid) -> Result<(), ApiError> {
        if self.employer_id != employer_id {
            return Err(ApiError::forbidden("You do not own this job"));
        }
        Ok(())
    }

    /// The assignment invariant: a worker reference exists exactly when the
    /// job is Assigned or Completed.
    pub fn assignment_invariant_holds(&self) -> bool {
        match self.status {
            JobStatus::Assigned | JobStatus::Completed => self.assigned_worker_id.is_some(),
            JobStatus::Open | JobStatus::Cancelled => self.assigned_worker_id.is_none(),
        }
    }
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJob {
    pub title: String,
    pub description: String,
    pub category: String,
    pub district: String,
    pub area: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignWorker {
    pub job_id: Uuid,
    pub worker_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobIdBody {
    pub job_id: Uuid,
}

/// A job joined with its employer's display fields, for worker-facing lists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWithEmployer {
    #[serde(flatten)]
    pub job: Model,
    pub employer: Option<super::users::EmployerSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    fn job(status: JobStatus, employer: Uuid, assigned: Option<Uuid>) -> Model {
        Model {
            id: Uuid::new_v4(),
            title: "Fix fence".to_string(),
            description: "Wooden fence, two panels down".to_string(),
            category: "carpentry".to_string(),
            district: "Lilongwe".to_string(),
            area: None,
            employer_id: employer,
            status,
            assigned_worker_id: assigned,
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn proposals_only_accepted_while_open() {
        let employer = Uuid::new_v4();
        assert!(
            job(JobStatus::Open, employer, None)
                .ensure_open_for_proposals()
                .is_ok()
        );
        for status in [JobStatus::Assigned, JobStatus::Completed, JobStatus::Cancelled] {
            let err = job(status, employer, None)
                .ensure_open_for_proposals()
                .unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{status:?}");
        }
    }

    #[test]
    fn only_owner_can_assign() {
        let employer = Uuid::new_v4();
        let j = job(JobStatus::Open, employer, None);
        assert!(j.ensure_assignable(employer).is_ok());
        let err = j.ensure_assignable(Uuid::new_v4()).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn assignment_only_from_open() {
        let employer = Uuid::new_v4();
        let worker = Uuid::new_v4();
        let err = job(JobStatus::Assigned, employer, Some(worker))
            .ensure_assignable(employer)
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn only_assigned_worker_can_complete() {
        let employer = Uuid::new_v4();
        let worker = Uuid::new_v4();
        let j = job(JobStatus::Assigned, employer, Some(worker));
        assert!(j.ensure_completable_by(worker).is_ok());
        // A different worker, even one who submitted a proposal, is rejected.
        let err = j.ensure_completable_by(Uuid::new_v4()).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn completing_an_unassigned_job_is_forbidden() {
        let j = job(JobStatus::Open, Uuid::new_v4(), None);
        let err = j.ensure_completable_by(Uuid::new_v4()).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn cancel_allowed_from_open_and_assigned_only() {
        let employer = Uuid::new_v4();
        let worker = Uuid::new_v4();
        assert!(job(JobStatus::Open, employer, None).ensure_cancellable(employer).is_ok());
        assert!(
            job(JobStatus::Assigned, employer, Some(worker))
                .ensure_cancellable(employer)
                .is_ok()
        );
        for status in [JobStatus::Completed, JobStatus::Cancelled] {
            let err = job(status, employer, None)
                .ensure_cancellable(employer)
                .unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{status:?}");
        }
    }

    #[test]
    fn assignment_invariant() {
        let employer = Uuid::new_v4();
        let worker = Uuid::new_v4();
        assert!(job(JobStatus::Open, employer, None).assignment_invariant_holds());
        assert!(job(JobStatus::Assigned, employer, Some(worker)).assignment_invariant_holds());
        assert!(job(JobStatus::Completed, employer, Some(worker)).assignment_invariant_holds());
        assert!(job(JobStatus::Cancelled, employer, None).assignment_invariant_holds());
        assert!(!job(JobStatus::Assigned, employer, None).assignment_invariant_holds());
        assert!(!job(JobStatus::Open, employer, Some(worker)).assignment_invariant_holds());
    }

    /// The end-to-end fence scenario, expressed over the guards.
    #[test]
    fn fence_scenario() {
        let employer = Uuid::new_v4();
        let worker_a = Uuid::new_v4();
        let worker_b = Uuid::new_v4();

        let mut j = job(JobStatus::Open, employer, None);
        assert!(j.ensure_open_for_proposals().is_ok());

        // Employer assigns worker B, who never submitted a proposal.
        assert!(j.ensure_assignable(employer).is_ok());
        j.status = JobStatus::Assigned;
        j.assigned_worker_id = Some(worker_b);
        assert!(j.assignment_invariant_holds());

        // Worker A (the proposer) cannot complete it.
        assert_eq!(
            j.ensure_completable_by(worker_a).unwrap_err().status(),
            StatusCode::FORBIDDEN
        );

        // Worker B can.
        assert!(j.ensure_completable_by(worker_b).is_ok());
        j.status = JobStatus::Completed;
        assert!(j.assignment_invariant_holds());
    }
}
