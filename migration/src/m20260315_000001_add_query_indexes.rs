use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Jobs {
    Table,
    EmployerId,
    Status,
    AssignedWorkerId,
}

#[derive(DeriveIden)]
enum Proposals {
    Table,
    JobId,
}

#[derive(DeriveIden)]
enum AuditLogs {
    Table,
    EventType,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on jobs.employer_id for the my-jobs listing
        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_employer_id")
                    .table(Jobs::Table)
                    .col(Jobs::EmployerId)
                    .to_owned(),
            )
            .await?;

        // Index on jobs.status for the open-jobs board
        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_status")
                    .table(Jobs::Table)
                    .col(Jobs::Status)
                    .to_owned(),
            )
            .await?;

        // Index on jobs.assigned_worker_id for the assigned-jobs listing
        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_assigned_worker_id")
                    .table(Jobs::Table)
                    .col(Jobs::AssignedWorkerId)
                    .to_owned(),
            )
            .await?;

        // Index on proposals.job_id for fetching a job's proposals
        manager
            .create_index(
                Index::create()
                    .name("idx_proposals_job_id")
                    .table(Proposals::Table)
                    .col(Proposals::JobId)
                    .to_owned(),
            )
            .await?;

        // Composite index for the filtered, newest-first audit trail
        manager
            .create_index(
                Index::create()
                    .name("idx_audit_logs_event_created")
                    .table(AuditLogs::Table)
                    .col(AuditLogs::EventType)
                    .col(AuditLogs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_jobs_employer_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_jobs_status").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_jobs_assigned_worker_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_proposals_job_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_audit_logs_event_created").to_owned())
            .await?;

        Ok(())
    }
}
