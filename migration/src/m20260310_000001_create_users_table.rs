use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `users` table and its columns.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Subject,
    Email,
    FullName,
    PhoneNumber,
    Role,
    District,
    Area,
    Skills,
    Bio,
    CompanyName,
    WebsiteUrl,
    ProfileImageUrl,
    ProfileCompleted,
    OnboardingCompletedAt,
    IsSuspended,
    SuspensionReason,
    SuspendedAt,
    SuspendedBy,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Subject).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(ColumnDef::new(Users::PhoneNumber).string())
                    .col(ColumnDef::new(Users::Role).string())
                    .col(ColumnDef::new(Users::District).string())
                    .col(ColumnDef::new(Users::Area).string())
                    .col(ColumnDef::new(Users::Skills).json_binary())
                    .col(ColumnDef::new(Users::Bio).text())
                    .col(ColumnDef::new(Users::CompanyName).string())
                    .col(ColumnDef::new(Users::WebsiteUrl).string())
                    .col(ColumnDef::new(Users::ProfileImageUrl).string())
                    .col(
                        ColumnDef::new(Users::ProfileCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::OnboardingCompletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Users::IsSuspended)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::SuspensionReason).text())
                    .col(ColumnDef::new(Users::SuspendedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Users::SuspendedBy).string())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // One account per auth identity.
        manager
            .create_index(
                Index::create()
                    .name("idx_users_subject_unique")
                    .table(Users::Table)
                    .col(Users::Subject)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Phone numbers are unique across all accounts. Partial-by-NULL:
        // Postgres ignores NULLs in unique indexes, so placeholder accounts
        // without a phone number never collide.
        manager
            .create_index(
                Index::create()
                    .name("idx_users_phone_number")
                    .table(Users::Table)
                    .col(Users::PhoneNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}
