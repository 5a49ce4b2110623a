use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Platform role, stored as an uppercase TEXT column. `None` on the user row
/// means onboarding has not completed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Role {
    #[sea_orm(string_value = "WORKER")]
    Worker,
    #[sea_orm(string_value = "EMPLOYER")]
    Employer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Worker => "WORKER",
            Role::Employer => "EMPLOYER",
        }
    }
}

/// SeaORM entity for the `users` table — one row per platform participant.
///
/// A minimal placeholder row is created the first time a Clerk identity shows
/// up; onboarding fills in role, phone number and location.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// External auth subject id (Clerk user id).
    #[sea_orm(unique)]
    pub subject: String,
    pub email: String,
    pub full_name: String,
    /// Unique across all accounts; set during onboarding.
    #[sea_orm(unique)]
    pub phone_number: Option<String>,
    pub role: Option<Role>,
    pub district: Option<String>,
    pub area: Option<String>,
    /// Worker-only fields.
    pub skills: Option<Json>,
    pub bio: Option<String>,
    /// Employer-only fields.
    pub company_name: Option<String>,
    pub website_url: Option<String>,
    pub profile_image_url: Option<String>,
    pub profile_completed: bool,
    pub onboarding_completed_at: Option<DateTimeUtc>,
    pub is_suspended: bool,
    pub suspension_reason: Option<String>,
    pub suspended_at: Option<DateTimeUtc>,
    /// Subject or email of the admin who suspended the account.
    pub suspended_by: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::jobs::Entity")]
    Jobs,
    #[sea_orm(has_many = "super::proposals::Entity")]
    Proposals,
    #[sea_orm(has_many = "super::subscriptions::Entity")]
    Subscriptions,
}

impl Related<super::jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Jobs.def()
    }
}

impl Related<super::proposals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposals.def()
    }
}

impl Related<super::subscriptions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Used internally by the auth extractor to create a placeholder user from
/// JWT claims on first sight.
#[derive(Debug, Clone)]
pub struct CreateUserFromAuth {
    pub subject: String,
    pub email: String,
    pub full_name: String,
}

/// Body for `POST /api/onboarding/worker`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerOnboarding {
    pub phone_number: String,
    pub district: String,
    pub specific_location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub bio: Option<String>,
}

/// Body for `POST /api/onboarding/employer`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerOnboarding {
    pub phone_number: String,
    pub district: String,
    pub specific_location: Option<String>,
    pub company_name: Option<String>,
    pub website_url: Option<String>,
}

/// Body for `PUT /api/profile/update` — self-service fields only. Role and
/// phone number are deliberately absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub company_name: Option<String>,
    pub website_url: Option<String>,
    pub profile_image_url: Option<String>,
    pub district: Option<String>,
    pub area: Option<String>,
}

/// A safe user representation for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub role: Option<Role>,
    pub district: Option<String>,
    pub area: Option<String>,
    pub skills: Option<Json>,
    pub bio: Option<String>,
    pub company_name: Option<String>,
    pub website_url: Option<String>,
    pub profile_image_url: Option<String>,
    pub profile_completed: bool,
    pub is_suspended: bool,
    pub suspension_reason: Option<String>,
    pub suspended_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

impl From<Model> for UserResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            full_name: m.full_name,
            phone_number: m.phone_number,
            role: m.role,
            district: m.district,
            area: m.area,
            skills: m.skills,
            bio: m.bio,
            company_name: m.company_name,
            website_url: m.website_url,
            profile_image_url: m.profile_image_url,
            profile_completed: m.profile_completed,
            is_suspended: m.is_suspended,
            suspension_reason: m.suspension_reason,
            suspended_at: m.suspended_at,
            created_at: m.created_at,
        }
    }
}

/// Display fields embedded in job listings (employer side).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerSummary {
    pub id: Uuid,
    pub full_name: String,
    pub company_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub district: Option<String>,
}

impl From<Model> for EmployerSummary {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            company_name: m.company_name,
            profile_image_url: m.profile_image_url,
            district: m.district,
        }
    }
}

/// Display fields embedded in proposal listings (worker side).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSummary {
    pub id: Uuid,
    pub full_name: String,
    pub skills: Option<Json>,
    pub profile_image_url: Option<String>,
}

impl From<Model> for WorkerSummary {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            skills: m.skills,
            profile_image_url: m.profile_image_url,
        }
    }
}
