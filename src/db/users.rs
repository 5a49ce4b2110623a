use sea_orm::*;
use uuid::Uuid;

use crate::models::users::{
    self, CreateUserFromAuth, EmployerOnboarding, Role, UpdateProfile, WorkerOnboarding,
};

/// Resolve a Clerk identity to a user row, creating a minimal placeholder on
/// first sight. Returns the row plus whether it was created by this call.
pub async fn find_or_create_from_auth(
    db: &DatabaseConnection,
    input: CreateUserFromAuth,
) -> Result<(users::Model, bool), DbErr> {
    if let Some(existing) = users::Entity::find()
        .filter(users::Column::Subject.eq(&input.subject))
        .one(db)
        .await?
    {
        return Ok((existing, false));
    }

    // Placeholder: role, phone and location stay empty until onboarding.
    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        subject: Set(input.subject),
        email: Set(input.email),
        full_name: Set(input.full_name),
        phone_number: Set(None),
        role: Set(None),
        district: Set(None),
        area: Set(None),
        skills: Set(None),
        bio: Set(None),
        company_name: Set(None),
        website_url: Set(None),
        profile_image_url: Set(None),
        profile_completed: Set(false),
        onboarding_completed_at: Set(None),
        is_suspended: Set(false),
        suspension_reason: Set(None),
        suspended_at: Set(None),
        suspended_by: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    Ok((new_user.insert(db).await?, true))
}

pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Is this phone number already claimed by a different account?
pub async fn phone_in_use(
    db: &DatabaseConnection,
    phone_number: &str,
    exclude_user: Uuid,
) -> Result<bool, DbErr> {
    let existing = users::Entity::find()
        .filter(users::Column::PhoneNumber.eq(phone_number))
        .filter(users::Column::Id.ne(exclude_user))
        .one(db)
        .await?;
    Ok(existing.is_some())
}

/// Complete worker onboarding: sets the role, required contact fields and
/// the completion flag in one update.
pub async fn complete_worker_onboarding(
    db: &DatabaseConnection,
    user: users::Model,
    input: WorkerOnboarding,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = user.into();
    active.role = Set(Some(Role::Worker));
    active.phone_number = Set(Some(input.phone_number));
    active.district = Set(Some(input.district));
    active.area = Set(input.specific_location);
    if let Some(skills) = input.skills {
        active.skills = Set(Some(serde_json::json!(skills)));
    }
    if let Some(bio) = input.bio {
        active.bio = Set(Some(bio));
    }
    active.profile_completed = Set(true);
    active.onboarding_completed_at = Set(Some(chrono::Utc::now()));
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Complete employer onboarding.
pub async fn complete_employer_onboarding(
    db: &DatabaseConnection,
    user: users::Model,
    input: EmployerOnboarding,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = user.into();
    active.role = Set(Some(Role::Employer));
    active.phone_number = Set(Some(input.phone_number));
    active.district = Set(Some(input.district));
    active.area = Set(input.specific_location);
    if let Some(company_name) = input.company_name {
        active.company_name = Set(Some(company_name));
    }
    if let Some(website_url) = input.website_url {
        active.website_url = Set(Some(website_url));
    }
    active.profile_completed = Set(true);
    active.onboarding_completed_at = Set(Some(chrono::Utc::now()));
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Self-service profile update. Role and phone number are not touchable here.
pub async fn update_profile(
    db: &DatabaseConnection,
    user: users::Model,
    input: UpdateProfile,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = user.into();

    if let Some(full_name) = input.full_name {
        active.full_name = Set(full_name);
    }
    if let Some(bio) = input.bio {
        active.bio = Set(Some(bio));
    }
    if let Some(skills) = input.skills {
        active.skills = Set(Some(serde_json::json!(skills)));
    }
    if let Some(company_name) = input.company_name {
        active.company_name = Set(Some(company_name));
    }
    if let Some(website_url) = input.website_url {
        active.website_url = Set(Some(website_url));
    }
    if let Some(profile_image_url) = input.profile_image_url {
        active.profile_image_url = Set(Some(profile_image_url));
    }
    if let Some(district) = input.district {
        active.district = Set(Some(district));
    }
    if let Some(area) = input.area {
        active.area = Set(Some(area));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

pub async fn list_by_role(
    db: &DatabaseConnection,
    role: Role,
) -> Result<Vec<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Role.eq(role))
        .order_by_desc(users::Column::CreatedAt)
        .all(db)
        .await
}

/// Mark an account suspended with reason, timestamp and acting admin.
pub async fn suspend(
    db: &DatabaseConnection,
    user_id: Uuid,
    reason: Option<String>,
    actor: &str,
) -> Result<users::Model, DbErr> {
    let user = users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();
    active.is_suspended = Set(true);
    active.suspension_reason = Set(reason);
    active.suspended_at = Set(Some(chrono::Utc::now()));
    active.suspended_by = Set(Some(actor.to_string()));
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Clear all suspension fields.
pub async fn unsuspend(db: &DatabaseConnection, user_id: Uuid) -> Result<users::Model, DbErr> {
    let user = users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();
    active.is_suspended = Set(false);
    active.suspension_reason = Set(None);
    active.suspended_at = Set(None);
    active.suspended_by = Set(None);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

pub async fn count_by_role(db: &DatabaseConnection, role: Role) -> Result<u64, DbErr> {
    users::Entity::find()
        .filter(users::Column::Role.eq(role))
        .count(db)
        .await
}

pub async fn count_suspended(db: &DatabaseConnection) -> Result<u64, DbErr> {
    users::Entity::find()
        .filter(users::Column::IsSuspended.eq(true))
        .count(db)
        .await
}
