use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{self, EmployerOnboarding, UserResponse, WorkerOnboarding};

/// POST /api/onboarding/worker — turn a placeholder account into a worker.
///
/// Role and phone number are set exactly once; re-running onboarding or
/// claiming another account's phone number is a 409.
pub async fn complete_worker(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<WorkerOnboarding>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    if input.phone_number.trim().is_empty() || input.district.trim().is_empty() {
        return Err(ApiError::invalid("Missing required onboarding fields"));
    }

    guard_not_completed(&user.0)?;
    guard_phone_free(db.get_ref(), &user.0, &input.phone_number).await?;

    let updated = user_db::complete_worker_onboarding(db.get_ref(), user.0, input).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Onboarding completed successfully",
        "user": UserResponse::from(updated),
    })))
}

/// POST /api/onboarding/employer — turn a placeholder account into an
/// employer. Same one-shot and phone-uniqueness rules as the worker route.
pub async fn complete_employer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<EmployerOnboarding>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    if input.phone_number.trim().is_empty() || input.district.trim().is_empty() {
        return Err(ApiError::invalid("Missing required onboarding fields"));
    }

    guard_not_completed(&user.0)?;
    guard_phone_free(db.get_ref(), &user.0, &input.phone_number).await?;

    let updated = user_db::complete_employer_onboarding(db.get_ref(), user.0, input).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Onboarding completed successfully",
        "user": UserResponse::from(updated),
    })))
}

fn guard_not_completed(user: &users::Model) -> Result<(), ApiError> {
    if user.profile_completed {
        return Err(ApiError::conflict("Onboarding already completed"));
    }
    Ok(())
}

async fn guard_phone_free(
    db: &DatabaseConnection,
    user: &users::Model,
    phone_number: &str,
) -> Result<(), ApiError> {
    if user_db::phone_in_use(db, phone_number, user.id).await? {
        return Err(ApiError::conflict("Phone number already in use"));
    }
    Ok(())
}
