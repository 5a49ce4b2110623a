use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::auth::policy;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{UpdateProfile, UserResponse};

/// GET /api/profile/me — the caller's own profile.
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}

/// PUT /api/profile/update — self-service profile fields. Role and phone
/// number are not in the DTO, so they cannot be changed here.
pub async fn update(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpdateProfile>,
) -> Result<HttpResponse, ApiError> {
    policy::ensure_not_suspended(&user.0)?;

    let updated = user_db::update_profile(db.get_ref(), user.0, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Profile updated",
        "user": UserResponse::from(updated),
    })))
}
