use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::subscriptions as subscription_db;
use crate::error::ApiError;
use crate::models::subscriptions;
use crate::models::users::{Model as User, Role};

/// Stage 3: the caller's onboarded role must match the route's requirement.
pub fn require_role(user: &User, required: Role) -> Result<(), ApiError> {
    match user.role {
        None => Err(ApiError::forbidden(
            "Role not set. Please complete onboarding first.",
        )),
        Some(role) if role == required => Ok(()),
        Some(_) => Err(ApiError::forbidden(format!(
            "Access denied. Required role: {}",
            required.as_str()
        ))),
    }
}

/// Stage 4: suspended accounts are rejected with the stored reason.
pub fn ensure_not_suspended(user: &User) -> Result<(), ApiError> {
    if user.is_suspended {
        let reason = user
            .suspension_reason
            .as_deref()
            .unwrap_or("Your account has been suspended. Contact support for details.");
        return Err(ApiError::forbidden(format!("Account suspended: {reason}")));
    }
    Ok(())
}

/// Back-office access: the admin is identified by a configured email.
pub fn require_admin(user: &User, admin_email: &str) -> Result<(), ApiError> {
    if user.email != admin_email {
        return Err(ApiError::forbidden("Admin access required"));
    }
    Ok(())
}

/// Stage 5 (proposal submission only): the worker needs an unexpired, active
/// subscription. Runs after the suspension check, so a suspended worker
/// never reaches it.
pub async fn require_active_subscription(
    db: &DatabaseConnection,
    worker_id: Uuid,
) -> Result<(), ApiError> {
    let sub = subscription_db::find_by_worker(db, worker_id).await?;
    if !subscriptions::is_currently_active(sub.as_ref(), Utc::now()) {
        return Err(ApiError::forbidden(
            "Subscription inactive. Please subscribe to send proposals.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    fn user(role: Option<Role>, suspended: bool) -> User {
        User {
            id: Uuid::new_v4(),
            subject: "user_2test".to_string(),
            email: "tamanda@example.com".to_string(),
            full_name: "Tamanda Phiri".to_string(),
            phone_number: Some("+265991112223".to_string()),
            role,
            district: Some("Lilongwe".to_string()),
            area: None,
            skills: None,
            bio: None,
            company_name: None,
            website_url: None,
            profile_image_url: None,
            profile_completed: role.is_some(),
            onboarding_completed_at: None,
            is_suspended: suspended,
            suspension_reason: suspended.then(|| "Repeated no-shows".to_string()),
            suspended_at: suspended.then(chrono::Utc::now),
            suspended_by: None,
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn missing_role_reads_as_incomplete_onboarding() {
        let err = require_role(&user(None, false), Role::Worker).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert!(err.to_string().contains("onboarding"));
    }

    #[test]
    fn role_mismatch_is_forbidden() {
        let err = require_role(&user(Some(Role::Employer), false), Role::Worker).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert!(require_role(&user(Some(Role::Worker), false), Role::Worker).is_ok());
    }

    #[test]
    fn suspension_carries_the_stored_reason() {
        let err = ensure_not_suspended(&user(Some(Role::Worker), true)).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert!(err.to_string().contains("Repeated no-shows"));
        assert!(ensure_not_suspended(&user(Some(Role::Worker), false)).is_ok());
    }

    #[test]
    fn admin_gate_compares_email() {
        let admin = user(None, false);
        assert!(require_admin(&admin, "tamanda@example.com").is_ok());
        let err = require_admin(&admin, "admin@example.com").unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    /// Pipeline order: a suspended worker fails the suspension stage, so the
    /// subscription stage is never consulted.
    #[test]
    fn suspended_worker_fails_before_subscription_stage() {
        let u = user(Some(Role::Worker), true);
        let result = require_role(&u, Role::Worker).and_then(|_| ensure_not_suspended(&u));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("suspended"));
        assert!(!err.to_string().contains("Subscription"));
    }
}
