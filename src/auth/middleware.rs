use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::auth::jwks::JwksCache;
use crate::db::users::find_or_create_from_auth;
use crate::error::ApiError;
use crate::events::{AuditEvent, EventSink, EventType};
use crate::models::users::{self, CreateUserFromAuth};

/// Stages 1–2 of the access-control pipeline: authenticate the caller and
/// resolve (or create) their account row. Role, suspension and subscription
/// checks run afterwards in the handlers via `auth::policy`.
pub struct AuthenticatedUser(pub users::Model);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| ApiError::unauthenticated("Missing Authorization header"))?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                ApiError::unauthenticated("Authorization header must be: Bearer <token>")
            })?;

            // 2. Validate the JWT against the provider's JWKS.
            let jwks_cache = req.app_data::<web::Data<Arc<JwksCache>>>().ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("JWKS cache not configured")
            })?;

            let claims = jwks_cache
                .validate_token(token)
                .await
                .map_err(|e| ApiError::unauthenticated(format!("Invalid token: {e}")))?;

            let email = claims
                .email
                .clone()
                .ok_or_else(|| ApiError::unauthenticated("No email in token claims"))?;

            // 3. Resolve the account (find-or-create by auth subject).
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("Database not configured")
                })?;

            let (user, created) = find_or_create_from_auth(
                db.get_ref(),
                CreateUserFromAuth {
                    subject: claims.sub.clone(),
                    email,
                    full_name: claims.full_name(),
                },
            )
            .await
            .map_err(ApiError::from)?;

            if created {
                if let Some(sink) = req.app_data::<web::Data<Arc<dyn EventSink>>>() {
                    sink.publish(
                        AuditEvent::new(EventType::UserCreated)
                            .actor(user.subject.clone(), user.email.clone())
                            .target(user.id),
                    );
                }
            }

            Ok(AuthenticatedUser(user))
        })
    }
}
