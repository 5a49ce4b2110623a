use actix_web::{HttpResponse, http::StatusCode};
use sea_orm::DbErr;

/// Error taxonomy shared by every handler. Each variant maps to one HTTP
/// status, and every error body has the same shape: `{"message": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// 400 — the request is well-formed but not valid right now (bad job
    /// transition, missing required field, payment not successful).
    #[error("{0}")]
    InvalidState(String),
    /// 502 — the payment gateway failed or returned an unexpected shape.
    #[error("{0}")]
    Upstream(String),
    /// 500 — unexpected persistence failure. The body never leaks the
    /// underlying error; the full `DbErr` goes to the log instead.
    #[error("Server error")]
    Database(#[source] DbErr),
}

impl ApiError {
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidState(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        if let DbErr::RecordNotFound(what) = &err {
            return Self::NotFound(what.clone());
        }
        // Unique-index violations are the storage-level backstop for the
        // application's read-then-check guards; map them to 409 rather than
        // a server error.
        let text = err.to_string();
        if text.contains("idx_proposals_job_worker_unique") {
            return Self::Conflict("Proposal already submitted".to_string());
        }
        if text.contains("users_phone_number") || text.contains("idx_users_phone_number") {
            return Self::Conflict("Phone number already in use".to_string());
        }
        Self::Database(err)
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Database(source) = self {
            tracing::error!("database error: {source}");
        }
        HttpResponse::build(self.status()).json(serde_json::json!({
            "message": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            ApiError::unauthenticated("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::invalid("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::upstream("x").status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unique_violation_on_proposals_maps_to_conflict() {
        let err = DbErr::Custom(
            "duplicate key value violates unique constraint \
             \"idx_proposals_job_worker_unique\""
                .to_string(),
        );
        let api: ApiError = err.into();
        assert_eq!(api.status(), StatusCode::CONFLICT);
        assert_eq!(api.to_string(), "Proposal already submitted");
    }

    #[test]
    fn phone_collision_maps_to_conflict() {
        let err = DbErr::Custom(
            "duplicate key value violates unique constraint \"idx_users_phone_number\"".to_string(),
        );
        let api: ApiError = err.into();
        assert_eq!(api.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn record_not_found_maps_to_404() {
        let err = DbErr::RecordNotFound("Job not found".to_string());
        let api: ApiError = err.into();
        assert_eq!(api.status(), StatusCode::NOT_FOUND);
        assert_eq!(api.to_string(), "Job not found");
    }

    #[test]
    fn database_error_body_is_sanitized() {
        let err = DbErr::Custom("connection reset by peer".to_string());
        let api: ApiError = err.into();
        assert_eq!(api.to_string(), "Server error");
    }
}
