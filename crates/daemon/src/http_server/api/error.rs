use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use radrest::DomainError;

/// Uniform error envelope for the v0 API. Every handler funnels domain
/// failures through this type so clients always see `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::UserNotFound(_)
            | DomainError::GroupNotFound(_)
            | DomainError::NasNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::UserAlreadyExists(_)
            | DomainError::GroupAlreadyExists(_)
            | DomainError::NasAlreadyExists(_) => StatusCode::CONFLICT,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("storage failure: {}", self.0);
            "internal storage error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(serde_json::json!({"detail": detail}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn missing_entities_map_to_not_found() {
        assert_eq!(
            status_of(DomainError::UserNotFound("bob".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::NasNotFound("1.1.1.1".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn duplicates_map_to_conflict() {
        assert_eq!(
            status_of(DomainError::GroupAlreadyExists("staff".into())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn domain_rule_violations_map_to_unprocessable() {
        assert_eq!(
            status_of(DomainError::WouldHaveNoAttributes),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(DomainError::PeerWouldBeDeleted { name: "bob".into() }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(DomainError::StillHasMembers("staff".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn storage_failures_are_internal_and_opaque() {
        let response = ApiError::from(DomainError::Storage(sqlx::Error::PoolClosed)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
