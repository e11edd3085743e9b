//! Unified service-layer error type for crab-merchant
//!
//! `ServiceError` bridges gateway errors (`RepoError`), response formatting
//! failures and the API-layer error (`AppError`), so services can use `?`
//! throughout and handlers still get the right status code.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::crud::FormatError;
use crate::db::RepoError;

#[derive(Debug)]
pub enum ServiceError {
    /// Gateway error (logged unless it maps to a caller error)
    Repo(RepoError),
    /// Business-rule error, passed through to the client
    App(AppError),
    /// Response formatting bug (logged, surfaces as 500)
    Format(FormatError),
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        ServiceError::Repo(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<FormatError> for ServiceError {
    fn from(e: FormatError) -> Self {
        ServiceError::Format(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            // Keyed writes map this in the service; anything reaching here has no key
            ServiceError::Repo(RepoError::Duplicate(msg)) => {
                tracing::warn!(error = %msg, "Unique constraint violation");
                AppError::already_exists("Record")
            }
            ServiceError::Repo(RepoError::NotFound(msg)) => {
                tracing::debug!(error = %msg, "Row vanished during request");
                AppError::not_found("Record")
            }
            ServiceError::Repo(RepoError::Database(msg)) => {
                tracing::error!(error = %msg, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
            ServiceError::Repo(RepoError::Decode(msg)) => {
                tracing::error!(error = %msg, "Stored row could not be decoded");
                AppError::new(ErrorCode::InternalError)
            }
            ServiceError::Format(err) => {
                tracing::error!(error = %err, "Response formatting failed");
                AppError::new(ErrorCode::RelationNotLoaded)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    fn status_of(err: ServiceError) -> StatusCode {
        AppError::from(err).http_status()
    }

    #[test]
    fn test_repo_errors_map_to_status() {
        assert_eq!(
            status_of(RepoError::Duplicate("uq_qr_codes_code".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(RepoError::NotFound("row".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RepoError::Database("connection reset".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(RepoError::Decode("bad column".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_format_error_is_internal() {
        let err = FormatError::MissingRelation {
            resource: "Kitchen device",
            relation: "station",
        };
        let app: AppError = ServiceError::from(err).into();
        assert_eq!(app.code, ErrorCode::RelationNotLoaded);
        assert_eq!(app.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_app_error_passes_through() {
        let app: AppError = ServiceError::from(AppError::merchant_required()).into();
        assert_eq!(app.code, ErrorCode::MerchantRequired);
        assert_eq!(app.http_status(), StatusCode::FORBIDDEN);
    }
}
