//! Unified service-layer error type for presale-server
//!
//! `ServiceError` bridges the gap between DB-layer errors (`sqlx::Error`),
//! platform adapter errors (`PlatformError`) and the API-layer error
//! (`AppError`). It enables `?` propagation without manual
//! `.map_err(|e| { tracing::error!(...); AppError::new(...) })` boilerplate.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::platform::PlatformError;

/// Service-layer error with three variants, keeps things simple.
///
/// - `Db`: Database errors (auto-logged, mapped to DatabaseError)
/// - `Platform`: Commerce-platform adapter errors (rejections pass through,
///   everything else is auto-logged and mapped to PlatformRequestFailed)
/// - `App`: Business-rule errors (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    /// Database error (sqlx)
    Db(sqlx::Error),
    /// Commerce-platform adapter error
    Platform(PlatformError),
    /// Business-rule error (already an AppError with the correct ErrorCode)
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e)
    }
}

impl From<PlatformError> for ServiceError {
    fn from(e: PlatformError) -> Self {
        ServiceError::Platform(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
            ServiceError::Platform(PlatformError::Rejected(errors)) => {
                let joined = errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                AppError::with_message(ErrorCode::PlatformRejected, joined)
            }
            ServiceError::Platform(PlatformError::Missing(field)) => {
                tracing::error!(field = field, "Platform response missing expected data");
                AppError::new(ErrorCode::PlatformResponseInvalid)
            }
            ServiceError::Platform(platform_err) => {
                tracing::error!(error = %platform_err, "Platform request error");
                AppError::new(ErrorCode::PlatformRequestFailed)
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
#[allow(dead_code)]
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::UserError;

    #[test]
    fn test_rejected_passes_messages_through() {
        let err = ServiceError::Platform(PlatformError::Rejected(vec![
            UserError {
                field: None,
                message: "Fulfillment order is not held".into(),
            },
            UserError {
                field: Some(vec!["id".into()]),
                message: "Invalid id".into(),
            },
        ]));
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::PlatformRejected);
        assert_eq!(app.message, "Fulfillment order is not held; Invalid id");
    }

    #[test]
    fn test_db_error_is_masked() {
        let app: AppError = ServiceError::Db(sqlx::Error::RowNotFound).into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
        assert_eq!(app.message, "Database error");
    }

    #[test]
    fn test_app_error_passes_through() {
        let original = AppError::validation("location_id must not be empty");
        let app: AppError = ServiceError::App(original.clone()).into();
        assert_eq!(app.code, original.code);
        assert_eq!(app.message, original.message);
    }

    #[test]
    fn test_missing_data_maps_to_invalid_response() {
        let app: AppError = ServiceError::Platform(PlatformError::Missing("data")).into();
        assert_eq!(app.code, ErrorCode::PlatformResponseInvalid);
    }
}
