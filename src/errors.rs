use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::IntakeError;

/// HTTP-facing error type. Every response body stays structured JSON
/// (`{ "error": ... }`); internal detail is logged at the failure site and
/// never echoed to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Too many orders. Please try again later.")]
    RateLimited,

    /// Persistence-step failure with a caller-safe message.
    #[error("{0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Server configuration error")]
    Misconfigured(&'static str),

    #[error("Failed to send notification: {0}")]
    Upstream(String),
}

impl From<IntakeError> for AppError {
    fn from(e: IntakeError) -> Self {
        match e {
            IntakeError::RateLimited => AppError::RateLimited,
            IntakeError::Validation(_)
            | IntakeError::UnknownItem(_)
            | IntakeError::ItemUnavailable(_)
            | IntakeError::PriceMismatch
            | IntakeError::TaxMismatch
            | IntakeError::DeliveryFeeMismatch
            | IntakeError::TotalsMismatch
            | IntakeError::TableNotFound
            | IntakeError::TableInactive => AppError::BadRequest(e.to_string()),
            IntakeError::CatalogFetch
            | IntakeError::CustomerPersist
            | IntakeError::OrderPersist
            | IntakeError::ItemsPersist => AppError::Persistence(e.to_string()),
            IntakeError::Storage(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": msg
            })),
            AppError::RateLimited => HttpResponse::TooManyRequests().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Persistence(msg) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": msg
                }))
            }
            AppError::Internal(_) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            })),
            AppError::Misconfigured(what) => {
                log::error!("Missing configuration: {what}");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Server configuration error"
                }))
            }
            AppError::Upstream(_) => HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Failed to send notification"
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn bad_request_returns_400() {
        let resp = AppError::BadRequest("Invalid table number".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rate_limited_returns_429() {
        let resp = AppError::RateLimited.error_response();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn persistence_failure_returns_500() {
        let resp = AppError::Persistence("Failed to create order".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn misconfiguration_returns_500_without_detail() {
        let err = AppError::Misconfigured("TWILIO_AUTH_TOKEN");
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(err.to_string(), "Server configuration error");
    }

    #[test]
    fn upstream_failure_returns_502() {
        let resp = AppError::Upstream("twilio 401".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn price_mismatch_maps_to_bad_request_with_generic_message() {
        let app: AppError = IntakeError::PriceMismatch.into();
        match app {
            AppError::BadRequest(msg) => {
                assert_eq!(msg, "Price verification failed. Please refresh and try again.")
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn rate_limit_maps_to_429_variant() {
        let app: AppError = IntakeError::RateLimited.into();
        assert!(matches!(app, AppError::RateLimited));
    }

    #[test]
    fn items_persist_maps_to_persistence_500() {
        let app: AppError = IntakeError::ItemsPersist.into();
        match app {
            AppError::Persistence(msg) => assert_eq!(msg, "Failed to create order items"),
            other => panic!("expected Persistence, got {other:?}"),
        }
    }

    #[test]
    fn storage_detail_never_reaches_the_body() {
        let app: AppError = IntakeError::Storage("pg: duplicate key".to_string()).into();
        let resp = app.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
