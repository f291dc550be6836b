use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("email address already exists.")]
    EmailAlreadyExists,
    #[error("product not found: {0}")]
    ProductNotFound(i64),
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::ProductNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainError::EmailAlreadyExists => StatusCode::CONFLICT,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        let details = match self {
            DomainError::ProductNotFound(resource) => Some(json!({ "resource": resource })),
            _ => None,
        };
        let body = ErrorBody {
            error: message.as_str(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: DomainError) -> serde_json::Value {
        let bytes = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn unauthorized_body_is_fixed() {
        assert_eq!(DomainError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_of(DomainError::Unauthorized).await,
            json!({ "error": "unauthorized" })
        );
    }

    #[actix_web::test]
    async fn duplicate_email_is_conflict() {
        assert_eq!(DomainError::EmailAlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            body_of(DomainError::EmailAlreadyExists).await,
            json!({ "error": "email address already exists." })
        );
    }

    #[actix_web::test]
    async fn not_found_carries_resource_id() {
        let body = body_of(DomainError::ProductNotFound(7)).await;
        assert_eq!(body["details"]["resource"], 7);
        assert_eq!(
            DomainError::ProductNotFound(7).status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
