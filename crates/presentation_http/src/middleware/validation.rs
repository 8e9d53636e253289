//! Request validation
//!
//! `ValidatedJson` parses a JSON body and runs its `validator` rules.
//! Malformed bodies and failed rules are both rejected as
//! [`ApiError::BadRequest`], so every 400 shares the same JSON shape.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// A JSON extractor that also validates the request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

fn describe(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    let mut messages: Vec<(&str, String)> = fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| format!("{field}: {}", error.code), ToString::to_string);
                (field.as_ref(), message)
            })
        })
        .collect();
    messages.sort();
    messages
        .into_iter()
        .map(|(_, message)| message)
        .collect::<Vec<_>>()
        .join("; ")
}

fn rejection_message(rejection: &JsonRejection) -> String {
    format!("Invalid JSON: {}", rejection.body_text())
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(rejection_message(&e)))?;

        value
            .validate()
            .map_err(|e| ApiError::BadRequest(describe(&e)))?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;
    use validator::Validate;

    use super::*;
    use crate::error::ErrorResponse;

    #[derive(Debug, Deserialize, Validate)]
    struct TestRequest {
        #[validate(length(max = 8, message = "status is too long"))]
        status: Option<String>,
        #[validate(range(min = 0, max = 10, message = "count must be between 0 and 10"))]
        #[serde(default)]
        count: u32,
    }

    async fn test_handler(ValidatedJson(req): ValidatedJson<TestRequest>) -> String {
        req.status.unwrap_or_default()
    }

    async fn post_json(body: &'static str) -> (StatusCode, Vec<u8>) {
        let response = Router::new()
            .route("/test", post(test_handler))
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/test")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn valid_request_passes() {
        let (status, body) = post_json(r#"{"status": "firing"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"firing");
    }

    #[tokio::test]
    async fn failed_rules_are_joined_in_field_order() {
        let (status, body) = post_json(r#"{"status": "much too long", "count": 100}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "bad_request");
        assert_eq!(
            error.error,
            "count must be between 0 and 10; status is too long"
        );
    }

    #[tokio::test]
    async fn invalid_json_rejected() {
        let (status, body) = post_json(r#"{"status": not valid json}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error.starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn wrong_type_rejected_as_bad_request() {
        let (status, _) = post_json(r#"{"count": "seven"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
