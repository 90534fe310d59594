//! Tests for `AppError` -> `ClassifiedError` translation and the HTTP
//! responses it renders.
//!
//! These tests do NOT need an HTTP server -- they call the translator and
//! `IntoResponse` directly.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use keel_api::error::{AppError, HttpError};
use keel_api::translator::{ClassifiedError, ErrorKind, ErrorTranslator};
use keel_core::error::CoreError;
use keel_db::StorageError;

/// Helper: convert a `ClassifiedError` into its status code and parsed JSON body.
async fn error_to_response(err: ClassifiedError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn storage(code: &str) -> AppError {
    AppError::Storage(StorageError::from_code(code, format!("engine reported {code}")))
}

// ---------------------------------------------------------------------------
// Storage failures
// ---------------------------------------------------------------------------

#[test]
fn unique_violation_is_already_exists() {
    for code in ["P2002", "23505"] {
        let err = ErrorTranslator::translate(storage(code));
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.message(), "Already Exist");
    }
}

#[test]
fn foreign_key_violation_is_invalid_reference() {
    for code in ["P2003", "23503"] {
        let err = ErrorTranslator::translate(storage(code));
        assert_eq!(err.kind(), ErrorKind::InvalidReference);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Foreign key constraint failed");
    }
}

#[test]
fn missing_record_is_not_found() {
    for code in ["P2001", "P2025"] {
        let err = ErrorTranslator::translate(storage(code));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Not Found");
    }

    let err = ErrorTranslator::translate(AppError::from(sqlx::Error::RowNotFound));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn unknown_storage_code_is_database_error() {
    let err = ErrorTranslator::translate(storage("P1001"));
    assert_eq!(err.kind(), ErrorKind::StorageError);
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message(), "Database error");

    let err = ErrorTranslator::translate(AppError::from(sqlx::Error::PoolTimedOut));
    assert_eq!(err.kind(), ErrorKind::StorageError);
}

// ---------------------------------------------------------------------------
// Passthrough and fallback
// ---------------------------------------------------------------------------

#[test]
fn http_errors_pass_through_unchanged() {
    let original = HttpError::new(StatusCode::UNPROCESSABLE_ENTITY, "quota exceeded");
    let err = ErrorTranslator::translate(AppError::Http(original.clone()));

    assert_eq!(err.kind(), ErrorKind::Passthrough);
    assert_eq!(err.status(), original.status());
    assert_eq!(err.message(), original.message());
}

#[test]
fn translating_a_passthrough_twice_changes_nothing() {
    let first = ErrorTranslator::translate(AppError::Http(HttpError::new(StatusCode::NOT_FOUND, "no such team")));
    let again = ErrorTranslator::translate(AppError::Http(HttpError::new(
        first.status(),
        first.message(),
    )));
    assert_eq!(first, again);
}

#[test]
fn core_errors_pass_through_in_http_vocabulary() {
    let err = ErrorTranslator::translate(CoreError::Validation("name is required".into()).into());
    assert_eq!(err.kind(), ErrorKind::Passthrough);
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.message(), "name is required");
}

#[test]
fn plain_errors_are_unclassified() {
    let err = ErrorTranslator::translate(anyhow::anyhow!("socket closed").into());
    assert_matches!(err.kind(), ErrorKind::Unclassified);
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message(), "Internal server error");
}

#[test]
fn every_input_category_lands_on_a_known_kind() {
    let inputs: Vec<AppError> = vec![
        storage("P2002"),
        storage("P2003"),
        storage("P2025"),
        storage("XX000"),
        AppError::Http(HttpError::new(StatusCode::CONFLICT, "taken")),
        AppError::Internal(anyhow::anyhow!("boom")),
    ];
    let kinds: Vec<ErrorKind> = inputs
        .into_iter()
        .map(|e| ErrorTranslator::translate(e).kind())
        .collect();

    assert_eq!(
        kinds,
        vec![
            ErrorKind::AlreadyExists,
            ErrorKind::InvalidReference,
            ErrorKind::NotFound,
            ErrorKind::StorageError,
            ErrorKind::Passthrough,
            ErrorKind::Unclassified,
        ]
    );
}

// ---------------------------------------------------------------------------
// Rendered responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn classified_error_renders_status_and_message() {
    let (status, json) = error_to_response(ErrorTranslator::translate(storage("P2002"))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        json,
        serde_json::json!({ "statusCode": 409, "message": "Already Exist" })
    );
}

#[tokio::test]
async fn storage_details_never_reach_the_response() {
    let err = AppError::Storage(StorageError::from_code(
        "XX000",
        "password authentication failed for user secret_admin",
    ));
    let (status, json) = error_to_response(ErrorTranslator::translate(err)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body_text = json.to_string();
    assert!(!body_text.contains("secret_admin"), "response leaked: {body_text}");
    assert!(!body_text.contains("XX000"), "response leaked: {body_text}");
    assert_eq!(json["message"], "Database error");
}

#[tokio::test]
async fn internal_error_response_is_sanitized() {
    let err = AppError::Internal(anyhow::anyhow!("panic stack trace here"));
    let (status, json) = error_to_response(ErrorTranslator::translate(err)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!json.to_string().contains("panic stack trace"));
    assert_eq!(json["message"], "Internal server error");
}
