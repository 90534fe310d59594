//! Request extractors whose rejections go through the failure pipeline.
//!
//! axum's own [`Json`] and [`Path`] answer a bad request with a plain-text
//! body that quotes serde's error. These wrappers log the rejection through
//! the application's [`FailureLog`](crate::controller::FailureLog), then reply
//! with a classified `{ statusCode, message }` envelope whose message names
//! only the kind of problem.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::HttpError;
use crate::state::AppState;
use crate::translator::ClassifiedError;

/// JSON request body. Drop-in replacement for [`Json`] in handlers.
pub struct JsonBody<T>(pub T);

impl<T> FromRequest<AppState> for JsonBody<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = ClassifiedError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(state
                .responses
                .in_context("json_body")
                .reject(json_rejection_error(&rejection))),
        }
    }
}

/// Path parameters. Drop-in replacement for [`Path`] in handlers.
pub struct PathParam<T>(pub T);

impl<T> FromRequestParts<AppState> for PathParam<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = ClassifiedError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParam(value)),
            Err(rejection) => Err(state
                .responses
                .in_context("path_params")
                .reject(path_rejection_error(&rejection))),
        }
    }
}

fn json_rejection_error(rejection: &JsonRejection) -> HttpError {
    let message = match rejection {
        JsonRejection::JsonDataError(_) => "Invalid request body",
        JsonRejection::JsonSyntaxError(_) => "Malformed JSON body",
        JsonRejection::MissingJsonContentType(_) => "Expected Content-Type: application/json",
        JsonRejection::BytesRejection(_) => "Could not read request body",
        _ => "Invalid request body",
    };
    HttpError::new(rejection.status(), message).with_detail(rejection.body_text())
}

fn path_rejection_error(rejection: &PathRejection) -> HttpError {
    let message = match rejection {
        PathRejection::FailedToDeserializePathParams(_) => "Invalid path parameter",
        // Route/extractor mismatch, a server-side bug.
        _ => "Internal server error",
    };
    HttpError::new(rejection.status(), message).with_detail(rejection.body_text())
}
