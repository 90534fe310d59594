//! Shared response envelope types for API handlers.
//!
//! Every API response body has the shape
//! `{ "statusCode": u16, "message"?: string, "data"?: T }`. Handlers never
//! build the success envelope by hand: they return an [`Outcome`] and let
//! [`ResponseBuilder`](crate::controller::ResponseBuilder) normalize it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Message carried by every normalized success envelope.
pub const OK_MESSAGE: &str = "Ok";

/// Uniform `{ statusCode, message, data }` response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Success envelope: `200`, `"Ok"`, and the payload if there is one.
    pub fn ok(data: Option<T>) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            message: Some(OK_MESSAGE.to_string()),
            data,
        }
    }

    /// Message-only envelope, used for explanatory or soft-failure replies.
    pub fn with_message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: Some(message.into()),
            data: None,
        }
    }

    /// Envelope with an explicit payload.
    ///
    /// Stored as given. If a `message` is set, [`Envelope::normalize`]
    /// returns it unchanged.
    pub fn new(status: StatusCode, message: Option<String>, data: Option<T>) -> Self {
        Self {
            status_code: status.as_u16(),
            message,
            data,
        }
    }

    /// HTTP status for this envelope. Out-of-range codes render as 500.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Turn a handler outcome into the envelope that leaves the API.
    ///
    /// A shaped envelope with a non-empty message is terminal and returned
    /// verbatim. Otherwise the payload is re-wrapped as a `200 "Ok"` envelope.
    pub fn normalize(outcome: Outcome<T>) -> Self {
        let payload = match outcome {
            Outcome::Value(value) => Some(value),
            Outcome::Shaped(envelope) => {
                if envelope.message.as_deref().is_some_and(|m| !m.is_empty()) {
                    return envelope;
                }
                envelope.data
            }
        };
        Self::ok(payload)
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// What a handler produced: a bare payload, or an envelope it shaped itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// A bare payload, wrapped as `200 "Ok"`.
    Value(T),
    /// An envelope the handler already decided on.
    Shaped(Envelope<T>),
}

impl<T> From<Envelope<T>> for Outcome<T> {
    fn from(envelope: Envelope<T>) -> Self {
        Outcome::Shaped(envelope)
    }
}
