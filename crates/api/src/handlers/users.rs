//! Handlers for the `/users` resource.
//!
//! Each handler runs its body through the shared
//! [`ResponseBuilder`](crate::controller::ResponseBuilder), so storage
//! failures come back as the standard classified errors (duplicate
//! username -> 409, unknown id -> 404) without any mapping here.

use axum::extract::State;
use axum::http::StatusCode;
use keel_core::types::DbId;
use keel_core::validation::validate;
use keel_db::models::user::{CreateUser, UpdateUser, User};
use keel_db::repositories::UserRepo;
use keel_db::StorageError;

use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};
use crate::response::{Envelope, Outcome};
use crate::state::AppState;
use crate::translator::ClassifiedError;

/// Reply for handlers that end in an envelope or a classified error.
type Reply<T> = Result<Envelope<T>, ClassifiedError>;

/// GET /api/v1/users
pub async fn list_users(State(state): State<AppState>) -> Reply<Vec<User>> {
    let responses = state.responses.in_context("list_users");
    responses
        .wrap_value(|| async move { UserRepo::list(&state.pool).await })
        .await
}

/// POST /api/v1/users
///
/// Validates the body before touching the database; validation failures
/// surface as 400 with a per-field description.
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateUser>,
) -> Reply<User> {
    let responses = state.responses.in_context("create_user");
    responses
        .wrap_value(|| async move {
            validate(&input)?;
            let user = UserRepo::create(&state.pool, &input).await?;

            tracing::info!(user_id = %user.id, username = %user.username, "User created");

            Ok::<_, AppError>(user)
        })
        .await
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> Reply<User> {
    let responses = state.responses.in_context("get_user");
    responses
        .wrap_value(|| async move { UserRepo::get(&state.pool, id).await })
        .await
}

/// PUT /api/v1/users/{id}
///
/// Partial update; only the fields present in the body change.
pub async fn update_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<UpdateUser>,
) -> Reply<User> {
    let responses = state.responses.in_context("update_user");
    responses
        .wrap_value(|| async move {
            validate(&input)?;
            let user = UserRepo::update(&state.pool, id, &input).await?;

            tracing::info!(user_id = %id, "User updated");

            Ok::<_, AppError>(user)
        })
        .await
}

/// DELETE /api/v1/users/{id}
///
/// Answers with a message-only envelope rather than a payload.
pub async fn delete_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> Reply<()> {
    let responses = state.responses.in_context("delete_user");
    responses
        .wrap(|| async move {
            if !UserRepo::delete(&state.pool, id).await? {
                return Err(StorageError::not_found(format!("no user with id {id}")));
            }

            tracing::info!(user_id = %id, "User deleted");

            Ok(Outcome::Shaped(Envelope::with_message(
                StatusCode::OK,
                "User deleted",
            )))
        })
        .await
}
