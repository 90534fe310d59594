//! Repository for the `users` table.

use keel_core::types::DbId;
use sqlx::PgPool;

use crate::error::{StorageError, StorageResult};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, fullname, username, email, phone, avatar, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate username or email fails with
    /// [`StorageErrorKind::UniqueViolation`](crate::StorageErrorKind::UniqueViolation).
    pub async fn create(pool: &PgPool, input: &CreateUser) -> StorageResult<User> {
        let query = format!(
            "INSERT INTO users (fullname, username, email, phone, avatar)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.fullname)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.avatar)
            .fetch_one(pool)
            .await?;
        Ok(user)
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> StorageResult<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Fetch a user by ID, failing with `RecordNotFound` when it does not exist.
    pub async fn get(pool: &PgPool, id: DbId) -> StorageResult<User> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| StorageError::not_found(format!("no user with id {id}")))
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> StorageResult<Vec<User>> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        let users = sqlx::query_as::<_, User>(&query).fetch_all(pool).await?;
        Ok(users)
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Fails with `RecordNotFound` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateUser) -> StorageResult<User> {
        let query = format!(
            "UPDATE users SET
                fullname = COALESCE($2, fullname),
                username = COALESCE($3, username),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                avatar = COALESCE($6, avatar)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.fullname)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.avatar)
            .fetch_one(pool)
            .await?;
        Ok(user)
    }

    /// Delete a user by ID.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
