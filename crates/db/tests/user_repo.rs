//! Repository behaviour against a real database, including how constraint
//! violations are tagged.

use assert_matches::assert_matches;
use keel_db::models::user::{CreateUser, UpdateUser};
use keel_db::repositories::user_repo::UserRepo;
use keel_db::StorageErrorKind;
use sqlx::PgPool;

fn new_user(username: &str, email: Option<&str>) -> CreateUser {
    CreateUser {
        fullname: "Ada Lovelace".to_string(),
        username: username.to_string(),
        email: email.map(str::to_owned),
        phone: None,
        avatar: None,
    }
}

fn no_changes() -> UpdateUser {
    UpdateUser {
        fullname: None,
        username: None,
        email: None,
        phone: None,
        avatar: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_username_is_a_unique_violation(pool: PgPool) {
    UserRepo::create(&pool, &new_user("ada", None)).await.unwrap();

    let err = UserRepo::create(&pool, &new_user("ada", None))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), StorageErrorKind::UniqueViolation);
    assert_eq!(err.code(), Some("23505"));
    assert_eq!(err.constraint(), Some("uq_users_username"));
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_email_names_its_constraint(pool: PgPool) {
    UserRepo::create(&pool, &new_user("ada", Some("ada@example.com")))
        .await
        .unwrap();

    let err = UserRepo::create(&pool, &new_user("grace", Some("ada@example.com")))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), StorageErrorKind::UniqueViolation);
    assert_eq!(err.constraint(), Some("uq_users_email"));
}

#[sqlx::test(migrations = "./migrations")]
async fn get_missing_user_is_record_not_found(pool: PgPool) {
    let err = UserRepo::get(&pool, uuid::Uuid::now_v7()).await.unwrap_err();
    assert_eq!(err.kind(), StorageErrorKind::RecordNotFound);
    assert_eq!(err.code(), None);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_missing_user_is_record_not_found(pool: PgPool) {
    let changes = UpdateUser {
        fullname: Some("Nobody".to_string()),
        ..no_changes()
    };

    let err = UserRepo::update(&pool, uuid::Uuid::now_v7(), &changes)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), StorageErrorKind::RecordNotFound);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_keeps_fields_that_were_not_given(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("ada", Some("ada@example.com")))
        .await
        .unwrap();

    let changes = UpdateUser {
        fullname: Some("Augusta Ada King".to_string()),
        ..no_changes()
    };
    let updated = UserRepo::update(&pool, user.id, &changes).await.unwrap();

    assert_eq!(updated.fullname, "Augusta Ada King");
    assert_eq!(updated.username, "ada");
    assert_eq!(updated.email.as_deref(), Some("ada@example.com"));
    assert!(updated.updated_at >= user.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_reports_whether_a_row_was_removed(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("ada", None)).await.unwrap();

    assert!(UserRepo::delete(&pool, user.id).await.unwrap());
    assert!(!UserRepo::delete(&pool, user.id).await.unwrap());
    assert_matches!(UserRepo::find_by_id(&pool, user.id).await, Ok(None));
}

#[sqlx::test(migrations = "./migrations")]
async fn list_returns_every_user(pool: PgPool) {
    UserRepo::create(&pool, &new_user("ada", None)).await.unwrap();
    UserRepo::create(&pool, &new_user("grace", None)).await.unwrap();

    let users = UserRepo::list(&pool).await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"ada") && names.contains(&"grace"));
}
