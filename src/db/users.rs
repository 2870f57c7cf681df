// src/db/users.rs

//! Row-level helpers for the `users` table. Runtime-checked queries; id and
//! timestamps are generated by the database.

use crate::errors::{AppError, Result};
use crate::models::User;
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, email, password_hash, created_at, updated_at";

pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
  let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
    .bind(email)
    .fetch_one(pool)
    .await?;

  Ok(exists)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
  let user: Option<User> = sqlx::query_as(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
    .bind(email)
    .fetch_optional(pool)
    .await?;

  Ok(user)
}

pub async fn insert(pool: &PgPool, email: &str, password_hash: &str) -> Result<User> {
  let user: User = sqlx::query_as(&format!(
    "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING {}",
    USER_COLUMNS
  ))
  .bind(email)
  .bind(password_hash)
  .fetch_one(pool)
  .await
  .map_err(|e| match &e {
    // A concurrent signup can slip past the EXISTS pre-check; the unique
    // index on email is the authority.
    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
      AppError::Validation("An account with this email already exists.".to_string())
    }
    _ => AppError::Sqlx(e),
  })?;

  Ok(user)
}
