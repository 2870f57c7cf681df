// src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::db::users;
use crate::errors::AppError;
use crate::services::auth_service;
use crate::state::AppState;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct SignupRequestPayload {
  pub email: String,
  pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct SigninRequestPayload {
  pub email: String,
  pub password: String,
}

fn validate_credentials_input(email: &str, password: &str) -> Result<(), AppError> {
  if email.is_empty() || !email.contains('@') {
    return Err(AppError::Validation("Valid email is required.".to_string()));
  }
  if password.len() < 8 {
    return Err(AppError::Validation(
      "Password must be at least 8 characters long.".to_string(),
    ));
  }
  Ok(())
}

// --- Handler Implementations ---

#[instrument(name = "handler::signup", skip(app_state, req_payload), fields(email = %req_payload.email))]
pub async fn signup_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<SignupRequestPayload>,
) -> Result<HttpResponse, AppError> {
  validate_credentials_input(&req_payload.email, &req_payload.password)?;

  if users::email_exists(&app_state.db_pool, &req_payload.email).await? {
    warn!("Attempt to signup with existing email: {}", req_payload.email);
    return Err(AppError::Validation(
      "An account with this email already exists.".to_string(),
    ));
  }

  let password_hash = auth_service::hash_password(&req_payload.password)?;
  let user = users::insert(&app_state.db_pool, &req_payload.email, &password_hash).await?;

  info!("User {} created for email {}.", user.id, user.email);

  Ok(HttpResponse::Created().json(json!({
      "message": "Account created successfully.",
      "user": user // password_hash is skipped during serialization
  })))
}

#[instrument(name = "handler::signin", skip(app_state, req_payload), fields(email = %req_payload.email))]
pub async fn signin_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<SigninRequestPayload>,
) -> Result<HttpResponse, AppError> {
  // A single failure message for unknown email and wrong password; don't
  // leak which half was wrong.
  let credential_failure = || AppError::Auth("Invalid email or password.".to_string());

  let user = users::find_by_email(&app_state.db_pool, &req_payload.email)
    .await?
    .ok_or_else(credential_failure)?;

  if !auth_service::verify_password(&user.password_hash, &req_payload.password)? {
    warn!("Failed signin attempt for email {}.", req_payload.email);
    return Err(credential_failure());
  }

  let token = auth_service::mint_access_token(user.id, &app_state.config.jwt_secret, app_state.config.jwt_ttl_seconds)?;

  info!("User {} signed in.", user.id);

  Ok(HttpResponse::Ok().json(json!({
      "message": "Signed in successfully.",
      "token": token,
      "user_id": user.id
  })))
}
