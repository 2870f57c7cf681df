// src/web/extractors.rs

//! Caller identity resolution.
//!
//! Handlers never look at credential material themselves; they take an
//! `AuthenticatedUser` and get a normalized user id. Resolution currently
//! understands `Authorization: Bearer <token>`; a second credential type
//! (e.g. a server-side session) would plug in here and nowhere else.

use actix_web::{http::header, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::auth_service;
use crate::state::AppState;

#[derive(Debug)]
pub struct AuthenticatedUser {
  pub user_id: Uuid,
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
  req
    .headers()
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let state = match req.app_data::<web::Data<AppState>>() {
      Some(state) => state,
      None => {
        // Only reachable if the app was assembled without AppState.
        return ready(Err(AppError::Internal(
          "Application state is not configured.".to_string(),
        )));
      }
    };

    let token = match bearer_token(req) {
      Some(token) => token,
      None => {
        warn!("AuthenticatedUser extractor: missing or malformed Authorization header.");
        return ready(Err(AppError::Auth(
          "User authentication required. Provide an 'Authorization: Bearer <token>' header.".to_string(),
        )));
      }
    };

    let resolved =
      auth_service::verify_access_token(token, &state.config.jwt_secret).map(|user_id| AuthenticatedUser { user_id });

    ready(resolved)
  }
}
