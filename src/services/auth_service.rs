// src/services/auth_service.rs

//! Credential plumbing: argon2 password hashing and bearer token
//! mint/verify. Everything identity-shaped lives here so the cart and
//! catalog layers only ever see a normalized user id.

use crate::errors::AppError;
use argon2::{
  password_hash::{
    rand_core::OsRng, // For generating random salts
    PasswordHash,
    PasswordHasher,
    PasswordVerifier,
    SaltString,
  },
  Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
  /// Subject: the user id.
  pub sub: Uuid,
  /// Expiry, seconds since the epoch.
  pub exp: i64,
  /// Issued-at, seconds since the epoch.
  pub iat: i64,
}

/// Hashes a plain-text password using Argon2 with a fresh random salt.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    return Err(AppError::Validation(
      "Password cannot be empty for hashing.".to_string(),
    ));
  }

  let salt = SaltString::generate(&mut OsRng);
  let argon2_hasher = Argon2::default(); // Default parameters are the recommended ones

  match argon2_hasher.hash_password(password.as_bytes(), &salt) {
    Ok(password_hash_obj) => Ok(password_hash_obj.to_string()),
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!(
        "Password hashing process failed: {}",
        argon_err
      )))
    }
  }
}

/// Verifies a plain-text password against a stored Argon2 hash. `Ok(false)`
/// means the password simply does not match; errors are reserved for broken
/// stored hashes and internal failures.
#[instrument(name = "auth_service::verify_password", skip(hashed_password_str, provided_password), err(Display))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool, AppError> {
  if hashed_password_str.is_empty() {
    return Err(AppError::Auth("Invalid stored password format (empty).".to_string()));
  }
  if provided_password.is_empty() {
    return Err(AppError::Auth(
      "Provided password for verification cannot be empty.".to_string(),
    ));
  }

  let parsed_hash = match PasswordHash::new(hashed_password_str) {
    Ok(ph) => ph,
    Err(parse_err) => {
      error!(error = %parse_err, "Failed to parse stored password hash string.");
      return Err(AppError::Internal(format!(
        "Invalid stored password hash format: {}",
        parse_err
      )));
    }
  };

  let argon2_verifier = Argon2::default();

  match argon2_verifier.verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: passwords do not match.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

/// Mints a signed access token for a user.
#[instrument(name = "auth_service::mint_access_token", skip(secret), fields(user_id = %user_id))]
pub fn mint_access_token(user_id: Uuid, secret: &str, ttl_seconds: i64) -> Result<String, AppError> {
  let now = Utc::now();
  let claims = Claims {
    sub: user_id,
    exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
    iat: now.timestamp(),
  };

  encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).map_err(|e| {
    error!(error = %e, "Failed to encode access token.");
    AppError::Internal(format!("Token encoding failed: {}", e))
  })
}

/// Verifies a bearer token and returns the user id it was minted for.
/// Expiry is enforced by the default validation.
#[instrument(name = "auth_service::verify_access_token", skip(token, secret))]
pub fn verify_access_token(token: &str, secret: &str) -> Result<Uuid, AppError> {
  let token_data = decode::<Claims>(
    token,
    &DecodingKey::from_secret(secret.as_bytes()),
    &Validation::default(),
  )
  .map_err(|e| {
    debug!(error = %e, "Bearer token rejected.");
    AppError::Auth("Invalid or expired access token.".to_string())
  })?;

  Ok(token_data.claims.sub)
}

#[cfg(test)]
mod tests {
  use super::*;

  const TEST_SECRET: &str = "test-signing-secret";

  #[test]
  fn hash_then_verify_round_trip() {
    let hash = hash_password("correct horse battery staple").unwrap();
    assert!(verify_password(&hash, "correct horse battery staple").unwrap());
  }

  #[test]
  fn verify_rejects_wrong_password() {
    let hash = hash_password("correct horse battery staple").unwrap();
    assert!(!verify_password(&hash, "incorrect horse").unwrap());
  }

  #[test]
  fn empty_password_is_rejected_for_hashing() {
    assert!(matches!(hash_password(""), Err(AppError::Validation(_))));
  }

  #[test]
  fn token_round_trip_preserves_subject() {
    let user_id = Uuid::new_v4();
    let token = mint_access_token(user_id, TEST_SECRET, 3600).unwrap();
    let verified = verify_access_token(&token, TEST_SECRET).unwrap();
    assert_eq!(verified, user_id);
  }

  #[test]
  fn tampered_token_is_rejected() {
    let token = mint_access_token(Uuid::new_v4(), TEST_SECRET, 3600).unwrap();
    let mut tampered = token.clone();
    tampered.pop(); // Corrupt the signature
    assert!(matches!(
      verify_access_token(&tampered, TEST_SECRET),
      Err(AppError::Auth(_))
    ));
  }

  #[test]
  fn token_signed_with_other_secret_is_rejected() {
    let token = mint_access_token(Uuid::new_v4(), "some-other-secret", 3600).unwrap();
    assert!(matches!(
      verify_access_token(&token, TEST_SECRET),
      Err(AppError::Auth(_))
    ));
  }
}
