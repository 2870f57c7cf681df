// src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,

  // Bearer token settings for the identity seam
  pub jwt_secret: String,
  pub jwt_ttl_seconds: i64,

  // Apply embedded migrations on startup
  pub run_migrations: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;

    // Token signing material must be provided; there is no safe default for it.
    let jwt_secret = get_env("JWT_SECRET")?;
    let jwt_ttl_seconds = get_env("JWT_TTL_SECONDS")
      .unwrap_or_else(|_| "86400".to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid JWT_TTL_SECONDS: {}", e)))?;

    let run_migrations = get_env("RUN_MIGRATIONS")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid RUN_MIGRATIONS value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      jwt_secret,
      jwt_ttl_seconds,
      run_migrations,
    })
  }
}
