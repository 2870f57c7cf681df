// src/state.rs

use crate::config::AppConfig;
use crate::services::CartService;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub db_pool: PgPool,
  pub cart_service: Arc<CartService>,
  pub config: Arc<AppConfig>, // Share loaded config
}
