// src/lib.rs

//! storefront: a small e-commerce backend.
//!
//! User accounts with bearer-token sign-in, a product catalog, and a
//! per-user shopping cart. The cart is the interesting part: one cart per
//! user, at most one line item per product, and every mutation is a single
//! atomic store call so concurrent add-to-cart requests cannot lose
//! quantity. See `services::cart_service` for the semantics and
//! `db::cart_store` for the statements that uphold them.

// Declare modules for the application
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

// --- Re-exports for the Public API ---

pub use crate::config::AppConfig;
pub use crate::db::{CartStore, InMemoryCartStore, PgCartStore};
pub use crate::errors::{AppError, Result};
pub use crate::models::{Cart, CartItem, Product, User};
pub use crate::services::CartService;
pub use crate::state::AppState;
