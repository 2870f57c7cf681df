// src/models/cart.rs

//! Cart line items and the per-user cart projection.
//!
//! There is no `carts` table: a user's cart is the set of their rows in
//! `cart_items`, keyed by `(user_id, product_id)`. A cart with zero rows and
//! a cart that never existed are the same observable thing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
  pub id: Uuid, // Primary key for the cart_item itself
  pub user_id: Uuid,
  // Weak reference into the product catalog; not enforced with a foreign key.
  pub product_id: Uuid,
  pub quantity: i32,
  pub added_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// A user's full cart, as returned by every cart operation.
#[derive(Debug, Clone, Serialize)]
pub struct Cart {
  pub user_id: Uuid,
  pub items: Vec<CartItem>,
}

impl Cart {
  pub fn new(user_id: Uuid, items: Vec<CartItem>) -> Self {
    Self { user_id, items }
  }

  /// True when the cart has no line items (or was never created).
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Line item for a product, if present.
  pub fn item_for(&self, product_id: Uuid) -> Option<&CartItem> {
    self.items.iter().find(|i| i.product_id == product_id)
  }
}
