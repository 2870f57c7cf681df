// src/db/cart_store.rs

//! Cart persistence contract and its PostgreSQL implementation.
//!
//! Every mutation is a single SQL statement. Concurrent add-to-cart calls for
//! the same `(user_id, product_id)` must not lose quantity, so the merge is
//! expressed as `INSERT ... ON CONFLICT ... DO UPDATE` rather than a
//! read-then-write round trip. Overwrite and delete are conditional
//! statements whose affected-row count distinguishes "missing line" from
//! success.

use crate::errors::Result;
use crate::models::CartItem;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[async_trait]
pub trait CartStore: Send + Sync {
  /// All line items for a user, oldest first. Empty if the cart was never
  /// created; callers cannot tell the difference, and should not.
  async fn items(&self, user_id: Uuid) -> Result<Vec<CartItem>>;

  /// Atomic additive upsert: insert the line, or increment the existing
  /// line's quantity by `quantity`. Returns the resulting line.
  async fn upsert_add(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<CartItem>;

  /// Overwrite the quantity of an existing line. `None` when the user has no
  /// line for this product; the store is left untouched in that case.
  async fn overwrite_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<Option<CartItem>>;

  /// Delete a line. `false` when there was nothing to delete.
  async fn delete_item(&self, user_id: Uuid, product_id: Uuid) -> Result<bool>;
}

/// Production store backed by the `cart_items` table.
#[derive(Debug, Clone)]
pub struct PgCartStore {
  pool: PgPool,
}

impl PgCartStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

const CART_ITEM_COLUMNS: &str = "id, user_id, product_id, quantity, added_at, updated_at";

#[async_trait]
impl CartStore for PgCartStore {
  async fn items(&self, user_id: Uuid) -> Result<Vec<CartItem>> {
    let items: Vec<CartItem> = sqlx::query_as(&format!(
      "SELECT {} FROM cart_items WHERE user_id = $1 ORDER BY added_at ASC, product_id ASC",
      CART_ITEM_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(items)
  }

  async fn upsert_add(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<CartItem> {
    // The UNIQUE (user_id, product_id) constraint is the conflict target;
    // quantity merges additively on conflict.
    let item: CartItem = sqlx::query_as(&format!(
      r#"
      INSERT INTO cart_items (user_id, product_id, quantity)
      VALUES ($1, $2, $3)
      ON CONFLICT (user_id, product_id) DO UPDATE
      SET quantity = cart_items.quantity + EXCLUDED.quantity, updated_at = NOW()
      RETURNING {}
      "#,
      CART_ITEM_COLUMNS
    ))
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_one(&self.pool)
    .await?;

    Ok(item)
  }

  async fn overwrite_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<Option<CartItem>> {
    let item: Option<CartItem> = sqlx::query_as(&format!(
      r#"
      UPDATE cart_items
      SET quantity = $3, updated_at = NOW()
      WHERE user_id = $1 AND product_id = $2
      RETURNING {}
      "#,
      CART_ITEM_COLUMNS
    ))
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_optional(&self.pool)
    .await?;

    Ok(item)
  }

  async fn delete_item(&self, user_id: Uuid, product_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
      .bind(user_id)
      .bind(product_id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}
