// src/db/memory.rs

//! In-memory `CartStore`, carts in a mutex-guarded map keyed by user.
//!
//! Each method takes the lock once for its whole mutation, so it offers the
//! same atomicity contract as the single-statement SQL store. The test suite
//! runs the cart service against this implementation, including the
//! concurrent-add convergence checks.

use crate::db::cart_store::CartStore;
use crate::errors::Result;
use crate::models::CartItem;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryCartStore {
  // user_id -> (product_id -> line item)
  carts: Mutex<HashMap<Uuid, HashMap<Uuid, CartItem>>>,
}

impl InMemoryCartStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn sorted(lines: &HashMap<Uuid, CartItem>) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = lines.values().cloned().collect();
    // Match the SQL ordering: oldest first, product id as tie-breaker.
    items.sort_by(|a, b| a.added_at.cmp(&b.added_at).then(a.product_id.cmp(&b.product_id)));
    items
  }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
  async fn items(&self, user_id: Uuid) -> Result<Vec<CartItem>> {
    let carts = self.carts.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    Ok(carts.get(&user_id).map(Self::sorted).unwrap_or_default())
  }

  async fn upsert_add(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<CartItem> {
    let mut carts = self.carts.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let lines = carts.entry(user_id).or_default();

    let now = Utc::now();
    let item = lines
      .entry(product_id)
      .and_modify(|line| {
        line.quantity += quantity;
        line.updated_at = now;
      })
      .or_insert_with(|| CartItem {
        id: Uuid::new_v4(),
        user_id,
        product_id,
        quantity,
        added_at: now,
        updated_at: now,
      });

    Ok(item.clone())
  }

  async fn overwrite_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<Option<CartItem>> {
    let mut carts = self.carts.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let line = carts.get_mut(&user_id).and_then(|lines| lines.get_mut(&product_id));
    match line {
      Some(line) => {
        line.quantity = quantity;
        line.updated_at = Utc::now();
        Ok(Some(line.clone()))
      }
      None => Ok(None),
    }
  }

  async fn delete_item(&self, user_id: Uuid, product_id: Uuid) -> Result<bool> {
    let mut carts = self.carts.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let removed = carts
      .get_mut(&user_id)
      .map(|lines| lines.remove(&product_id).is_some())
      .unwrap_or(false);

    Ok(removed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn upsert_merges_quantity_for_existing_line() {
    let store = InMemoryCartStore::new();
    let user = Uuid::new_v4();
    let product = Uuid::new_v4();

    let first = store.upsert_add(user, product, 2).await.unwrap();
    let second = store.upsert_add(user, product, 3).await.unwrap();

    assert_eq!(first.id, second.id, "merge must reuse the existing line");
    assert_eq!(second.quantity, 5);
    assert_eq!(store.items(user).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn overwrite_on_missing_line_is_none() {
    let store = InMemoryCartStore::new();
    let outcome = store.overwrite_quantity(Uuid::new_v4(), Uuid::new_v4(), 5).await.unwrap();
    assert!(outcome.is_none());
  }

  #[tokio::test]
  async fn delete_reports_whether_a_line_existed() {
    let store = InMemoryCartStore::new();
    let user = Uuid::new_v4();
    let product = Uuid::new_v4();

    store.upsert_add(user, product, 1).await.unwrap();

    assert!(store.delete_item(user, product).await.unwrap());
    assert!(!store.delete_item(user, product).await.unwrap());
  }
}
