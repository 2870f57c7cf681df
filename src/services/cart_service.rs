// src/services/cart_service.rs

//! The cart core: one cart per user, at most one line item per product.
//!
//! Semantics, fixed here and relied on by the HTTP layer:
//!  - `add_item` merges additively and creates the cart implicitly.
//!  - `set_quantity` overwrites, and fails with NotFound when the line is
//!    absent; it never creates.
//!  - `remove_item` fails with NotFound when the line is absent, including
//!    repeated removal of the same product.
//!  - Reads of an absent cart are an empty cart, never an error.
//!
//! Quantity must be positive for every mutation; a non-positive quantity is
//! rejected before the store is touched. The store closes the concurrent-add
//! race, not this layer: each mutation below is exactly one store call.

use crate::db::CartStore;
use crate::errors::{AppError, Result};
use crate::models::Cart;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct CartService {
  store: Arc<dyn CartStore>,
}

impl CartService {
  pub fn new(store: Arc<dyn CartStore>) -> Self {
    Self { store }
  }

  fn ensure_positive_quantity(quantity: i32) -> Result<()> {
    if quantity <= 0 {
      return Err(AppError::Validation("Quantity must be a positive number.".to_string()));
    }
    Ok(())
  }

  /// The user's current cart. Empty items means empty cart; callers must not
  /// treat that as a failure.
  #[instrument(name = "cart_service::cart", skip(self), fields(user_id = %user_id))]
  pub async fn cart(&self, user_id: Uuid) -> Result<Cart> {
    let items = self.store.items(user_id).await?;
    Ok(Cart::new(user_id, items))
  }

  /// Add a product to the cart, merging quantities when the line already
  /// exists. Returns the full updated cart.
  #[instrument(
    name = "cart_service::add_item",
    skip(self),
    fields(user_id = %user_id, product_id = %product_id, quantity = quantity)
  )]
  pub async fn add_item(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<Cart> {
    Self::ensure_positive_quantity(quantity)?;

    let line = self.store.upsert_add(user_id, product_id, quantity).await?;
    info!(
      "Cart line for product {} now at quantity {} for user {}.",
      product_id, line.quantity, user_id
    );

    self.cart(user_id).await
  }

  /// Overwrite the quantity of an existing line item.
  #[instrument(
    name = "cart_service::set_quantity",
    skip(self),
    fields(user_id = %user_id, product_id = %product_id, quantity = quantity)
  )]
  pub async fn set_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<Cart> {
    Self::ensure_positive_quantity(quantity)?;

    match self.store.overwrite_quantity(user_id, product_id, quantity).await? {
      Some(line) => {
        info!(
          "Cart line for product {} overwritten to quantity {} for user {}.",
          product_id, line.quantity, user_id
        );
        self.cart(user_id).await
      }
      None => Err(AppError::NotFound(format!(
        "No cart line for product {} to update.",
        product_id
      ))),
    }
  }

  /// Remove a line item from the cart.
  #[instrument(
    name = "cart_service::remove_item",
    skip(self),
    fields(user_id = %user_id, product_id = %product_id)
  )]
  pub async fn remove_item(&self, user_id: Uuid, product_id: Uuid) -> Result<Cart> {
    let removed = self.store.delete_item(user_id, product_id).await?;
    if !removed {
      return Err(AppError::NotFound(format!(
        "No cart line for product {} to remove.",
        product_id
      )));
    }

    info!("Cart line for product {} removed for user {}.", product_id, user_id);
    self.cart(user_id).await
  }
}
