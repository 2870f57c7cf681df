// tests/cart_service_tests.rs
mod common; // Reference the common module

use common::*;
use std::sync::Arc;
use storefront::errors::AppError;
use uuid::Uuid;

#[tokio::test]
async fn get_cart_on_absent_cart_is_empty_not_an_error() {
  setup_tracing();
  let service = cart_service();
  let user = Uuid::new_v4();

  let cart = service.cart(user).await.expect("reading an absent cart must succeed");

  assert!(cart.is_empty());
  assert_eq!(cart.user_id, user);
  assert!(cart.items.is_empty());
}

#[tokio::test]
async fn adding_same_product_twice_merges_into_one_line() {
  setup_tracing();
  let service = cart_service();
  let user = Uuid::new_v4();
  let product = Uuid::new_v4();

  service.add_item(user, product, 2).await.unwrap();
  let cart = service.add_item(user, product, 5).await.unwrap();

  assert_eq!(cart.items.len(), 1, "no duplicate line items for the same product");
  assert_eq!(cart.items[0].quantity, 7);
}

#[tokio::test]
async fn add_with_non_positive_quantity_is_rejected_and_cart_unchanged() {
  setup_tracing();
  let service = cart_service();
  let user = Uuid::new_v4();
  let product = Uuid::new_v4();

  let zero = service.add_item(user, product, 0).await;
  assert!(matches!(zero, Err(AppError::Validation(_))));

  let negative = service.add_item(user, product, -3).await;
  assert!(matches!(negative, Err(AppError::Validation(_))));

  let cart = service.cart(user).await.unwrap();
  assert!(cart.is_empty());
}

#[tokio::test]
async fn set_quantity_overwrites_instead_of_merging() {
  setup_tracing();
  let service = cart_service();
  let user = Uuid::new_v4();
  let product = Uuid::new_v4();

  service.add_item(user, product, 4).await.unwrap();
  let cart = service.set_quantity(user, product, 2).await.unwrap();

  assert_eq!(cart.items.len(), 1);
  assert_eq!(cart.items[0].quantity, 2, "set overwrites, it does not add");
}

#[tokio::test]
async fn set_quantity_on_missing_line_is_not_found_and_cart_unchanged() {
  setup_tracing();
  let service = cart_service();
  let user = Uuid::new_v4();
  let present = Uuid::new_v4();
  let absent = Uuid::new_v4();

  service.add_item(user, present, 3).await.unwrap();

  let result = service.set_quantity(user, absent, 9).await;
  assert!(matches!(result, Err(AppError::NotFound(_))));

  let cart = service.cart(user).await.unwrap();
  assert_eq!(cart.items.len(), 1);
  assert_eq!(cart.items[0].product_id, present);
  assert_eq!(cart.items[0].quantity, 3);
}

#[tokio::test]
async fn set_quantity_rejects_non_positive_values() {
  setup_tracing();
  let service = cart_service();
  let user = Uuid::new_v4();
  let product = Uuid::new_v4();

  service.add_item(user, product, 4).await.unwrap();

  // Non-positive set is a validation failure, never an implicit removal.
  let result = service.set_quantity(user, product, 0).await;
  assert!(matches!(result, Err(AppError::Validation(_))));

  let cart = service.cart(user).await.unwrap();
  assert_eq!(cart.items[0].quantity, 4);
}

#[tokio::test]
async fn remove_item_removes_exactly_that_line() {
  setup_tracing();
  let service = cart_service();
  let user = Uuid::new_v4();
  let keep = Uuid::new_v4();
  let to_remove = Uuid::new_v4();

  service.add_item(user, keep, 1).await.unwrap();
  service.add_item(user, to_remove, 2).await.unwrap();

  let cart = service.remove_item(user, to_remove).await.unwrap();

  assert_eq!(cart.items.len(), 1);
  assert_eq!(cart.items[0].product_id, keep);
  assert_eq!(cart.items[0].quantity, 1);
}

#[tokio::test]
async fn removing_last_item_leaves_an_empty_cart_and_repeat_removal_fails() {
  setup_tracing();
  let service = cart_service();
  let user = Uuid::new_v4();
  let product = Uuid::new_v4();

  service.add_item(user, product, 2).await.unwrap();

  let cart = service.remove_item(user, product).await.unwrap();
  assert!(cart.is_empty());

  // The empty cart reads back as empty, not as an error.
  let cart = service.cart(user).await.unwrap();
  assert!(cart.is_empty());

  // Removing an already-removed item deterministically fails.
  let repeat = service.remove_item(user, product).await;
  assert!(matches!(repeat, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn remove_from_absent_cart_is_not_found() {
  setup_tracing();
  let service = cart_service();

  let result = service.remove_item(Uuid::new_v4(), Uuid::new_v4()).await;
  assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn carts_are_isolated_per_user() {
  setup_tracing();
  let service = cart_service();
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();
  let product = Uuid::new_v4();

  service.add_item(alice, product, 2).await.unwrap();
  service.add_item(bob, product, 5).await.unwrap();

  service.remove_item(alice, product).await.unwrap();

  let bobs_cart = service.cart(bob).await.unwrap();
  assert_eq!(bobs_cart.items.len(), 1);
  assert_eq!(bobs_cart.items[0].quantity, 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_converge_to_a_single_line_without_lost_updates() {
  setup_tracing();
  let service = cart_service();
  let user = Uuid::new_v4();
  let product = Uuid::new_v4();

  const CONCURRENT_ADDS: usize = 64;

  let mut handles = Vec::with_capacity(CONCURRENT_ADDS);
  for _ in 0..CONCURRENT_ADDS {
    let service = Arc::clone(&service);
    handles.push(tokio::spawn(async move { service.add_item(user, product, 1).await }));
  }

  for handle in handles {
    handle.await.expect("task must not panic").expect("add must succeed");
  }

  let cart = service.cart(user).await.unwrap();
  assert_eq!(cart.items.len(), 1, "exactly one line item regardless of arrival order");
  assert_eq!(cart.items[0].quantity, CONCURRENT_ADDS as i32, "no lost updates");
}

#[tokio::test]
async fn full_cart_walkthrough() {
  setup_tracing();
  let service = cart_service();
  let user = Uuid::new_v4();
  let p1 = Uuid::new_v4();
  let p2 = Uuid::new_v4();

  // Add p1 x2, then p2 x1, then increment p1 by 3.
  service.add_item(user, p1, 2).await.unwrap();
  service.add_item(user, p2, 1).await.unwrap();
  let cart = service.add_item(user, p1, 3).await.unwrap();

  assert_eq!(cart.items.len(), 2);
  assert_eq!(cart.item_for(p1).unwrap().quantity, 5);
  assert_eq!(cart.item_for(p2).unwrap().quantity, 1);

  // Removing p2 leaves p1 untouched.
  let cart = service.remove_item(user, p2).await.unwrap();
  assert_eq!(cart.items.len(), 1);
  assert_eq!(cart.item_for(p1).unwrap().quantity, 5);

  // Removing p1 empties the cart.
  let cart = service.remove_item(user, p1).await.unwrap();
  assert!(cart.is_empty());

  let cart = service.cart(user).await.unwrap();
  assert!(cart.is_empty());
}
