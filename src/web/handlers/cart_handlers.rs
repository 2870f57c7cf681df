// src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Cart;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct AddItemRequestPayload {
  pub product_id: Uuid,
  pub quantity: i32,
}

#[derive(Deserialize, Debug)]
pub struct SetQuantityRequestPayload {
  pub product_id: Uuid,
  pub quantity: i32,
}

#[derive(Deserialize, Debug)]
pub struct RemoveItemRequestPayload {
  pub product_id: Uuid,
}

// Every cart response carries the full cart plus an explicit empty marker,
// so clients never have to infer "no cart yet" from an error.
fn cart_response(message: &str, cart: &Cart) -> HttpResponse {
  HttpResponse::Ok().json(json!({
      "message": message,
      "cart": cart,
      "empty": cart.is_empty()
  }))
}

// --- Handler Implementations ---

#[instrument(name = "handler::get_cart", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart = app_state.cart_service.cart(auth_user.user_id).await?;

  Ok(cart_response("Cart fetched successfully.", &cart))
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, product_id = %req_payload.product_id, quantity = %req_payload.quantity)
)]
pub async fn add_item_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddItemRequestPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart = app_state
    .cart_service
    .add_item(auth_user.user_id, req_payload.product_id, req_payload.quantity)
    .await?;

  info!(
    "Add to cart successful for user {}: {} line item(s) in cart.",
    auth_user.user_id,
    cart.items.len()
  );

  Ok(cart_response("Item added to cart successfully.", &cart))
}

#[instrument(
    name = "handler::set_cart_quantity",
    skip(app_state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, product_id = %req_payload.product_id, quantity = %req_payload.quantity)
)]
pub async fn set_quantity_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<SetQuantityRequestPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart = app_state
    .cart_service
    .set_quantity(auth_user.user_id, req_payload.product_id, req_payload.quantity)
    .await?;

  Ok(cart_response("Cart item quantity updated.", &cart))
}

#[instrument(
    name = "handler::remove_from_cart",
    skip(app_state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, product_id = %req_payload.product_id)
)]
pub async fn remove_item_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<RemoveItemRequestPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart = app_state
    .cart_service
    .remove_item(auth_user.user_id, req_payload.product_id)
    .await?;

  Ok(cart_response("Item removed from cart.", &cart))
}
