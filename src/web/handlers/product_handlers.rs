// src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Product;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

const PRODUCT_COLUMNS: &str = "id, name, description, price_cents, stock_quantity, created_at, updated_at";

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products: Vec<Product> = sqlx::query_as(&format!(
    "SELECT {} FROM products ORDER BY name ASC",
    PRODUCT_COLUMNS
  ))
  .fetch_all(&app_state.db_pool)
  .await
  .map_err(|e| {
    error!("Failed to fetch products from database: {}", e);
    AppError::Sqlx(e)
  })?;

  info!("Successfully fetched {} products.", products.len());

  Ok(HttpResponse::Ok().json(json!({
      "message": "Products fetched successfully.",
      "products": products
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product_id_to_fetch = path.into_inner();

  let product_opt: Option<Product> = sqlx::query_as(&format!(
    "SELECT {} FROM products WHERE id = $1",
    PRODUCT_COLUMNS
  ))
  .bind(product_id_to_fetch)
  .fetch_optional(&app_state.db_pool)
  .await
  .map_err(|e| {
    error!("Database error while fetching product {}: {}", product_id_to_fetch, e);
    AppError::Sqlx(e)
  })?;

  match product_opt {
    Some(product) => Ok(HttpResponse::Ok().json(json!({
        "message": "Product fetched successfully.",
        "product": product
    }))),
    None => {
      warn!("Product with ID {} not found.", product_id_to_fetch);
      Err(AppError::NotFound(format!(
        "Product with ID {} not found.",
        product_id_to_fetch
      )))
    }
  }
}

#[derive(Deserialize, Debug)]
pub struct CreateProductRequestPayload {
  pub name: String,
  pub description: Option<String>,
  pub price_cents: i32,
  #[serde(default)]
  pub stock_quantity: i32,
}

#[instrument(
    name = "handler::create_product",
    skip(app_state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, name = %req_payload.name)
)]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CreateProductRequestPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  if req_payload.name.trim().is_empty() {
    return Err(AppError::Validation("Product name is required.".to_string()));
  }
  if req_payload.price_cents < 0 {
    return Err(AppError::Validation("Product price cannot be negative.".to_string()));
  }
  if req_payload.stock_quantity < 0 {
    return Err(AppError::Validation("Stock quantity cannot be negative.".to_string()));
  }

  let product: Product = sqlx::query_as(&format!(
    "INSERT INTO products (name, description, price_cents, stock_quantity) VALUES ($1, $2, $3, $4) RETURNING {}",
    PRODUCT_COLUMNS
  ))
  .bind(req_payload.name.trim())
  .bind(req_payload.description.as_deref())
  .bind(req_payload.price_cents)
  .bind(req_payload.stock_quantity)
  .fetch_one(&app_state.db_pool)
  .await?;

  info!("Product {} created by user {}.", product.id, auth_user.user_id);

  Ok(HttpResponse::Created().json(json!({
      "message": "Product created successfully.",
      "product": product
  })))
}
