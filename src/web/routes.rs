// src/web/routes.rs

use actix_web::web;

// Liveness probe. Deliberately does not touch the database: a saturated pool
// should not flap the health endpoint.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// This function is called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1") // Base path for API version 1
      // Health Check Route
      .route("/health", web::get().to(health_check_handler))
      // Authentication Routes
      .service(
        web::scope("/auth")
          .route(
            "/signup",
            web::post().to(crate::web::handlers::auth_handlers::signup_handler),
          )
          .route(
            "/signin",
            web::post().to(crate::web::handlers::auth_handlers::signin_handler),
          ),
      )
      // Cart Routes: one resource, four verbs. The owner comes from the
      // AuthenticatedUser extractor, the product reference from the body.
      .service(
        web::scope("/cart")
          .route("", web::get().to(crate::web::handlers::cart_handlers::get_cart_handler))
          .route("", web::post().to(crate::web::handlers::cart_handlers::add_item_handler))
          .route(
            "",
            web::put().to(crate::web::handlers::cart_handlers::set_quantity_handler),
          )
          .route(
            "",
            web::delete().to(crate::web::handlers::cart_handlers::remove_item_handler),
          ),
      )
      // Product Catalog Routes
      .service(
        web::scope("/products")
          .route(
            "",
            web::get().to(crate::web::handlers::product_handlers::list_products_handler),
          )
          .route(
            "",
            web::post().to(crate::web::handlers::product_handlers::create_product_handler),
          )
          .route(
            "/{product_id}",
            web::get().to(crate::web::handlers::product_handlers::get_product_handler),
          ),
      ),
  );
}
