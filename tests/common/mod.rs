// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers in this common test module

use std::sync::Arc;
use storefront::db::InMemoryCartStore;
use storefront::services::CartService;
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// A cart service over the in-memory store, the configuration the whole
/// suite runs against.
pub fn cart_service() -> Arc<CartService> {
  Arc::new(CartService::new(Arc::new(InMemoryCartStore::new())))
}
