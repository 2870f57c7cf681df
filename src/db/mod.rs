// src/db/mod.rs

//! Database access: the cart store abstraction and row-level helpers.

pub mod cart_store;
pub mod memory;
pub mod users;

pub use cart_store::{CartStore, PgCartStore};
pub use memory::InMemoryCartStore;
