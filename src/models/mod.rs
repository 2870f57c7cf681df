// src/models/mod.rs

//! Contains data structures representing database entities.

// Declare child modules for each model
pub mod cart;
pub mod product;
pub mod user;

// Re-export the model structs for convenient access
pub use cart::{Cart, CartItem};
pub use product::Product;
pub use user::User;
