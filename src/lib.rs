// ============================================================================
// Shopfront Library
// ============================================================================

//! In-memory storefront engine.
//!
//! The core is the cart: a pure state container with four transitions
//! (add, remove, update quantity, clear) and two derived aggregates
//! (total amount, total quantity), wrapped in session-scoped snapshot
//! persistence. Around it sit the storefront collaborators: a product
//! catalog with admin CRUD and a remote source, account registration and
//! login with bcrypt-hashed credentials, an order log, and a checkout
//! flow. [`Storefront`] wires one browsing session together.
//!
//! # Examples
//!
//! ```
//! use shopfront::cart::{CartEntry, CartState};
//!
//! let mut cart = CartState::new();
//! cart.add(CartEntry::new("Mug", 29.99, "https://img/mug.png"));
//! cart.add(CartEntry::new("Mug", 29.99, "https://img/mug.png"));
//!
//! assert_eq!(cart.total_quantity(), 2);
//! assert!((cart.total_amount() - 59.98).abs() < 1e-9);
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod core;
pub mod facade;
pub mod orders;
pub mod storage;

// Re-export main types for convenience
pub use crate::core::{Result, StoreError};
pub use facade::Storefront;

pub use auth::{AccountManager, AuthSession, Role, UserProfile};
pub use cart::{CART_STATE_KEY, CartEntry, CartItem, CartState, SessionCart};
pub use catalog::{Product, ProductCatalog, ProductSource, RemoteSource};
pub use checkout::CheckoutForm;
pub use config::StorefrontConfig;
pub use orders::{Order, OrderStore};
pub use storage::{MemorySessionStorage, SessionStorage};
