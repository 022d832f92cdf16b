use super::state::{CartEntry, CartState};
use crate::storage::SessionStorage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fixed session-storage key for the cart snapshot.
pub const CART_STATE_KEY: &str = "cartState";

/// On-the-wire shape of the persisted snapshot: `{"cart": {...}}`.
#[derive(Debug, Serialize, Deserialize)]
struct CartSnapshot {
    cart: CartState,
}

/// A [`CartState`] paired with session-scoped snapshot persistence.
///
/// Every transition writes a JSON snapshot under [`CART_STATE_KEY`];
/// write failures are swallowed and the in-memory state stays
/// authoritative whether or not the snapshot landed. Loading never
/// fails: a missing or
/// unparseable snapshot falls back to the empty cart.
pub struct SessionCart {
    state: CartState,
    storage: Arc<dyn SessionStorage>,
}

impl SessionCart {
    /// Creates a cart rehydrated from `storage`, or empty if no prior
    /// snapshot is present and parseable.
    pub fn load(storage: Arc<dyn SessionStorage>) -> Self {
        let state = match storage.get_item(CART_STATE_KEY) {
            Some(raw) => match serde_json::from_str::<CartSnapshot>(&raw) {
                Ok(snapshot) => snapshot.cart,
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unparseable cart snapshot");
                    CartState::new()
                }
            },
            None => CartState::new(),
        };
        Self { state, storage }
    }

    /// Creates an empty cart over `storage`, ignoring any prior snapshot.
    pub fn empty(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            state: CartState::new(),
            storage,
        }
    }

    pub fn add(&mut self, entry: CartEntry) {
        self.state.add(entry);
        self.persist();
    }

    pub fn remove(&mut self, title: &str) {
        self.state.remove(title);
        self.persist();
    }

    pub fn update_quantity(&mut self, title: &str, new_count: u32) {
        self.state.update_quantity(title, new_count);
        self.persist();
    }

    /// Resets the cart and persists the empty snapshot.
    pub fn clear(&mut self) {
        self.state.clear();
        self.persist();
    }

    /// Checkout boundary: resets the cart and deletes the snapshot key.
    pub fn complete_checkout(&mut self) {
        self.state.clear();
        self.storage.remove_item(CART_STATE_KEY);
    }

    /// The current cart snapshot, readable at any time.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    fn persist(&self) {
        let snapshot = CartSnapshot {
            cart: self.state.clone(),
        };
        let serialized = match serde_json::to_string(&snapshot) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::debug!(error = %err, "cart snapshot serialization failed");
                return;
            }
        };
        if let Err(err) = self.storage.set_item(CART_STATE_KEY, &serialized) {
            tracing::debug!(error = %err, "cart snapshot write failed");
        }
    }
}
