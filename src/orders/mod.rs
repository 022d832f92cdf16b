use crate::cart::{CartItem, CartState};
use crate::core::{Result, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A recorded order: the cart contents at checkout plus who placed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub total_amount: f64,
    pub total_quantity: u32,
    pub created_at: DateTime<Utc>,
}

/// In-memory order log.
///
/// Orders are append-only; there is no cross-store transaction with the
/// cart, the checkout flow sequences the two steps.
pub struct OrderStore {
    orders: RwLock<Vec<Order>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(Vec::new()),
        }
    }

    /// Records an order from the current cart snapshot.
    ///
    /// The items and both totals are copied as-is; the timestamp is
    /// assigned here. An empty cart is rejected.
    pub async fn place(&self, cart: &CartState, user_id: &str) -> Result<Order> {
        if cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let order = Order {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            items: cart.items().to_vec(),
            total_amount: cart.total_amount(),
            total_quantity: cart.total_quantity(),
            created_at: Utc::now(),
        };

        let mut orders = self.orders.write().await;
        orders.push(order.clone());
        tracing::info!(
            order_id = %order.id,
            user_id,
            total_amount = order.total_amount,
            total_quantity = order.total_quantity,
            "order recorded"
        );
        Ok(order)
    }

    /// Orders placed by one user, newest first.
    pub async fn orders_by_user(&self, user_id: &str) -> Vec<Order> {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders
            .iter()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
    }

    /// Every recorded order, newest first, for admin display.
    pub async fn list(&self) -> Vec<Order> {
        let orders = self.orders.read().await;
        let mut listing: Vec<Order> = orders.clone();
        listing.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listing
    }

    pub async fn get(&self, order_id: &str) -> Result<Order> {
        let orders = self.orders.read().await;
        orders
            .iter()
            .find(|order| order.id == order_id)
            .cloned()
            .ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}
