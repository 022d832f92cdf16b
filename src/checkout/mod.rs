use crate::auth::is_valid_email;
use crate::cart::SessionCart;
use crate::core::{Result, StoreError};
use crate::orders::{Order, OrderStore};
use serde::{Deserialize, Serialize};

/// Checkout form fields. All are required; the email must have a
/// plausible mailbox@domain shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl CheckoutForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            address: address.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation("Name is required".into()));
        }
        if self.email.trim().is_empty() {
            return Err(StoreError::Validation("Email is required".into()));
        }
        if !is_valid_email(&self.email) {
            return Err(StoreError::Validation("Invalid email format".into()));
        }
        if self.address.trim().is_empty() {
            return Err(StoreError::Validation("Address is required".into()));
        }
        Ok(())
    }
}

/// Submits an order for the current cart.
///
/// Validates the form, records the order against `user_id`, then resets
/// the cart and deletes its persisted snapshot key. On any failure the
/// cart is left untouched.
pub async fn checkout(
    form: &CheckoutForm,
    cart: &mut SessionCart,
    orders: &OrderStore,
    user_id: &str,
) -> Result<Order> {
    form.validate()?;

    let order = orders.place(cart.state(), user_id).await?;
    cart.complete_checkout();
    tracing::info!(order_id = %order.id, user_id, "checkout completed");

    Ok(order)
}
