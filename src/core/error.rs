use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User '{0}' already exists")]
    UserExists(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Product '{0}' already exists")]
    ProductExists(String),

    #[error("Product '{0}' not found")]
    ProductNotFound(String),

    #[error("Order '{0}' not found")]
    OrderNotFound(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Catalog fetch failed: {0}")]
    Fetch(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Fetch(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::Storage(err.to_string())
    }
}
