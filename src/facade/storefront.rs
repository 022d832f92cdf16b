use crate::auth::{AccountManager, AuthSession, UserProfile};
use crate::cart::{CartState, SessionCart};
use crate::catalog::{Product, ProductCatalog, RemoteSource};
use crate::checkout::{self, CheckoutForm};
use crate::config::StorefrontConfig;
use crate::core::Result;
use crate::orders::{Order, OrderStore};
use crate::storage::{MemorySessionStorage, SessionStorage};
use std::sync::Arc;

/// One browsing session over the storefront.
///
/// Owns the catalog, the accounts, the order log, and the session cart,
/// and routes every cart mutation through the four named transitions;
/// no consumer touches cart fields directly. The cart is rehydrated from
/// the given session storage at construction.
///
/// # Examples
///
/// ```
/// use shopfront::{Product, Storefront, StorefrontConfig};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> shopfront::Result<()> {
/// let mut shop = Storefront::open(StorefrontConfig::default()).await?;
///
/// let mug = Product::new("Mug", 12.5, "A mug", "kitchen", "https://img/mug.png");
/// let id = mug.id.clone();
/// shop.catalog().create(mug).await?;
///
/// shop.add_to_cart(&id).await?;
/// shop.add_to_cart(&id).await?;
/// assert_eq!(shop.cart().total_quantity(), 2);
/// # Ok(())
/// # }
/// ```
pub struct Storefront {
    config: StorefrontConfig,
    catalog: ProductCatalog,
    accounts: AccountManager,
    orders: OrderStore,
    cart: SessionCart,
}

impl Storefront {
    /// Opens a storefront with its own fresh in-memory session storage.
    pub async fn open(config: StorefrontConfig) -> Result<Self> {
        let storage: Arc<dyn SessionStorage> = match config.session_quota {
            Some(quota) => Arc::new(MemorySessionStorage::with_quota(quota)),
            None => Arc::new(MemorySessionStorage::new()),
        };
        Self::open_with_storage(config, storage).await
    }

    /// Opens a storefront over existing session storage, rehydrating any
    /// cart snapshot a previous facade left there.
    pub async fn open_with_storage(
        config: StorefrontConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<Self> {
        let accounts =
            AccountManager::with_admin(&config.admin_email, &config.admin_password).await?;
        let cart = SessionCart::load(storage);
        tracing::debug!(rehydrated = !cart.state().is_empty(), "storefront opened");

        Ok(Self {
            config,
            catalog: ProductCatalog::new(),
            accounts,
            orders: OrderStore::new(),
            cart,
        })
    }

    /// Fetches the product listing from the configured remote endpoint
    /// and replaces the catalog with it.
    pub async fn refresh_catalog(&self) -> Result<usize> {
        let source = RemoteSource::new(self.config.catalog_url.clone());
        source.load_into(&self.catalog).await
    }

    /// The product listing, sorted by title.
    pub async fn products(&self) -> Vec<Product> {
        self.catalog.list().await
    }

    /// Adds one unit of the product with the given id to the cart.
    pub async fn add_to_cart(&mut self, product_id: &str) -> Result<()> {
        let product = self.catalog.get(product_id).await?;
        self.cart.add(product.cart_entry());
        Ok(())
    }

    /// Removes the whole cart line with the given title.
    pub fn remove_from_cart(&mut self, title: &str) {
        self.cart.remove(title);
    }

    /// Sets the count of the cart line with the given title; 0 removes it.
    pub fn update_quantity(&mut self, title: &str, new_count: u32) {
        self.cart.update_quantity(title, new_count);
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// The current cart snapshot.
    pub fn cart(&self) -> &CartState {
        self.cart.state()
    }

    /// Registers a customer account.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: &str,
        address: &str,
    ) -> Result<UserProfile> {
        self.accounts.register(email, password, username, address).await
    }

    /// Authenticates an existing account.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.accounts.authenticate(email, password).await
    }

    /// Validates the form, records the order for `user_id`, and resets
    /// the cart (deleting its persisted snapshot).
    pub async fn checkout(&mut self, form: &CheckoutForm, user_id: &str) -> Result<Order> {
        checkout::checkout(form, &mut self.cart, &self.orders, user_id).await
    }

    /// Orders placed by one user, newest first.
    pub async fn orders_for(&self, user_id: &str) -> Vec<Order> {
        self.orders.orders_by_user(user_id).await
    }

    /// Admin access to the product catalog.
    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Admin access to the account manager.
    pub fn accounts(&self) -> &AccountManager {
        &self.accounts
    }

    /// Admin access to the order log.
    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }
}
