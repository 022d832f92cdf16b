use anyhow::{Context, Result};
use std::env;

/// Default remote catalog endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";

/// Storefront configuration.
///
/// Built with the builder methods or loaded from the environment. The
/// admin credentials bootstrap the first administrator account; the
/// session quota bounds the in-memory session storage, `None` meaning
/// unbounded.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub catalog_url: String,
    pub admin_email: String,
    pub admin_password: String,
    pub session_quota: Option<usize>,
}

impl StorefrontConfig {
    pub fn new() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            admin_email: "admin@shopfront.local".to_string(),
            admin_password: "adminpass123".to_string(),
            session_quota: None,
        }
    }

    /// Set the remote catalog base URL.
    pub fn catalog_url(mut self, url: &str) -> Self {
        self.catalog_url = url.to_string();
        self
    }

    /// Set the bootstrap administrator credentials.
    pub fn admin(mut self, email: &str, password: &str) -> Self {
        self.admin_email = email.to_string();
        self.admin_password = password.to_string();
        self
    }

    /// Set the session storage byte quota.
    pub fn session_quota(mut self, quota_bytes: usize) -> Self {
        self.session_quota = Some(quota_bytes);
        self
    }

    /// Load from the environment.
    ///
    /// Reads `SHOPFRONT_CATALOG_URL`, `SHOPFRONT_ADMIN_EMAIL`,
    /// `SHOPFRONT_ADMIN_PASSWORD`, and `SHOPFRONT_SESSION_QUOTA`, falling
    /// back to the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();

        if let Ok(url) = env::var("SHOPFRONT_CATALOG_URL") {
            config.catalog_url = url;
        }
        if let Ok(email) = env::var("SHOPFRONT_ADMIN_EMAIL") {
            config.admin_email = email;
        }
        if let Ok(password) = env::var("SHOPFRONT_ADMIN_PASSWORD") {
            config.admin_password = password;
        }
        if let Ok(quota) = env::var("SHOPFRONT_SESSION_QUOTA") {
            config.session_quota = Some(
                quota
                    .parse::<usize>()
                    .context("SHOPFRONT_SESSION_QUOTA must be a byte count")?,
            );
        }

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.catalog_url.is_empty() {
            return Err("catalog_url cannot be empty".to_string());
        }
        if !self.catalog_url.starts_with("http://") && !self.catalog_url.starts_with("https://") {
            return Err("catalog_url must be an http(s) URL".to_string());
        }
        if self.admin_email.is_empty() {
            return Err("admin_email cannot be empty".to_string());
        }
        if self.admin_password.len() < 8 {
            return Err("admin_password must be at least 8 characters".to_string());
        }
        if self.session_quota == Some(0) {
            return Err("session_quota must be > 0 when set".to_string());
        }
        Ok(())
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self::new()
    }
}
