use crate::core::{Result, StoreError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid");
}

/// Returns whether `email` has a plausible mailbox@domain shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Access level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Regular shopper: browse, cart, checkout, own orders.
    Customer,
    /// Product and order administration.
    Admin,
}

/// Credentials record. The password is stored only as a bcrypt hash.
#[derive(Debug, Clone)]
pub struct Account {
    email: String,
    password_hash: String,
    role: Role,
    uid: String,
}

impl Account {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Profile stored alongside the credentials at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub username: String,
    pub address: String,
}

/// Result of a successful login: who the caller is and what they may do.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub uid: String,
    pub email: String,
    pub role: Role,
}

/// Registration and login manager.
///
/// Owns the account credentials and the user profiles. Passwords are
/// hashed with bcrypt; authentication failures are reported uniformly so
/// callers cannot distinguish an unknown email from a wrong password.
pub struct AccountManager {
    accounts: RwLock<HashMap<String, Account>>,
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl AccountManager {
    const MIN_PASSWORD_LEN: usize = 8;

    /// Creates a manager with no accounts.
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a manager with a bootstrap administrator.
    pub async fn with_admin(email: &str, password: &str) -> Result<Self> {
        let manager = Self::new();
        manager
            .create_account(email, password, Role::Admin, "admin", "")
            .await?;
        Ok(manager)
    }

    /// Hashes a password with bcrypt's default cost. Each hash carries a
    /// random salt, so equal passwords produce different hashes.
    fn hash_password(password: &str) -> Result<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|err| StoreError::Storage(format!("password hashing failed: {err}")))
    }

    fn verify_password(password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }

    /// Registers a customer: validates, hashes the password, stores the
    /// credentials and the profile. Returns the stored profile.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: &str,
        address: &str,
    ) -> Result<UserProfile> {
        self.create_account(email, password, Role::Customer, username, address)
            .await
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
        role: Role,
        username: &str,
        address: &str,
    ) -> Result<UserProfile> {
        Self::validate_email(email)?;
        Self::validate_password(password)?; // validate before hashing

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(StoreError::UserExists(email.to_string()));
        }

        let account = Account {
            email: email.to_string(),
            password_hash: Self::hash_password(password)?,
            role,
            uid: Uuid::new_v4().to_string(),
        };
        let profile = UserProfile {
            uid: account.uid.clone(),
            email: email.to_string(),
            username: username.to_string(),
            address: address.to_string(),
        };

        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.uid.clone(), profile.clone());
        accounts.insert(email.to_string(), account);
        tracing::info!(email, ?role, "account registered");

        Ok(profile)
    }

    /// Authenticates by email and password.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AuthSession> {
        let accounts = self.accounts.read().await;

        let account = accounts
            .get(email)
            .ok_or(StoreError::InvalidCredentials)?;

        if !Self::verify_password(password, &account.password_hash) {
            return Err(StoreError::InvalidCredentials);
        }

        Ok(AuthSession {
            uid: account.uid.clone(),
            email: account.email.clone(),
            role: account.role,
        })
    }

    /// Replaces the password of an existing account.
    pub async fn update_password(&self, email: &str, new_password: &str) -> Result<()> {
        Self::validate_password(new_password)?;

        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(email)
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;

        account.password_hash = Self::hash_password(new_password)?;
        Ok(())
    }

    /// Deletes an account and its profile. Refuses to delete the last
    /// administrator.
    pub async fn delete_user(&self, email: &str) -> Result<()> {
        let mut accounts = self.accounts.write().await;

        let account = accounts
            .get(email)
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;

        if account.is_admin() {
            let admin_count = accounts.values().filter(|a| a.is_admin()).count();
            if admin_count <= 1 {
                return Err(StoreError::Validation(
                    "Cannot delete the last admin account".into(),
                ));
            }
        }

        let uid = account.uid.clone();
        accounts.remove(email);
        self.profiles.write().await.remove(&uid);
        Ok(())
    }

    /// Returns the profile for a uid.
    pub async fn profile(&self, uid: &str) -> Result<UserProfile> {
        let profiles = self.profiles.read().await;
        profiles
            .get(uid)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound(uid.to_string()))
    }

    /// All profiles, sorted by username, for admin display.
    pub async fn profiles(&self) -> Vec<UserProfile> {
        let profiles = self.profiles.read().await;
        let mut listing: Vec<UserProfile> = profiles.values().cloned().collect();
        listing.sort_by(|a, b| a.username.cmp(&b.username));
        listing
    }

    /// Replaces the stored profile with the same uid. The email field is
    /// identity here and must not change.
    pub async fn update_profile(&self, profile: UserProfile) -> Result<()> {
        let mut profiles = self.profiles.write().await;
        let existing = profiles
            .get(&profile.uid)
            .ok_or_else(|| StoreError::UserNotFound(profile.uid.clone()))?;

        if existing.email != profile.email {
            return Err(StoreError::Validation(
                "Profile email cannot be changed".into(),
            ));
        }

        profiles.insert(profile.uid.clone(), profile);
        Ok(())
    }

    pub async fn user_exists(&self, email: &str) -> bool {
        self.accounts.read().await.contains_key(email)
    }

    pub async fn user_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    fn validate_email(email: &str) -> Result<()> {
        if email.is_empty() {
            return Err(StoreError::Validation("Email cannot be empty".into()));
        }
        if !is_valid_email(email) {
            return Err(StoreError::Validation(format!(
                "Invalid email format: '{email}'"
            )));
        }
        Ok(())
    }

    fn validate_password(password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(StoreError::Validation("Password cannot be empty".into()));
        }
        if password.len() < Self::MIN_PASSWORD_LEN {
            return Err(StoreError::Validation(format!(
                "Password must be at least {} characters long",
                Self::MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

impl Default for AccountManager {
    fn default() -> Self {
        Self::new()
    }
}
