use crate::core::{Result, StoreError};
use std::collections::HashMap;
use std::sync::RwLock;

/// Session-scoped key-value storage.
///
/// Models browser session storage: string keys and values, contents gone
/// when the session ends. Writes may fail (quota); reads never do. This is
/// a best-effort side channel, not a store of record.
pub trait SessionStorage: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Unknown keys are a no-op.
    fn remove_item(&self, key: &str);

    /// Deletes every key.
    fn clear(&self);
}

/// In-memory [`SessionStorage`] with an optional byte quota.
///
/// The quota counts the bytes of all stored keys and values; a write that
/// would exceed it fails with [`StoreError::Storage`], the way a browser
/// rejects writes past its session-storage quota.
pub struct MemorySessionStorage {
    slots: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            quota_bytes: None,
        }
    }

    /// Creates storage that rejects writes once `quota_bytes` is exceeded.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.slots.read().map(|slots| slots.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn used_bytes(slots: &HashMap<String, String>) -> usize {
        slots.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl Default for MemorySessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.slots.read().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.write()?;

        if let Some(quota) = self.quota_bytes {
            let replaced = slots.get(key).map(|v| v.len() + key.len()).unwrap_or(0);
            let used = Self::used_bytes(&slots) - replaced;
            if used + key.len() + value.len() > quota {
                return Err(StoreError::Storage(format!(
                    "Session storage quota exceeded ({} bytes)",
                    quota
                )));
            }
        }

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut slots) = self.slots.write() {
            slots.remove(key);
        }
    }

    fn clear(&self) {
        if let Ok(mut slots) = self.slots.write() {
            slots.clear();
        }
    }
}
