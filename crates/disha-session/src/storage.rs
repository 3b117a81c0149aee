//! Persisted session storage (browser-storage analog).
//!
//! The user and admin namespaces use disjoint keys; clearing one never
//! touches the other.

use std::collections::HashMap;

/// Storage key for the user session token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Storage key for the cached user object (JSON).
pub const AUTH_USER_KEY: &str = "auth_user";

/// Storage key for the admin session token.
pub const ADMIN_TOKEN_KEY: &str = "admin_token";

/// Storage key for the admin-authenticated marker (`"true"`).
pub const ADMIN_AUTHENTICATED_KEY: &str = "admin_authenticated";

/// String key-value store backing the session context.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory storage. Used in tests and non-browser hosts; a real browser
/// deployment backs this trait with localStorage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded storage, for tests that start from a persisted session.
    pub fn seeded(entries: &[(&str, &str)]) -> Self {
        let mut storage = Self::new();
        for (key, value) in entries {
            storage.set(key, value);
        }
        storage
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}
