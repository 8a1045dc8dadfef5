use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::engine::{Cart, CartError};
use super::line::CartLine;
use super::summary::CartSummary;
use crate::domain::Product;

pub const DEFAULT_SESSION_KEY: &str = "cart";

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session store is poisoned")]
    Poisoned,
}

/// Browser-local style key/value storage for serialized session state.
pub trait SessionStore: Send {
    fn load(&self, key: &str) -> Result<Option<String>, SessionStoreError>;
    fn save(&mut self, key: &str, blob: &str) -> Result<(), SessionStoreError>;
}

/// In-process store. Clones share the same map, so a test can keep a handle
/// and inspect what the engine persisted.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    pub fn insert(&self, key: &str, blob: impl Into<String>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), blob.into());
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let entries = self.entries.lock().map_err(|_| SessionStoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), SessionStoreError> {
        let mut entries = self.entries.lock().map_err(|_| SessionStoreError::Poisoned)?;
        entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key under `dir`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), SessionStoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), blob)?;
        Ok(())
    }
}

/// A [`Cart`] bound to a session store. Every mutation is persisted.
pub struct CartEngine {
    cart: Cart,
    store: Box<dyn SessionStore>,
    key: String,
}

impl CartEngine {
    /// Restores the cart stored under `key`. Missing, unreadable or corrupt
    /// state yields an empty cart.
    #[instrument(skip(store))]
    pub fn load(store: Box<dyn SessionStore>, key: &str) -> Self {
        let cart = match store.load(key) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<CartLine>>(&blob) {
                Ok(lines) => Cart::from_lines(lines),
                Err(e) => {
                    warn!(error = %e, "Stored cart is corrupt, starting empty");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Could not read stored cart, starting empty");
                Cart::new()
            }
        };
        debug!(lines = cart.lines().len(), "Cart restored");
        Self {
            cart,
            store,
            key: key.to_string(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::from(&self.cart)
    }

    pub fn add_item(&mut self, product: &Product) -> Result<u32, CartError> {
        let quantity = self.cart.add_item(product)?;
        self.persist();
        Ok(quantity)
    }

    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let removed = self.cart.remove_item(product_id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn set_quantity(&mut self, product_id: &str, delta: i32) -> Option<u32> {
        if self.cart.line(product_id).is_none() {
            return None;
        }
        let quantity = self.cart.set_quantity(product_id, delta);
        self.persist();
        quantity
    }

    pub fn total(&self) -> Decimal {
        self.cart.compute_total()
    }

    pub fn item_count(&self) -> u32 {
        self.cart.compute_item_count()
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    // The in-memory cart stays authoritative when the write fails.
    fn persist(&mut self) {
        let blob = match serde_json::to_string(&self.cart) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "Could not serialize cart");
                return;
            }
        };
        if let Err(e) = self.store.save(&self.key, &blob) {
            warn!(error = %e, key = %self.key, "Could not persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn mug() -> Product {
        Product::new("p1", "Mug", "Home", dec!(12.50))
    }

    #[test]
    fn test_missing_blob_loads_empty() {
        let engine = CartEngine::load(Box::new(MemorySessionStore::new()), DEFAULT_SESSION_KEY);
        assert!(engine.cart().is_empty());
    }

    #[test]
    fn test_corrupt_blob_loads_empty() {
        let store = MemorySessionStore::new();
        store.insert(DEFAULT_SESSION_KEY, "{not json");
        let engine = CartEngine::load(Box::new(store), DEFAULT_SESSION_KEY);
        assert!(engine.cart().is_empty());
    }

    #[test]
    fn test_mutations_are_persisted_and_restored() {
        let store = MemorySessionStore::new();
        let mut engine = CartEngine::load(Box::new(store.clone()), DEFAULT_SESSION_KEY);
        engine.add_item(&mug()).unwrap();
        engine.add_item(&mug()).unwrap();
        engine.set_quantity("p1", 1);

        let restored = CartEngine::load(Box::new(store.clone()), DEFAULT_SESSION_KEY);
        assert_eq!(restored.item_count(), 3);
        assert_eq!(restored.total(), dec!(37.50));

        engine.clear();
        assert_eq!(store.get(DEFAULT_SESSION_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("storefront-session-{}", uuid::Uuid::new_v4()));
        let mut engine = CartEngine::load(Box::new(FileSessionStore::new(&dir)), "shopper");
        engine.add_item(&mug()).unwrap();

        let restored = CartEngine::load(Box::new(FileSessionStore::new(&dir)), "shopper");
        assert_eq!(restored.cart(), engine.cart());

        let _ = std::fs::remove_dir_all(dir);
    }
}
