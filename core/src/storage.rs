use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

pub const LANGUAGE_KEY: &str = "gembank_language";
pub const INVOICES_KEY: &str = "gembank_invoices";

/// String key-value storage in the shape of `window.localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store. Used in tests and when the browser denies localStorage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Malformed {
                key: key.to_string(),
                message: e.to_string(),
            }),
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Write {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_helpers_round_trip_through_the_store() {
        let store = MemoryStore::new();
        save_json(&store, "numbers", &vec![1, 2, 3]).unwrap();
        let loaded: Option<Vec<i32>> = load_json(&store, "numbers").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn later_writes_replace_the_stored_value() {
        let store: &dyn KeyValueStore = &MemoryStore::new();
        store.set(LANGUAGE_KEY, "hi").unwrap();
        store.set(LANGUAGE_KEY, "gu").unwrap();
        assert_eq!(store.get(LANGUAGE_KEY).unwrap().as_deref(), Some("gu"));
    }

    #[test]
    fn missing_key_loads_as_none() {
        let store = MemoryStore::new();
        let loaded: Option<Vec<i32>> = load_json(&store, "absent").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn malformed_value_is_reported_with_its_key() {
        let store = MemoryStore::new();
        store.set(INVOICES_KEY, "not json").unwrap();
        let err = load_json::<Vec<i32>>(&store, INVOICES_KEY).unwrap_err();
        assert!(matches!(err, StorageError::Malformed { ref key, .. } if key == INVOICES_KEY));
    }
}
