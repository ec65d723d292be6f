use std::rc::Rc;

use gembank_core::storage::{KeyValueStore, MemoryStore};
use gembank_core::StorageError;
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// `window.localStorage`.
pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

fn describe(error: JsValue) -> String {
    error.as_string().unwrap_or_else(|| format!("{:?}", error))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            message: describe(e),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: describe(e),
        })
    }
}

/// localStorage when the browser allows it, otherwise a store that lasts for this page load.
pub fn local_store() -> Rc<dyn KeyValueStore> {
    match BrowserStorage::open() {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            log::warn!("{}, keeping data in memory", e);
            Rc::new(MemoryStore::new())
        }
    }
}
