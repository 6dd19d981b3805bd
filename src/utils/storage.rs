// ============================================================================
// STORAGE - Key/value persistence (localStorage in the browser, memory in tests)
// ============================================================================

use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};

/// Raw string key/value store
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> ApiResult<()>;
    fn remove_item(&self, key: &str) -> ApiResult<()>;
}

/// Browser `localStorage`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageBackend;

#[cfg(target_arch = "wasm32")]
impl LocalStorageBackend {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl StorageBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> ApiResult<()> {
        Self::storage()
            .ok_or_else(unavailable)?
            .set_item(key, value)
            .map_err(|_| ApiError::Storage(format!("Failed to write '{}' to localStorage", key)))
    }

    fn remove_item(&self, key: &str) -> ApiResult<()> {
        Self::storage()
            .ok_or_else(unavailable)?
            .remove_item(key)
            .map_err(|_| ApiError::Storage(format!("Failed to remove '{}' from localStorage", key)))
    }
}

#[cfg(target_arch = "wasm32")]
fn unavailable() -> ApiError {
    ApiError::Storage("localStorage not available".to_string())
}

/// In-memory store (non-browser targets and tests)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> ApiResult<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ApiResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

pub fn save_to_storage<T: Serialize>(
    backend: &dyn StorageBackend,
    key: &str,
    value: &T,
) -> ApiResult<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| ApiError::Storage(format!("Failed to serialize '{}': {}", key, e)))?;
    backend.set_item(key, &json)
}

/// Missing keys and malformed JSON both read as `None`
pub fn load_from_storage<T: DeserializeOwned>(backend: &dyn StorageBackend, key: &str) -> Option<T> {
    let json = backend.get_item(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] Ignoring malformed value for '{}': {}", key, e);
            None
        }
    }
}

pub fn remove_from_storage(backend: &dyn StorageBackend, key: &str) -> ApiResult<()> {
    backend.remove_item(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        page_size: u32,
    }

    #[test]
    fn json_helpers_round_trip_through_backend() {
        let storage = MemoryStorage::new();
        save_to_storage(&storage, "prefs", &Prefs { page_size: 25 }).unwrap();

        assert_eq!(storage.get_item("prefs").as_deref(), Some(r#"{"page_size":25}"#));
        assert_eq!(load_from_storage::<Prefs>(&storage, "prefs"), Some(Prefs { page_size: 25 }));

        remove_from_storage(&storage, "prefs").unwrap();
        assert_eq!(load_from_storage::<Prefs>(&storage, "prefs"), None);
    }

    /// Quota exceeded / private mode
    struct FullStorage;

    impl StorageBackend for FullStorage {
        fn get_item(&self, _key: &str) -> Option<String> {
            None
        }

        fn set_item(&self, key: &str, _value: &str) -> ApiResult<()> {
            Err(ApiError::Storage(format!("Failed to write '{}'", key)))
        }

        fn remove_item(&self, key: &str) -> ApiResult<()> {
            Err(ApiError::Storage(format!("Failed to remove '{}'", key)))
        }
    }

    #[test]
    fn backend_failures_surface_as_storage_errors() {
        let err = save_to_storage(&FullStorage, "prefs", &Prefs { page_size: 5 }).unwrap_err();
        assert_eq!(err, ApiError::Storage("Failed to write 'prefs'".into()));
        assert_eq!(err.to_string(), "Storage error: Failed to write 'prefs'");

        assert!(matches!(
            remove_from_storage(&FullStorage, "prefs"),
            Err(ApiError::Storage(_))
        ));
    }

    #[test]
    fn malformed_json_loads_as_none() {
        let storage = MemoryStorage::new();
        storage.set_item("prefs", "{not json").unwrap();
        assert_eq!(load_from_storage::<Prefs>(&storage, "prefs"), None);
    }
}
