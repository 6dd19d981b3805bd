// ============================================================================
// SESSION STATE - Auth token + identity, token persisted to storage
// ============================================================================

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::ApiResult;
use crate::models::User;
use crate::utils::storage::{load_from_storage, remove_from_storage, save_to_storage, StorageBackend};

/// Durable shape: `{"state":{"token":"..."},"version":0}`.
/// Only the token is persisted; the user is re-learned on the next login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PersistedAuth {
    state: PersistedToken,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PersistedToken {
    token: Option<String>,
}

/// Session store shared by the HTTP pipeline and the views
#[derive(Clone)]
pub struct SessionState {
    token: Rc<RefCell<Option<String>>>,
    user: Rc<RefCell<Option<User>>>,
    generation: Rc<Cell<u64>>,
    storage: Rc<dyn StorageBackend>,
    storage_key: Rc<str>,
}

impl SessionState {
    /// Build the store and rehydrate the token from durable storage
    pub fn rehydrate(storage: Rc<dyn StorageBackend>, storage_key: &str) -> Self {
        let token = load_from_storage::<PersistedAuth>(storage.as_ref(), storage_key)
            .and_then(|persisted| persisted.state.token)
            .filter(|t| !t.is_empty());

        if token.is_some() {
            log::info!("💾 [SESSION] Token restored from storage");
        }

        Self {
            token: Rc::new(RefCell::new(token)),
            user: Rc::new(RefCell::new(None)),
            generation: Rc::new(Cell::new(0)),
            storage,
            storage_key: Rc::from(storage_key),
        }
    }

    /// Store a fresh login. The token is persisted, the user is memory-only.
    pub fn set_auth(&self, token: String, user: User) {
        if let Err(e) = self.persist(Some(token.clone())) {
            log::error!("❌ [SESSION] Failed to persist token: {}", e);
        }
        log::info!("🔐 [SESSION] Authenticated as {} ({})", user.email, user.role);
        *self.token.borrow_mut() = Some(token);
        *self.user.borrow_mut() = Some(user);
        self.generation.set(self.generation.get() + 1);
    }

    /// Clear token and user from memory and storage
    pub fn logout(&self) {
        *self.token.borrow_mut() = None;
        *self.user.borrow_mut() = None;
        if let Err(e) = remove_from_storage(self.storage.as_ref(), &self.storage_key) {
            log::error!("❌ [SESSION] Failed to clear persisted token: {}", e);
        }
        log::info!("🚪 [SESSION] Logged out");
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    /// `None` after a reload until the next login
    pub fn user(&self) -> Option<User> {
        if self.token.borrow().is_none() {
            return None;
        }
        self.user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// Number of logins since start-up
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    fn persist(&self, token: Option<String>) -> ApiResult<()> {
        let record = PersistedAuth {
            state: PersistedToken { token },
            version: 0,
        };
        save_to_storage(self.storage.as_ref(), &self.storage_key, &record)
    }
}
