use serde::{Deserialize, Serialize};

use crate::api::User;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// Authenticated client state: the logged-in user and their bearer token.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Where sessions are persisted. The browser implementation writes to
/// localStorage; tests substitute an in-memory one.
pub trait StoragePort {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

pub struct BrowserStorage;

impl StoragePort for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.remove_item(key);
            }
        }
    }
}

/// Reads a persisted session back, dropping stored state that no longer
/// parses (e.g. after a format change).
pub fn hydrate(port: &dyn StoragePort) -> Option<Session> {
    let token = port.get(TOKEN_KEY)?;
    let raw_user = port.get(USER_KEY)?;
    match serde_json::from_str::<User>(&raw_user) {
        Ok(user) => Some(Session { user, token }),
        Err(_) => {
            port.remove(USER_KEY);
            None
        }
    }
}

pub fn persist(port: &dyn StoragePort, session: &Session) {
    port.set(TOKEN_KEY, &session.token);
    if let Ok(raw) = serde_json::to_string(&session.user) {
        port.set(USER_KEY, &raw);
    }
}

pub fn clear(port: &dyn StoragePort) {
    port.remove(TOKEN_KEY);
    port.remove(USER_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage {
        items: RefCell<HashMap<String, String>>,
    }

    impl StoragePort for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }
        fn set(&self, key: &str, value: &str) {
            self.items.borrow_mut().insert(key.into(), value.into());
        }
        fn remove(&self, key: &str) {
            self.items.borrow_mut().remove(key);
        }
    }

    fn session() -> Session {
        Session {
            user: User {
                id: "4f5e9f51-0000-0000-0000-000000000000".into(),
                name: "Alice".into(),
                email: "alice@example.com".into(),
            },
            token: "jwt-token".into(),
        }
    }

    #[test]
    fn persist_then_hydrate_roundtrips() {
        let storage = MemoryStorage::default();
        persist(&storage, &session());
        let restored = hydrate(&storage).expect("session restored");
        assert_eq!(restored.token, "jwt-token");
        assert_eq!(restored.user.email, "alice@example.com");
    }

    #[test]
    fn hydrate_without_stored_state_yields_none() {
        let storage = MemoryStorage::default();
        assert!(hydrate(&storage).is_none());
    }

    #[test]
    fn hydrate_drops_unparseable_user() {
        let storage = MemoryStorage::default();
        storage.set(TOKEN_KEY, "jwt-token");
        storage.set(USER_KEY, "{not json");
        assert!(hydrate(&storage).is_none());
        assert!(storage.get(USER_KEY).is_none());
    }

    #[test]
    fn clear_removes_everything() {
        let storage = MemoryStorage::default();
        persist(&storage, &session());
        clear(&storage);
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(storage.get(USER_KEY).is_none());
        assert!(hydrate(&storage).is_none());
    }
}
