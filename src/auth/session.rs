use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::auth::user::AuthUser;

const USER_KEY: &str = "user";

/// Where the signed-in user lives between launches. Screens receive a store
/// instead of reaching for ambient global state, so tests can hand in a
/// throwaway one. A missing or malformed record simply reads as signed-out.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<AuthUser>;
    fn set(&self, user: &AuthUser);
    fn clear(&self);
}

/// In-memory store for tests and the demo mode.
#[derive(Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<AuthUser> {
        let values = self.values.lock().unwrap();
        let raw = values.get(USER_KEY)?;
        serde_json::from_str(raw).ok()
    }

    fn set(&self, user: &AuthUser) {
        match serde_json::to_string(user) {
            Ok(raw) => {
                self.values.lock().unwrap().insert(USER_KEY.to_string(), raw);
            }
            Err(e) => log::error!("failed to serialize session user: {e}"),
        }
    }

    fn clear(&self) {
        self.values.lock().unwrap().remove(USER_KEY);
    }
}

/// File-backed store: one JSON object of string values, so the session
/// survives app restarts.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSessionStore { path: path.into() }
    }

    fn read_map(&self) -> HashMap<String, String> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    fn write_map(&self, map: &HashMap<String, String>) {
        let raw = match serde_json::to_string(map) {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("failed to serialize session file: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, raw) {
            log::error!("failed to write session file {:?}: {e}", self.path);
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<AuthUser> {
        let map = self.read_map();
        let raw = map.get(USER_KEY)?;
        serde_json::from_str(raw).ok()
    }

    fn set(&self, user: &AuthUser) {
        match serde_json::to_string(user) {
            Ok(raw) => {
                let mut map = self.read_map();
                map.insert(USER_KEY.to_string(), raw);
                self.write_map(&map);
            }
            Err(e) => log::error!("failed to serialize session user: {e}"),
        }
    }

    fn clear(&self) {
        let mut map = self.read_map();
        if map.remove(USER_KEY).is_some() {
            self.write_map(&map);
        }
    }
}

/// Drop the persisted session; the user is signed out everywhere afterwards.
pub fn signout(store: &dyn SessionStore) {
    store.clear();
}
