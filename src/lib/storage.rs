//! Browser key/value storage behind an injectable trait, plus versioned JSON
//! envelopes for every persisted record. Stale or malformed records from an
//! older build fail closed: they read back as absent and are removed.

use crate::app_lib::AppError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Minimal synchronous key/value contract over `localStorage` /
/// `sessionStorage`. Stores are injected so flows can be constructed against
/// an in-memory instance in tests.
pub trait KeyValue {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str);
}

/// Durable `window.localStorage`. Survives tab and browser restarts.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocal;

/// Tab-scoped `window.sessionStorage`. Dropped when the tab closes.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSession;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

#[cfg(target_arch = "wasm32")]
fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.session_storage().ok().flatten())
}

#[cfg(target_arch = "wasm32")]
impl KeyValue for BrowserLocal {
    fn read(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        let storage = local_storage()
            .ok_or_else(|| AppError::Storage("Local storage is unavailable.".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|_| AppError::Storage("Failed to write local storage.".to_string()))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValue for BrowserSession {
    fn read(&self, key: &str) -> Option<String> {
        session_storage()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        let storage = session_storage()
            .ok_or_else(|| AppError::Storage("Session storage is unavailable.".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|_| AppError::Storage("Failed to write session storage.".to_string()))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = session_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

// Browser storage does not exist off-wasm; reads see nothing and writes
// surface the same "storage unavailable" failure the UI already handles.
#[cfg(not(target_arch = "wasm32"))]
impl KeyValue for BrowserLocal {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        Err(AppError::Storage("Local storage is unavailable.".to_string()))
    }

    fn remove(&self, _key: &str) {}
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValue for BrowserSession {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        Err(AppError::Storage("Session storage is unavailable.".to_string()))
    }

    fn remove(&self, _key: &str) {}
}

/// In-memory store for unit tests and isolated flow instances.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
}

impl KeyValue for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// Reads a versioned record. Version mismatches and parse failures remove the
/// record and return `None` so old blobs can never poison a newer build.
pub fn read_versioned<T, S>(store: &S, key: &str, version: u32) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValue,
{
    let raw = store.read(key)?;
    match serde_json::from_str::<Envelope<T>>(&raw) {
        Ok(envelope) if envelope.version == version => Some(envelope.data),
        _ => {
            store.remove(key);
            None
        }
    }
}

/// Writes a record wrapped in its schema version.
pub fn write_versioned<T, S>(store: &S, key: &str, version: u32, data: &T) -> Result<(), AppError>
where
    T: Serialize,
    S: KeyValue,
{
    let envelope = Envelope { version, data };
    let raw = serde_json::to_string(&envelope)
        .map_err(|err| AppError::Serialization(format!("Failed to encode record: {err}")))?;
    store.write(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Marker {
        token: String,
    }

    #[test]
    fn versioned_round_trip() {
        let store = MemoryStore::default();
        let marker = Marker {
            token: "TOK123".to_string(),
        };

        write_versioned(&store, "marker", 1, &marker).expect("write");
        assert_eq!(read_versioned::<Marker, _>(&store, "marker", 1), Some(marker));
    }

    #[test]
    fn version_mismatch_fails_closed_and_removes() {
        let store = MemoryStore::default();
        store
            .write("marker", r#"{"version":0,"data":{"token":"old"}}"#)
            .expect("write");

        assert_eq!(read_versioned::<Marker, _>(&store, "marker", 1), None);
        assert_eq!(store.read("marker"), None);
    }

    #[test]
    fn malformed_record_fails_closed_and_removes() {
        let store = MemoryStore::default();
        store.write("marker", "not json at all").expect("write");

        assert_eq!(read_versioned::<Marker, _>(&store, "marker", 1), None);
        assert_eq!(store.read("marker"), None);
    }

    #[test]
    fn missing_key_reads_as_absent() {
        let store = MemoryStore::default();
        assert_eq!(read_versioned::<Marker, _>(&store, "marker", 1), None);
    }
}
