//! Persisted userscript preferences
//!
//! Every toggle lives in one flat JSON object under a single LocalStorage
//! key. The key is shared with the sibling mouseplace userscripts, so reads
//! tolerate foreign entries of any JSON type and interpret values by JS
//! truthiness. The blob is re-read on every access; the settings panel edits
//! it out-of-band and a cached copy would go stale.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The parsed settings blob: a flat map of setting key to JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsBlob(serde_json::Map<String, Value>);

impl SettingsBlob {
    /// Parse persisted text. Anything unparseable fails closed to empty.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }

    /// Serialized form written back to storage.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }

    /// Truthiness of the stored value, or `default` when the key is absent.
    pub fn get(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            Some(value) => truthy(value),
            None => default,
        }
    }

    pub fn set(&mut self, key: &str, value: bool) {
        self.0.insert(key.to_string(), Value::Bool(value));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// JS truthiness, for blob entries written by other scripts.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Storage seam for the settings blob.
///
/// `get`/`set` implement the contract once on top of the raw primitives:
/// read the whole blob fresh, look up or overwrite one key, write the whole
/// blob back. Implementations only supply where the text lives.
pub trait SettingsStore {
    /// Raw persisted blob text, if any.
    fn read_raw(&self) -> Option<String>;

    /// Overwrite the persisted blob text.
    fn write_raw(&self, raw: &str);

    /// Stored truthiness for `key`, else `default`. Never fails.
    fn get(&self, key: &str, default: bool) -> bool {
        SettingsBlob::parse(self.read_raw().as_deref()).get(key, default)
    }

    /// Read-modify-write of a single toggle; other entries are preserved.
    fn set(&self, key: &str, value: bool) {
        let mut blob = SettingsBlob::parse(self.read_raw().as_deref());
        blob.set(key, value);
        self.write_raw(&blob.to_json());
    }
}

/// In-memory store for tests and the native harness.
///
/// Holds the serialized text rather than a parsed map, so every access
/// round-trips through the same parse path LocalStorage does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: std::cell::RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the persisted text directly (e.g. a malformed blob).
    pub fn with_raw(raw: &str) -> Self {
        Self {
            raw: std::cell::RefCell::new(Some(raw.to_string())),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn read_raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }

    fn write_raw(&self, raw: &str) {
        *self.raw.borrow_mut() = Some(raw.to_string());
    }
}

/// LocalStorage-backed store (WASM only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl SettingsStore for LocalStorageStore {
    fn read_raw(&self) -> Option<String> {
        Self::storage()?
            .get_item(crate::consts::SETTINGS_STORAGE_KEY)
            .ok()
            .flatten()
    }

    fn write_raw(&self, raw: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(crate::consts::SETTINGS_STORAGE_KEY, raw);
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_defaults_when_store_empty() {
        let store = MemoryStore::new();
        assert!(!store.get("halloween-shield", false));
        assert!(store.get("halloween-shield", true));
    }

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("halloween-shield", true);
        assert!(store.get("halloween-shield", false));

        store.set("halloween-shield", false);
        assert!(!store.get("halloween-shield", true));
    }

    #[test]
    fn test_set_preserves_other_entries() {
        let store = MemoryStore::with_raw(r#"{"other-script":"keep","count":3}"#);
        store.set("halloween-shield", true);

        let raw = store.read_raw().unwrap();
        assert!(raw.contains("other-script"));
        assert!(raw.contains("count"));
        assert!(store.get("halloween-shield", false));
    }

    #[test]
    fn test_reads_are_fresh() {
        let store = MemoryStore::new();
        assert!(!store.get("birthday-shield", false));

        // Out-of-band edit, as the settings panel would do.
        store.write_raw(r#"{"birthday-shield":true}"#);
        assert!(store.get("birthday-shield", false));
    }

    #[test]
    fn test_malformed_blob_fails_closed() {
        let store = MemoryStore::with_raw("definitely not json {{");
        assert!(!store.get("halloween-shield", false));
        assert!(store.get("halloween-shield", true));

        // Writing through the store recovers it.
        store.set("halloween-shield", true);
        assert!(store.get("halloween-shield", false));
    }

    #[test]
    fn test_non_object_blob_fails_closed() {
        let store = MemoryStore::with_raw(r#"[1,2,3]"#);
        assert!(!store.get("halloween-shield", false));
    }

    #[test]
    fn test_truthiness_of_foreign_values() {
        let store = MemoryStore::with_raw(
            r#"{"a":"yes","b":"","c":1,"d":0,"e":null,"f":{},"g":[],"h":true,"i":false}"#,
        );
        assert!(store.get("a", false));
        assert!(!store.get("b", true));
        assert!(store.get("c", false));
        assert!(!store.get("d", true));
        assert!(!store.get("e", true));
        assert!(store.get("f", false));
        assert!(store.get("g", false));
        assert!(store.get("h", false));
        assert!(!store.get("i", true));
    }

    #[test]
    fn test_blob_round_trip() {
        let mut blob = SettingsBlob::default();
        assert!(blob.is_empty());

        blob.set("halloween-shield", true);
        blob.set("valentines-shield", false);
        assert_eq!(blob.len(), 2);

        let reparsed = SettingsBlob::parse(Some(&blob.to_json()));
        assert_eq!(reparsed, blob);
    }
}
