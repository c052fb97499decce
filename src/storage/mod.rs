use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use strum::{AsRefStr, Display, EnumIter};

/// Logical storage namespaces. Each one is isolated from the others.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Namespace {
    Links,
    Widgets,
    Theme,
}

impl Namespace {
    /// Every namespace stores a single document under its own name.
    pub fn key(self) -> &'static str {
        match self {
            Namespace::Links => "links",
            Namespace::Widgets => "widgets",
            Namespace::Theme => "theme",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum StorageErrorKind {
    Unavailable,
    Read,
    Write,
    Corrupt,
}

#[derive(Clone, Debug)]
pub(crate) struct StorageError {
    pub kind: StorageErrorKind,
    pub message: String,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn unavailable(ctx: &str) -> Self {
        Self {
            kind: StorageErrorKind::Unavailable,
            message: format!("storage unavailable: {ctx}"),
        }
    }

    pub fn read(namespace: Namespace, detail: impl std::fmt::Display) -> Self {
        Self {
            kind: StorageErrorKind::Read,
            message: format!("failed to read {namespace}: {detail}"),
        }
    }

    pub fn write(namespace: Namespace, detail: impl std::fmt::Display) -> Self {
        Self {
            kind: StorageErrorKind::Write,
            message: format!("failed to save {namespace}: {detail}"),
        }
    }

    pub fn corrupt(namespace: Namespace, detail: impl std::fmt::Display) -> Self {
        Self {
            kind: StorageErrorKind::Corrupt,
            message: format!("stored {namespace} is malformed: {detail}"),
        }
    }
}

pub(crate) type StorageResult<T> = Result<T, StorageError>;

/// Durable key-value backend addressed per namespace.
pub(crate) trait KvStore: Send + Sync {
    fn get_item(&self, namespace: Namespace, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&self, namespace: Namespace, key: &str, value: &str) -> StorageResult<()>;
}

pub(crate) type SharedStore = Arc<dyn KvStore>;

pub(crate) fn load_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    namespace: Namespace,
    key: &str,
) -> StorageResult<Option<T>> {
    let Some(json) = store.get_item(namespace, key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| StorageError::corrupt(namespace, e))
}

pub(crate) fn save_json<T: Serialize>(
    store: &dyn KvStore,
    namespace: Namespace,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::write(namespace, e))?;
    store.set_item(namespace, key, &json)
}

/// `window.localStorage`, with keys prefixed by the database name.
pub(crate) struct LocalStore {
    db_name: String,
}

impl LocalStore {
    pub fn new(db_name: impl Into<String>) -> Self {
        Self {
            db_name: db_name.into(),
        }
    }

    fn full_key(&self, namespace: Namespace, key: &str) -> String {
        format!("{}::{namespace}::{key}", self.db_name)
    }

    fn storage() -> StorageResult<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| StorageError::unavailable("no window"))?;
        window
            .local_storage()
            .ok()
            .flatten()
            .ok_or_else(|| StorageError::unavailable("localStorage is disabled"))
    }

    /// Whether the browser exposes a usable localStorage.
    pub fn is_available() -> bool {
        Self::storage().is_ok()
    }
}

fn js_message(v: &wasm_bindgen::JsValue) -> String {
    v.as_string().unwrap_or_else(|| format!("{v:?}"))
}

impl KvStore for LocalStore {
    fn get_item(&self, namespace: Namespace, key: &str) -> StorageResult<Option<String>> {
        let storage = Self::storage()?;
        storage
            .get_item(&self.full_key(namespace, key))
            .map_err(|e| StorageError::read(namespace, js_message(&e)))
    }

    fn set_item(&self, namespace: Namespace, key: &str, value: &str) -> StorageResult<()> {
        let storage = Self::storage()?;
        // Quota errors surface here as DOMExceptions.
        storage
            .set_item(&self.full_key(namespace, key), value)
            .map_err(|e| StorageError::write(namespace, js_message(&e)))
    }
}

/// Process-local store. Used when localStorage is unavailable and in tests.
#[derive(Default)]
pub(crate) struct MemoryStore {
    entries: Mutex<HashMap<(Namespace, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get_item(&self, namespace: Namespace, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(&(namespace, key.to_string())).cloned())
    }

    fn set_item(&self, namespace: Namespace, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert((namespace, key.to_string()), value.to_string());
        Ok(())
    }
}
