//! Persisted service configuration.
//!
//! The service keeps two values across sessions: the OpenRouter API key and
//! the real-backend flag. They live in a small key-value store behind the
//! `ConfigStore` trait so the service can run against a file in production
//! and an in-memory map in tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Storage key for the OpenRouter API key.
pub const API_KEY_STORAGE_KEY: &str = "OPENROUTER_API_KEY";
/// Storage key for the backend selection flag, stored as `"true"`/`"false"`.
pub const USE_REAL_AI_STORAGE_KEY: &str = "USE_REAL_AI";

/// Minimal key-value persistence for the configuration blob.
///
/// Writes are best-effort: a failing store must log and carry on, never
/// surface an error. Last-writer-wins is the expected semantics.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// JSON-file-backed store, one flat string map per file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> HashMap<String, String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default()
    }
}

impl ConfigStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());

        let serialized = match serde_json::to_string_pretty(&map) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("failed to serialize config: {e}");
                return;
            }
        };

        if let Err(e) = std::fs::write(&self.path, serialized) {
            tracing::warn!("failed to persist config to {}: {e}", self.path.display());
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .map(|entries| entries.get(key).cloned())
            .unwrap_or(None)
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

/// Snapshot of the service configuration.
///
/// Hydrated from the store at service construction; absent values yield the
/// default (no key, mock mode).
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub api_key: Option<String>,
    pub use_real_ai: bool,
}

impl ServiceConfig {
    #[must_use]
    pub fn load(store: &dyn ConfigStore) -> Self {
        let api_key = store.get(API_KEY_STORAGE_KEY).filter(|key| !key.is_empty());
        let use_real_ai = store.get(USE_REAL_AI_STORAGE_KEY).is_some_and(|flag| flag == "true");

        Self { api_key, use_real_ai }
    }

    /// A network call is attempted only when the real backend is requested
    /// AND a key is present; every other combination is mock mode.
    #[must_use]
    pub fn is_real_mode(&self) -> bool {
        self.use_real_ai && self.api_key.is_some()
    }
}
