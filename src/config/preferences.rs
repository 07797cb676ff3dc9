//! Persisted client preferences
//!
//! The only persisted client state is the preferred scoring model. It is
//! kept in a small JSON key-value file, read once when [`Settings`] is
//! loaded and written back on every change. `Settings` is created once at
//! startup and handed to the components that need it as [`SharedSettings`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::Model;
use crate::error::AppError;

/// Key holding the preferred model's display name
pub const MODEL_PREFERENCE_KEY: &str = "aiModel";

/// Shared handle passed explicitly to every consumer
pub type SharedSettings = Arc<RwLock<Settings>>;

/// File-backed string key-value store
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read one value; a missing or unreadable file reads as empty
    pub fn get(&self, key: &str) -> Option<String> {
        self.load_entries().remove(key)
    }

    /// Write one value, keeping any other keys already in the file
    pub fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self.load_entries();
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), key = %key, "Preference written");
        Ok(())
    }

    fn load_entries(&self) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cannot read preferences, using defaults");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Corrupt preferences file, using defaults");
            BTreeMap::new()
        })
    }
}

/// Process-wide user settings
#[derive(Debug)]
pub struct Settings {
    model: Model,
    store: PreferenceStore,
}

impl Settings {
    /// Read the stored preference once; absent or unknown values select the
    /// fast model
    pub fn load(store: PreferenceStore) -> Self {
        let model = match store.get(MODEL_PREFERENCE_KEY) {
            Some(name) => Model::from_display_name(&name).unwrap_or_else(|| {
                warn!(value = %name, "Unknown model preference, using default");
                Model::default()
            }),
            None => Model::default(),
        };
        info!(path = %store.path().display(), model = %model.display_name(), "Settings loaded");
        Self { model, store }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    /// Change the preferred model and persist it.
    ///
    /// The in-memory value changes even if writing the file fails; the
    /// write error is returned to the caller.
    pub fn set_model(&mut self, model: Model) -> Result<(), AppError> {
        self.model = model;
        self.store.set(MODEL_PREFERENCE_KEY, model.display_name())
    }

    pub fn into_shared(self) -> SharedSettings {
        Arc::new(RwLock::new(self))
    }
}
