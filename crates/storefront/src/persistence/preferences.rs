//! Theme and language preferences under the `ui-storage` namespace.

use std::sync::Arc;

use pelussi_core::Preferences;
use tracing::warn;

use super::{KeyValueStore, StoreError};

/// Namespace holding the `{theme, language}` pair. Never holds cart data.
pub const PREFERENCES_NAMESPACE: &str = "ui-storage";

/// Loads and saves [`Preferences`].
#[derive(Clone)]
pub struct PreferencesRepository {
    store: Arc<dyn KeyValueStore>,
}

impl PreferencesRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the stored preferences, falling back to defaults on any failure.
    #[must_use]
    pub fn load(&self) -> Preferences {
        match self.store.load(PREFERENCES_NAMESPACE) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Stored preferences are corrupt, using defaults");
                Preferences::default()
            }),
            Ok(None) => Preferences::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read preferences, using defaults");
                Preferences::default()
            }
        }
    }

    /// Replace the stored preferences.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store write fails.
    pub fn save(&self, preferences: &Preferences) -> Result<(), StoreError> {
        let payload = serde_json::to_string(preferences)?;
        self.store.save(PREFERENCES_NAMESPACE, &payload)
    }
}

impl std::fmt::Debug for PreferencesRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferencesRepository")
            .field("namespace", &PREFERENCES_NAMESPACE)
            .finish_non_exhaustive()
    }
}
