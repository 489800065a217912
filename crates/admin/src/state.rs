//! Application state shared across handlers.

use std::sync::Arc;

use nosso_sushi_core::{PgRecordStore, RecordStore};

use crate::config::AdminConfig;

/// Cheaply cloneable handle on the configuration and record store.
pub struct AppState<S = PgRecordStore> {
    inner: Arc<AppStateInner<S>>,
}

struct AppStateInner<S> {
    config: AdminConfig,
    store: S,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: RecordStore> AppState<S> {
    #[must_use]
    pub fn new(config: AdminConfig, store: S) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.inner.store
    }
}
