use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Deserialize;

use crate::app::errors::{AppError, AppResult};

/// Public client identifiers that bind an app to a Firebase project.
///
/// Field names follow the JavaScript configuration object, so the snippet
/// copied from the Firebase console can be parsed as-is with
/// [`FirebaseOptions::from_json_str`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseOptions {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    #[serde(rename = "databaseURL")]
    pub database_url: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
    pub measurement_id: Option<String>,
}

impl FirebaseOptions {
    /// Parses the camelCase JSON configuration object. Unknown keys are ignored.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|err| AppError::InvalidOptions {
            message: err.to_string(),
        })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.api_key.is_none()
            && self.auth_domain.is_none()
            && self.database_url.is_none()
            && self.project_id.is_none()
            && self.storage_bucket.is_none()
            && self.messaging_sender_id.is_none()
            && self.app_id.is_none()
            && self.measurement_id.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FirebaseAppSettings {
    pub name: Option<String>,
    pub automatic_data_collection_enabled: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirebaseAppConfig {
    pub name: Arc<str>,
    pub automatic_data_collection_enabled: bool,
}

impl FirebaseAppConfig {
    pub fn new(name: impl Into<String>, automatic: bool) -> Self {
        Self {
            name: Arc::from(name.into()),
            automatic_data_collection_enabled: automatic,
        }
    }
}

/// Long-lived handle to an initialized app. Clones share the same state.
#[derive(Clone)]
pub struct FirebaseApp {
    inner: Arc<FirebaseAppInner>,
}

struct FirebaseAppInner {
    options: FirebaseOptions,
    config: FirebaseAppConfig,
    is_deleted: AtomicBool,
}

impl FirebaseApp {
    pub(crate) fn new(options: FirebaseOptions, config: FirebaseAppConfig) -> Self {
        Self {
            inner: Arc::new(FirebaseAppInner {
                options,
                config,
                is_deleted: AtomicBool::new(false),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn options(&self) -> FirebaseOptions {
        self.inner.options.clone()
    }

    pub fn config(&self) -> FirebaseAppConfig {
        self.inner.config.clone()
    }

    pub fn automatic_data_collection_enabled(&self) -> bool {
        self.inner.config.automatic_data_collection_enabled
    }

    pub fn is_deleted(&self) -> bool {
        self.inner.is_deleted.load(Ordering::SeqCst)
    }

    pub(crate) fn set_is_deleted(&self, value: bool) {
        self.inner.is_deleted.store(value, Ordering::SeqCst);
    }

    pub fn check_destroyed(&self) -> AppResult<()> {
        if self.is_deleted() {
            return Err(AppError::AppDeleted {
                app_name: self.name().to_string(),
            });
        }
        Ok(())
    }

    /// Returns `true` when both handles point at the same initialized app.
    pub fn same_instance(&self, other: &FirebaseApp) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for FirebaseApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseApp")
            .field("name", &self.name())
            .field("automatic_data_collection_enabled", &self.automatic_data_collection_enabled())
            .field("is_deleted", &self.is_deleted())
            .finish()
    }
}
