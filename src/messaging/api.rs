use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

use crate::app::FirebaseApp;
use crate::messaging::config::{extract_app_config, AppConfig};
#[cfg(all(feature = "wasm-web", target_arch = "wasm32"))]
use crate::messaging::error::available_in_service_worker;
use crate::messaging::error::{internal_error, MessagingResult};
use crate::messaging::logger::LOGGER;
use crate::messaging::types::{MessageHandler, MessagePayload, Unsubscribe};

/// Messaging client bound to one Firebase app.
///
/// Created once per app by [`get_messaging`] and shared read-only afterwards;
/// the only mutable part is the optional background message callback.
#[derive(Clone, Debug)]
pub struct Messaging {
    inner: Arc<MessagingInner>,
}

#[derive(Debug)]
struct MessagingInner {
    app: FirebaseApp,
    config: AppConfig,
    on_background_message_handler: Mutex<Option<HandlerEntry>>,
}

#[derive(Clone)]
struct HandlerEntry {
    id: usize,
    handler: MessageHandler,
}

impl std::fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerEntry").field("id", &self.id).finish()
    }
}

static NEXT_ON_BACKGROUND_ID: AtomicUsize = AtomicUsize::new(1);

static MESSAGING_INSTANCES: LazyLock<Mutex<HashMap<String, Messaging>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn instances_guard() -> MutexGuard<'static, HashMap<String, Messaging>> {
    MESSAGING_INSTANCES
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

impl Messaging {
    fn new(app: FirebaseApp) -> MessagingResult<Self> {
        let config = extract_app_config(&app)?;
        Ok(Self {
            inner: Arc::new(MessagingInner {
                app,
                config,
                on_background_message_handler: Mutex::new(None),
            }),
        })
    }

    pub fn app(&self) -> &FirebaseApp {
        &self.inner.app
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.inner.config
    }

    fn handler_guard(&self) -> MutexGuard<'_, Option<HandlerEntry>> {
        self.inner
            .on_background_message_handler
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    /// Hands a payload to the registered background callback, if any.
    pub(crate) fn dispatch_background_message(&self, payload: MessagePayload) {
        let handler = self.handler_guard().as_ref().map(|entry| entry.handler.clone());
        if let Some(handler) = handler {
            handler(payload);
        }
    }
}

/// Returns the messaging client of `app` (the default app when `None`), creating it on first use.
pub fn get_messaging(app: Option<FirebaseApp>) -> MessagingResult<Messaging> {
    let app = match app {
        Some(app) => app,
        None => crate::app::get_app(None).map_err(|err| internal_error(err.to_string()))?,
    };
    app.check_destroyed()
        .map_err(|err| internal_error(err.to_string()))?;

    let mut instances = instances_guard();
    if let Some(existing) = instances.get(app.name()) {
        if existing.app().same_instance(&app) {
            return Ok(existing.clone());
        }
    }

    let messaging = Messaging::new(app.clone())?;
    instances.insert(app.name().to_string(), messaging.clone());
    LOGGER.debug(format!("Messaging ready for app '{}'", app.name()));
    Ok(messaging)
}

/// Registers the callback invoked with every background message after it was displayed.
///
/// Only the latest callback is kept; the returned closure removes it unless it was
/// already replaced.
pub fn on_background_message(
    messaging: &Messaging,
    handler: MessageHandler,
) -> MessagingResult<Unsubscribe> {
    #[cfg(all(feature = "wasm-web", target_arch = "wasm32"))]
    {
        if web_sys::window().is_some() {
            return Err(available_in_service_worker(
                "on_background_message must be called in a Service Worker context",
            ));
        }
    }

    let id = NEXT_ON_BACKGROUND_ID.fetch_add(1, Ordering::SeqCst);
    *messaging.handler_guard() = Some(HandlerEntry { id, handler });

    let messaging = messaging.clone();
    Ok(Box::new(move || {
        let mut guard = messaging.handler_guard();
        if guard.as_ref().map(|entry| entry.id) == Some(id) {
            *guard = None;
        }
    }))
}
