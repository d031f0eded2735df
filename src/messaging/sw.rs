//! Service worker binding of the background relay.
//!
//! Implements the host seams on top of `ServiceWorkerGlobalScope` and wires the
//! `push` and `notificationclick` listeners. Every listener hands its work to
//! `ExtendableEvent.waitUntil`, so the worker stays alive until it settles.

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use js_sys::{Array, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{
    ClientQueryOptions, ClientType, Clients, NotificationEvent, PushEvent, ServiceWorkerGlobalScope,
    ServiceWorkerRegistration, WindowClient,
};

use crate::app::{initialize_app, FirebaseOptions};
use crate::messaging::api::get_messaging;
use crate::messaging::click::WindowClientInfo;
use crate::messaging::constants::{NOTIFICATION_CLICK_EVENT, PUSH_EVENT};
use crate::messaging::error::{
    available_in_service_worker, clients_unavailable, internal_error, invalid_argument,
    notification_display_failed, relay_already_installed, unsupported_browser,
    window_activation_failed, MessagingError, MessagingResult,
};
use crate::messaging::host::{ClickedNotification, ClientsHost, NotificationHost};
use crate::messaging::logger::LOGGER;
use crate::messaging::notification::{NotificationDefaults, NotificationSpec};
use crate::messaging::relay::BackgroundRelay;
use crate::messaging::support::is_supported;

static RELAY_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Shows notifications through the worker's `ServiceWorkerRegistration`.
pub struct WorkerNotificationHost {
    registration: ServiceWorkerRegistration,
}

impl WorkerNotificationHost {
    pub fn new(registration: ServiceWorkerRegistration) -> Self {
        Self { registration }
    }
}

#[async_trait(?Send)]
impl NotificationHost for WorkerNotificationHost {
    async fn show_notification(&self, spec: &NotificationSpec) -> MessagingResult<()> {
        let options = spec
            .options
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|err| internal_error(format!("Failed to encode notification options: {err}")))?;
        let promise = self
            .registration
            .show_notification_with_options(&spec.title, options.unchecked_ref())
            .map_err(|err| notification_display_failed(format_js_error("showNotification", err)))?;
        JsFuture::from(promise)
            .await
            .map_err(|err| notification_display_failed(format_js_error("showNotification", err)))?;
        Ok(())
    }
}

/// Snapshot of a window client taken during enumeration.
pub struct WorkerWindowClient {
    client: WindowClient,
    url: String,
    focusable: bool,
}

impl WindowClientInfo for WorkerWindowClient {
    fn url(&self) -> &str {
        &self.url
    }

    fn is_focusable(&self) -> bool {
        self.focusable
    }
}

pub struct WorkerClientsHost {
    clients: Clients,
}

impl WorkerClientsHost {
    pub fn new(clients: Clients) -> Self {
        Self { clients }
    }
}

#[async_trait(?Send)]
impl ClientsHost for WorkerClientsHost {
    type Client = WorkerWindowClient;

    async fn match_windows(&self, include_uncontrolled: bool) -> MessagingResult<Vec<WorkerWindowClient>> {
        let query = ClientQueryOptions::new();
        query.set_type(ClientType::Window);
        query.set_include_uncontrolled(include_uncontrolled);

        let promise = self.clients.match_all_with_options(&query);
        let value = JsFuture::from(promise)
            .await
            .map_err(|err| clients_unavailable(format_js_error("clients.matchAll", err)))?;
        let list: Array = value
            .dyn_into()
            .map_err(|_| clients_unavailable("clients.matchAll returned an unexpected value"))?;

        Ok(list
            .iter()
            .filter_map(|entry| {
                let focusable = Reflect::has(&entry, &JsValue::from_str("focus")).unwrap_or(false);
                let client: WindowClient = entry.dyn_into().ok()?;
                Some(WorkerWindowClient {
                    url: client.url(),
                    client,
                    focusable,
                })
            })
            .collect())
    }

    async fn focus(&self, client: &WorkerWindowClient) -> MessagingResult<()> {
        let promise = client
            .client
            .focus()
            .map_err(|err| window_activation_failed(format_js_error("WindowClient.focus", err)))?;
        JsFuture::from(promise)
            .await
            .map_err(|err| window_activation_failed(format_js_error("WindowClient.focus", err)))?;
        Ok(())
    }

    fn can_open_window(&self) -> bool {
        Reflect::get(&self.clients, &JsValue::from_str("openWindow"))
            .map(|value| value.is_function())
            .unwrap_or(false)
    }

    async fn open_window(&self, path: &str) -> MessagingResult<()> {
        let promise = self.clients.open_window(path);
        JsFuture::from(promise)
            .await
            .map_err(|err| window_activation_failed(format_js_error("clients.openWindow", err)))?;
        Ok(())
    }
}

pub struct WorkerNotification(web_sys::Notification);

impl ClickedNotification for WorkerNotification {
    fn close(&self) {
        self.0.close();
    }
}

fn worker_scope() -> MessagingResult<ServiceWorkerGlobalScope> {
    js_sys::global()
        .dyn_into::<ServiceWorkerGlobalScope>()
        .map_err(|_| available_in_service_worker("The relay must be installed from a Service Worker"))
}

/// Registers the `push` and `notificationclick` listeners of `relay` on the worker scope.
///
/// When the relay has no origin yet, the worker's own origin is used. Only one
/// relay may be installed per worker; later calls fail with
/// `messaging/relay-already-installed`.
pub fn install_relay(relay: BackgroundRelay) -> MessagingResult<()> {
    let scope = worker_scope()?;
    if RELAY_INSTALLED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(relay_already_installed());
    }
    register_listeners(&scope, relay).inspect_err(|_| {
        RELAY_INSTALLED.store(false, Ordering::SeqCst);
    })
}

fn register_listeners(scope: &ServiceWorkerGlobalScope, relay: BackgroundRelay) -> MessagingResult<()> {
    let relay = if relay.origin().is_some() {
        relay
    } else {
        relay.with_origin(scope.location().origin())
    };
    let relay = Rc::new(relay);

    let push_relay = Rc::clone(&relay);
    let push_scope = scope.clone();
    let on_push = Closure::wrap(Box::new(move |event: PushEvent| {
        let relay = Rc::clone(&push_relay);
        let host = WorkerNotificationHost::new(push_scope.registration());
        let body = event.data().map(|data| data.text());
        let promise = future_to_promise(async move {
            let result = relay
                .handle_push_data(body.as_deref(), &host)
                .await
                .map(|_| ());
            settle(PUSH_EVENT, result)
        });
        if let Err(err) = event.wait_until(&promise) {
            LOGGER.warn(format_js_error("PushEvent.waitUntil", err));
        }
    }) as Box<dyn FnMut(PushEvent)>);

    let click_relay = Rc::clone(&relay);
    let click_scope = scope.clone();
    let on_click = Closure::wrap(Box::new(move |event: NotificationEvent| {
        let relay = Rc::clone(&click_relay);
        let clients = WorkerClientsHost::new(click_scope.clients());
        let notification = WorkerNotification(event.notification());
        let promise = future_to_promise(async move {
            let result = relay
                .handle_notification_click(&notification, &clients)
                .await
                .map(|_| ());
            settle(NOTIFICATION_CLICK_EVENT, result)
        });
        if let Err(err) = event.wait_until(&promise) {
            LOGGER.warn(format_js_error("NotificationEvent.waitUntil", err));
        }
    }) as Box<dyn FnMut(NotificationEvent)>);

    scope
        .add_event_listener_with_callback(PUSH_EVENT, on_push.as_ref().unchecked_ref())
        .map_err(|err| internal_error(format_js_error("addEventListener(push)", err)))?;
    scope
        .add_event_listener_with_callback(NOTIFICATION_CLICK_EVENT, on_click.as_ref().unchecked_ref())
        .map_err(|err| internal_error(format_js_error("addEventListener(notificationclick)", err)))?;

    // Listeners live as long as the worker.
    on_push.forget();
    on_click.forget();
    Ok(())
}

/// Logs a failed handler and rejects the `waitUntil` promise with it.
fn settle(event: &str, result: MessagingResult<()>) -> Result<JsValue, JsValue> {
    match result {
        Ok(()) => Ok(JsValue::UNDEFINED),
        Err(err) => {
            LOGGER.warn(format!("{event} handling failed: {err}"));
            Err(JsValue::from_str(&err.to_string()))
        }
    }
}

fn start(options_json: &str, defaults_json: Option<String>) -> MessagingResult<()> {
    if !is_supported() {
        return Err(unsupported_browser(
            "This environment does not expose the APIs required by the notification relay.",
        ));
    }

    let options =
        FirebaseOptions::from_json_str(options_json).map_err(|err| invalid_argument(err.to_string()))?;
    let defaults = match defaults_json.as_deref() {
        Some(json) => NotificationDefaults::from_json_str(json)?,
        None => NotificationDefaults::default(),
    };

    let app = initialize_app(options, None).map_err(|err| invalid_argument(err.to_string()))?;
    let messaging = get_messaging(Some(app))?;
    install_relay(BackgroundRelay::new(messaging, defaults))?;
    LOGGER.info("Service worker loaded");
    Ok(())
}

/// Entry point called once from the service worker script.
///
/// `options_json` is the Firebase web config object; `defaults_json` optionally
/// overrides the notification presentation defaults.
#[wasm_bindgen(js_name = startServiceWorker)]
pub fn start_service_worker(options_json: &str, defaults_json: Option<String>) -> Result<(), JsValue> {
    start(options_json, defaults_json).map_err(|err: MessagingError| JsValue::from_str(&err.to_string()))
}

fn format_js_error(operation: &str, err: JsValue) -> String {
    if let Some(message) = err.as_string() {
        format!("{operation} failed: {message}")
    } else if let Some(exception) = err.dyn_ref::<web_sys::DomException>() {
        format!("{operation} failed: {}: {}", exception.name(), exception.message())
    } else {
        format!("{operation} failed: {:?}", err)
    }
}
