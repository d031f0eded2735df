//! Background notification relay for Firebase Cloud Messaging.
//!
//! A service worker receives push messages while no app window listens for them.
//! [`BackgroundRelay`] turns each message into a system notification (always under
//! the same tag, so a newer one replaces the visible one) and, when the user clicks
//! it, focuses an open window of the app or opens a new one at the app root.
//!
//! The decisions live in two pure functions, [`derive_notification`] and
//! [`select_or_open_window`]; all browser effects go through the [`NotificationHost`]
//! and [`ClientsHost`] seams, implemented for service workers in the `wasm-web` build.
mod api;
mod click;
mod config;
mod constants;
pub mod error;
mod host;
mod logger;
mod notification;
mod relay;
mod support;
#[cfg(all(feature = "wasm-web", target_arch = "wasm32"))]
mod sw;
mod types;

pub use api::{get_messaging, on_background_message, Messaging};
pub use click::{select_or_open_window, ClickAction, WindowClientInfo};
pub use config::{extract_app_config, AppConfig};
pub use constants::{
    APP_ROOT_PATH, DEFAULT_NOTIFICATION_BADGE, DEFAULT_NOTIFICATION_ICON, DEFAULT_NOTIFICATION_TAG,
    DEFAULT_NOTIFICATION_TITLE, DEFAULT_VIBRATION_PATTERN,
};
pub use error::{
    clients_unavailable, notification_display_failed, window_activation_failed, MessagingError,
    MessagingErrorCode, MessagingResult,
};
pub use host::{ClickedNotification, ClientsHost, NotificationHost};
pub use logger::LOGGER;
pub use notification::{derive_notification, DisplayOptions, NotificationDefaults, NotificationSpec};
pub use relay::BackgroundRelay;
pub use support::is_supported;
#[cfg(all(feature = "wasm-web", target_arch = "wasm32"))]
pub use sw::{
    install_relay, start_service_worker, WorkerClientsHost, WorkerNotification,
    WorkerNotificationHost, WorkerWindowClient,
};
pub use types::{
    FcmOptions, MessageData, MessageHandler, MessagePayload, NotificationPayload, Unsubscribe,
};
