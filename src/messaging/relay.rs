use serde_json::{Map, Value};

use crate::logger::LogArgument;
use crate::messaging::api::Messaging;
use crate::messaging::click::{select_or_open_window, ClickAction};
use crate::messaging::error::{internal_error, invalid_payload, MessagingResult};
use crate::messaging::host::{ClickedNotification, ClientsHost, NotificationHost};
use crate::messaging::logger::LOGGER;
use crate::messaging::notification::{derive_notification, NotificationDefaults, NotificationSpec};
use crate::messaging::types::MessagePayload;

/// Turns background push messages into system notifications and notification
/// clicks into window focus or navigation.
///
/// Each handler call is self-contained; the relay itself holds only read-only
/// configuration.
#[derive(Clone, Debug)]
pub struct BackgroundRelay {
    messaging: Messaging,
    defaults: NotificationDefaults,
    origin: Option<String>,
}

impl BackgroundRelay {
    pub fn new(messaging: Messaging, defaults: NotificationDefaults) -> Self {
        Self {
            messaging,
            defaults,
            origin: None,
        }
    }

    /// Sets the origin (e.g. `https://app.example.com`) whose windows a click may focus.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn messaging(&self) -> &Messaging {
        &self.messaging
    }

    pub fn defaults(&self) -> &NotificationDefaults {
        &self.defaults
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Handles the text body of a push event, `None` when the push carried no data.
    ///
    /// The body is logged as received, unknown keys included, before it is parsed.
    pub async fn handle_push_data<H>(
        &self,
        body: Option<&str>,
        host: &H,
    ) -> MessagingResult<NotificationSpec>
    where
        H: NotificationHost + ?Sized,
    {
        let raw = match body.map(str::trim) {
            None | Some("") => Value::Object(Map::new()),
            Some(text) => serde_json::from_str(text).map_err(|err| {
                LOGGER.info_with(vec!["Received background message:", text]);
                invalid_payload(format!("Push message body is not JSON: {err}"))
            })?,
        };
        log_received(raw.clone());
        let payload = MessagePayload::from_json_value(raw)?;
        self.display(payload, host).await
    }

    /// Displays the notification derived from `payload` and waits until the host settled it.
    ///
    /// The registered background callback, if any, runs after a successful display.
    pub async fn handle_background_message<H>(
        &self,
        payload: MessagePayload,
        host: &H,
    ) -> MessagingResult<NotificationSpec>
    where
        H: NotificationHost + ?Sized,
    {
        log_received(payload.to_json_value());
        self.display(payload, host).await
    }

    async fn display<H>(&self, payload: MessagePayload, host: &H) -> MessagingResult<NotificationSpec>
    where
        H: NotificationHost + ?Sized,
    {
        let forwarded = payload.clone();
        let spec = derive_notification(payload, &self.defaults);
        host.show_notification(&spec).await?;
        self.messaging.dispatch_background_message(forwarded);
        Ok(spec)
    }

    /// Closes the clicked notification, then focuses a window of the app or opens a new one.
    pub async fn handle_notification_click<N, C>(
        &self,
        notification: &N,
        clients: &C,
    ) -> MessagingResult<ClickAction>
    where
        N: ClickedNotification + ?Sized,
        C: ClientsHost + ?Sized,
    {
        LOGGER.info("Notification clicked");
        notification.close();

        let windows = clients.match_windows(true).await?;
        let origin = self.origin.as_deref().unwrap_or_default();
        let action = select_or_open_window(&windows, origin, clients.can_open_window());

        match &action {
            ClickAction::Focus(index) => {
                let client = windows
                    .get(*index)
                    .ok_or_else(|| internal_error("Selected window is out of range"))?;
                clients.focus(client).await?;
            }
            ClickAction::OpenWindow(path) => clients.open_window(path).await?,
            ClickAction::Nothing => {
                LOGGER.debug("No window to focus and opening windows is unsupported");
            }
        }
        Ok(action)
    }
}

fn log_received(payload: Value) {
    LOGGER.info_with(vec![
        LogArgument::Text("Received background message:".into()),
        LogArgument::Value(payload),
    ]);
}
