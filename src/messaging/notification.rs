use serde::{Deserialize, Serialize};

use crate::messaging::constants::{
    DEFAULT_NOTIFICATION_BADGE, DEFAULT_NOTIFICATION_ICON, DEFAULT_NOTIFICATION_TAG,
    DEFAULT_NOTIFICATION_TITLE, DEFAULT_VIBRATION_PATTERN,
};
use crate::messaging::error::{invalid_argument, MessagingResult};
use crate::messaging::types::{MessageData, MessagePayload};

/// Static presentation settings applied to every relayed notification.
///
/// Deserializes from camelCase JSON; absent keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationDefaults {
    pub fallback_title: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub require_interaction: bool,
    pub vibrate: Vec<u32>,
}

impl Default for NotificationDefaults {
    fn default() -> Self {
        Self {
            fallback_title: DEFAULT_NOTIFICATION_TITLE.to_string(),
            icon: DEFAULT_NOTIFICATION_ICON.to_string(),
            badge: DEFAULT_NOTIFICATION_BADGE.to_string(),
            tag: DEFAULT_NOTIFICATION_TAG.to_string(),
            require_interaction: true,
            vibrate: DEFAULT_VIBRATION_PATTERN.to_vec(),
        }
    }
}

impl NotificationDefaults {
    pub fn from_json_str(json: &str) -> MessagingResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| invalid_argument(format!("Invalid notification defaults: {err}")))
    }
}

/// Options half of a display request, serialized with the names the
/// Notifications API expects (`requireInteraction`, ...).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageData>,
    pub tag: String,
    pub require_interaction: bool,
    pub vibrate: Vec<u32>,
}

/// A notification ready to hand to the host.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NotificationSpec {
    pub title: String,
    pub options: DisplayOptions,
}

/// Builds the notification shown for a background message.
///
/// The payload's `data` map is moved over untouched, including when absent.
pub fn derive_notification(payload: MessagePayload, defaults: &NotificationDefaults) -> NotificationSpec {
    let MessagePayload {
        notification, data, ..
    } = payload;
    let notification = notification.unwrap_or_default();

    let title = notification
        .title
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| defaults.fallback_title.clone());
    let body = notification.body.unwrap_or_default();

    NotificationSpec {
        title,
        options: DisplayOptions {
            body,
            icon: defaults.icon.clone(),
            badge: defaults.badge.clone(),
            data,
            tag: defaults.tag.clone(),
            require_interaction: defaults.require_interaction,
            vibrate: defaults.vibrate.clone(),
        },
    }
}
