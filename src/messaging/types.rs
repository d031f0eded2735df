use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::messaging::error::{invalid_payload, MessagingResult};

/// Application data attached to a push message, kept as sent.
pub type MessageData = Map<String, Value>;

/// Notification block of a push message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Additional FCM options for a payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FcmOptions {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub analytics_label: Option<String>,
}

/// Message delivered by Firebase Cloud Messaging, as found in the push event body.
///
/// Every field is optional. Missing or ill-typed fields read as `None` instead
/// of failing the whole message.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationPayload>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageData>,
    #[serde(rename = "fcmOptions", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub fcm_options: Option<FcmOptions>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub collapse_key: Option<String>,
    #[serde(rename = "fcmMessageId", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

impl MessagePayload {
    /// Parses the text body of a push event.
    pub fn from_json_str(body: &str) -> MessagingResult<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|err| invalid_payload(format!("Push message body is not JSON: {err}")))?;
        Self::from_json_value(value)
    }

    /// Builds a payload from an already parsed push body, which must be a JSON object.
    pub fn from_json_value(value: Value) -> MessagingResult<Self> {
        if !value.is_object() {
            return Err(invalid_payload("Push message body is not a JSON object"));
        }
        Self::deserialize(value)
            .map_err(|err| invalid_payload(format!("Push message body is not a valid payload: {err}")))
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

pub type MessageHandler = Arc<dyn Fn(MessagePayload) + Send + Sync + 'static>;

pub type Unsubscribe = Box<dyn FnOnce() + Send + 'static>;
