use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessagingErrorCode {
    InvalidArgument,
    Internal,
    MissingAppConfigValues,
    AvailableInServiceWorker,
    UnsupportedBrowser,
    InvalidPayload,
    NotificationDisplayFailed,
    ClientsUnavailable,
    WindowActivationFailed,
    RelayAlreadyInstalled,
}

impl MessagingErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessagingErrorCode::InvalidArgument => "messaging/invalid-argument",
            MessagingErrorCode::Internal => "messaging/internal",
            MessagingErrorCode::MissingAppConfigValues => "messaging/missing-app-config-values",
            MessagingErrorCode::AvailableInServiceWorker => "messaging/only-available-in-sw",
            MessagingErrorCode::UnsupportedBrowser => "messaging/unsupported-browser",
            MessagingErrorCode::InvalidPayload => "messaging/invalid-payload",
            MessagingErrorCode::NotificationDisplayFailed => {
                "messaging/notification-display-failed"
            }
            MessagingErrorCode::ClientsUnavailable => "messaging/clients-unavailable",
            MessagingErrorCode::WindowActivationFailed => "messaging/window-activation-failed",
            MessagingErrorCode::RelayAlreadyInstalled => "messaging/relay-already-installed",
        }
    }
}

#[derive(Clone, Debug)]
pub struct MessagingError {
    pub code: MessagingErrorCode,
    message: String,
}

impl MessagingError {
    pub fn new(code: MessagingErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for MessagingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for MessagingError {}

pub type MessagingResult<T> = Result<T, MessagingError>;

pub fn invalid_argument(message: impl Into<String>) -> MessagingError {
    MessagingError::new(MessagingErrorCode::InvalidArgument, message)
}

pub fn internal_error(message: impl Into<String>) -> MessagingError {
    MessagingError::new(MessagingErrorCode::Internal, message)
}

pub fn missing_app_config_value(value_name: &str) -> MessagingError {
    MessagingError::new(
        MessagingErrorCode::MissingAppConfigValues,
        format!("Missing App configuration value: \"{value_name}\""),
    )
}

pub fn available_in_service_worker(message: impl Into<String>) -> MessagingError {
    MessagingError::new(MessagingErrorCode::AvailableInServiceWorker, message)
}

pub fn unsupported_browser(message: impl Into<String>) -> MessagingError {
    MessagingError::new(MessagingErrorCode::UnsupportedBrowser, message)
}

pub fn invalid_payload(message: impl Into<String>) -> MessagingError {
    MessagingError::new(MessagingErrorCode::InvalidPayload, message)
}

pub fn notification_display_failed(message: impl Into<String>) -> MessagingError {
    MessagingError::new(MessagingErrorCode::NotificationDisplayFailed, message)
}

pub fn clients_unavailable(message: impl Into<String>) -> MessagingError {
    MessagingError::new(MessagingErrorCode::ClientsUnavailable, message)
}

pub fn window_activation_failed(message: impl Into<String>) -> MessagingError {
    MessagingError::new(MessagingErrorCode::WindowActivationFailed, message)
}

pub fn relay_already_installed() -> MessagingError {
    MessagingError::new(
        MessagingErrorCode::RelayAlreadyInstalled,
        "A background relay is already installed in this service worker",
    )
}
