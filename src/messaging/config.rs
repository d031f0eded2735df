use crate::app::FirebaseApp;
use crate::messaging::error::{missing_app_config_value, MessagingResult};

/// Project identifiers Firebase Messaging needs to bind to a push backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub app_name: String,
    pub project_id: String,
    pub api_key: String,
    pub app_id: String,
    pub sender_id: String,
}

pub fn extract_app_config(app: &FirebaseApp) -> MessagingResult<AppConfig> {
    let options = app.options();

    let app_name = app.name().to_owned();
    if app_name.is_empty() {
        return Err(missing_app_config_value("App Name"));
    }

    let project_id = required(options.project_id, "projectId")?;
    let api_key = required(options.api_key, "apiKey")?;
    let app_id = required(options.app_id, "appId")?;
    let sender_id = required(options.messaging_sender_id, "messagingSenderId")?;

    Ok(AppConfig {
        app_name,
        project_id,
        api_key,
        app_id,
        sender_id,
    })
}

fn required(value: Option<String>, name: &str) -> MessagingResult<String> {
    value
        .filter(|value| !value.is_empty())
        .ok_or_else(|| missing_app_config_value(name))
}
