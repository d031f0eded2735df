use std::sync::atomic::{AtomicUsize, Ordering};

use crate::app::{initialize_app, FirebaseApp, FirebaseAppSettings, FirebaseOptions};
use crate::messaging::{get_messaging, Messaging};

/// Build a Firebase app with a complete messaging configuration for use in tests.
///
/// Each call registers a new, uniquely named app so tests stay isolated.
pub fn test_firebase_app() -> FirebaseApp {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let options = FirebaseOptions {
        api_key: Some("test-api-key".into()),
        project_id: Some("test-project".into()),
        app_id: Some("1:1234:web:test".into()),
        messaging_sender_id: Some("1234".into()),
        ..Default::default()
    };
    let settings = FirebaseAppSettings {
        name: Some(format!("test-{}", COUNTER.fetch_add(1, Ordering::SeqCst))),
        ..Default::default()
    };
    initialize_app(options, Some(settings)).expect("initialize test app")
}

pub fn test_messaging() -> Messaging {
    get_messaging(Some(test_firebase_app())).expect("messaging for test app")
}
