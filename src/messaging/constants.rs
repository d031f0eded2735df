/// Title shown when the push payload carries none ("New notification").
pub const DEFAULT_NOTIFICATION_TITLE: &str = "إشعار جديد";
pub const DEFAULT_NOTIFICATION_ICON: &str = "/icons/Icon-192.png";
pub const DEFAULT_NOTIFICATION_BADGE: &str = "/icons/Icon-192.png";
/// Shared tag: the host replaces a visible notification carrying it instead of stacking.
pub const DEFAULT_NOTIFICATION_TAG: &str = "pharmacy-notification";
pub const DEFAULT_VIBRATION_PATTERN: [u32; 3] = [200, 100, 200];

/// Path opened when a click finds no window of the app to focus.
pub const APP_ROOT_PATH: &str = "/";

#[cfg(all(feature = "wasm-web", target_arch = "wasm32"))]
pub const PUSH_EVENT: &str = "push";
#[cfg(all(feature = "wasm-web", target_arch = "wasm32"))]
pub const NOTIFICATION_CLICK_EVENT: &str = "notificationclick";
