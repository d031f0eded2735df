//! Firebase Cloud Messaging background relay for web apps.
//!
//! Compiled to WebAssembly and loaded by the app's messaging service worker, the
//! crate shows a system notification for every background push message and brings
//! the app to the front when the notification is clicked. See [`messaging`] for the
//! relay itself and [`app`] for the Firebase configuration it binds to.

pub mod app;
pub mod logger;
pub mod messaging;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) mod test_support;
