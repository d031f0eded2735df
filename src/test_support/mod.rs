//! Test utilities shared across crate-level unit tests.

pub mod firebase;
pub mod hosts;

pub use firebase::{test_firebase_app, test_messaging};
pub use hosts::{FakeClients, FakeNotification, FakeNotificationHost, FakeWindow};
