//! Seams between the relay and the environment that shows notifications and owns windows.
//!
//! The service worker binding implements these with `web-sys`; tests use in-memory fakes.

use async_trait::async_trait;

use crate::messaging::click::WindowClientInfo;
use crate::messaging::error::MessagingResult;
use crate::messaging::notification::NotificationSpec;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait NotificationHost {
    /// Resolves once the host settled the display request.
    async fn show_notification(&self, spec: &NotificationSpec) -> MessagingResult<()>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait ClientsHost {
    #[cfg(not(target_arch = "wasm32"))]
    type Client: WindowClientInfo + Send + Sync;
    #[cfg(target_arch = "wasm32")]
    type Client: WindowClientInfo;

    /// Lists open window clients in host order.
    async fn match_windows(&self, include_uncontrolled: bool) -> MessagingResult<Vec<Self::Client>>;

    async fn focus(&self, client: &Self::Client) -> MessagingResult<()>;

    fn can_open_window(&self) -> bool;

    async fn open_window(&self, path: &str) -> MessagingResult<()>;
}

/// The notification instance a click event refers to.
pub trait ClickedNotification {
    fn close(&self);
}
