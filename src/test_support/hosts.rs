use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::messaging::{
    clients_unavailable, notification_display_failed, window_activation_failed, ClickedNotification,
    ClientsHost, MessagingResult, NotificationHost, NotificationSpec, WindowClientInfo,
};

/// Notification tray that collapses notifications sharing a tag, like browsers do.
#[derive(Default)]
pub struct FakeNotificationHost {
    visible: Mutex<Vec<NotificationSpec>>,
    display_calls: Mutex<usize>,
    reject: AtomicBool,
}

impl FakeNotificationHost {
    pub fn rejecting() -> Self {
        let host = Self::default();
        host.reject.store(true, Ordering::SeqCst);
        host
    }

    pub fn visible(&self) -> Vec<NotificationSpec> {
        self.visible.lock().unwrap().clone()
    }

    pub fn display_calls(&self) -> usize {
        *self.display_calls.lock().unwrap()
    }
}

#[async_trait]
impl NotificationHost for FakeNotificationHost {
    async fn show_notification(&self, spec: &NotificationSpec) -> MessagingResult<()> {
        *self.display_calls.lock().unwrap() += 1;
        if self.reject.load(Ordering::SeqCst) {
            return Err(notification_display_failed("showNotification failed: permission denied"));
        }
        let mut visible = self.visible.lock().unwrap();
        visible.retain(|shown| shown.options.tag != spec.options.tag);
        visible.push(spec.clone());
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct FakeWindow {
    pub url: String,
    pub focusable: bool,
}

impl FakeWindow {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            focusable: true,
        }
    }
}

impl WindowClientInfo for FakeWindow {
    fn url(&self) -> &str {
        &self.url
    }

    fn is_focusable(&self) -> bool {
        self.focusable
    }
}

#[derive(Default)]
pub struct FakeClients {
    pub windows: Vec<FakeWindow>,
    pub can_open: bool,
    pub fail_enumeration: bool,
    pub fail_activation: bool,
    pub queried_uncontrolled: Mutex<Option<bool>>,
    pub focused: Mutex<Vec<String>>,
    pub opened: Mutex<Vec<String>>,
}

impl FakeClients {
    pub fn with_windows(windows: Vec<FakeWindow>, can_open: bool) -> Self {
        Self {
            windows,
            can_open,
            ..Default::default()
        }
    }

    pub fn focused(&self) -> Vec<String> {
        self.focused.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClientsHost for FakeClients {
    type Client = FakeWindow;

    async fn match_windows(&self, include_uncontrolled: bool) -> MessagingResult<Vec<FakeWindow>> {
        *self.queried_uncontrolled.lock().unwrap() = Some(include_uncontrolled);
        if self.fail_enumeration {
            return Err(clients_unavailable("clients.matchAll failed: InvalidStateError"));
        }
        Ok(self.windows.clone())
    }

    async fn focus(&self, client: &FakeWindow) -> MessagingResult<()> {
        if self.fail_activation {
            return Err(window_activation_failed("WindowClient.focus failed: InvalidAccessError"));
        }
        self.focused.lock().unwrap().push(client.url.clone());
        Ok(())
    }

    fn can_open_window(&self) -> bool {
        self.can_open
    }

    async fn open_window(&self, path: &str) -> MessagingResult<()> {
        if self.fail_activation {
            return Err(window_activation_failed("clients.openWindow failed: InvalidAccessError"));
        }
        self.opened.lock().unwrap().push(path.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeNotification {
    closed: AtomicBool,
}

impl FakeNotification {
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl ClickedNotification for FakeNotification {
    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
