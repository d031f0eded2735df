use url::Url;

use crate::messaging::constants::APP_ROOT_PATH;

/// Read-only view of an open window as reported by the host.
pub trait WindowClientInfo {
    fn url(&self) -> &str;

    /// Whether the host exposes `focus` for this client.
    fn is_focusable(&self) -> bool;
}

/// What a notification click should do once the open windows are known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickAction {
    /// Focus the window at this index of the enumerated list.
    Focus(usize),
    /// Open a new window at this path.
    OpenWindow(String),
    /// No matching window and the host cannot open one.
    Nothing,
}

/// Picks the first focusable window on the app's origin, in host enumeration order,
/// or falls back to opening the app root.
pub fn select_or_open_window<C>(open_windows: &[C], origin: &str, can_open_window: bool) -> ClickAction
where
    C: WindowClientInfo,
{
    if let Ok(app_url) = Url::parse(origin) {
        let app_origin = app_url.origin();
        let matched = open_windows.iter().position(|client| {
            client.is_focusable()
                && Url::parse(client.url())
                    .map(|client_url| client_url.origin() == app_origin)
                    .unwrap_or(false)
        });
        if let Some(index) = matched {
            return ClickAction::Focus(index);
        }
    }

    if can_open_window {
        ClickAction::OpenWindow(APP_ROOT_PATH.to_string())
    } else {
        ClickAction::Nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Window {
        url: &'static str,
        focusable: bool,
    }

    impl WindowClientInfo for Window {
        fn url(&self) -> &str {
            self.url
        }

        fn is_focusable(&self) -> bool {
            self.focusable
        }
    }

    fn window(url: &'static str) -> Window {
        Window { url, focusable: true }
    }

    const ORIGIN: &str = "https://pharmacy.example.com";

    #[test]
    fn focuses_window_on_app_origin() {
        let windows = [window("https://pharmacy.example.com/orders")];
        assert_eq!(select_or_open_window(&windows, ORIGIN, true), ClickAction::Focus(0));
    }

    #[test]
    fn opens_root_when_no_window_matches() {
        let windows = [window("https://other.example.com/"), window("about:blank")];
        assert_eq!(
            select_or_open_window(&windows, ORIGIN, true),
            ClickAction::OpenWindow("/".to_string())
        );
    }

    #[test]
    fn does_nothing_when_opening_is_unsupported() {
        let windows: [Window; 0] = [];
        assert_eq!(select_or_open_window(&windows, ORIGIN, false), ClickAction::Nothing);
    }

    #[test]
    fn first_match_in_enumeration_order_wins() {
        let windows = [
            window("https://other.example.com/"),
            window("https://pharmacy.example.com/a"),
            window("https://pharmacy.example.com/b"),
        ];
        assert_eq!(select_or_open_window(&windows, ORIGIN, true), ClickAction::Focus(1));
    }

    #[test]
    fn skips_windows_without_focus() {
        let windows = [
            Window {
                url: "https://pharmacy.example.com/",
                focusable: false,
            },
            window("https://pharmacy.example.com/settings"),
        ];
        assert_eq!(select_or_open_window(&windows, ORIGIN, true), ClickAction::Focus(1));
    }

    #[test]
    fn origin_in_query_string_is_not_a_match() {
        let windows = [
            window("https://evil.example.net/?next=https://pharmacy.example.com"),
            window("http://pharmacy.example.com/"),
            window("https://pharmacy.example.com:8443/"),
        ];
        assert_eq!(
            select_or_open_window(&windows, ORIGIN, true),
            ClickAction::OpenWindow("/".to_string())
        );
    }

    #[test]
    fn unparsable_origin_never_matches() {
        let windows = [window("https://pharmacy.example.com/")];
        assert_eq!(
            select_or_open_window(&windows, "not a url", true),
            ClickAction::OpenWindow("/".to_string())
        );
    }
}
