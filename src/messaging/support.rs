//! Environment capability checks for the background relay.
//!
//! The relay only works inside a service worker that can show notifications and
//! enumerate window clients. Native targets always report `false`.

#[cfg(all(feature = "wasm-web", target_arch = "wasm32"))]
use js_sys::Reflect;
#[cfg(all(feature = "wasm-web", target_arch = "wasm32"))]
use wasm_bindgen::{JsCast, JsValue};

/// Returns `true` when running in a service worker scope that exposes
/// `registration.showNotification` and `clients`.
///
/// # Examples
///
/// ```
/// use firebase_messaging_relay::messaging;
///
/// if messaging::is_supported() {
///     // Safe to install the relay.
/// }
/// ```
#[cfg(all(feature = "wasm-web", target_arch = "wasm32"))]
pub fn is_supported() -> bool {
    let global = js_sys::global();
    if global.dyn_ref::<web_sys::ServiceWorkerGlobalScope>().is_none() {
        return false;
    }

    if !property_in(&global, "clients") || !property_in(&global, "registration") {
        return false;
    }

    prototype_has_property(&global, "ServiceWorkerRegistration", "showNotification")
}

#[cfg(all(feature = "wasm-web", target_arch = "wasm32"))]
fn property_in(target: &JsValue, property: &str) -> bool {
    Reflect::has(target, &JsValue::from_str(property)).unwrap_or(false)
}

#[cfg(all(feature = "wasm-web", target_arch = "wasm32"))]
fn prototype_has_property(target: &JsValue, constructor: &str, property: &str) -> bool {
    let Ok(ctor) = Reflect::get(target, &JsValue::from_str(constructor)) else {
        return false;
    };
    let Ok(prototype) = Reflect::get(&ctor, &JsValue::from_str("prototype")) else {
        return false;
    };

    prototype
        .dyn_ref::<js_sys::Object>()
        .map(|obj| obj.has_own_property(&JsValue::from_str(property)))
        .unwrap_or(false)
}

/// Returns `false` outside a web environment, where the required browser APIs
/// are unavailable.
#[cfg(not(all(feature = "wasm-web", target_arch = "wasm32")))]
pub fn is_supported() -> bool {
    false
}

#[cfg(all(test, not(all(feature = "wasm-web", target_arch = "wasm32"))))]
mod tests {
    #[test]
    fn non_wasm_targets_are_not_supported() {
        assert!(!super::is_supported());
    }
}
