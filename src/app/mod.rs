//! Firebase app handles and their static configuration.
mod api;
mod constants;
mod errors;
mod logger;
mod types;

#[doc(inline)]
pub use api::{delete_app, get_app, get_apps, initialize_app};

#[doc(inline)]
pub use constants::DEFAULT_ENTRY_NAME;

#[doc(inline)]
pub use errors::{AppError, AppResult};

#[doc(inline)]
pub use logger::LOGGER;

#[doc(inline)]
pub use types::{FirebaseApp, FirebaseAppConfig, FirebaseAppSettings, FirebaseOptions};
