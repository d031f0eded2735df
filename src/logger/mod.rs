//! Named, level-filtered loggers shared by the app and messaging modules.
//!
//! Records go through a per-logger handler (console or stdio by default) and,
//! when installed, a global user callback. With [`set_log_facade_routing`] the
//! default handler writes to the [`log`] facade instead, under the logger name
//! as target.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, LazyLock, Mutex, RwLock, Weak};

static GLOBAL_LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static ROUTE_TO_FACADE: AtomicBool = AtomicBool::new(false);
static INSTANCES: LazyLock<Mutex<Vec<Weak<LoggerInner>>>> =
    LazyLock::new(|| Mutex::new(Vec::new()));
// Applied to loggers created after `set_user_log_handler`.
static USER_LOG_HANDLER: RwLock<Option<SharedLogHandler>> = RwLock::new(None);

type SharedLogHandler = Arc<dyn Fn(&Logger, LogLevel, &[LogArgument]) + Send + Sync + 'static>;

#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    name: String,
    log_level: AtomicU8,
    log_handler: RwLock<SharedLogHandler>,
    user_log_handler: RwLock<Option<SharedLogHandler>>,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        let inner = Arc::new(LoggerInner {
            name: name.into(),
            log_level: AtomicU8::new(GLOBAL_LOG_LEVEL.load(Ordering::SeqCst)),
            log_handler: RwLock::new(Arc::new(default_log_handler)),
            user_log_handler: RwLock::new(
                USER_LOG_HANDLER
                    .read()
                    .unwrap_or_else(|poison| poison.into_inner())
                    .clone(),
            ),
        });
        INSTANCES
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(Arc::downgrade(&inner));
        Self { inner }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.inner.log_level.load(Ordering::SeqCst))
    }

    pub fn set_log_level<L>(&self, level: L) -> Result<(), LogError>
    where
        L: IntoLogLevel,
    {
        let level = level.into_log_level()?;
        self.inner.log_level.store(level as u8, Ordering::SeqCst);
        Ok(())
    }

    /// Replaces the sink of this logger. The handler is responsible for level filtering.
    pub fn set_log_handler<F>(&self, handler: F)
    where
        F: Fn(&Logger, LogLevel, &[LogArgument]) + Send + Sync + 'static,
    {
        *self
            .inner
            .log_handler
            .write()
            .unwrap_or_else(|poison| poison.into_inner()) = Arc::new(handler);
    }

    pub fn reset_log_handler(&self) {
        self.set_log_handler(default_log_handler);
    }

    pub fn has_user_log_handler(&self) -> bool {
        self.inner
            .user_log_handler
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .is_some()
    }

    fn set_user_log_handler(&self, handler: Option<SharedLogHandler>) {
        *self
            .inner
            .user_log_handler
            .write()
            .unwrap_or_else(|poison| poison.into_inner()) = handler;
    }

    pub fn debug(&self, arg: impl IntoLogArgument) {
        self.dispatch(LogLevel::Debug, vec![arg.into_log_argument()]);
    }

    pub fn log(&self, arg: impl IntoLogArgument) {
        self.dispatch(LogLevel::Verbose, vec![arg.into_log_argument()]);
    }

    pub fn info(&self, arg: impl IntoLogArgument) {
        self.dispatch(LogLevel::Info, vec![arg.into_log_argument()]);
    }

    pub fn warn(&self, arg: impl IntoLogArgument) {
        self.dispatch(LogLevel::Warn, vec![arg.into_log_argument()]);
    }

    pub fn error(&self, arg: impl IntoLogArgument) {
        self.dispatch(LogLevel::Error, vec![arg.into_log_argument()]);
    }

    /// Logs several arguments as one record, e.g. a label followed by a JSON value.
    pub fn info_with<I, T>(&self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: IntoLogArgument,
    {
        let arguments = args.into_iter().map(IntoLogArgument::into_log_argument).collect();
        self.dispatch(LogLevel::Info, arguments);
    }

    fn dispatch(&self, level: LogLevel, arguments: Vec<LogArgument>) {
        let user_handler = self
            .inner
            .user_log_handler
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone();
        if let Some(handler) = user_handler {
            handler(self, level, &arguments);
        }
        let handler = self
            .inner
            .log_handler
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone();
        handler(self, level, &arguments);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("log_level", &self.log_level())
            .finish()
    }
}

fn default_log_handler(logger: &Logger, level: LogLevel, args: &[LogArgument]) {
    if level < logger.log_level() || level == LogLevel::Silent {
        return;
    }

    if ROUTE_TO_FACADE.load(Ordering::SeqCst) {
        forward_to_facade(logger, level, args);
        return;
    }

    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let message = build_message(args);
    let line = if message.is_empty() {
        format!("[{}]  {}:", now, logger.name())
    } else {
        format!("[{}]  {}: {}", now, logger.name(), message)
    };
    write_line(level, &line);
}

#[cfg(all(feature = "wasm-web", target_arch = "wasm32"))]
fn write_line(level: LogLevel, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Warn => web_sys::console::warn_1(&value),
        LogLevel::Error => web_sys::console::error_1(&value),
        LogLevel::Debug => web_sys::console::debug_1(&value),
        _ => web_sys::console::log_1(&value),
    }
}

#[cfg(not(all(feature = "wasm-web", target_arch = "wasm32")))]
fn write_line(level: LogLevel, line: &str) {
    match level {
        LogLevel::Warn | LogLevel::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

fn forward_to_facade(logger: &Logger, level: LogLevel, args: &[LogArgument]) {
    let facade_level = match level {
        LogLevel::Debug => log::Level::Trace,
        LogLevel::Verbose => log::Level::Debug,
        LogLevel::Info => log::Level::Info,
        LogLevel::Warn => log::Level::Warn,
        LogLevel::Error => log::Level::Error,
        LogLevel::Silent => return,
    };
    if log::log_enabled!(target: logger.name(), facade_level) {
        log::log!(target: logger.name(), facade_level, "{}", build_message(args));
    }
}

fn build_message(args: &[LogArgument]) -> String {
    args.iter()
        .filter_map(LogArgument::to_message_fragment)
        .collect::<Vec<_>>()
        .join(" ")
}

fn with_instances<F>(mut f: F)
where
    F: FnMut(Logger),
{
    let mut instances = INSTANCES.lock().unwrap_or_else(|poison| poison.into_inner());
    instances.retain(|weak| match weak.upgrade() {
        Some(inner) => {
            f(Logger { inner });
            true
        }
        None => false,
    });
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Verbose = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Silent = 5,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Verbose => "verbose",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Silent => "silent",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Verbose,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Silent,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "verbose" => Ok(LogLevel::Verbose),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "silent" => Ok(LogLevel::Silent),
            other => Err(LogError::InvalidLogLevel(other.to_string())),
        }
    }
}

pub trait IntoLogLevel {
    fn into_log_level(self) -> Result<LogLevel, LogError>;
}

impl IntoLogLevel for LogLevel {
    fn into_log_level(self) -> Result<LogLevel, LogError> {
        Ok(self)
    }
}

impl IntoLogLevel for &str {
    fn into_log_level(self) -> Result<LogLevel, LogError> {
        LogLevel::from_str(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub level: Option<LogLevel>,
}

#[derive(Debug, Clone)]
pub struct LogCallbackParams {
    pub level: LogLevel,
    pub message: String,
    pub args: Vec<Value>,
    pub logger_type: String,
}

pub type LogCallback = Arc<dyn Fn(LogCallbackParams) + Send + Sync + 'static>;

#[derive(Debug, Clone, PartialEq)]
pub enum LogArgument {
    Text(String),
    Value(Value),
}

impl LogArgument {
    fn to_message_fragment(&self) -> Option<String> {
        match self {
            LogArgument::Text(text) => Some(text.clone()),
            LogArgument::Value(Value::Null) => None,
            LogArgument::Value(Value::String(text)) => Some(text.clone()),
            LogArgument::Value(other) => Some(other.to_string()),
        }
    }

    fn to_callback_value(&self) -> Value {
        match self {
            LogArgument::Text(text) => Value::String(text.clone()),
            LogArgument::Value(value) => value.clone(),
        }
    }
}

pub trait IntoLogArgument {
    fn into_log_argument(self) -> LogArgument;
}

impl IntoLogArgument for LogArgument {
    fn into_log_argument(self) -> LogArgument {
        self
    }
}

impl IntoLogArgument for String {
    fn into_log_argument(self) -> LogArgument {
        LogArgument::Text(self)
    }
}

impl IntoLogArgument for &str {
    fn into_log_argument(self) -> LogArgument {
        LogArgument::Text(self.to_owned())
    }
}

impl IntoLogArgument for Value {
    fn into_log_argument(self) -> LogArgument {
        LogArgument::Value(self)
    }
}

#[derive(Debug, Clone)]
pub enum LogError {
    InvalidLogLevel(String),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::InvalidLogLevel(level) => {
                write!(f, "Invalid value \"{level}\" assigned to `logLevel`")
            }
        }
    }
}

impl std::error::Error for LogError {}

/// Sets the level of every live logger and of loggers created afterwards.
pub fn set_log_level<L>(level: L) -> Result<(), LogError>
where
    L: IntoLogLevel,
{
    let level = level.into_log_level()?;
    GLOBAL_LOG_LEVEL.store(level as u8, Ordering::SeqCst);
    with_instances(|logger| {
        logger.inner.log_level.store(level as u8, Ordering::SeqCst);
    });
    Ok(())
}

/// Makes the default handler write accepted records to the [`log`] facade
/// instead of the console. Loggers with a custom handler are unaffected.
pub fn set_log_facade_routing(enabled: bool) {
    ROUTE_TO_FACADE.store(enabled, Ordering::SeqCst);
}

/// Installs (or with `None`, removes) a callback receiving the records of every
/// logger, including loggers created later.
pub fn set_user_log_handler(callback: Option<LogCallback>, options: Option<LogOptions>) {
    let custom_level = options.unwrap_or_default().level;
    let handler = callback.map(|cb| -> SharedLogHandler {
        Arc::new(move |instance: &Logger, level: LogLevel, args: &[LogArgument]| {
            let threshold = custom_level.unwrap_or_else(|| instance.log_level());
            if level < threshold {
                return;
            }
            cb(LogCallbackParams {
                level,
                message: build_message(args),
                args: args.iter().map(LogArgument::to_callback_value).collect(),
                logger_type: instance.name().to_owned(),
            });
        })
    });

    *USER_LOG_HANDLER
        .write()
        .unwrap_or_else(|poison| poison.into_inner()) = handler.clone();
    with_instances(|logger| logger.set_user_log_handler(handler.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static TEST_GUARD: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

    fn reset_logging() {
        set_log_level(LogLevel::Info).unwrap();
        set_user_log_handler(None, None);
        set_log_facade_routing(false);
    }

    static FACADE_RECORDS: Mutex<Vec<(String, log::Level, String)>> = Mutex::new(Vec::new());

    struct RecordingFacade;

    impl log::Log for RecordingFacade {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            FACADE_RECORDS.lock().unwrap().push((
                record.target().to_owned(),
                record.level(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    fn install_recording_facade() {
        static INSTALL: std::sync::Once = std::sync::Once::new();
        INSTALL.call_once(|| {
            log::set_logger(&RecordingFacade).unwrap();
            log::set_max_level(log::LevelFilter::Trace);
        });
    }

    fn facade_records_for(target: &str) -> Vec<(log::Level, String)> {
        FACADE_RECORDS
            .lock()
            .unwrap()
            .iter()
            .filter(|(record_target, _, _)| record_target == target)
            .map(|(_, level, message)| (*level, message.clone()))
            .collect()
    }

    fn recording_logger(name: &str) -> (Logger, Arc<Mutex<Vec<(LogLevel, String)>>>) {
        let logger = Logger::new(name);
        let records = Arc::new(Mutex::new(Vec::new()));
        let handler_records = Arc::clone(&records);
        logger.set_log_handler(move |instance, level, args| {
            if level < instance.log_level() {
                return;
            }
            handler_records
                .lock()
                .unwrap()
                .push((level, build_message(args)));
        });
        (logger, records)
    }

    #[test]
    fn global_level_filters_records() {
        let _guard = TEST_GUARD.lock().unwrap();
        reset_logging();
        let (logger, records) = recording_logger("@firebase/logger-level-test");
        set_log_level("warn").unwrap();

        logger.debug("debug message");
        logger.info("info message");
        logger.warn("warn message");
        logger.error("error message");

        let stored = records.lock().unwrap();
        let levels: Vec<_> = stored.iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, [LogLevel::Warn, LogLevel::Error]);
        assert_eq!(stored[0].1, "warn message");
        drop(stored);
        reset_logging();
    }

    #[test]
    fn invalid_level_string_is_rejected() {
        let err = set_log_level("loud").unwrap_err();
        assert_eq!(err.to_string(), "Invalid value \"loud\" assigned to `logLevel`");
    }

    #[test]
    fn json_arguments_are_rendered_inline() {
        let _guard = TEST_GUARD.lock().unwrap();
        reset_logging();
        let (logger, records) = recording_logger("@firebase/logger-json-test");

        logger.info_with(vec![
            LogArgument::Text("Received background message:".into()),
            LogArgument::Value(json!({"data": {"orderId": "123"}})),
        ]);

        let stored = records.lock().unwrap();
        assert_eq!(
            stored[0].1,
            "Received background message: {\"data\":{\"orderId\":\"123\"}}"
        );
    }

    #[test]
    fn user_handler_respects_custom_level() {
        let _guard = TEST_GUARD.lock().unwrap();
        reset_logging();
        let logger = Logger::new("@firebase/logger-user-test");
        let logger_name = logger.name().to_owned();

        let captured = Arc::new(Mutex::new(Vec::new()));
        let captured_cb = Arc::clone(&captured);
        let callback: LogCallback = Arc::new(move |params: LogCallbackParams| {
            if params.logger_type == logger_name {
                captured_cb.lock().unwrap().push((params.level, params.message));
            }
        });
        set_user_log_handler(
            Some(callback),
            Some(LogOptions {
                level: Some(LogLevel::Warn),
            }),
        );
        assert!(logger.has_user_log_handler());

        logger.info("info message");
        logger.warn("warn message");

        let records = captured.lock().unwrap().clone();
        assert_eq!(records, vec![(LogLevel::Warn, "warn message".to_string())]);

        set_user_log_handler(None, None);
        assert!(!logger.has_user_log_handler());
    }

    #[test]
    fn user_handler_reaches_loggers_created_later() {
        let _guard = TEST_GUARD.lock().unwrap();
        reset_logging();

        let captured = Arc::new(Mutex::new(Vec::new()));
        let captured_cb = Arc::clone(&captured);
        let callback: LogCallback = Arc::new(move |params: LogCallbackParams| {
            if params.logger_type == "@firebase/logger-late-test" {
                captured_cb.lock().unwrap().push(params.message);
            }
        });
        set_user_log_handler(Some(callback), None);

        let logger = Logger::new("@firebase/logger-late-test");
        assert!(logger.has_user_log_handler());
        logger.info("created after the callback");
        assert_eq!(
            captured.lock().unwrap().clone(),
            vec!["created after the callback".to_string()]
        );

        set_user_log_handler(None, None);
        assert!(!Logger::new("@firebase/logger-late-test").has_user_log_handler());
    }

    #[test]
    fn facade_receives_records_only_when_routed() {
        let _guard = TEST_GUARD.lock().unwrap();
        reset_logging();
        install_recording_facade();
        let logger = Logger::new("@firebase/logger-facade-test");

        logger.info("console only");
        assert!(facade_records_for("@firebase/logger-facade-test").is_empty());

        set_log_facade_routing(true);
        logger.debug("below level");
        logger.warn("routed");
        assert_eq!(
            facade_records_for("@firebase/logger-facade-test"),
            vec![(log::Level::Warn, "routed".to_string())]
        );
        reset_logging();
    }
}
