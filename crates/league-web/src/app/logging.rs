//! Browser console logging.
//!
//! `tracing` events are written to the devtools console. The level can be
//! changed at runtime and is remembered in local storage.

use std::sync::Once;

use tracing::level_filters::LevelFilter;

static INIT: Once = Once::new();

/// Local storage key holding the chosen level.
pub const LOG_LEVEL_KEY: &str = "league_web_log_level";

const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

/// Install the subscriber. Safe to call more than once.
pub fn init() {
    INIT.call_once(|| {
        #[cfg(feature = "web")]
        init_web_logging();
    });
}

#[cfg(feature = "web")]
static RELOAD_HANDLE: std::sync::OnceLock<tracing_subscriber::reload::Handle<LevelFilter, tracing_subscriber::Registry>> =
    std::sync::OnceLock::new();

#[cfg(feature = "web")]
fn init_web_logging() {
    console_error_panic_hook::set_once();
    use tracing_subscriber::prelude::*;
    use tracing_web::MakeWebConsoleWriter;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(MakeWebConsoleWriter::new())
        .without_time();

    let initial_level = stored_level().unwrap_or(DEFAULT_LEVEL);
    let (filter, handle) = tracing_subscriber::reload::Layer::new(initial_level);
    let _ = RELOAD_HANDLE.set(handle);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    match value {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

fn level_name(level: LevelFilter) -> &'static str {
    match level {
        LevelFilter::OFF => "off",
        LevelFilter::ERROR => "error",
        LevelFilter::WARN => "warn",
        LevelFilter::DEBUG => "debug",
        LevelFilter::TRACE => "trace",
        _ => "info",
    }
}

#[cfg(feature = "web")]
fn stored_level() -> Option<LevelFilter> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let value = storage.get_item(LOG_LEVEL_KEY).ok()??;
    parse_level(&value)
}

#[cfg(not(feature = "web"))]
fn stored_level() -> Option<LevelFilter> {
    None
}

/// Change the active level and remember it for the next visit.
pub fn set_log_level(level: LevelFilter) {
    #[cfg(feature = "web")]
    {
        if let Some(handle) = RELOAD_HANDLE.get() {
            let _ = handle.reload(level);
        }
        if let Some(Ok(Some(storage))) = web_sys::window().map(|w| w.local_storage()) {
            let _ = storage.set_item(LOG_LEVEL_KEY, level_name(level));
        }
    }
    #[cfg(not(feature = "web"))]
    let _ = level_name(level);
}

pub fn get_log_level() -> LevelFilter {
    stored_level().unwrap_or(DEFAULT_LEVEL)
}
