use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

const DEFAULT_DIRECTIVE: &str = "info";

// --- Browser console writer ---

/// Buffers one formatted record and hands it to the console on drop.
pub struct ConsoleLine {
    level: Level,
    buf: Vec<u8>,
}

impl Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console method a record of the given level is printed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<Level> for ConsoleMethod {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => ConsoleMethod::Error,
            Level::WARN => ConsoleMethod::Warn,
            Level::INFO => ConsoleMethod::Info,
            _ => ConsoleMethod::Debug,
        }
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let text = text.trim_end();
        if text.is_empty() {
            return;
        }
        let value = wasm_bindgen::JsValue::from_str(text);
        match ConsoleMethod::from(self.level) {
            ConsoleMethod::Error => web_sys::console::error_1(&value),
            ConsoleMethod::Warn => web_sys::console::warn_1(&value),
            ConsoleMethod::Info => web_sys::console::info_1(&value),
            ConsoleMethod::Debug => web_sys::console::debug_1(&value),
        }
    }
}

#[derive(Clone, Copy, Default)]
pub struct ConsoleWriter;

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleLine {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

/// Swaps the active filter once the stored settings are known.
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

fn make_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|err| {
        tracing::warn!(directive, %err, "invalid log directive, using {}", DEFAULT_DIRECTIVE);
        EnvFilter::new(DEFAULT_DIRECTIVE)
    })
}

fn reloadable_filter(directive: &str) -> (reload::Layer<EnvFilter, Registry>, FilterHandle) {
    reload::Layer::new(make_filter(directive))
}

/// Initializes logging at the default level. Call once at startup, before
/// anything that may log.
///
/// Records go to the browser console at the matching console level. The
/// browser has no wall clock for the formatter, so timestamps are left to
/// the console itself.
pub fn init_logging() -> FilterHandle {
    let (filter, handle) = reloadable_filter(DEFAULT_DIRECTIVE);
    let console_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_target(true)
        .with_writer(ConsoleWriter);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
    handle
}

/// Applies a configured directive such as `giftbook=debug`.
pub fn apply_directive(handle: &FilterHandle, directive: &str) {
    if let Err(err) = handle.reload(make_filter(directive)) {
        tracing::warn!(%err, "could not change log level");
    }
}
