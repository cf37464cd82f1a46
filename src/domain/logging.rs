use derive_more::Display;
use std::fmt;
use std::sync::OnceLock;

/// Severity, ordered so sinks can filter with `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace = 0,
    #[display(fmt = "DEBUG")]
    Debug = 1,
    #[display(fmt = " INFO")]
    Info = 2,
    #[display(fmt = " WARN")]
    Warn = 3,
    #[display(fmt = "ERROR")]
    Error = 4,
}

/// Layer and unit that produced a log line, e.g. `Domain("Sampler")`.
#[derive(Debug, Clone, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

/// One formatted log line before it reaches a sink.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: String) -> Self {
        Self { timestamp: get_time_provider().current_timestamp(), level, component, message }
    }

    pub fn format_line(&self) -> String {
        let timestamp = get_time_provider().format_timestamp(self.timestamp);
        format!("[{}] {} {} | {}", timestamp, self.level, self.component, self.message)
    }
}

/// Clock used to stamp log entries.
pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Sink for log entries. `enabled` is checked before the message is
/// formatted, so filtered levels cost nothing inside the frame loop.
pub trait Logger: Send + Sync {
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn log(&self, entry: LogEntry);
}

/// Formats and forwards one message if `logger` accepts `level`.
pub fn emit_to(logger: &dyn Logger, level: LogLevel, component: LogComponent, args: fmt::Arguments<'_>) {
    if logger.enabled(level) {
        logger.log(LogEntry::new(level, component, args.to_string()));
    }
}

/// Backend of the `log_*!` macros.
pub fn emit(level: LogLevel, component: LogComponent, args: fmt::Arguments<'_>) {
    emit_to(get_logger(), level, component, args);
}

static GLOBAL_LOGGER: OnceLock<Box<dyn Logger + Sync + Send>> = OnceLock::new();
static GLOBAL_TIME_PROVIDER: OnceLock<Box<dyn TimeProvider + Sync + Send>> = OnceLock::new();

/// Install the process-wide logger. Later calls are ignored.
pub fn init_logger(logger: Box<dyn Logger + Sync + Send>) {
    let _ = GLOBAL_LOGGER.set(logger);
}

/// Install the process-wide time provider. Later calls are ignored.
pub fn init_time_provider(time_provider: Box<dyn TimeProvider + Sync + Send>) {
    let _ = GLOBAL_TIME_PROVIDER.set(time_provider);
}

pub fn get_logger() -> &'static dyn Logger {
    GLOBAL_LOGGER.get().map(|logger| logger.as_ref()).unwrap_or(&NoOpLogger)
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    GLOBAL_TIME_PROVIDER.get().map(|provider| provider.as_ref()).unwrap_or(&BasicTimeProvider)
}

struct NoOpLogger;
impl Logger for NoOpLogger {
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn log(&self, _entry: LogEntry) {}
}

/// Monotonic counter used until a real clock is installed (native tests).
struct BasicTimeProvider;
impl TimeProvider for BasicTimeProvider {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("{:06}", timestamp)
    }
}

// trace and debug compile away in release builds
#[macro_export]
macro_rules! log_trace {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::emit($crate::domain::logging::LogLevel::Trace, $component, format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::emit($crate::domain::logging::LogLevel::Debug, $component, format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit($crate::domain::logging::LogLevel::Info, $component, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit($crate::domain::logging::LogLevel::Warn, $component, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit($crate::domain::logging::LogLevel::Error, $component, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn component_display_is_prefixed_by_layer() {
        assert_eq!(LogComponent::Domain("Sampler").to_string(), "DOM:Sampler");
        assert_eq!(LogComponent::Presentation("Api").to_string(), "PRE:Api");
    }

    struct Capture {
        min_level: LogLevel,
        lines: Mutex<Vec<String>>,
    }

    impl Logger for Capture {
        fn enabled(&self, level: LogLevel) -> bool {
            level >= self.min_level
        }

        fn log(&self, entry: LogEntry) {
            self.lines.lock().unwrap().push(format!("{} {} {}", entry.level, entry.component, entry.message));
        }
    }

    #[test]
    fn emit_skips_levels_below_the_sink_filter() {
        let sink = Capture { min_level: LogLevel::Info, lines: Mutex::new(Vec::new()) };
        emit_to(&sink, LogLevel::Debug, LogComponent::Domain("Sampler"), format_args!("dropped {}", 3));
        let component = LogComponent::Application("PlotController");
        emit_to(&sink, LogLevel::Warn, component, format_args!("range {}", "collapsed"));

        let lines = sink.lines.lock().unwrap();
        assert_eq!(*lines, vec![" WARN APP:PlotController range collapsed".to_string()]);
    }

    #[test]
    fn format_line_orders_level_component_message() {
        let entry = LogEntry::new(LogLevel::Error, LogComponent::Infrastructure("Canvas"), "lost context".to_string());
        assert!(entry.format_line().ends_with("ERROR INF:Canvas | lost context"));
    }

    #[test]
    fn macros_without_logger_are_silent() {
        crate::log_info!(LogComponent::Presentation("Api"), "attached to #{}", "plot");
        crate::log_trace!(LogComponent::Presentation("Api"), "frame {}", 1);
    }
}
