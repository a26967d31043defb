use crate::ports::LoggerPort;

/// Native logger forwarding to the `log` facade under the `tabsync` target.
///
/// Output depends on the backend the host installs (e.g. `env_logger`).
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerPort for ConsoleLogger {
    fn log(&self, message: &str) {
        log::info!(target: "tabsync", "{message}");
    }

    fn error(&self, message: &str) {
        log::error!(target: "tabsync", "{message}");
    }

    fn warn(&self, message: &str) {
        log::warn!(target: "tabsync", "{message}");
    }

    fn time(&self, label: &str) {
        log::debug!(target: "tabsync", "[TIME:START] {label}");
    }

    fn time_end(&self, label: &str) {
        log::debug!(target: "tabsync", "[TIME:END] {label}");
    }
}
