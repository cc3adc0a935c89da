//! Debug log bridge.
//!
//! Installs a `log::Log` implementation that writes every record to
//! `/tmp/grep_filter_debug.log` (`%TEMP%\grep_filter_debug.log` on Windows).
//! A plugin must never write to the host's stdout, so nothing reaches the
//! terminal unless `RUST_LOG` names a level, in which case records are
//! mirrored to stderr as well.
//!
//! Level precedence: explicit override (CLI flag), then `RUST_LOG`, then the
//! configured level.

use grep_filter_config::LogLevel;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

struct BridgeLogger {
    level: log::LevelFilter,
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

static LOGGER: OnceLock<BridgeLogger> = OnceLock::new();

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("grep_filter_debug.log")
}

/// Level requested by a `RUST_LOG` value.
///
/// Accepts a bare level (`debug`) as well as directive lists such as
/// `grep_filter=debug,warn`. The bridge has a single level, so the most
/// verbose directive wins. Returns `None` when no directive names a level.
pub fn parse_rust_log(value: &str) -> Option<LogLevel> {
    value
        .split(',')
        .filter_map(|directive| {
            // `target=level/regex`: the regex part is not supported
            let directive = directive.split('/').next().unwrap_or_default();
            let level = directive.rsplit('=').next().unwrap_or_default();
            LogLevel::parse(level)
        })
        .max_by_key(|level| level.to_level_filter())
}

fn level_from_env() -> Option<LogLevel> {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|value| parse_rust_log(&value))
}

/// Resolve the level from the override, a `RUST_LOG` value and the config.
pub fn resolve_level(
    override_level: Option<LogLevel>,
    rust_log: Option<&str>,
    configured: LogLevel,
) -> LogLevel {
    override_level
        .or_else(|| rust_log.and_then(parse_rust_log))
        .unwrap_or(configured)
}

/// Pick the effective level from the override, `RUST_LOG` and the config.
pub fn effective_level(override_level: Option<LogLevel>, configured: LogLevel) -> LogLevel {
    let rust_log = std::env::var("RUST_LOG").ok();
    resolve_level(override_level, rust_log.as_deref(), configured)
}

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

impl log::Log for BridgeLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{:5}] {}: {}",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );

        if let Some(file) = self.file.lock().as_mut() {
            // A failed write has nowhere to be reported
            let _ = writeln!(file, "{line}");
        }
        if self.mirror_stderr {
            eprintln!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

/// Route `log` macros to the debug file. Only the first call has any effect.
///
/// Returns the level that was installed.
pub fn init_log_bridge(override_level: Option<LogLevel>, configured: LogLevel) -> LogLevel {
    let level = effective_level(override_level, configured);
    let filter = level.to_level_filter();

    let file = if level == LogLevel::Off {
        None
    } else {
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok()
    };

    let logger = LOGGER.get_or_init(|| BridgeLogger {
        level: filter,
        file: Mutex::new(file),
        mirror_stderr: level_from_env().is_some(),
    });

    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
        log::info!(
            "grep-filter {} debug session started (level={})",
            crate::VERSION,
            level.as_str()
        );
    }
    level
}
