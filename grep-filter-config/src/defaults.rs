//! Default value functions for configuration.
//!
//! Each function is used as a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Config` field, and by `Config::default()`.

/// Script identifier: prefix of every managed filter name and the bar item name.
pub fn script_name() -> String {
    "grep_filter".to_string()
}

/// Text shown in the bar item while a search filter is active.
pub fn indicator_label() -> String {
    "grep".to_string()
}

pub fn log_level() -> crate::types::LogLevel {
    crate::types::LogLevel::Off
}
