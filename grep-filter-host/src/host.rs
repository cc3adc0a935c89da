//! The host API surface the plugin is written against.
//!
//! A [`Host`] answers buffer and filter queries, executes command lines, and
//! manages registration, signal hooks and bar items. The plugin never holds
//! host state of its own; every query is answered fresh.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a host buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BufferRef(pub u64);

impl fmt::Display for BufferRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Snapshot of the buffer metadata the plugin reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferInfo {
    pub reference: BufferRef,
    /// Display slot. Buffers sharing a number are merged.
    pub number: u32,
    /// Fully qualified name, e.g. `irc.libera.#rust`.
    pub full_name: String,
    /// Whether an incremental text search is active.
    pub text_search: bool,
    /// Current content of the input line.
    pub input: String,
}

/// Host notifications the plugin subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// A buffer's search-active flag changed.
    InputSearch,
    /// A buffer's input line changed.
    InputTextChanged,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::InputSearch => "input_search",
            Signal::InputTextChanged => "input_text_changed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "input_search" => Some(Signal::InputSearch),
            "input_text_changed" => Some(Signal::InputTextChanged),
            _ => None,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value a callback hands back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
    Ok,
}

/// Static registration metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptInfo {
    pub name: String,
    pub author: String,
    pub version: String,
    pub license: String,
    pub description: String,
}

/// The host application as seen by a plugin.
pub trait Host {
    /// Register the plugin. Returns `false` when the host refuses it.
    fn register(&mut self, info: &ScriptInfo) -> bool;

    /// Subscribe to a notification.
    fn hook_signal(&mut self, signal: Signal);

    /// Create a bar item the host will ask the plugin to render.
    fn bar_item_new(&mut self, name: &str);

    /// Ask the host to redraw a bar item.
    fn bar_item_update(&mut self, name: &str);

    /// All buffers in host list order (sorted by number).
    fn buffers(&self) -> Vec<BufferInfo>;

    fn buffer(&self, reference: BufferRef) -> Option<BufferInfo> {
        self.buffers()
            .into_iter()
            .find(|buffer| buffer.reference == reference)
    }

    /// Whether a filter with this exact name exists.
    fn filter_exists(&self, name: &str) -> bool;

    /// Execute a command line on the host's main buffer. Fire-and-forget.
    fn command(&mut self, command: &str);

    /// Signals queued since the last call, for hosts that buffer them.
    fn drain_signals(&mut self) -> Vec<(Signal, BufferRef)> {
        Vec::new()
    }
}
