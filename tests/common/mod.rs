//! Shared integration test helpers for grep-filter.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` below suppresses warnings when a file only uses a
//! subset of the helpers.

#![allow(dead_code)]

use grep_filter::config::Config;
use grep_filter::host::{BufferRef, MemoryHost};
use grep_filter::{Plugin, SearchFilterController};

pub const RUST: &str = "irc.libera.#rust";
pub const RUST_BEGINNERS: &str = "irc.libera.#rust-beginners";
pub const WEECHAT: &str = "irc.libera.#weechat";

/// Host with `#rust` and `#rust-beginners` merged in slot 2 and `#weechat`
/// alone in slot 3. Returns the host and the three buffer references.
pub fn merged_host() -> (MemoryHost, [BufferRef; 3]) {
    let mut host = MemoryHost::new();
    let rust = host.open_buffer(RUST, 2);
    let beginners = host.open_buffer(RUST_BEGINNERS, 2);
    let weechat = host.open_buffer(WEECHAT, 3);
    (host, [rust, beginners, weechat])
}

/// Controller with the default config over [`merged_host`].
pub fn controller() -> (SearchFilterController<MemoryHost>, [BufferRef; 3]) {
    let (host, buffers) = merged_host();
    (SearchFilterController::new(host, &Config::default()), buffers)
}

/// Loaded plugin with the default config over [`merged_host`].
pub fn plugin() -> (Plugin<MemoryHost>, [BufferRef; 3]) {
    let (host, buffers) = merged_host();
    let plugin = Plugin::load(host, &Config::default()).expect("plugin should load");
    (plugin, buffers)
}

/// Filter name the default config gives the `#rust` + `#rust-beginners` stack.
pub fn merged_filter_name() -> String {
    format!("grep_filter_{RUST},{RUST_BEGINNERS}")
}
