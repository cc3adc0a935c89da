// Library exports for the binary and the integration tests.
//
// The plugin itself is `plugin::Plugin` wrapping `controller::SearchFilterController`.
// Everything host-specific lives behind the `grep_filter_host::Host` trait so the
// same code runs against a real host binding or the in-process `MemoryHost`.

/// Plugin version (root crate version).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod controller;
pub mod debug;
pub mod filter;
pub mod merged;
pub mod plugin;

pub mod config {
    //! Configuration re-exports from the grep-filter-config crate.
    pub use grep_filter_config::*;
}

pub mod host {
    //! Host API re-exports from the grep-filter-host crate.
    pub use grep_filter_host::*;
}

pub use controller::SearchFilterController;
pub use plugin::{Plugin, PluginError};
