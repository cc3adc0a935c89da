//! Plugin registration and signal dispatch.
//!
//! [`Plugin::load`] registers with the host, hooks the two search signals and
//! creates the bar item. If the host refuses registration nothing is hooked
//! and loading fails.

use grep_filter_config::{Config, ConfigError};
use grep_filter_host::{BufferRef, Host, ReturnCode, ScriptInfo, Signal};
use thiserror::Error;

use crate::controller::SearchFilterController;

pub const SCRIPT_AUTHOR: &str = "Simmo Saan <simmo.saan@gmail.com>";
pub const SCRIPT_VERSION: &str = "0.2";
pub const SCRIPT_LICENSE: &str = "GPL3";
pub const SCRIPT_DESC: &str = "Filter buffers automatically while searching them";

/// Marks a bar item whose callback receives the buffer being drawn.
const BAR_ITEM_PREFIX: &str = "(extra)";

#[derive(Debug, Error)]
pub enum PluginError {
    /// The host API is unavailable or declined the registration.
    #[error("host refused to register script '{name}'")]
    RegistrationRejected { name: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Registration metadata for a script named `name`.
pub fn script_info(name: &str) -> ScriptInfo {
    ScriptInfo {
        name: name.to_string(),
        author: SCRIPT_AUTHOR.to_string(),
        version: SCRIPT_VERSION.to_string(),
        license: SCRIPT_LICENSE.to_string(),
        description: SCRIPT_DESC.to_string(),
    }
}

/// A registered grep-filter plugin bound to its host.
pub struct Plugin<H: Host> {
    controller: SearchFilterController<H>,
}

impl<H: Host> Plugin<H> {
    /// Validate `config`, register with `host` and install hooks.
    ///
    /// # Errors
    /// [`PluginError::Config`] for an invalid config,
    /// [`PluginError::RegistrationRejected`] when the host declines.
    pub fn load(mut host: H, config: &Config) -> Result<Self, PluginError> {
        config.validate()?;

        let info = script_info(&config.script_name);
        if !host.register(&info) {
            log::error!("Registration of {} rejected by host", info.name);
            return Err(PluginError::RegistrationRejected { name: info.name });
        }

        host.hook_signal(Signal::InputSearch);
        host.hook_signal(Signal::InputTextChanged);
        host.bar_item_new(&format!("{BAR_ITEM_PREFIX}{}", config.script_name));

        log::info!("Registered {} {}", info.name, info.version);
        Ok(Self {
            controller: SearchFilterController::new(host, config),
        })
    }

    pub fn controller(&self) -> &SearchFilterController<H> {
        &self.controller
    }

    pub fn host(&self) -> &H {
        self.controller.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.controller.host_mut()
    }

    /// Route a hooked signal to its handler.
    pub fn dispatch(&mut self, signal: Signal, buffer: BufferRef) -> ReturnCode {
        log::trace!("signal {signal} for buffer {buffer}");
        match signal {
            Signal::InputSearch => self.controller.on_search_state_changed(buffer),
            Signal::InputTextChanged => self.controller.on_search_input_changed(buffer),
        }
        ReturnCode::Ok
    }

    /// Route a signal by name. Names this plugin never hooked are ignored.
    pub fn dispatch_named(&mut self, signal: &str, buffer: BufferRef) -> ReturnCode {
        match Signal::from_name(signal) {
            Some(signal) => self.dispatch(signal, buffer),
            None => {
                log::warn!("Ignoring unexpected signal {signal:?}");
                ReturnCode::Ok
            }
        }
    }

    /// Dispatch every signal the host has queued, oldest first.
    ///
    /// Returns the number of signals handled.
    pub fn pump(&mut self) -> usize {
        let signals = self.controller.host_mut().drain_signals();
        let count = signals.len();
        for (signal, buffer) in signals {
            self.dispatch(signal, buffer);
        }
        count
    }

    /// Bar item callback.
    pub fn build_bar_item(&self, buffer: BufferRef) -> String {
        self.controller.render_indicator(buffer)
    }
}
