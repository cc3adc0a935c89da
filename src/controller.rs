//! Search-driven filter controller.
//!
//! [`SearchFilterController`] reacts to the host's search notifications by
//! installing, updating and removing one filter per merged buffer stack:
//!
//! - search starts: add a placeholder filter (`!`) hiding every line
//! - input changes while searching: replace the filter with `!<input>`
//! - search ends: delete the filter if it exists
//!
//! All state lives in the host. Each call re-reads buffer metadata and filter
//! existence, and host commands are fire-and-forget.

use grep_filter_config::Config;
use grep_filter_host::{BufferRef, Host};

use crate::filter::{self, FilterName, PLACEHOLDER_PATTERN, TAG_MASK};
use crate::merged::MergedBuffers;

/// Drives the host's filter list from search state.
pub struct SearchFilterController<H: Host> {
    host: H,
    /// Filter name prefix and bar item name.
    script_name: String,
    indicator_label: String,
}

impl<H: Host> SearchFilterController<H> {
    pub fn new(host: H, config: &Config) -> Self {
        Self {
            host,
            script_name: config.script_name.clone(),
            indicator_label: config.indicator_label.clone(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn resolve(&self, buffer: BufferRef) -> (MergedBuffers, FilterName) {
        let merged = MergedBuffers::resolve(&self.host, buffer);
        let name = FilterName::new(&self.script_name, &merged);
        (merged, name)
    }

    /// Name of the filter managed for `buffer`'s merged stack.
    pub fn filter_name(&self, buffer: BufferRef) -> FilterName {
        self.resolve(buffer).1
    }

    fn is_searching(&self, buffer: BufferRef) -> bool {
        self.host
            .buffer(buffer)
            .is_some_and(|info| info.text_search)
    }

    /// Handle `input_search`: the buffer entered or left search mode.
    pub fn on_search_state_changed(&mut self, buffer: BufferRef) {
        let (merged, name) = self.resolve(buffer);

        if self.is_searching(buffer) {
            self.add_or_replace_filter(&name, &merged.joined(), TAG_MASK, PLACEHOLDER_PATTERN);
        } else if self.host.filter_exists(name.as_str()) {
            self.delete_filter(&name);
        }

        self.host.bar_item_update(&self.script_name);
    }

    /// Handle `input_text_changed`: while searching, filter on the new input.
    pub fn on_search_input_changed(&mut self, buffer: BufferRef) {
        let Some(info) = self.host.buffer(buffer) else {
            return;
        };
        if !info.text_search {
            return;
        }

        let (merged, name) = self.resolve(buffer);
        let pattern = filter::search_pattern(&info.input);
        self.add_or_replace_filter(&name, &merged.joined(), TAG_MASK, &pattern);
    }

    /// Install a filter under `name`, deleting any existing one first.
    ///
    /// The host only supports add and delete, so a replace is two commands
    /// and the filter is briefly absent between them.
    pub fn add_or_replace_filter(
        &mut self,
        name: &FilterName,
        buffers: &str,
        tags: &str,
        pattern: &str,
    ) {
        if self.host.filter_exists(name.as_str()) {
            self.delete_filter(name);
        }

        let command = filter::add_command(name, buffers, tags, pattern);
        log::debug!("grep_filter: {command}");
        self.host.command(&command.to_string());
    }

    pub fn delete_filter(&mut self, name: &FilterName) {
        let command = filter::del_command(name);
        log::debug!("grep_filter: {command}");
        self.host.command(&command.to_string());
    }

    /// Bar item text for `buffer`: the indicator label while its filter
    /// exists, otherwise empty. Issues no commands.
    pub fn render_indicator(&self, buffer: BufferRef) -> String {
        let name = self.filter_name(buffer);
        if self.host.filter_exists(name.as_str()) {
            self.indicator_label.clone()
        } else {
            String::new()
        }
    }
}
