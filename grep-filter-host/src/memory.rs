//! In-process simulated host.
//!
//! [`MemoryHost`] keeps a buffer list, a filter list and a command log, and
//! interprets `/filter add` and `/filter del` the way a chat client would:
//! adding a name that already exists is refused, deleting a missing name is
//! refused, and patterns are compiled on add. State changes made through
//! [`MemoryHost::start_search`], [`MemoryHost::set_input`] and
//! [`MemoryHost::stop_search`] queue the matching signals for every signal the
//! plugin hooked; the owner drains them via [`Host::drain_signals`].

use std::collections::{HashSet, VecDeque};

use crate::error::HostError;
use crate::host::{BufferInfo, BufferRef, Host, ScriptInfo, Signal};
use crate::mask::{GlobList, LinePattern};
use crate::protocol::{HostCommand, SessionStep};

/// Full name of the buffer that exists from startup and runs all commands.
pub const CORE_BUFFER: &str = "core.weechat";

/// A printed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub message: String,
    pub tags: Vec<String>,
}

/// A filter as the user would see it in `/filter list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRecord {
    pub name: String,
    pub buffers: String,
    pub tags: String,
    pub regex: String,
}

#[derive(Debug)]
struct Filter {
    record: FilterRecord,
    buffer_mask: GlobList,
    /// `None` when the tag mask is `*`.
    tag_mask: Option<GlobList>,
    pattern: LinePattern,
}

impl Filter {
    fn compile(record: FilterRecord) -> Result<Self, HostError> {
        let buffer_mask = GlobList::parse(&record.buffers)?;
        let tag_mask = if record.tags == "*" {
            None
        } else {
            Some(GlobList::parse(&record.tags)?)
        };
        let pattern = LinePattern::parse(&record.regex)?;
        Ok(Self {
            record,
            buffer_mask,
            tag_mask,
            pattern,
        })
    }

    fn hides(&self, buffer: &str, line: &Line) -> bool {
        self.buffer_mask.matches(buffer)
            && self
                .tag_mask
                .as_ref()
                .is_none_or(|mask| mask.matches_any(line.tags.as_slice()))
            && self.pattern.selects(&line.message)
    }
}

#[derive(Debug)]
struct BufferState {
    info: BufferInfo,
    lines: Vec<Line>,
    /// Input line content before the search started; restored when it ends.
    saved_input: String,
}

/// Simulated chat client host.
#[derive(Debug)]
pub struct MemoryHost {
    buffers: Vec<BufferState>,
    next_reference: u64,
    filters: Vec<Filter>,
    command_log: Vec<String>,
    hooked: HashSet<Signal>,
    pending: VecDeque<(Signal, BufferRef)>,
    bar_items: Vec<String>,
    bar_item_updates: Vec<String>,
    registered: Option<ScriptInfo>,
    accept_registration: bool,
}

impl MemoryHost {
    /// Create a host holding only the core buffer in slot 1.
    pub fn new() -> Self {
        let mut host = Self {
            buffers: Vec::new(),
            next_reference: 1,
            filters: Vec::new(),
            command_log: Vec::new(),
            hooked: HashSet::new(),
            pending: VecDeque::new(),
            bar_items: Vec::new(),
            bar_item_updates: Vec::new(),
            registered: None,
            accept_registration: true,
        };
        host.open_buffer(CORE_BUFFER, 1);
        host
    }

    /// Make every later [`Host::register`] call fail.
    pub fn refuse_registration(mut self) -> Self {
        self.accept_registration = false;
        self
    }

    /// Open a buffer in slot `number`, merging with any buffers already there.
    ///
    /// Opening a name that already exists returns the existing buffer.
    pub fn open_buffer(&mut self, full_name: &str, number: u32) -> BufferRef {
        if let Some(existing) = self.buffer_by_name(full_name) {
            log::warn!("MemoryHost: buffer {full_name} already open");
            return existing;
        }

        let reference = BufferRef(self.next_reference);
        self.next_reference += 1;

        let position = self
            .buffers
            .iter()
            .position(|buffer| buffer.info.number > number)
            .unwrap_or(self.buffers.len());
        self.buffers.insert(
            position,
            BufferState {
                info: BufferInfo {
                    reference,
                    number,
                    full_name: full_name.to_string(),
                    text_search: false,
                    input: String::new(),
                },
                lines: Vec::new(),
                saved_input: String::new(),
            },
        );
        reference
    }

    /// Close a buffer. Returns `false` if it does not exist.
    pub fn close_buffer(&mut self, reference: BufferRef) -> bool {
        let before = self.buffers.len();
        self.buffers
            .retain(|buffer| buffer.info.reference != reference);
        self.buffers.len() != before
    }

    pub fn buffer_by_name(&self, full_name: &str) -> Option<BufferRef> {
        self.buffers
            .iter()
            .find(|buffer| buffer.info.full_name == full_name)
            .map(|buffer| buffer.info.reference)
    }

    fn state_mut(&mut self, reference: BufferRef) -> Option<&mut BufferState> {
        self.buffers
            .iter_mut()
            .find(|buffer| buffer.info.reference == reference)
    }

    fn queue_signal(&mut self, signal: Signal, reference: BufferRef) {
        if self.hooked.contains(&signal) {
            self.pending.push_back((signal, reference));
        }
    }

    /// Append a line to a buffer.
    pub fn print(&mut self, reference: BufferRef, message: &str, tags: &[String]) {
        if let Some(state) = self.state_mut(reference) {
            state.lines.push(Line {
                message: message.to_string(),
                tags: tags.to_vec(),
            });
        }
    }

    /// Enter search mode. The current input is saved and the input line cleared.
    pub fn start_search(&mut self, reference: BufferRef) {
        let Some(state) = self.state_mut(reference) else {
            return;
        };
        if state.info.text_search {
            return;
        }
        state.info.text_search = true;
        state.saved_input = std::mem::take(&mut state.info.input);
        self.queue_signal(Signal::InputSearch, reference);
    }

    /// Replace the input line content.
    pub fn set_input(&mut self, reference: BufferRef, text: &str) {
        let Some(state) = self.state_mut(reference) else {
            return;
        };
        state.info.input = text.to_string();
        self.queue_signal(Signal::InputTextChanged, reference);
    }

    /// Leave search mode, restoring the input saved when it started.
    pub fn stop_search(&mut self, reference: BufferRef) {
        let Some(state) = self.state_mut(reference) else {
            return;
        };
        if !state.info.text_search {
            return;
        }
        state.info.text_search = false;
        state.info.input = std::mem::take(&mut state.saved_input);
        self.queue_signal(Signal::InputSearch, reference);
    }

    /// Execute a transcript step.
    ///
    /// Returns the buffer the step acted on, or `None` after `close_buffer`.
    ///
    /// # Errors
    /// Returns [`HostError::UnknownBuffer`] when the step names a buffer that
    /// is not open.
    pub fn apply(&mut self, step: &SessionStep) -> Result<Option<BufferRef>, HostError> {
        if let SessionStep::OpenBuffer { full_name, number } = step {
            return Ok(Some(self.open_buffer(full_name, *number)));
        }

        let name = step.buffer_name();
        let reference = self
            .buffer_by_name(name)
            .ok_or_else(|| HostError::UnknownBuffer(name.to_string()))?;

        match step {
            SessionStep::OpenBuffer { .. } => {}
            SessionStep::CloseBuffer { .. } => {
                self.close_buffer(reference);
                return Ok(None);
            }
            SessionStep::Print { message, tags, .. } => self.print(reference, message, tags),
            SessionStep::StartSearch { .. } => self.start_search(reference),
            SessionStep::Input { text, .. } => self.set_input(reference, text),
            SessionStep::StopSearch { .. } => self.stop_search(reference),
        }
        Ok(Some(reference))
    }

    /// Messages of the lines no filter hides.
    pub fn visible_lines(&self, reference: BufferRef) -> Vec<String> {
        let Some(state) = self
            .buffers
            .iter()
            .find(|buffer| buffer.info.reference == reference)
        else {
            return Vec::new();
        };
        state
            .lines
            .iter()
            .filter(|line| {
                !self
                    .filters
                    .iter()
                    .any(|filter| filter.hides(&state.info.full_name, line))
            })
            .map(|line| line.message.clone())
            .collect()
    }

    pub fn filter(&self, name: &str) -> Option<&FilterRecord> {
        self.filters
            .iter()
            .map(|filter| &filter.record)
            .find(|record| record.name == name)
    }

    pub fn filters(&self) -> impl Iterator<Item = &FilterRecord> {
        self.filters.iter().map(|filter| &filter.record)
    }

    /// Every command line received, in order.
    pub fn command_log(&self) -> &[String] {
        &self.command_log
    }

    /// Take the command log, leaving it empty.
    pub fn take_command_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.command_log)
    }

    pub fn hooked_signals(&self) -> &HashSet<Signal> {
        &self.hooked
    }

    pub fn bar_items(&self) -> &[String] {
        &self.bar_items
    }

    /// Names passed to [`Host::bar_item_update`], in order.
    pub fn bar_item_updates(&self) -> &[String] {
        &self.bar_item_updates
    }

    pub fn registered(&self) -> Option<&ScriptInfo> {
        self.registered.as_ref()
    }

    fn execute(&mut self, command: HostCommand) -> Result<(), String> {
        match command {
            HostCommand::FilterAdd {
                name,
                buffers,
                tags,
                regex,
            } => {
                if self.filter(&name).is_some() {
                    return Err(format!("filter \"{name}\" already exists"));
                }
                let filter = Filter::compile(FilterRecord {
                    name,
                    buffers,
                    tags,
                    regex,
                })
                .map_err(|e| e.to_string())?;
                self.filters.push(filter);
                Ok(())
            }
            HostCommand::FilterDel { name } => {
                let before = self.filters.len();
                self.filters.retain(|filter| filter.record.name != name);
                if self.filters.len() == before {
                    return Err(format!("filter \"{name}\" not found"));
                }
                Ok(())
            }
        }
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MemoryHost {
    fn register(&mut self, info: &ScriptInfo) -> bool {
        if !self.accept_registration {
            return false;
        }
        self.registered = Some(info.clone());
        true
    }

    fn hook_signal(&mut self, signal: Signal) {
        self.hooked.insert(signal);
    }

    fn bar_item_new(&mut self, name: &str) {
        self.bar_items.push(name.to_string());
    }

    fn bar_item_update(&mut self, name: &str) {
        self.bar_item_updates.push(name.to_string());
    }

    fn buffers(&self) -> Vec<BufferInfo> {
        self.buffers.iter().map(|buffer| buffer.info.clone()).collect()
    }

    fn buffer(&self, reference: BufferRef) -> Option<BufferInfo> {
        self.buffers
            .iter()
            .find(|buffer| buffer.info.reference == reference)
            .map(|buffer| buffer.info.clone())
    }

    fn filter_exists(&self, name: &str) -> bool {
        self.filter(name).is_some()
    }

    fn command(&mut self, command: &str) {
        self.command_log.push(command.to_string());

        let result = command
            .parse::<HostCommand>()
            .map_err(|e| e.to_string())
            .and_then(|parsed| self.execute(parsed));
        if let Err(e) = result {
            log::warn!("MemoryHost: command failed: {command}: {e}");
        }
    }

    fn drain_signals(&mut self) -> Vec<(Signal, BufferRef)> {
        self.pending.drain(..).collect()
    }
}
