//! Names and command lines of the filters this plugin manages.

use std::fmt;

use grep_filter_host::HostCommand;

use crate::merged::MergedBuffers;

/// Pattern installed when a search starts and no text has been typed yet.
pub const PLACEHOLDER_PATTERN: &str = "!";

/// Tag mask of every managed filter: lines with any tags.
pub const TAG_MASK: &str = "*";

/// Identity key of the filter for one merged buffer stack:
/// `<script>_<name1>,<name2>,...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterName(String);

impl FilterName {
    pub fn new(script_name: &str, buffers: &MergedBuffers) -> Self {
        Self(format!("{}_{}", script_name, buffers.joined()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pattern hiding every line that does not match `input`.
pub fn search_pattern(input: &str) -> String {
    format!("!{input}")
}

/// `/filter add` for `name`.
pub fn add_command(name: &FilterName, buffers: &str, tags: &str, pattern: &str) -> HostCommand {
    HostCommand::FilterAdd {
        name: name.to_string(),
        buffers: buffers.to_string(),
        tags: tags.to_string(),
        regex: pattern.to_string(),
    }
}

/// `/filter del` for `name`.
pub fn del_command(name: &FilterName) -> HostCommand {
    HostCommand::FilterDel {
        name: name.to_string(),
    }
}
