//! Host command lines and the JSON session transcript format.
//!
//! [`HostCommand`] renders to (and parses from) the `/filter` command lines
//! the plugin sends. It also serializes to JSON, tagged with `type`, for the
//! `replay --json` output.
//!
//! A transcript is one [`SessionStep`] JSON object per line, tagged with
//! `step`. Blank lines and `#` comments are skipped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HostError;

/// A command the plugin issues to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostCommand {
    /// `/filter add <name> <buffers> <tags> <regex>`
    FilterAdd {
        name: String,
        /// Comma-separated buffer full names (globs allowed).
        buffers: String,
        /// Comma-separated tags, `*` for all.
        tags: String,
        /// Line pattern. A leading `!` negates it. May contain spaces.
        regex: String,
    },

    /// `/filter del <name>`
    FilterDel { name: String },
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostCommand::FilterAdd {
                name,
                buffers,
                tags,
                regex,
            } => write!(f, "/filter add {name} {buffers} {tags} {regex}"),
            HostCommand::FilterDel { name } => write!(f, "/filter del {name}"),
        }
    }
}

/// Split off the first space-delimited word; the rest has leading spaces removed.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start_matches(' ');
    match input.split_once(' ') {
        Some((word, rest)) => (word, rest.trim_start_matches(' ')),
        None => (input, ""),
    }
}

fn required<'a>(
    input: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<(&'a str, &'a str), HostError> {
    let (word, rest) = next_word(input);
    if word.is_empty() {
        return Err(HostError::MissingArgument { command, argument });
    }
    Ok((word, rest))
}

impl FromStr for HostCommand {
    type Err = HostError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (command, rest) = next_word(line);
        if command != "/filter" {
            return Err(HostError::UnknownCommand(line.to_string()));
        }

        let (action, rest) = next_word(rest);
        match action {
            "add" => {
                let (name, rest) = required(rest, "/filter add", "name")?;
                let (buffers, rest) = required(rest, "/filter add", "buffers")?;
                let (tags, rest) = required(rest, "/filter add", "tags")?;
                // The pattern is the remainder of the line, spaces included
                if rest.is_empty() {
                    return Err(HostError::MissingArgument {
                        command: "/filter add",
                        argument: "regex",
                    });
                }
                Ok(HostCommand::FilterAdd {
                    name: name.to_string(),
                    buffers: buffers.to_string(),
                    tags: tags.to_string(),
                    regex: rest.to_string(),
                })
            }
            "del" => {
                let (name, _) = required(rest, "/filter del", "name")?;
                Ok(HostCommand::FilterDel {
                    name: name.to_string(),
                })
            }
            _ => Err(HostError::UnknownCommand(line.to_string())),
        }
    }
}

/// One host-side event in a recorded session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SessionStep {
    /// Open a buffer in slot `number`; an occupied slot merges.
    OpenBuffer { full_name: String, number: u32 },

    CloseBuffer { full_name: String },

    /// Append a line to a buffer.
    Print {
        buffer: String,
        message: String,
        #[serde(default)]
        tags: Vec<String>,
    },

    /// The user starts an incremental search.
    StartSearch { buffer: String },

    /// The input line changes to `text`.
    Input { buffer: String, text: String },

    /// The user leaves search mode.
    StopSearch { buffer: String },
}

impl SessionStep {
    /// The `step` tag as it appears in the transcript.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionStep::OpenBuffer { .. } => "open_buffer",
            SessionStep::CloseBuffer { .. } => "close_buffer",
            SessionStep::Print { .. } => "print",
            SessionStep::StartSearch { .. } => "start_search",
            SessionStep::Input { .. } => "input",
            SessionStep::StopSearch { .. } => "stop_search",
        }
    }

    /// Full name of the buffer this step acts on.
    pub fn buffer_name(&self) -> &str {
        match self {
            SessionStep::OpenBuffer { full_name, .. }
            | SessionStep::CloseBuffer { full_name } => full_name,
            SessionStep::Print { buffer, .. }
            | SessionStep::StartSearch { buffer }
            | SessionStep::Input { buffer, .. }
            | SessionStep::StopSearch { buffer } => buffer,
        }
    }
}

/// Parse a JSON-lines transcript.
///
/// # Errors
/// Returns [`HostError::Transcript`] with the 1-based line number of the first
/// line that is not a valid step.
pub fn parse_transcript(contents: &str) -> Result<Vec<SessionStep>, HostError> {
    let mut steps = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = serde_json::from_str::<SessionStep>(line).map_err(|source| {
            HostError::Transcript {
                line: index + 1,
                source,
            }
        })?;
        steps.push(step);
    }
    Ok(steps)
}
