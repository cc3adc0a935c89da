//! Typed errors for host command parsing, filter compilation and transcripts.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    /// The command line is not a `/filter add` or `/filter del` command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A required positional argument was absent.
    #[error("missing argument '{argument}' for {command}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// A filter pattern or mask did not compile.
    #[error("invalid regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A transcript line could not be decoded.
    #[error("transcript line {line}: {source}")]
    Transcript {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A transcript step named a buffer the host does not have.
    #[error("no buffer named '{0}'")]
    UnknownBuffer(String),
}
