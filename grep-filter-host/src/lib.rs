//! Host side of the grep-filter plugin.
//!
//! Provides the [`Host`] trait the plugin is written against, the `/filter`
//! command protocol, the JSON session transcript format, and [`MemoryHost`],
//! an in-process host with real filter semantics used by tests and the
//! `replay` command.

pub mod error;
pub mod host;
pub mod mask;
pub mod memory;
pub mod protocol;

pub use error::HostError;
pub use host::{BufferInfo, BufferRef, Host, ReturnCode, ScriptInfo, Signal};
pub use memory::{FilterRecord, Line, MemoryHost};
pub use protocol::{HostCommand, SessionStep};
