//! Command-line interface for grep-filter.
//!
//! The plugin normally runs inside a host. The binary drives it against the
//! in-process `MemoryHost` so a recorded session can be replayed and the
//! resulting `/filter` commands inspected.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use grep_filter_config::{Config, LogLevel};
use grep_filter_host::protocol::parse_transcript;
use grep_filter_host::{Host, HostCommand, MemoryHost};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::plugin::{self, Plugin};

/// grep-filter - filter chat buffers automatically while searching them
#[derive(Parser)]
#[command(name = "grep-filter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: ~/.config/grep-filter/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug log level: off, error, warn, info, debug, trace
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a JSON-lines session transcript against a simulated host
    Replay {
        /// Transcript file, one step per line
        file: PathBuf,

        /// Print host commands as JSON objects instead of command lines
        #[arg(long)]
        json: bool,

        /// Print every buffer's visible lines after the replay
        #[arg(long)]
        show_lines: bool,
    },

    /// Print registration metadata
    Info,

    /// Print the default configuration as YAML
    DefaultConfig,
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).ok_or_else(|| {
        let names: Vec<&str> = LogLevel::all().iter().map(LogLevel::as_str).collect();
        format!("unknown log level '{value}' (expected one of {})", names.join(", "))
    })
}

/// Options for [`replay`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ReplayOptions {
    pub json: bool,
    pub show_lines: bool,
}

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn write_command<W: Write>(out: &mut W, line: &str, json: bool) -> Result<()> {
    if !json {
        writeln!(out, "{line}")?;
        return Ok(());
    }
    let value = match line.parse::<HostCommand>() {
        Ok(command) => serde_json::to_value(&command)?,
        Err(_) => serde_json::json!({ "type": "unparsed", "line": line }),
    };
    writeln!(out, "{value}")?;
    Ok(())
}

/// Replay `transcript` against a fresh `MemoryHost` running the plugin.
///
/// For every step, writes the host commands it caused and the bar item text
/// of the step's buffer.
pub fn replay<W: Write>(
    transcript: &str,
    config: &Config,
    options: ReplayOptions,
    out: &mut W,
) -> Result<()> {
    let steps = parse_transcript(transcript)?;
    let mut plugin = Plugin::load(MemoryHost::new(), config)?;

    for step in &steps {
        let buffer = plugin.host_mut().apply(step)?;
        plugin.pump();
        let commands = plugin.host_mut().take_command_log();

        if options.json {
            for line in &commands {
                write_command(out, line, true)?;
            }
            if let Some(buffer) = buffer {
                let item = serde_json::json!({
                    "type": "bar_item",
                    "buffer": step.buffer_name(),
                    "text": plugin.build_bar_item(buffer),
                });
                writeln!(out, "{item}")?;
            }
        } else {
            writeln!(out, "-- {} {}", step.kind(), step.buffer_name())?;
            for line in &commands {
                write_command(out, line, false)?;
            }
            if let Some(buffer) = buffer {
                writeln!(out, "bar: {}", plugin.build_bar_item(buffer))?;
            }
        }
    }

    if options.show_lines {
        for buffer in plugin.host().buffers() {
            writeln!(out, "== {}", buffer.full_name)?;
            for line in plugin.host().visible_lines(buffer.reference) {
                writeln!(out, "{line}")?;
            }
        }
    }
    Ok(())
}

/// Execute a parsed command line, writing to `out`.
pub fn run<W: Write>(cli: &Cli, config: &Config, out: &mut W) -> Result<()> {
    match &cli.command {
        Commands::Replay {
            file,
            json,
            show_lines,
        } => {
            let transcript = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read transcript {}", file.display()))?;
            let options = ReplayOptions {
                json: *json,
                show_lines: *show_lines,
            };
            replay(&transcript, config, options, out)
                .with_context(|| format!("replay of {} failed", file.display()))
        }
        Commands::Info => {
            let info = plugin::script_info(&config.script_name);
            writeln!(out, "name:        {}", info.name)?;
            writeln!(out, "author:      {}", info.author)?;
            writeln!(out, "version:     {}", info.version)?;
            writeln!(out, "license:     {}", info.license)?;
            writeln!(out, "description: {}", info.description)?;
            Ok(())
        }
        Commands::DefaultConfig => {
            write!(out, "{}", Config::default().to_yaml()?)?;
            Ok(())
        }
    }
}
