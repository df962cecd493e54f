//! CLI command definitions for the `relayd` binary.

pub mod channel;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Channel-based chat relay.
#[derive(Parser)]
#[command(name = "relayd", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the WebSocket relay and control-plane API.
    Serve {
        /// Address to bind (defaults to `[server] host` in config.toml).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to `[server] port` in config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Keep all state in memory instead of the configured store.
        #[arg(long)]
        memory: bool,

        /// Export trace spans to stdout via OpenTelemetry.
        #[arg(long, env = "RELAY_OTEL")]
        otel: bool,
    },

    /// List every channel in the directory.
    #[command(alias = "ls")]
    Channels,

    /// List the connection ids currently in a channel.
    Members {
        /// Channel name (a leading '#' is ignored).
        channel: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
