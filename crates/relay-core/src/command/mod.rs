//! Slash-command protocol.
//!
//! - `parse` -- `SlashCommand` from raw text
//! - `router` -- `CommandRouter` executing a command and replying to the caller

pub mod parse;
pub mod router;

pub use parse::SlashCommand;
pub use router::{CommandRouter, HELP_TEXT};
