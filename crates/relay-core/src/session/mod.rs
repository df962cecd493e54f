//! Per-connection session lifecycle.
//!
//! - `controller` -- `SessionController` handling connect, disconnect,
//!   message and control events as independent units of work
//! - `state` -- `SessionState` tracked by whatever owns the live connection

pub mod controller;
pub mod state;

pub use controller::SessionController;
pub use state::SessionState;
