//! Logging and trace export for the relay.

pub mod tracing_setup;
