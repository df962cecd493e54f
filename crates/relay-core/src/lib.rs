//! Membership registry, broadcast fan-out and session logic for the relay.
//!
//! This crate defines the "ports" (`RecordStore`, `PushGateway`,
//! `ContentHasher`) that the infrastructure layer implements, plus every
//! component built on top of them. It depends only on `relay-types` --
//! never on `relay-infra` or any database/IO crate.

pub mod broadcast;
pub mod command;
pub mod hash;
pub mod membership;
pub mod message;
pub mod profile;
pub mod session;
pub mod store;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;
