//! Database layer
//!
//! A thin session wrapper around a SQLite connection. Schema and queries
//! belong to the application using this crate.

pub mod connection;

pub use connection::{DatabaseSession, with_session};
