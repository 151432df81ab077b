//! Infrastructure layer for Punchcard.
//!
//! Contains implementations of the traits defined in `punchcard-core`:
//! SQLite content storage, the config loader, and the filesystem adapters
//! that locate the data directory and load content-type definitions.

pub mod config;
pub mod filesystem;
pub mod registry;
pub mod sqlite;
