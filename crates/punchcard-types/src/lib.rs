//! Shared domain types for Punchcard.
//!
//! This crate contains the types passed between the list API layers:
//! content-type definitions, stored content rows, normalized query
//! descriptors, formatted response items, configuration, and errors.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod content;
pub mod content_type;
pub mod error;
pub mod listing;
pub mod query;
