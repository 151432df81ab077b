//! List API logic and repository trait definitions for Punchcard.
//!
//! This crate defines the "ports" (repository and registry traits) that the
//! infrastructure layer implements, the pure list utilities (normalize,
//! paginate, format), and the service that ties them together. It depends
//! only on `punchcard-types` -- never on `punchcard-infra` or any
//! database/IO crate.

pub mod listing;
pub mod registry;
pub mod repository;
pub mod schema;
pub mod service;
