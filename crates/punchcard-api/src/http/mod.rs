//! HTTP/REST API layer for Punchcard.
//!
//! Axum-based read-only list API under `/api/` with CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
