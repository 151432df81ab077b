//! Built-in content-type schemas.

pub mod users;
