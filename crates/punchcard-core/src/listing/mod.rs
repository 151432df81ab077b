//! Pure list utilities: query normalization, pagination links, and row
//! formatting. Nothing here performs I/O.

pub mod attributes;
pub mod format;
pub mod links;
pub mod organize;

pub use attributes::attributes;
pub use format::format;
pub use links::page;
pub use organize::organize;
