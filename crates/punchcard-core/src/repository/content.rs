//! Content repository trait definition.

use punchcard_types::content::ContentRow;
use punchcard_types::error::RepositoryError;
use punchcard_types::query::{Organized, SortDirection};
use uuid::Uuid;

/// A bounded, sorted window over stored content.
///
/// Built from an [`Organized`] descriptor, so `sort_by` has already been
/// checked against the allowed fields and `limit` is within bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    /// Restrict to one content type.
    pub type_slug: Option<String>,
    pub sort_by: String,
    pub sort_dir: SortDirection,
    pub limit: u64,
    pub offset: u64,
}

impl ContentQuery {
    pub fn from_organized(organized: &Organized) -> Self {
        Self {
            type_slug: None,
            sort_by: organized.sort.by.clone(),
            sort_dir: organized.sort.dir,
            limit: organized.page.limit,
            offset: organized.page.offset,
        }
    }

    pub fn of_type(mut self, type_slug: impl Into<String>) -> Self {
        self.type_slug = Some(type_slug.into());
        self
    }
}

/// Repository trait for content persistence.
///
/// Implementations live in punchcard-infra (e.g., SqliteContentRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait ContentRepository: Send + Sync {
    /// Insert a single row.
    fn insert(
        &self,
        row: &ContentRow,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert several rows atomically. Returns the number inserted.
    fn insert_many(
        &self,
        rows: &[ContentRow],
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Get a row by its unique ID.
    fn get_by_id(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ContentRow>, RepositoryError>> + Send;

    /// Fetch one sorted page of rows.
    fn list(
        &self,
        query: &ContentQuery,
    ) -> impl std::future::Future<Output = Result<Vec<ContentRow>, RepositoryError>> + Send;

    /// Count rows, optionally restricted to one content type.
    fn count(
        &self,
        type_slug: Option<&str>,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Delete every row of a content type. Returns the number deleted.
    fn delete_by_type(
        &self,
        type_slug: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
