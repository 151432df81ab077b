//! SQLite content repository implementation.
//!
//! Implements `ContentRepository` from `punchcard-core` using sqlx with split
//! read/write pools. Flattened attributes are stored as JSON text.

use chrono::{DateTime, SecondsFormat, Utc};
use punchcard_core::repository::content::{ContentQuery, ContentRepository};
use punchcard_types::content::ContentRow;
use punchcard_types::content_type::slugify;
use punchcard_types::error::RepositoryError;
use punchcard_types::query::SortDirection;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ContentRepository`.
pub struct SqliteContentRepository {
    pool: DatabasePool,
}

impl SqliteContentRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ContentRecord {
    id: String,
    type_name: String,
    type_slug: String,
    key: String,
    key_slug: String,
    attributes: String,
    created_at: String,
    updated_at: String,
}

impl ContentRecord {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            type_name: row.try_get("type")?,
            type_slug: row.try_get("type_slug")?,
            key: row.try_get("key")?,
            key_slug: row.try_get("key_slug")?,
            attributes: row.try_get("attributes")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_content(self) -> Result<ContentRow, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid content id: {e}")))?;
        let attributes = serde_json::from_str(&self.attributes)
            .map_err(|e| RepositoryError::Query(format!("invalid attributes JSON: {e}")))?;

        Ok(ContentRow {
            id,
            type_name: self.type_name,
            type_slug: self.type_slug,
            key: self.key,
            key_slug: self.key_slug,
            attributes,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width UTC timestamps so that text ordering matches time ordering.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Map a sort field to its column. Unknown fields sort by key.
fn sort_column(field: &str) -> &'static str {
    match field {
        "type" => "type",
        "type_slug" => "type_slug",
        "created_at" => "created_at",
        "updated_at" => "updated_at",
        _ => "key",
    }
}

fn to_sql_int(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn insert_query(
    row: &ContentRow,
) -> Result<sqlx::query::Query<'static, Sqlite, SqliteArguments<'static>>, RepositoryError> {
    let attributes = serde_json::to_string(&row.attributes)
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let key_slug = if row.key_slug.is_empty() {
        slugify(&row.key)
    } else {
        row.key_slug.clone()
    };

    Ok(sqlx::query(
        "INSERT INTO content (id, type, type_slug, key, key_slug, attributes, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(row.id.to_string())
    .bind(row.type_name.clone())
    .bind(row.type_slug.clone())
    .bind(row.key.clone())
    .bind(key_slug)
    .bind(attributes)
    .bind(format_datetime(&row.created_at))
    .bind(format_datetime(&row.updated_at)))
}

/// Pool exhaustion and I/O failures mean the store is unreachable; anything
/// else is a failed statement.
fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            tracing::warn!(error = %e, "content store unavailable");
            RepositoryError::Connection
        }
        _ => RepositoryError::Query(e.to_string()),
    }
}

fn map_insert_error(e: sqlx::Error, row: &ContentRow) -> RepositoryError {
    match e {
        sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE") => {
            RepositoryError::Conflict(format!("content '{}' already exists", row.id))
        }
        other => map_sqlx_error(other),
    }
}

impl ContentRepository for SqliteContentRepository {
    async fn insert(&self, row: &ContentRow) -> Result<(), RepositoryError> {
        insert_query(row)?
            .execute(&self.pool.writer)
            .await
            .map_err(|e| map_insert_error(e, row))?;
        Ok(())
    }

    async fn insert_many(&self, rows: &[ContentRow]) -> Result<u64, RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(map_sqlx_error)?;

        for row in rows {
            insert_query(row)?
                .execute(&mut *tx)
                .await
                .map_err(|e| map_insert_error(e, row))?;
        }

        tx.commit()
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.len() as u64)
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<ContentRow>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM content WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(row) => {
                let record = ContentRecord::from_row(&row)
                    .map_err(map_sqlx_error)?;
                Ok(Some(record.into_content()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, query: &ContentQuery) -> Result<Vec<ContentRow>, RepositoryError> {
        let mut sql = String::from("SELECT * FROM content");
        if query.type_slug.is_some() {
            sql.push_str(" WHERE type_slug = ?");
        }

        // Column names cannot be bound; the whitelist keeps this injection-free.
        let order = match query.sort_dir {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };
        sql.push_str(&format!(
            " ORDER BY {} {order}, id ASC LIMIT ? OFFSET ?",
            sort_column(&query.sort_by)
        ));

        let mut statement = sqlx::query(&sql);
        if let Some(ref type_slug) = query.type_slug {
            statement = statement.bind(type_slug.as_str());
        }
        let rows = statement
            .bind(to_sql_int(query.limit))
            .bind(to_sql_int(query.offset))
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        let mut content = Vec::with_capacity(rows.len());
        for row in &rows {
            let record = ContentRecord::from_row(row).map_err(map_sqlx_error)?;
            content.push(record.into_content()?);
        }

        Ok(content)
    }

    async fn count(&self, type_slug: Option<&str>) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = match type_slug {
            Some(type_slug) => {
                sqlx::query_as("SELECT COUNT(*) FROM content WHERE type_slug = ?")
                    .bind(type_slug)
                    .fetch_one(&self.pool.reader)
                    .await
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM content")
                    .fetch_one(&self.pool.reader)
                    .await
            }
        }
        .map_err(map_sqlx_error)?;

        Ok(count.max(0) as u64)
    }

    async fn delete_by_type(&self, type_slug: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM content WHERE type_slug = ?")
            .bind(type_slug)
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::{database_url, DatabasePool};
    use chrono::Duration;
    use serde_json::json;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url(dir.path());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn rows_of(type_name: &str, count: usize) -> Vec<ContentRow> {
        let start = Utc::now();
        (0..count)
            .map(|i| {
                let mut row = ContentRow::new(type_name, format!("Item {i:02}"))
                    .with_attribute("title", json!(format!("Title {i}")));
                row.created_at = start + Duration::seconds(i as i64);
                row.updated_at = row.created_at;
                row
            })
            .collect()
    }

    fn query(type_slug: &str, sort_by: &str, dir: SortDirection, limit: u64, offset: u64) -> ContentQuery {
        ContentQuery {
            type_slug: Some(type_slug.to_string()),
            sort_by: sort_by.to_string(),
            sort_dir: dir,
            limit,
            offset,
        }
    }

    #[tokio::test]
    async fn test_closed_pool_is_connection_error() {
        let repo = SqliteContentRepository::new(test_pool().await);
        repo.pool.reader.close().await;
        repo.pool.writer.close().await;

        let err = repo.get_by_id(&Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Connection));

        let err = repo.insert(&ContentRow::new("Users", "a@b.c")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Connection));
    }

    #[test]
    fn test_sqlx_error_mapping() {
        assert!(matches!(map_sqlx_error(sqlx::Error::PoolTimedOut), RepositoryError::Connection));
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        assert!(matches!(map_sqlx_error(sqlx::Error::Io(io)), RepositoryError::Connection));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            RepositoryError::Query(_)
        ));
    }

    #[tokio::test]
    async fn test_insert_get_roundtrip() {
        let repo = SqliteContentRepository::new(test_pool().await);
        let row = ContentRow::new("Blog Post", "Hello World")
            .with_attribute("author-referencer", json!(Uuid::now_v7().to_string()))
            .with_attribute("title", json!("Hello World"));

        repo.insert(&row).await.unwrap();
        let got = repo.get_by_id(&row.id).await.unwrap().unwrap();

        assert_eq!(got.id, row.id);
        assert_eq!(got.type_name, "Blog Post");
        assert_eq!(got.type_slug, "blog-post");
        assert_eq!(got.key_slug, "hello-world");
        assert_eq!(got.attributes, row.attributes);
        assert_eq!(got.created_at.timestamp(), row.created_at.timestamp());
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = SqliteContentRepository::new(test_pool().await);
        assert!(repo.get_by_id(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_fills_missing_key_slug() {
        let repo = SqliteContentRepository::new(test_pool().await);
        let mut row = ContentRow::new("Users", "Jane Doe");
        row.key_slug.clear();

        repo.insert(&row).await.unwrap();
        let got = repo.get_by_id(&row.id).await.unwrap().unwrap();
        assert_eq!(got.key_slug, "jane-doe");
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts() {
        let repo = SqliteContentRepository::new(test_pool().await);
        let row = ContentRow::new("Users", "dup");

        repo.insert(&row).await.unwrap();
        let err = repo.insert(&row).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_insert_many_is_atomic() {
        let repo = SqliteContentRepository::new(test_pool().await);
        let mut rows = rows_of("Users", 3);
        rows.push(rows[0].clone());

        assert!(repo.insert_many(&rows).await.is_err());
        assert_eq!(repo.count(None).await.unwrap(), 0);

        rows.pop();
        assert_eq!(repo.insert_many(&rows).await.unwrap(), 3);
        assert_eq!(repo.count(Some("users")).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_list_filters_sorts_and_pages() {
        let repo = SqliteContentRepository::new(test_pool().await);
        repo.insert_many(&rows_of("Articles", 35)).await.unwrap();
        repo.insert_many(&rows_of("Users", 5)).await.unwrap();

        let first = repo
            .list(&query("articles", "key", SortDirection::Asc, 30, 0))
            .await
            .unwrap();
        assert_eq!(first.len(), 30);
        assert!(first.iter().all(|r| r.type_slug == "articles"));
        assert_eq!(first[0].key, "Item 00");

        let second = repo
            .list(&query("articles", "key", SortDirection::Asc, 30, 30))
            .await
            .unwrap();
        assert_eq!(second.len(), 5);
        assert_eq!(second[0].key, "Item 30");

        let newest = repo
            .list(&query("articles", "created_at", SortDirection::Desc, 2, 0))
            .await
            .unwrap();
        let keys: Vec<&str> = newest.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Item 34", "Item 33"]);
    }

    #[tokio::test]
    async fn test_list_unknown_sort_field_uses_key() {
        let repo = SqliteContentRepository::new(test_pool().await);
        repo.insert_many(&rows_of("Users", 3)).await.unwrap();

        let rows = repo
            .list(&query("users", "key; DROP TABLE content", SortDirection::Desc, 10, 0))
            .await
            .unwrap();
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Item 02", "Item 01", "Item 00"]);
    }

    #[tokio::test]
    async fn test_list_all_types() {
        let repo = SqliteContentRepository::new(test_pool().await);
        repo.insert_many(&rows_of("Articles", 2)).await.unwrap();
        repo.insert_many(&rows_of("Users", 2)).await.unwrap();

        let q = ContentQuery {
            type_slug: None,
            sort_by: "type".to_string(),
            sort_dir: SortDirection::Asc,
            limit: 100,
            offset: 0,
        };
        let rows = repo.list(&q).await.unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].type_name, "Articles");
        assert_eq!(rows[3].type_name, "Users");
    }

    #[tokio::test]
    async fn test_count_and_delete_by_type() {
        let repo = SqliteContentRepository::new(test_pool().await);
        repo.insert_many(&rows_of("Articles", 4)).await.unwrap();
        repo.insert_many(&rows_of("Users", 2)).await.unwrap();

        assert_eq!(repo.count(None).await.unwrap(), 6);
        assert_eq!(repo.count(Some("articles")).await.unwrap(), 4);

        assert_eq!(repo.delete_by_type("articles").await.unwrap(), 4);
        assert_eq!(repo.count(Some("articles")).await.unwrap(), 0);
        assert_eq!(repo.count(None).await.unwrap(), 2);
        assert_eq!(repo.delete_by_type("articles").await.unwrap(), 0);
    }
}
