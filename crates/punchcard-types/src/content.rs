use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content_type::slugify;

/// A stored content record as read from the data store.
///
/// `attributes` holds the flattened attribute keys exactly as persisted
/// (`"title"`, `"author-referencer"`, ...). Rows are read-only input to the
/// formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRow {
    pub id: Uuid,
    /// Display name of the content type.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(rename = "type-slug", alias = "type_slug")]
    pub type_slug: String,
    pub key: String,
    #[serde(rename = "key-slug", alias = "key_slug", default)]
    pub key_slug: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl ContentRow {
    /// Create a new row of the given type, deriving slugs from the names.
    pub fn new(type_name: impl Into<String>, key: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let key = key.into();
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            type_slug: slugify(&type_name),
            key_slug: slugify(&key),
            type_name,
            key,
            attributes: serde_json::Map::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_row_derives_slugs() {
        let row = ContentRow::new("Blog Post", "Hello World!");
        assert_eq!(row.type_slug, "blog-post");
        assert_eq!(row.key_slug, "hello-world");
        assert!(row.attributes.is_empty());
    }

    #[test]
    fn test_deserialize_storage_shape() {
        let id = Uuid::now_v7();
        let row: ContentRow = serde_json::from_value(json!({
            "id": id,
            "type": "Blog Post",
            "type-slug": "blog-post",
            "key": "First",
            "attributes": { "title": "First", "author-referencer": Uuid::nil() }
        }))
        .unwrap();

        assert_eq!(row.id, id);
        assert_eq!(row.type_slug, "blog-post");
        assert_eq!(row.key_slug, "");
        assert_eq!(row.attributes.len(), 2);
    }
}
