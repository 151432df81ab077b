//! Content-type registry.
//!
//! The registry is read-only after construction. Types are passed in
//! explicitly (built-in schemas plus whatever infra loaded from disk).

use std::collections::HashSet;

use punchcard_types::content::ContentRow;
use punchcard_types::content_type::ContentType;
use punchcard_types::error::ContentTypeError;

/// Read access to the registered content types.
pub trait TypeRegistry: Send + Sync {
    /// All registered types, in registration order.
    fn all(&self) -> &[ContentType];

    /// Look up a type by id (which doubles as its URL slug).
    fn get(&self, id: &str) -> Option<&ContentType> {
        self.all().iter().find(|t| t.id == id)
    }

    /// The registered type a stored row belongs to.
    ///
    /// Matches the row's slug against type ids first, then its display name
    /// against type names, since an id need not equal `slugify(name)`.
    fn for_row(&self, row: &ContentRow) -> Option<&ContentType> {
        self.get(&row.type_slug)
            .or_else(|| self.all().iter().find(|t| t.name == row.type_name))
    }
}

/// Registry over a fixed list of content types.
#[derive(Debug, Clone, Default)]
pub struct StaticTypeRegistry {
    types: Vec<ContentType>,
}

impl StaticTypeRegistry {
    /// Build a registry, rejecting empty or duplicate ids.
    pub fn new(types: Vec<ContentType>) -> Result<Self, ContentTypeError> {
        let mut seen = HashSet::new();
        for ty in &types {
            if ty.id.trim().is_empty() {
                return Err(ContentTypeError::EmptyId);
            }
            if !seen.insert(ty.id.as_str()) {
                return Err(ContentTypeError::DuplicateId(ty.id.clone()));
            }
        }
        Ok(Self { types })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeRegistry for StaticTypeRegistry {
    fn all(&self) -> &[ContentType] {
        &self.types
    }
}
