//! Response shapes produced by the list API.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::content_type::ContentType;

/// Navigation links for a paginated listing. `None` serializes as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    #[serde(serialize_with = "link_or_false")]
    pub first: Option<String>,
    #[serde(serialize_with = "link_or_false")]
    pub prev: Option<String>,
    #[serde(serialize_with = "link_or_false")]
    pub next: Option<String>,
    #[serde(serialize_with = "link_or_false")]
    pub last: Option<String>,
}

fn link_or_false<S: Serializer>(link: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match link {
        Some(url) => serializer.serialize_str(url),
        None => serializer.serialize_bool(false),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemMeta {
    pub url: String,
}

/// List entry for a content record. Never carries attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub type_name: String,
    pub type_slug: String,
    pub key: String,
    pub key_slug: String,
    pub meta: ItemMeta,
}

/// Full content record with nested attributes. Never carries meta.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub type_name: String,
    pub type_slug: String,
    pub key: String,
    pub key_slug: String,
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormattedItem {
    Summary(SummaryItem),
    Detail(DetailItem),
}

/// List entry for a content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub meta: ItemMeta,
}

/// All registered content types plus the keys list views display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypesListing {
    pub keys: Vec<String>,
    pub all: Vec<ContentType>,
}

/// Envelope for every paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEnvelope<T: Serialize> {
    pub items: Vec<T>,
    pub pages: PageLinks,
}

/// Result of a single-item lookup. Serializes as `{}` when nothing was found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleItem(pub Option<DetailItem>);

impl SingleItem {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn into_inner(self) -> Option<DetailItem> {
        self.0
    }
}

impl From<DetailItem> for SingleItem {
    fn from(item: DetailItem) -> Self {
        Self(Some(item))
    }
}

impl Serialize for SingleItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(item) => item.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}
