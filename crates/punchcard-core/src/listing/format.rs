//! Row formatting for list and detail responses.

use punchcard_types::content::ContentRow;
use punchcard_types::content_type::{AttributeDef, ContentType};
use punchcard_types::listing::{DetailItem, FormattedItem, ItemMeta, SummaryItem, TypeSummary};
use uuid::Uuid;

use super::attributes::attributes;

/// Format storage rows.
///
/// Without attribute definitions every row becomes a [`SummaryItem`] linking
/// to its detail URL; with definitions every row becomes a [`DetailItem`]
/// with nested attributes.
pub fn format(rows: &[ContentRow], attribute_defs: Option<&[AttributeDef]>) -> Vec<FormattedItem> {
    match attribute_defs {
        None => rows
            .iter()
            .map(|row| FormattedItem::Summary(summarize(row)))
            .collect(),
        Some(defs) => rows
            .iter()
            .map(|row| FormattedItem::Detail(detail(row, defs)))
            .collect(),
    }
}

pub fn summarize(row: &ContentRow) -> SummaryItem {
    SummaryItem {
        id: row.id,
        type_name: row.type_name.clone(),
        type_slug: row.type_slug.clone(),
        key: row.key.clone(),
        key_slug: row.key_slug.clone(),
        meta: ItemMeta {
            url: item_url(&row.type_slug, &row.id),
        },
    }
}

pub fn detail(row: &ContentRow, defs: &[AttributeDef]) -> DetailItem {
    DetailItem {
        id: row.id,
        type_name: row.type_name.clone(),
        type_slug: row.type_slug.clone(),
        key: row.key.clone(),
        key_slug: row.key_slug.clone(),
        attributes: attributes(&row.attributes, defs),
    }
}

pub fn summarize_type(content_type: &ContentType) -> TypeSummary {
    TypeSummary {
        id: content_type.id.clone(),
        name: content_type.name.clone(),
        description: content_type.description.clone(),
        meta: ItemMeta {
            url: format!("/api/types/{}", content_type.id),
        },
    }
}

/// `/api/types/{type_slug}/{id}`
pub fn item_url(type_slug: &str, id: &Uuid) -> String {
    format!("/api/types/{type_slug}/{id}")
}
