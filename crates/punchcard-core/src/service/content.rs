//! List API service.
//!
//! Orchestrates normalization, data-fetch, formatting, and link building
//! for content-type listings, per-type record listings, and single records.
//! Store errors are returned unchanged.

use std::cmp::Ordering;

use punchcard_types::config::SortFields;
use punchcard_types::content::ContentRow;
use punchcard_types::content_type::{AttributeDef, ContentType};
use punchcard_types::error::RepositoryError;
use punchcard_types::listing::{
    FormattedItem, ListEnvelope, SingleItem, TypeSummary, TypesListing,
};
use punchcard_types::query::{QueryParams, SortDirection};
use tracing::debug;
use uuid::Uuid;

use crate::listing::format::{detail, summarize_type};
use crate::listing::{format, organize, page};
use crate::registry::TypeRegistry;
use crate::repository::content::{ContentQuery, ContentRepository};

/// Fields shown for each type in list views.
pub const TYPE_KEYS: [&str; 3] = ["name", "description", "id"];

/// Service behind the list endpoints.
///
/// Generic over the repository and registry traits -- punchcard-core never
/// depends on punchcard-infra.
pub struct ContentService<R: ContentRepository, T: TypeRegistry> {
    repo: R,
    registry: T,
    sort_fields: SortFields,
}

impl<R: ContentRepository, T: TypeRegistry> ContentService<R, T> {
    /// Create a new ContentService.
    ///
    /// - `repo`: the content store
    /// - `registry`: registered content types
    /// - `sort_fields`: allowed sort fields per listing (first is the default)
    pub fn new(repo: R, registry: T, sort_fields: SortFields) -> Self {
        Self {
            repo,
            registry,
            sort_fields,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn registry(&self) -> &T {
        &self.registry
    }

    /// Registered content types and the keys list views display.
    pub fn types(&self) -> TypesListing {
        TypesListing {
            keys: TYPE_KEYS.iter().map(|k| k.to_string()).collect(),
            all: self.registry.all().to_vec(),
        }
    }

    /// Paginated listing of every registered content-type definition.
    pub async fn all(
        &self,
        params: &QueryParams,
    ) -> Result<ListEnvelope<TypeSummary>, RepositoryError> {
        Ok(self.list_types(params, self.registry.all(), "api"))
    }

    /// Paginated listing over a previously obtained [`TypesListing`].
    pub async fn content(
        &self,
        params: &QueryParams,
        types: &TypesListing,
    ) -> Result<ListEnvelope<TypeSummary>, RepositoryError> {
        Ok(self.list_types(params, &types.all, "api/types"))
    }

    /// One page of records of a single content type.
    pub async fn of_type(
        &self,
        params: &QueryParams,
        type_slug: &str,
    ) -> Result<ListEnvelope<FormattedItem>, RepositoryError> {
        let organized = organize(params, &self.sort_fields.content);
        let query = ContentQuery::from_organized(&organized).of_type(type_slug);

        let mut rows = self.repo.list(&query).await?;
        let total = self.repo.count(Some(type_slug)).await?;
        rows.truncate(usize::try_from(organized.page.limit).unwrap_or(usize::MAX));

        debug!(
            type_slug,
            sort = %organized.sort.by,
            dir = %organized.sort.dir,
            page = organized.page.page,
            returned = rows.len(),
            total,
            "listed content"
        );

        Ok(ListEnvelope {
            items: format(&rows, None),
            pages: page(&format!("api/types/{type_slug}"), &organized, total),
        })
    }

    /// A single record with nested attributes, or the empty item.
    ///
    /// When `attribute_defs` is `None`, the definitions of the record's
    /// registered type are used. `_params` is not consulted; single lookups
    /// are never paginated.
    pub async fn one(
        &self,
        _params: &QueryParams,
        id: &str,
        attribute_defs: Option<&[AttributeDef]>,
    ) -> Result<SingleItem, RepositoryError> {
        let Ok(id) = Uuid::parse_str(id.trim()) else {
            debug!(id, "lookup with non-uuid id");
            return Ok(SingleItem::empty());
        };

        let Some(row) = self.repo.get_by_id(&id).await? else {
            return Ok(SingleItem::empty());
        };

        let defs = match attribute_defs {
            Some(defs) => defs,
            None => self
                .registry
                .for_row(&row)
                .map(|ty| ty.attributes.as_slice())
                .unwrap_or_default(),
        };

        Ok(detail(&row, defs).into())
    }

    /// Point a new row's slug at its registered type id, so it is listed
    /// under `/api/types/{id}`. Rows of unregistered types keep their slug.
    pub fn assign_type(&self, mut row: ContentRow) -> ContentRow {
        if let Some(ty) = self.registry.for_row(&row) {
            if ty.id != row.type_slug {
                debug!(from = %row.type_slug, to = %ty.id, "assigning registered type slug");
                row.type_slug = ty.id.clone();
            }
        }
        row
    }

    fn list_types(
        &self,
        params: &QueryParams,
        types: &[ContentType],
        base_path: &str,
    ) -> ListEnvelope<TypeSummary> {
        let organized = organize(params, &self.sort_fields.types);

        let mut sorted: Vec<&ContentType> = types.iter().collect();
        sorted.sort_by(|a, b| {
            let ordering = compare_types(a, b, &organized.sort.by);
            match organized.sort.dir {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let offset = usize::try_from(organized.page.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(organized.page.limit).unwrap_or(usize::MAX);
        let items = sorted
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(summarize_type)
            .collect();

        ListEnvelope {
            items,
            pages: page(base_path, &organized, types.len() as u64),
        }
    }
}

fn compare_types(a: &ContentType, b: &ContentType, field: &str) -> Ordering {
    let primary = match field {
        "id" => a.id.cmp(&b.id),
        "description" => a.description.cmp(&b.description),
        _ => a.name.cmp(&b.name),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}
