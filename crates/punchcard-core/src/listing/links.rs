//! Pagination link building.

use punchcard_types::listing::PageLinks;
use punchcard_types::query::Organized;

/// Compute first/prev/next/last links for a listing of `total_count` items.
///
/// Links that would not move anywhere useful are `None`. An empty listing
/// has no links at all.
pub fn page(base_path: &str, organized: &Organized, total_count: u64) -> PageLinks {
    let limit = organized.page.limit.max(1);
    let total_pages = total_count.div_ceil(limit);
    let current = organized.page.page;

    if total_pages == 0 {
        return PageLinks::default();
    }

    let link = |n: u64| Some(page_url(base_path, organized, n));

    PageLinks {
        first: if current == 1 || total_pages <= 1 {
            None
        } else {
            link(1)
        },
        prev: if current <= 1 {
            None
        } else {
            link((current - 1).min(total_pages))
        },
        next: if current >= total_pages {
            None
        } else {
            link(current + 1)
        },
        last: if current >= total_pages || total_pages <= 1 {
            None
        } else {
            link(total_pages)
        },
    }
}

/// `/{base}?sort={by}&sort_dir={dir}&per_page={limit}&page={n}`
fn page_url(base_path: &str, organized: &Organized, page: u64) -> String {
    format!(
        "/{}?sort={}&sort_dir={}&per_page={}&page={}",
        base_path.trim_start_matches('/'),
        organized.sort.by,
        organized.sort.dir,
        organized.page.limit,
        page
    )
}
