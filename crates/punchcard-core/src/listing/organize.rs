//! Query normalization.
//!
//! Turns untrusted list parameters into an [`Organized`] descriptor. Invalid
//! input is never an error: every field independently falls back to a safe
//! default, so a request with a valid sort and a garbage page still sorts.

use punchcard_types::query::{Organized, PageSpec, QueryParams, SortDirection, SortSpec};

/// Sort field used when no allowed fields are supplied.
pub const DEFAULT_SORT_FIELD: &str = "key";
/// Page size when `per_page` is absent or unparseable.
pub const DEFAULT_PER_PAGE: u64 = 30;
/// Upper bound for `per_page`. Out-of-range values clamp here, not to the default.
pub const MAX_PER_PAGE: u64 = 100;

/// Normalize list parameters against the allowed sort fields.
///
/// An empty `sort_fields` slice behaves as `["key"]`.
pub fn organize<S: AsRef<str>>(params: &QueryParams, sort_fields: &[S]) -> Organized {
    let sort = SortSpec {
        by: resolve_sort_field(params.sort.as_deref(), sort_fields),
        dir: params
            .sort_dir
            .as_deref()
            .and_then(|dir| dir.parse::<SortDirection>().ok())
            .unwrap_or_default(),
    };

    let limit = match parse_int(params.per_page.as_deref()) {
        Some(n) => n.clamp(1, MAX_PER_PAGE as i64) as u64,
        None => DEFAULT_PER_PAGE,
    };
    let page = parse_int(params.page.as_deref())
        .filter(|&n| n >= 1)
        .map_or(1, |n| n as u64);

    Organized {
        sort,
        page: PageSpec {
            offset: (page - 1).saturating_mul(limit),
            limit,
            page,
        },
    }
}

fn resolve_sort_field<S: AsRef<str>>(requested: Option<&str>, sort_fields: &[S]) -> String {
    let Some(first) = sort_fields.first() else {
        return DEFAULT_SORT_FIELD.to_string();
    };

    requested
        .filter(|wanted| sort_fields.iter().any(|field| field.as_ref() == *wanted))
        .unwrap_or(first.as_ref())
        .to_string()
}

/// Parse a whole-number parameter.
///
/// The trimmed input must be an optional sign followed by digits only:
/// `"50.5"` and `"10abc"` are unparseable rather than truncated to a leading
/// integer prefix. Digit strings too large for `i64` saturate, so they still
/// clamp like any other out-of-range number.
fn parse_int(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }

    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}
