//! Query descriptors for list endpoints.
//!
//! [`QueryParams`] is what arrives from a client: every field optional and
//! untrusted. [`Organized`] is the normalized form handed to data-fetch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Raw list query parameters, exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<String>,
}

impl QueryParams {
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_sort_dir(mut self, dir: impl Into<String>) -> Self {
        self.sort_dir = Some(dir.into());
        self
    }

    pub fn with_page(mut self, page: impl ToString) -> Self {
        self.page = Some(page.to_string());
        self
    }

    pub fn with_per_page(mut self, per_page: impl ToString) -> Self {
        self.per_page = Some(per_page.to_string());
        self
    }
}

/// Collect decoded query-string pairs. The first occurrence of a repeated key
/// wins and unknown keys are ignored.
impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut params = QueryParams::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "sort" => &mut params.sort,
                "sort_dir" => &mut params.sort_dir,
                "page" => &mut params.page,
                "per_page" => &mut params.per_page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Case-sensitive: only `asc` and `desc` are accepted.
impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("invalid sort direction: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub by: String,
    pub dir: SortDirection,
}

/// Pagination window. `offset == (page - 1) * limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    pub offset: u64,
    pub limit: u64,
    pub page: u64,
}

/// Normalized, trusted query descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organized {
    pub sort: SortSpec,
    pub page: PageSpec,
}

impl Organized {
    /// Render back into raw parameters, e.g. to build links or re-normalize.
    pub fn to_params(&self) -> QueryParams {
        QueryParams {
            sort: Some(self.sort.by.clone()),
            sort_dir: Some(self.sort.dir.to_string()),
            page: Some(self.page.page.to_string()),
            per_page: Some(self.page.limit.to_string()),
        }
    }
}
