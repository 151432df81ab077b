//! Lenient list query extractor.
//!
//! List endpoints never reject a query string. Repeated keys keep their first
//! value; range checks happen later in `organize`.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use punchcard_types::query::QueryParams;

/// Raw list parameters taken from the request URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery(pub QueryParams);

impl<S: Send + Sync> FromRequestParts<S> for ListQuery {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => pairs.into_iter().collect(),
            Err(rejection) => {
                tracing::debug!(%rejection, "ignoring malformed query string");
                QueryParams::default()
            }
        };
        Ok(ListQuery(params))
    }
}
