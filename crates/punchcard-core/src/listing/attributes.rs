//! Rebuilding nested attribute values from flattened storage keys.
//!
//! Storage flattens attribute inputs into dash-delimited keys:
//!
//! | stored key           | attribute | input        |
//! |----------------------|-----------|--------------|
//! | `title`              | `title`   | -            |
//! | `role-select`        | `role`    | `select`     |
//! | `author-referencer`  | `author`  | `referencer` |
//!
//! Keys are resolved only against declared attribute ids and their declared
//! input names (plus the reserved `referencer` input). Ids may contain dashes
//! themselves, so the longest declared id that matches wins.

use std::collections::BTreeMap;

use punchcard_types::content_type::AttributeDef;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

/// Input name that every attribute accepts and whose value identifies
/// another content record.
pub const REFERENCER_INPUT: &str = "referencer";

/// Key under which a bare attribute value is kept when the attribute also
/// has input values.
pub const BARE_VALUE_KEY: &str = "value";

/// A flattened key resolved against the declared attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributePath<'a> {
    pub attribute: &'a str,
    pub input: Option<&'a str>,
}

impl AttributePath<'_> {
    /// Whether the value at this path must be a content identifier.
    pub fn is_referencer(&self) -> bool {
        match self.input {
            Some(input) => input == REFERENCER_INPUT,
            None => self
                .attribute
                .strip_suffix(REFERENCER_INPUT)
                .is_some_and(|head| head.ends_with('-')),
        }
    }
}

/// Resolve a flattened key, or `None` when no declared path matches.
pub fn parse_path<'a>(key: &'a str, defs: &'a [AttributeDef]) -> Option<AttributePath<'a>> {
    let mut best: Option<AttributePath<'a>> = None;

    for def in defs.iter().filter(|d| !d.id.is_empty()) {
        let candidate = if key == def.id {
            Some(AttributePath {
                attribute: def.id.as_str(),
                input: None,
            })
        } else {
            key.strip_prefix(def.id.as_str())
                .and_then(|rest| rest.strip_prefix('-'))
                .filter(|input| *input == REFERENCER_INPUT || def.inputs.contains_key(*input))
                .map(|input| AttributePath {
                    attribute: def.id.as_str(),
                    input: Some(input),
                })
        };

        if let Some(candidate) = candidate {
            if best.is_none_or(|b| candidate.attribute.len() > b.attribute.len()) {
                best = Some(candidate);
            }
        }
    }

    best
}

/// Normalize a referencer value to its identifier.
///
/// Accepts a UUID string or an object carrying an `id` UUID.
pub fn resolve_referencer(value: &Value) -> Option<Uuid> {
    let raw = match value {
        Value::String(s) => s.as_str(),
        Value::Object(obj) => obj.get("id")?.as_str()?,
        _ => return None,
    };
    Uuid::parse_str(raw.trim()).ok()
}

#[derive(Default)]
struct Collected {
    bare: Option<Value>,
    inputs: Map<String, Value>,
}

/// Rebuild nested attributes from a row's flattened attribute map.
///
/// Undeclared keys are skipped, and referencers that do not hold an
/// identifier are dropped. Declared attributes missing from `raw` are
/// omitted from the result.
pub fn attributes(raw: &Map<String, Value>, defs: &[AttributeDef]) -> Map<String, Value> {
    let mut collected: BTreeMap<&str, Collected> = BTreeMap::new();

    for (key, value) in raw {
        let Some(path) = parse_path(key, defs) else {
            debug!(key = %key, "skipping undeclared attribute key");
            continue;
        };

        let value = if path.is_referencer() {
            match resolve_referencer(value) {
                Some(id) => Value::String(id.hyphenated().to_string()),
                None => {
                    warn!(key = %key, "dropping referencer without a valid identifier");
                    continue;
                }
            }
        } else {
            value.clone()
        };

        let slot = collected.entry(path.attribute).or_default();
        match path.input {
            Some(input) => {
                slot.inputs.insert(input.to_string(), value);
            }
            None => slot.bare = Some(value),
        }
    }

    collected
        .into_iter()
        .filter_map(|(attribute, Collected { bare, mut inputs })| {
            let value = if inputs.is_empty() {
                bare?
            } else {
                if let Some(bare) = bare {
                    inputs.entry(BARE_VALUE_KEY).or_insert(bare);
                }
                Value::Object(inputs)
            };
            Some((attribute.to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use punchcard_types::content_type::{InputDef, SelectOption};
    use serde_json::json;

    fn defs() -> Vec<AttributeDef> {
        vec![
            AttributeDef::new("title", "text", "Title"),
            AttributeDef::new("role", "select", "Role").with_input(
                "select",
                InputDef {
                    options: vec![SelectOption {
                        label: "Admin".to_string(),
                        value: "admin".to_string(),
                    }],
                    ..InputDef::default()
                },
            ),
            AttributeDef::new("author", "reference", "Author"),
            AttributeDef::new("date", "datetime", "Date")
                .with_input("date", InputDef::default())
                .with_input("time", InputDef::default()),
            AttributeDef::new("date-range", "daterange", "Date range")
                .with_input("start", InputDef::default()),
        ]
    }

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_parse_exact_id() {
        let defs = defs();
        assert_eq!(
            parse_path("title", &defs),
            Some(AttributePath {
                attribute: "title",
                input: None
            })
        );
    }

    #[test]
    fn test_parse_declared_input() {
        let defs = defs();
        assert_eq!(
            parse_path("role-select", &defs),
            Some(AttributePath {
                attribute: "role",
                input: Some("select")
            })
        );
    }

    #[test]
    fn test_parse_rejects_undeclared_input() {
        let defs = defs();
        assert_eq!(parse_path("role-radio", &defs), None);
        assert_eq!(parse_path("subtitle", &defs), None);
        assert_eq!(parse_path("titles", &defs), None);
    }

    #[test]
    fn test_parse_referencer_is_always_accepted() {
        let defs = defs();
        let path = parse_path("author-referencer", &defs).unwrap();
        assert_eq!(path.attribute, "author");
        assert!(path.is_referencer());
    }

    #[test]
    fn test_parse_prefers_longest_attribute_id() {
        let defs = defs();
        let path = parse_path("date-range-start", &defs).unwrap();
        assert_eq!(path.attribute, "date-range");
        assert_eq!(path.input, Some("start"));

        let path = parse_path("date-time", &defs).unwrap();
        assert_eq!(path.attribute, "date");
        assert_eq!(path.input, Some("time"));
    }

    #[test]
    fn test_attribute_id_ending_in_referencer_is_a_referencer() {
        let defs = vec![AttributeDef::new("editor-referencer", "reference", "Editor")];
        let path = parse_path("editor-referencer", &defs).unwrap();
        assert_eq!(path.input, None);
        assert!(path.is_referencer());

        let plain = AttributePath {
            attribute: "referencer",
            input: None,
        };
        assert!(!plain.is_referencer());
    }

    #[test]
    fn test_resolve_referencer_forms() {
        let id = Uuid::now_v7();
        assert_eq!(resolve_referencer(&json!(id.to_string())), Some(id));
        assert_eq!(
            resolve_referencer(&json!(id.to_string().to_uppercase())),
            Some(id)
        );
        assert_eq!(
            resolve_referencer(&json!({ "id": id.to_string(), "key": "Somebody" })),
            Some(id)
        );
        assert_eq!(resolve_referencer(&json!("Test 4")), None);
        assert_eq!(resolve_referencer(&json!(42)), None);
    }

    #[test]
    fn test_attributes_rebuilds_nested_values() {
        let author = Uuid::now_v7();
        let raw = map(json!({
            "title": "Hello",
            "role-select": "admin",
            "author-referencer": { "id": author.to_string() },
            "date-date": "2024-01-01",
            "date-time": "10:00",
        }));

        let actual = attributes(&raw, &defs());

        assert_eq!(actual["title"], json!("Hello"));
        assert_eq!(actual["role"], json!({ "select": "admin" }));
        assert_eq!(actual["author"], json!({ "referencer": author.to_string() }));
        assert_eq!(actual["date"], json!({ "date": "2024-01-01", "time": "10:00" }));
    }

    #[test]
    fn test_attributes_skips_unknown_and_missing() {
        let raw = map(json!({
            "title": "Hello",
            "mystery": 1,
            "role-radio": "admin",
        }));

        let actual = attributes(&raw, &defs());

        assert_eq!(actual.len(), 1);
        assert!(actual.contains_key("title"));
        assert!(!actual.contains_key("role"));
        assert!(!actual.contains_key("author"));
    }

    #[test]
    fn test_attributes_drops_invalid_referencer() {
        let raw = map(json!({ "author-referencer": "not-a-uuid", "title": "x" }));
        let actual = attributes(&raw, &defs());
        assert!(!actual.contains_key("author"));
        assert_eq!(actual.len(), 1);
    }

    #[test]
    fn test_bare_value_alongside_inputs() {
        let raw = map(json!({ "role": "legacy", "role-select": "admin" }));
        let actual = attributes(&raw, &defs());
        assert_eq!(actual["role"], json!({ "select": "admin", "value": "legacy" }));
    }

    #[test]
    fn test_attributes_with_no_definitions() {
        let raw = map(json!({ "title": "Hello" }));
        assert!(attributes(&raw, &[]).is_empty());
    }

    #[test]
    fn test_every_referencer_in_output_is_a_uuid() {
        let raw = map(json!({
            "author-referencer": Uuid::now_v7().to_string(),
            "title": "t",
        }));

        for value in attributes(&raw, &defs()).values() {
            if let Some(reference) = value.get(REFERENCER_INPUT) {
                assert!(resolve_referencer(reference).is_some());
            }
        }
    }
}
