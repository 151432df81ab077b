//! Content-type definitions.
//!
//! A content type names a kind of record and declares its attributes. The
//! attribute ids (and the input names declared under each attribute) are the
//! only paths the row formatter will recognise when it rebuilds nested
//! attribute values from flattened storage keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ContentTypeError;

/// A named schema describing a kind of record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentType {
    /// Unique id, also used as the type slug in URLs ("users", "blog-post").
    pub id: String,
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Attribute whose value is used as the record's key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Ordered attribute definitions.
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
}

impl ContentType {
    /// Look up a declared attribute by id.
    pub fn attribute(&self, id: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.id == id)
    }
}

/// When an attribute becomes mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Required {
    Save,
    Publish,
}

/// A single typed field within a content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
    pub id: String,
    /// Input plugin type ("email", "password", "select", "text", ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Required>,
    /// Named inputs of the attribute. Flattened storage keys address them as
    /// `{attribute id}-{input name}`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, InputDef>,
}

impl AttributeDef {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: name.into(),
            description: None,
            required: None,
            inputs: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_required(mut self, required: Required) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_input(mut self, name: impl Into<String>, input: InputDef) -> Self {
        self.inputs.insert(name.into(), input);
        self
    }
}

/// Settings for one input of an attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputDef {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

/// One choice of a select input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Builds a content type from a base schema plus per-attribute overrides.
///
/// Overrides replace the base attribute with the same `id` in place; an
/// override whose id is not in the base is appended.
///
/// ```
/// use punchcard_types::content_type::{AttributeDef, ContentType, ContentTypeBuilder};
///
/// let base = ContentType {
///     id: "people".into(),
///     name: "People".into(),
///     description: String::new(),
///     identifier: None,
///     attributes: vec![AttributeDef::new("name", "text", "Name")],
/// };
///
/// let built = ContentTypeBuilder::from(base)
///     .id("authors")
///     .with_overrides([AttributeDef::new("name", "text", "Pen name")])
///     .build()
///     .unwrap();
///
/// assert_eq!(built.id, "authors");
/// assert_eq!(built.attributes.len(), 1);
/// assert_eq!(built.attributes[0].name, "Pen name");
/// ```
#[derive(Debug, Clone)]
pub struct ContentTypeBuilder {
    inner: ContentType,
}

impl From<ContentType> for ContentTypeBuilder {
    fn from(base: ContentType) -> Self {
        Self { inner: base }
    }
}

impl ContentTypeBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.inner.id = id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = description.into();
        self
    }

    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = AttributeDef>) -> Self {
        for attr in overrides {
            match self.inner.attributes.iter_mut().find(|a| a.id == attr.id) {
                Some(slot) => *slot = attr,
                None => self.inner.attributes.push(attr),
            }
        }
        self
    }

    pub fn build(self) -> Result<ContentType, ContentTypeError> {
        if self.inner.id.trim().is_empty() {
            return Err(ContentTypeError::EmptyId);
        }
        Ok(self.inner)
    }
}

/// Generate a URL-safe slug from a display name.
///
/// Rules:
/// - Lowercase
/// - Replace non-alphanumeric characters with hyphens
/// - Collapse consecutive hyphens into one
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use punchcard_types::content_type::slugify;
///
/// assert_eq!(slugify("Blog Post"), "blog-post");
/// assert_eq!(slugify("Hello,  World!"), "hello-world");
/// assert_eq!(slugify("---hello---world---"), "hello-world");
/// ```
pub fn slugify(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_hyphen = true; // treat start as hyphen to trim leading
    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() {
            result.push(c);
            prev_was_hyphen = false;
        } else if !prev_was_hyphen {
            result.push('-');
            prev_was_hyphen = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContentType {
        ContentType {
            id: "articles".to_string(),
            name: "Articles".to_string(),
            description: "Long form writing".to_string(),
            identifier: Some("title".to_string()),
            attributes: vec![
                AttributeDef::new("title", "text", "Title"),
                AttributeDef::new("body", "textarea", "Body"),
            ],
        }
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Research Assistant"), "research-assistant");
    }

    #[test]
    fn test_slugify_numbers_and_punctuation() {
        assert_eq!(slugify("Release v2.0"), "release-v2-0");
        assert_eq!(slugify("  "), "");
    }

    #[test]
    fn test_override_replaces_by_id_and_keeps_order() {
        let built = ContentTypeBuilder::from(sample())
            .with_overrides([AttributeDef::new("title", "text", "Headline")
                .with_required(Required::Save)])
            .build()
            .unwrap();

        assert_eq!(built.attributes.len(), 2);
        assert_eq!(built.attributes[0].id, "title");
        assert_eq!(built.attributes[0].name, "Headline");
        assert_eq!(built.attributes[0].required, Some(Required::Save));
        assert_eq!(built.attributes[1].id, "body");
    }

    #[test]
    fn test_override_with_unknown_id_appends() {
        let built = ContentTypeBuilder::from(sample())
            .with_overrides([AttributeDef::new("summary", "text", "Summary")])
            .build()
            .unwrap();

        let ids: Vec<&str> = built.attributes.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["title", "body", "summary"]);
    }

    #[test]
    fn test_build_rejects_empty_id() {
        let err = ContentTypeBuilder::from(sample()).id("  ").build().unwrap_err();
        assert!(matches!(err, ContentTypeError::EmptyId));
    }

    #[test]
    fn test_attribute_lookup() {
        let ty = sample();
        assert_eq!(ty.attribute("body").map(|a| a.kind.as_str()), Some("textarea"));
        assert!(ty.attribute("missing").is_none());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let src = r#"
id = "events"
name = "Events"
description = "Things happening"

[[attributes]]
id = "venue"
type = "reference"
name = "Venue"
required = "publish"

[attributes.inputs.referencer]
label = "Venue"
"#;
        let ty: ContentType = toml::from_str(src).unwrap();
        assert_eq!(ty.id, "events");
        assert_eq!(ty.attributes[0].kind, "reference");
        assert_eq!(ty.attributes[0].required, Some(Required::Publish));
        assert!(ty.attributes[0].inputs.contains_key("referencer"));
    }
}
