//! Filesystem adapters for Punchcard.
//!
//! Locates the data directory and loads content-type definitions from
//! `{data_dir}/types/*.toml`.

use std::path::{Path, PathBuf};

use punchcard_types::content_type::ContentType;
use punchcard_types::error::ContentTypeError;

/// Compute the content-type definitions directory: `{data_dir}/types/`.
pub fn types_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("types")
}

/// Load every `*.toml` content-type definition in `dir`, ordered by file name.
///
/// A missing directory yields no definitions. A file that cannot be read or
/// parsed fails the whole load.
pub async fn load_type_definitions(dir: &Path) -> Result<Vec<ContentType>, ContentTypeError> {
    let invalid = |path: &Path, message: String| ContentTypeError::InvalidDefinition {
        path: path.display().to_string(),
        message,
    };

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No types directory at {}, skipping", dir.display());
            return Ok(Vec::new());
        }
        Err(err) => return Err(invalid(dir, err.to_string())),
    };

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| invalid(dir, e.to_string()))?
    {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut types = Vec::with_capacity(paths.len());
    for path in paths {
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| invalid(&path, e.to_string()))?;
        let content_type: ContentType =
            toml::from_str(&content).map_err(|e| invalid(&path, e.to_string()))?;
        tracing::debug!(id = %content_type.id, path = %path.display(), "loaded content type");
        types.push(content_type);
    }

    Ok(types)
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `PUNCHCARD_DATA_DIR` environment variable
/// 2. `~/.punchcard`
/// 3. `.punchcard` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PUNCHCARD_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".punchcard");
    }

    PathBuf::from(".punchcard")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const ARTICLES: &str = r#"
id = "articles"
name = "Articles"
description = "Long-form writing"
identifier = "title"

[[attributes]]
id = "title"
type = "text"
name = "Title"
required = "publish"

[[attributes]]
id = "author"
type = "reference"
name = "Author"

[attributes.inputs.referencer]
label = "Author"
"#;

    #[tokio::test]
    async fn test_load_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let types = load_type_definitions(&dir.path().join("types")).await.unwrap();
        assert!(types.is_empty());
    }

    #[tokio::test]
    async fn test_load_definitions_sorted_by_file_name() {
        let dir = tempdir().unwrap();
        let types_path = types_dir(dir.path());
        tokio::fs::create_dir_all(&types_path).await.unwrap();
        tokio::fs::write(types_path.join("b-articles.toml"), ARTICLES)
            .await
            .unwrap();
        tokio::fs::write(
            types_path.join("a-pages.toml"),
            "id = \"pages\"\nname = \"Pages\"\n",
        )
        .await
        .unwrap();
        tokio::fs::write(types_path.join("notes.txt"), "ignored").await.unwrap();

        let types = load_type_definitions(&types_path).await.unwrap();
        let ids: Vec<&str> = types.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["pages", "articles"]);

        let articles = &types[1];
        assert_eq!(articles.identifier.as_deref(), Some("title"));
        assert_eq!(articles.attributes.len(), 2);
        assert!(articles
            .attribute("author")
            .is_some_and(|a| a.inputs.contains_key("referencer")));
    }

    #[tokio::test]
    async fn test_load_malformed_definition_fails() {
        let dir = tempdir().unwrap();
        let types_path = types_dir(dir.path());
        tokio::fs::create_dir_all(&types_path).await.unwrap();
        tokio::fs::write(types_path.join("broken.toml"), "name = \"No id\"\n")
            .await
            .unwrap();

        let err = load_type_definitions(&types_path).await.unwrap_err();
        assert!(
            matches!(err, ContentTypeError::InvalidDefinition { ref path, .. } if path.ends_with("broken.toml"))
        );
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var("PUNCHCARD_DATA_DIR", "/tmp/test-punchcard");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-punchcard"));
        unsafe {
            std::env::remove_var("PUNCHCARD_DATA_DIR");
        }
    }
}
