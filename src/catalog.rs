//! Catalog loading from a directory of JSON files.
//!
//! The catalog is rebuilt from disk on every request: no cache, no
//! staleness. Each `*.json` file directly in the catalog directory is
//! parsed as either an array of items or an object with an `items`
//! array; anything else contributes no items. A file that cannot be
//! read or parsed is skipped, never fatal.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A single catalog record.
///
/// All recognized fields are optional; unrecognized fields are preserved
/// verbatim in `extra` so items round-trip unchanged when echoed back to
/// the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Item identifier (string or number, passed through as-is)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Alternate name, used when `title` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Price, kept as raw JSON: non-numeric values still round-trip but
    /// sort as "no price"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogItem {
    /// Title with fallback to the alternate name.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }

    /// Price as a number, if the field is present and numeric.
    pub fn numeric_price(&self) -> Option<f64> {
        self.price.as_ref().and_then(Value::as_f64)
    }
}

/// Load all catalog items from `dir`.
///
/// Files are visited in file-name order (non-recursive); within a file,
/// array order is kept. A missing or unlistable directory yields an
/// empty catalog.
pub async fn load_catalog(dir: &Path) -> Vec<CatalogItem> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "Catalog directory not readable");
            return Vec::new();
        }
    };

    let mut paths = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut items = Vec::new();
    for path in &paths {
        match load_file(path).await {
            Ok(mut batch) => {
                tracing::debug!(file = %path.display(), count = batch.len(), "Loaded catalog file");
                items.append(&mut batch);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping catalog file");
            }
        }
    }
    items
}

/// Load one catalog file. Failures here are absorbed by the caller.
async fn load_file(path: &Path) -> Result<Vec<CatalogItem>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    let doc: Value = serde_json::from_str(&raw).map_err(|source| Error::FileParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract_items(doc))
}

/// Pull the item array out of a parsed document.
///
/// Accepted shapes: a top-level array, or an object with an `items`
/// array. Anything else is zero items. Array elements that are not
/// objects are dropped individually.
fn extract_items(doc: Value) -> Vec<CatalogItem> {
    let values = match doc {
        Value::Array(values) => values,
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(values)) => values,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).expect("write fixture");
    }

    #[tokio::test]
    async fn missing_directory_yields_empty_catalog() {
        let items = load_catalog(&PathBuf::from("does/not/exist")).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn loads_top_level_array() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(
            dir.path(),
            "mugs.json",
            r#"[{"title": "Red Mug", "price": 10}, {"title": "Blue Mug", "price": 5}]"#,
        );

        let items = load_catalog(dir.path()).await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title.as_deref(), Some("Red Mug"));
        assert_eq!(items[1].numeric_price(), Some(5.0));
    }

    #[tokio::test]
    async fn loads_object_with_items_array() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(
            dir.path(),
            "lamps.json",
            r#"{"items": [{"name": "Desk Lamp", "category": "Office"}]}"#,
        );

        let items = load_catalog(dir.path()).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].display_title(), Some("Desk Lamp"));
    }

    #[tokio::test]
    async fn other_document_shapes_contribute_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "scalar.json", "42");
        write_file(dir.path(), "no-items.json", r#"{"products": []}"#);

        let items = load_catalog(dir.path()).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn malformed_file_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "broken.json", "{not json at all");
        write_file(dir.path(), "good.json", r#"[{"title": "Red Mug"}]"#);

        let items = load_catalog(dir.path()).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title.as_deref(), Some("Red Mug"));
    }

    #[tokio::test]
    async fn non_object_elements_are_dropped_individually() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(
            dir.path(),
            "mixed.json",
            r#"[{"title": "Red Mug"}, "stray", 42, {"title": "Blue Mug"}]"#,
        );

        let items = load_catalog(dir.path()).await;
        let titles: Vec<_> = items.iter().filter_map(|i| i.title.as_deref()).collect();
        assert_eq!(titles, vec!["Red Mug", "Blue Mug"]);
    }

    #[tokio::test]
    async fn unrecognized_extensions_are_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "notes.txt", r#"[{"title": "Red Mug"}]"#);

        let items = load_catalog(dir.path()).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn files_concatenate_in_name_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "b.json", r#"[{"title": "Second"}]"#);
        write_file(dir.path(), "a.json", r#"[{"title": "First"}]"#);

        let items = load_catalog(dir.path()).await;
        let titles: Vec<_> = items.iter().filter_map(|i| i.title.as_deref()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn unknown_fields_round_trip() {
        let raw = json!({
            "id": 7,
            "title": "Red Mug",
            "sku": "MUG-001",
            "stock": {"warehouse": 3}
        });
        let item: CatalogItem = serde_json::from_value(raw.clone()).expect("deserialize");
        assert_eq!(item.extra.get("sku"), Some(&json!("MUG-001")));

        let back = serde_json::to_value(&item).expect("serialize");
        assert_eq!(back, raw);
    }

    #[test]
    fn absent_fields_do_not_serialize_as_null() {
        let item: CatalogItem = serde_json::from_value(json!({"title": "Red Mug"})).expect("ok");
        let back = serde_json::to_value(&item).expect("serialize");
        assert_eq!(back, json!({"title": "Red Mug"}));
    }

    #[test]
    fn non_numeric_price_has_no_numeric_value() {
        let item: CatalogItem =
            serde_json::from_value(json!({"title": "Odd", "price": "call us"})).expect("ok");
        assert_eq!(item.numeric_price(), None);
    }
}
