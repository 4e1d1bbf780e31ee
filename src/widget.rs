//! The catalog-list UI fragment resource.
//!
//! A single static HTML widget at a fixed URI. The server returns it
//! verbatim; the UI host injects the `search_catalog` tool's structured
//! output into the fragment at display time, so there is no server-side
//! rendering here. Two `_meta` hints on the contents tell the host how
//! to frame the widget.

use rmcp::model::{
    AnnotateAble, ListResourcesResult, Meta, RawResource, ReadResourceResult, Resource,
    ResourceContents,
};
use serde_json::json;

/// Fixed logical URI the widget is served under.
pub const WIDGET_URI: &str = "ui://widget/catalog-list.html";

const WIDGET_HTML: &str = include_str!("../assets/catalog-list.html");

const WIDGET_DESCRIPTION: &str =
    "Inline widget that renders catalog search results as a list of cards";

/// Hints consumed by the UI host: border preference and a description of
/// what the widget shows.
fn widget_meta() -> Meta {
    let mut hints = serde_json::Map::new();
    hints.insert("ui/prefersBorder".to_string(), json!(true));
    hints.insert("ui/description".to_string(), json!(WIDGET_DESCRIPTION));
    Meta(hints)
}

fn widget_descriptor() -> Resource {
    let mut raw = RawResource::new(WIDGET_URI, "catalog-list");
    raw.description = Some(WIDGET_DESCRIPTION.to_string());
    raw.mime_type = Some("text/html".to_string());
    raw.no_annotation()
}

/// `resources/list`: the widget is the only resource this server exposes.
pub fn list_resources_impl() -> ListResourcesResult {
    ListResourcesResult {
        resources: vec![widget_descriptor()],
        next_cursor: None,
        meta: None,
    }
}

/// `resources/read`: returns the fragment verbatim for the widget URI,
/// `None` for anything else.
pub fn read_resource_impl(uri: &str) -> Option<ReadResourceResult> {
    if uri != WIDGET_URI {
        return None;
    }
    Some(ReadResourceResult {
        contents: vec![ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: Some("text/html".to_string()),
            text: WIDGET_HTML.to_string(),
            meta: Some(widget_meta()),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_exactly_the_widget() {
        let listed = list_resources_impl();
        assert_eq!(listed.resources.len(), 1);
        assert_eq!(listed.resources[0].raw.uri, WIDGET_URI);
        assert_eq!(
            listed.resources[0].raw.mime_type.as_deref(),
            Some("text/html")
        );
    }

    #[test]
    fn read_returns_html_with_hints() {
        let result = read_resource_impl(WIDGET_URI).expect("widget readable");
        assert_eq!(result.contents.len(), 1);
        match &result.contents[0] {
            ResourceContents::TextResourceContents {
                uri,
                mime_type,
                text,
                meta,
            } => {
                assert_eq!(uri, WIDGET_URI);
                assert_eq!(mime_type.as_deref(), Some("text/html"));
                assert!(text.contains("catalog-list-root"));
                let meta = meta.as_ref().expect("widget hints present");
                assert_eq!(
                    meta.0.get("ui/prefersBorder"),
                    Some(&serde_json::json!(true))
                );
                assert!(meta.0.contains_key("ui/description"));
            }
            other => panic!("expected text contents, got {other:?}"),
        }
    }

    #[test]
    fn unknown_uri_is_not_served() {
        assert!(read_resource_impl("ui://widget/other.html").is_none());
    }
}
