//! The MCP server: the `search_catalog` tool and the widget resource.
//!
//! Stateless by design: every tool call reloads the catalog from disk,
//! runs the pipeline, and returns both a text summary and a structured
//! `items` payload for the UI host. Input validation happens before any
//! catalog access.

use std::path::PathBuf;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ListResourcesResult, PaginatedRequestParam,
    ReadResourceRequestParam, ReadResourceResult, ServerCapabilities, ServerInfo,
};
use rmcp::schemars;
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Deserialize;
use serde_json::json;

use crate::search::{self, DEFAULT_LIMIT, MAX_LIMIT, SearchParams, SortKey, SortOrder};
use crate::{catalog, widget};

/// Input for the `search_catalog` tool. Every field is optional; the
/// documented defaults are applied here, in one place.
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchCatalogInput {
    /// Free-text query matched against item titles, names, and descriptions
    #[serde(default)]
    pub q: Option<String>,
    /// Exact category filter (case-insensitive)
    #[serde(default)]
    pub category: Option<String>,
    /// Maximum number of items to return (1-100, default 20)
    #[serde(default)]
    pub limit: Option<i64>,
    /// Sort key: relevance (default), price, or title
    #[serde(default, rename = "sortBy")]
    pub sort_by: Option<SortKey>,
    /// Sort direction: asc (default) or desc
    #[serde(default)]
    pub order: Option<SortOrder>,
}

impl SearchCatalogInput {
    /// Validate and apply defaults. The only range check lives here;
    /// unknown enum values are already rejected during deserialization.
    fn into_params(self) -> Result<SearchParams, McpError> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT as i64);
        if limit < 1 || limit > MAX_LIMIT as i64 {
            return Err(McpError::invalid_params(
                format!("limit must be between 1 and {MAX_LIMIT}, got {limit}"),
                None,
            ));
        }
        Ok(SearchParams {
            query: self.q.unwrap_or_default(),
            category: self.category,
            limit: limit as usize,
            sort_by: self.sort_by.unwrap_or_default(),
            order: self.order.unwrap_or_default(),
        })
    }
}

/// MCP server over a catalog directory.
#[derive(Clone)]
pub struct CatalogServer {
    catalog_dir: PathBuf,
    tool_router: ToolRouter<Self>,
}

impl CatalogServer {
    pub fn new(catalog_dir: PathBuf) -> Self {
        Self {
            catalog_dir,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl CatalogServer {
    /// Search the catalog and return matching items.
    #[tool(
        description = "Search the product catalog. Supports a free-text query, an exact \
                       category filter, and sorting by relevance, price, or title. Returns \
                       matching items for display in the catalog-list widget."
    )]
    pub async fn search_catalog(
        &self,
        Parameters(input): Parameters<SearchCatalogInput>,
    ) -> Result<CallToolResult, McpError> {
        let params = input.into_params()?;

        let items = catalog::load_catalog(&self.catalog_dir).await;
        tracing::debug!(
            loaded = items.len(),
            query = %params.query,
            "Running catalog search"
        );
        let results = search::run(items, &params);

        let summary = match results.len() {
            0 => "Found 0 items.".to_string(),
            1 => "Found 1 item.".to_string(),
            n => format!("Found {n} items."),
        };
        let payload = json!({ "items": results });

        Ok(CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(payload),
            is_error: None,
            meta: None,
        })
    }
}

#[tool_handler]
impl ServerHandler for CatalogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Catalog search server. Use the search_catalog tool to find items by \
                 keyword, filter by category, and sort by relevance, price, or title. \
                 The ui://widget/catalog-list.html resource is an inline widget that \
                 renders the tool's structured output."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(widget::list_resources_impl())
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        widget::read_resource_impl(&request.uri).ok_or_else(|| {
            McpError::invalid_params(format!("Unknown resource URI: {}", request.uri), None)
        })
    }
}
