//! Catalog MCP Server implementation
//!
//! Exposes the product catalog as MCP tools. Each tool is a thin wrapper over
//! one API endpoint; validation happens on the API side.

use crate::client::{CatalogClient, CreateProductRequest, UpdateProductRequest};
use anyhow::Result;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// Catalog MCP Server
#[derive(Clone)]
pub struct CatalogServer {
    client: CatalogClient,
    tool_router: ToolRouter<Self>,
}

impl CatalogServer {
    pub fn from_env() -> Result<Self> {
        let client = CatalogClient::from_env()?;
        Ok(Self::new(client))
    }

    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }
}

// --- Tool Parameter Types ---

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListParams {
    /// Number of products to skip (default 0)
    #[serde(default)]
    pub skip: Option<u64>,
    /// Maximum number of products to return (default 100)
    #[serde(default)]
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct IdParams {
    /// Product ID (UUID)
    pub id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateParams {
    /// Product name, at most 255 characters
    pub name: String,
    /// Optional description, at most 1000 characters
    #[serde(default)]
    pub description: Option<String>,
    /// Price as a decimal string, e.g. "19.99". Must be positive.
    pub price: String,
    /// Initial stock, zero or more
    pub stock_quantity: i32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateParams {
    /// Product ID (UUID)
    pub id: String,
    /// New name (optional)
    #[serde(default)]
    pub name: Option<String>,
    /// New description (optional)
    #[serde(default)]
    pub description: Option<String>,
    /// Remove the description entirely
    #[serde(default)]
    pub clear_description: bool,
    /// New price as a decimal string (optional)
    #[serde(default)]
    pub price: Option<String>,
    /// New absolute stock quantity (optional)
    #[serde(default)]
    pub stock_quantity: Option<i32>,
}

impl From<UpdateParams> for UpdateProductRequest {
    fn from(params: UpdateParams) -> Self {
        let description = if params.clear_description {
            Some(None)
        } else {
            params.description.map(Some)
        };

        UpdateProductRequest {
            name: params.name,
            description,
            price: params.price,
            stock_quantity: params.stock_quantity,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct StockParams {
    /// Product ID (UUID)
    pub id: String,
    /// Number of units, must be positive
    pub quantity: i32,
}

fn to_result(result: Result<String>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(content) => Ok(CallToolResult::success(vec![Content::text(content)])),
        Err(e) => {
            tracing::warn!("Tool call failed: {:#}", e);
            Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
        }
    }
}

#[tool_router]
impl CatalogServer {
    // === Browsing ===

    #[tool(description = "List products in the catalog, oldest first. Supports skip/limit paging.")]
    async fn list_products(
        &self,
        params: Parameters<ListParams>,
    ) -> Result<CallToolResult, McpError> {
        to_result(self.client.list_products(params.0.skip, params.0.limit).await)
    }

    #[tool(description = "Get a single product by ID.")]
    async fn get_product(&self, params: Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        to_result(self.client.get_product(&params.0.id).await)
    }

    // === Catalog management ===

    #[tool(description = "Create a new product with a name, optional description, price and initial stock.")]
    async fn create_product(
        &self,
        params: Parameters<CreateParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let request = CreateProductRequest {
            name: params.name,
            description: params.description,
            price: params.price,
            stock_quantity: params.stock_quantity,
        };
        to_result(self.client.create_product(&request).await)
    }

    #[tool(description = "Update a product. Only the fields you pass are changed.")]
    async fn update_product(
        &self,
        params: Parameters<UpdateParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = params.0.id.clone();
        let request = UpdateProductRequest::from(params.0);
        to_result(self.client.update_product(&id, &request).await)
    }

    #[tool(description = "Delete a product by ID.")]
    async fn delete_product(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        to_result(self.client.delete_product(&params.0.id).await)
    }

    // === Stock ===

    #[tool(description = "Add units to a product's stock (restock).")]
    async fn increase_stock(
        &self,
        params: Parameters<StockParams>,
    ) -> Result<CallToolResult, McpError> {
        to_result(
            self.client
                .increase_stock(&params.0.id, params.0.quantity)
                .await,
        )
    }

    #[tool(description = "Remove units from a product's stock (sale). Fails if not enough stock is available.")]
    async fn decrease_stock(
        &self,
        params: Parameters<StockParams>,
    ) -> Result<CallToolResult, McpError> {
        to_result(
            self.client
                .decrease_stock(&params.0.id, params.0.quantity)
                .await,
        )
    }
}

#[tool_handler]
impl ServerHandler for CatalogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "catalog".into(),
                title: Some("Product Catalog MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"Product Catalog

TOOLS:
- 'list_products' / 'get_product' - Browse the catalog
- 'create_product' - Add a product (price as a decimal string, e.g. "19.99")
- 'update_product' - Change name, description, price or stock
- 'increase_stock' / 'decrease_stock' - Restock or sell units
- 'delete_product' - Remove a product

RULES:
- Names cannot be blank
- Prices must be greater than zero
- Stock never goes below zero; a sale larger than the stock is rejected"#
                    .into(),
            ),
        }
    }
}
