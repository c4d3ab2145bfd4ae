//! HTTP client for the Product Catalog API
//!
//! Responses are returned as pretty-printed JSON text, ready to hand back to
//! the model as tool output.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::Serialize;

/// HTTP client for communicating with the catalog API
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new client from environment variables
    ///
    /// Optional env vars:
    /// - CATALOG_API_URL: Base URL of the API (default http://localhost:8080)
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("CATALOG_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        Self::new(&base_url)
    }

    /// Create a new client with explicit configuration
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List products, oldest first
    pub async fn list_products(&self, skip: Option<u64>, limit: Option<u64>) -> Result<String> {
        let mut query = Vec::new();
        if let Some(skip) = skip {
            query.push(("skip", skip));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit));
        }

        let url = format!("{}/api/products", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .context("Failed to GET /api/products")?;

        handle_json_response(response).await
    }

    pub async fn get_product(&self, id: &str) -> Result<String> {
        self.get_json(&product_path(id)).await
    }

    pub async fn create_product(&self, request: &CreateProductRequest) -> Result<String> {
        self.post_json("/api/products", request).await
    }

    /// Update only the fields set on `request`
    pub async fn update_product(&self, id: &str, request: &UpdateProductRequest) -> Result<String> {
        let path = product_path(id);
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .put(&url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to PUT {}", path))?;

        handle_json_response(response).await
    }

    pub async fn increase_stock(&self, id: &str, quantity: i32) -> Result<String> {
        self.post_json(
            &format!("{}/stock/increase", product_path(id)),
            &StockRequest { quantity },
        )
        .await
    }

    pub async fn decrease_stock(&self, id: &str, quantity: i32) -> Result<String> {
        self.post_json(
            &format!("{}/stock/decrease", product_path(id)),
            &StockRequest { quantity },
        )
        .await
    }

    pub async fn delete_product(&self, id: &str) -> Result<String> {
        let path = product_path(id);
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to DELETE {}", path))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .context("Failed to read response body")?;
            anyhow::bail!("API error ({}): {}", status, body);
        }

        Ok(format!("Product {} deleted", id))
    }

    // --- Internal helpers ---

    async fn get_json(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", path))?;

        handle_json_response(response).await
    }

    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to POST {}", path))?;

        handle_json_response(response).await
    }
}

fn product_path(id: &str) -> String {
    format!("/api/products/{}", id.trim())
}

async fn handle_json_response(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        anyhow::bail!("API error ({}): {}", status, body);
    }

    Ok(pretty(&body))
}

/// Re-indent a JSON body, passing anything unparseable through as-is
fn pretty(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| body.to_string())
}

// --- Request Types ---

#[derive(Debug, Serialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Decimal string, e.g. "19.99"
    pub price: String,
    pub stock_quantity: i32,
}

#[derive(Debug, Default, Serialize)]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(None)` is sent as `null` and clears the description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i32>,
}

#[derive(Debug, Serialize)]
struct StockRequest {
    quantity: i32,
}
