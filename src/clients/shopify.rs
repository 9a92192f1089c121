use crate::config::toml_config::ShopifyConfig;
use crate::domain::model::{Order, OrderEnvelope};
use crate::domain::ports::OrderSource;
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Shopify 訂單來源：GET /admin/api/{version}/orders/{id}.json，Basic 驗證
pub struct ShopifyOrderSource {
    client: Client,
    config: ShopifyConfig,
}

impl ShopifyOrderSource {
    pub fn new(config: ShopifyConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// store_domain 平常只是網域，測試時可帶 http:// 前綴直接指向 mock server
    fn base_url(&self) -> String {
        let domain = self.config.store_domain.trim_end_matches('/');
        if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{}", domain)
        }
    }

    fn order_url(&self, order_id: &str) -> String {
        format!(
            "{}/admin/api/{}/orders/{}.json",
            self.base_url(),
            self.config.api_version,
            order_id
        )
    }
}

#[async_trait]
impl OrderSource for ShopifyOrderSource {
    async fn fetch_order(&self, order_id: &str) -> Result<Order> {
        let url = self.order_url(order_id);
        tracing::debug!("📡 GET {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_password))
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Order source response status: {}", status);

        if !status.is_success() {
            return Err(SyncError::OrderFetchError {
                order_id: order_id.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let envelope: OrderEnvelope = response.json().await?;
        tracing::info!(
            "📦 Fetched order {} with {} line items",
            envelope.order.id,
            envelope.order.line_items.len()
        );
        Ok(envelope.order)
    }
}
