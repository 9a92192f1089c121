use crate::config::toml_config::PipedriveConfig;
use crate::domain::model::{
    AttachmentResult, DataEnvelope, Deal, NewDeal, NewPerson, NewProduct, Person, Product,
    SearchEnvelope,
};
use crate::domain::ports::CrmClient;
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Pipedrive CRM 客戶端：token 走 query string，回應包在 data 欄位裡
pub struct PipedriveClient {
    client: Client,
    config: PipedriveConfig,
}

impl PipedriveClient {
    pub fn new(config: PipedriveConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }

    fn status_error(resource: &'static str, status: reqwest::StatusCode) -> SyncError {
        SyncError::CrmRequestError {
            resource,
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// 搜尋端點：data 缺席或為空陣列都視為沒找到
    async fn find_first<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
        term: &str,
    ) -> Result<Option<T>> {
        let url = self.url(path);
        tracing::debug!("📡 GET {} term={}", url, term);

        let response = self
            .client
            .get(&url)
            .query(&[("term", term), ("api_token", self.config.api_token.as_str())])
            .timeout(self.timeout())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(resource, status));
        }

        let envelope: SearchEnvelope<T> = response.json().await?;
        Ok(envelope.into_first())
    }

    async fn create<B, T>(&self, resource: &'static str, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!("📡 POST {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("api_token", self.config.api_token.as_str())])
            .json(body)
            .timeout(self.timeout())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(resource, status));
        }

        let envelope: DataEnvelope<T> = response.json().await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl CrmClient for PipedriveClient {
    async fn find_person(&self, term: &str) -> Result<Option<Person>> {
        self.find_first("persons", "/persons/find", term).await
    }

    async fn create_person(&self, payload: &NewPerson) -> Result<Person> {
        self.create("persons", "/persons", payload).await
    }

    async fn find_product(&self, term: &str) -> Result<Option<Product>> {
        self.find_first("products", "/products/find", term).await
    }

    async fn create_product(&self, payload: &NewProduct) -> Result<Product> {
        self.create("products", "/products", payload).await
    }

    async fn create_deal(&self, payload: &NewDeal) -> Result<Deal> {
        self.create("deals", "/deals", payload).await
    }

    async fn attach_products(
        &self,
        deal_id: i64,
        product_ids: &[i64],
    ) -> Result<AttachmentResult> {
        let url = self.url(&format!("/deals/{}/products", deal_id));
        tracing::debug!("📡 POST {}", url);

        let body = serde_json::json!({ "product_ids": product_ids });
        let response = self
            .client
            .post(&url)
            .query(&[("api_token", self.config.api_token.as_str())])
            .json(&body)
            .timeout(self.timeout())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error("deal products", status));
        }

        // 回應主體只需是合法 JSON，後續流程用不到內容
        let _body: serde_json::Value = response.json().await?;
        Ok(AttachmentResult {
            deal_id,
            attached: product_ids.len(),
        })
    }
}
