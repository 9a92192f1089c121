use crate::domain::model::{
    AttachmentResult, Deal, NewDeal, NewPerson, NewProduct, Order, Person, Product,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 訂單來源（commerce 平台）的抽象
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_order(&self, order_id: &str) -> Result<Order>;
}

/// CRM 的抽象：find 端點回傳第一筆命中或 None，create 端點回傳建立後的紀錄
#[async_trait]
pub trait CrmClient: Send + Sync {
    async fn find_person(&self, term: &str) -> Result<Option<Person>>;
    async fn create_person(&self, payload: &NewPerson) -> Result<Person>;
    async fn find_product(&self, term: &str) -> Result<Option<Product>>;
    async fn create_product(&self, payload: &NewProduct) -> Result<Product>;
    async fn create_deal(&self, payload: &NewDeal) -> Result<Deal>;
    async fn attach_products(&self, deal_id: i64, product_ids: &[i64])
        -> Result<AttachmentResult>;
}
