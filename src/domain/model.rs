use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Shopify 的金額欄位是 JSON 字串（例如 "9.99"），部分端點又回傳數字，
/// 這裡兩種都接受
fn price_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PriceRepr {
        Number(f64),
        Text(String),
    }

    match PriceRepr::deserialize(deserializer)? {
        PriceRepr::Number(n) => Ok(n),
        PriceRepr::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

/// GET /orders/{id}.json 的外層包裝
#[derive(Debug, Clone, Deserialize)]
pub struct OrderEnvelope {
    pub order: Order,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub order_number: Option<u64>,
    pub customer: Customer,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Customer {
    /// 姓名由 first + last 組合，缺少其中一個時不留多餘空白
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        format!("{} {}", first, last).trim().to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub sku: Option<String>,
    pub name: String,
    #[serde(deserialize_with = "price_from_string_or_number")]
    pub price: f64,
}

/// Pipedrive 搜尋端點的回應：data 可能缺席或為空陣列
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct SearchEnvelope<T> {
    #[serde(default)]
    pub data: Option<Vec<T>>,
}

impl<T> SearchEnvelope<T> {
    /// 第一筆結果即視為命中，不做進一步的比對
    pub fn into_first(self) -> Option<T> {
        self.data.and_then(|items| items.into_iter().next())
    }
}

/// Pipedrive 建立端點的回應：data 是單一物件
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub prices: Vec<ProductPrice>,
}

impl Product {
    /// 第一組價格視為主要價格；遠端紀錄沒有價格時以 0.0 帶入
    pub fn primary_price(&self) -> f64 {
        self.prices.first().map(|p| p.price).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductPrice {
    #[serde(deserialize_with = "price_from_string_or_number")]
    pub price: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Deal {
    pub id: i64,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPerson {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl NewPerson {
    pub fn from_customer(customer: &Customer, email: &str) -> Self {
        Self {
            name: customer.full_name(),
            email: email.to_string(),
            phone: customer.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPrice {
    pub price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub code: String,
    pub prices: Vec<NewPrice>,
}

impl NewProduct {
    pub fn from_line_item(item: &LineItem, sku: &str) -> Self {
        Self {
            name: item.name.clone(),
            code: sku.to_string(),
            prices: vec![NewPrice { price: item.price }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DealProductEntry {
    pub product_id: i64,
    pub item_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewDeal {
    pub title: String,
    pub person_id: i64,
    pub products: Vec<DealProductEntry>,
}

/// 附掛產品的結果摘要
#[derive(Debug, Clone)]
pub struct AttachmentResult {
    pub deal_id: i64,
    pub attached: usize,
}

/// 單次同步完成後的摘要
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub order_id: u64,
    pub person_id: i64,
    pub person_created: bool,
    pub product_ids: Vec<i64>,
    pub products_created: usize,
    pub deal_id: i64,
    pub completed_at: DateTime<Utc>,
}
