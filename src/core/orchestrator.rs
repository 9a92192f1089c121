use crate::core::{CrmClient, OrderSource, Result};
use crate::domain::model::{
    DealProductEntry, LineItem, NewDeal, NewPerson, NewProduct, Order, Person, Product, SyncReport,
};
use crate::utils::error::SyncError;
use std::future::Future;

/// 協調器自身的選項，於建構時注入（不讀任何全域狀態）
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub deal_title: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            deal_title: "New Deal".to_string(),
        }
    }
}

/// find-or-create 的共用骨架：有命中就用，沒有才執行 create
async fn find_or_create<T, F>(existing: Option<T>, create: F) -> Result<(T, bool)>
where
    F: Future<Output = Result<T>>,
{
    match existing {
        Some(found) => Ok((found, false)),
        None => Ok((create.await?, true)),
    }
}

/// 對帳協調器：抓訂單 → 解析聯絡人 → 逐項解析產品 → 建立 deal → 附掛產品。
/// 每一步嚴格依序，任一步失敗整個 run 以錯誤收場；已寫入 CRM 的紀錄不回滾。
pub struct SyncOrchestrator<O: OrderSource, C: CrmClient> {
    orders: O,
    crm: C,
    options: SyncOptions,
}

impl<O: OrderSource, C: CrmClient> SyncOrchestrator<O, C> {
    pub fn new(orders: O, crm: C, options: SyncOptions) -> Self {
        Self {
            orders,
            crm,
            options,
        }
    }

    pub async fn run(&self, order_id: &str) -> Result<SyncReport> {
        tracing::info!("📡 Fetching order {}", order_id);
        let order = self.orders.fetch_order(order_id).await?;

        let (person, person_created) = self.resolve_person(&order).await?;
        let (products, products_created) = self.resolve_products(&order.line_items).await?;

        // Deal 一定要等聯絡人與所有產品都解析完才建立
        tracing::info!(
            "🤝 Creating deal '{}' for person {}",
            self.options.deal_title,
            person.id
        );
        let deal_products: Vec<DealProductEntry> = products
            .iter()
            .map(|p| DealProductEntry {
                product_id: p.id,
                item_price: p.primary_price(),
            })
            .collect();
        let deal = self
            .crm
            .create_deal(&NewDeal {
                title: self.options.deal_title.clone(),
                person_id: person.id,
                products: deal_products,
            })
            .await?;

        let product_ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        let attachment = self.crm.attach_products(deal.id, &product_ids).await?;
        tracing::info!(
            "🔗 Attached {} products to deal {}",
            attachment.attached,
            deal.id
        );

        Ok(SyncReport {
            order_id: order.id,
            person_id: person.id,
            person_created,
            product_ids,
            products_created,
            deal_id: deal.id,
            completed_at: chrono::Utc::now(),
        })
    }

    async fn resolve_person(&self, order: &Order) -> Result<(Person, bool)> {
        let email = order
            .customer
            .email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| SyncError::ProcessingError {
                message: format!("order {} has no customer email", order.id),
            })?;

        tracing::info!("🔍 Looking up person by email: {}", email);
        let existing = self.crm.find_person(email).await?;
        let payload = NewPerson::from_customer(&order.customer, email);
        let (person, created) = find_or_create(existing, self.crm.create_person(&payload)).await?;

        if created {
            tracing::info!("👤 Created person {} ({})", person.id, payload.name);
        } else {
            tracing::info!("👤 Matched existing person {}", person.id);
        }
        Ok((person, created))
    }

    /// 每個品項各自查詢一次；相同 SKU 不做同批次快取
    async fn resolve_products(&self, line_items: &[LineItem]) -> Result<(Vec<Product>, usize)> {
        let mut products = Vec::with_capacity(line_items.len());
        let mut created_count = 0;

        for item in line_items {
            let sku = item
                .sku
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| SyncError::ProcessingError {
                    message: format!("line item '{}' has no SKU", item.name),
                })?;

            tracing::info!("🔍 Looking up product by SKU: {}", sku);
            let existing = self.crm.find_product(sku).await?;
            let payload = NewProduct::from_line_item(item, sku);
            let (product, created) =
                find_or_create(existing, self.crm.create_product(&payload)).await?;

            if created {
                created_count += 1;
                tracing::info!("📦 Created product {} (code {})", product.id, sku);
            } else {
                tracing::info!("📦 Matched existing product {} (code {})", product.id, sku);
            }
            products.push(product);
        }

        Ok((products, created_count))
    }
}
