use anyhow::Result;
use httpmock::prelude::*;
use order_crm_sync::{
    PipedriveClient, PipedriveConfig, ShopifyConfig, ShopifyOrderSource, SyncEngine, SyncError,
    SyncOptions, SyncOrchestrator,
};

fn engine(server: &MockServer) -> SyncEngine<ShopifyOrderSource, PipedriveClient> {
    let orders = ShopifyOrderSource::new(ShopifyConfig {
        store_domain: server.base_url(),
        api_key: "key".to_string(),
        api_password: "pass".to_string(),
        api_version: "2021-07".to_string(),
        timeout_seconds: 5,
    });
    let crm = PipedriveClient::new(PipedriveConfig {
        api_token: "test-token".to_string(),
        base_url: server.base_url(),
        timeout_seconds: 5,
    });
    SyncEngine::new(SyncOrchestrator::new(orders, crm, SyncOptions::default()))
}

fn order_body() -> serde_json::Value {
    serde_json::json!({
        "order": {
            "id": 1001,
            "customer": {
                "first_name": "Jane",
                "last_name": "Doe",
                "email": "a@x.com"
            },
            "line_items": [
                {"sku": "SKU1", "name": "Widget", "price": "9.99"}
            ]
        }
    })
}

#[tokio::test]
async fn test_order_not_found_makes_no_crm_calls() -> Result<()> {
    let server = MockServer::start();

    let order_mock = server.mock(|when, then| {
        when.method(GET).path("/admin/api/2021-07/orders/1001.json");
        then.status(404);
    });

    // 任何 CRM 端點都不該被打到
    let find_person_mock = server.mock(|when, then| {
        when.method(GET).path("/persons/find");
        then.status(200).json_body(serde_json::json!({"data": []}));
    });
    let find_product_mock = server.mock(|when, then| {
        when.method(GET).path("/products/find");
        then.status(200).json_body(serde_json::json!({"data": []}));
    });
    let create_deal_mock = server.mock(|when, then| {
        when.method(POST).path("/deals");
        then.status(201).json_body(serde_json::json!({"data": {"id": 1}}));
    });

    let outcome = engine(&server).run("1001").await;

    assert_eq!(outcome.as_str(), "failure");
    assert!(matches!(
        outcome.error(),
        Some(SyncError::OrderFetchError { status: 404, .. })
    ));

    order_mock.assert();
    find_person_mock.assert_hits(0);
    find_product_mock.assert_hits(0);
    create_deal_mock.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_person_lookup_failure_stops_the_run() -> Result<()> {
    let server = MockServer::start();

    let _order_mock = server.mock(|when, then| {
        when.method(GET).path("/admin/api/2021-07/orders/1001.json");
        then.status(200).json_body(order_body());
    });

    let find_person_mock = server.mock(|when, then| {
        when.method(GET).path("/persons/find");
        then.status(500);
    });

    let find_product_mock = server.mock(|when, then| {
        when.method(GET).path("/products/find");
        then.status(200).json_body(serde_json::json!({"data": []}));
    });
    let create_deal_mock = server.mock(|when, then| {
        when.method(POST).path("/deals");
        then.status(201).json_body(serde_json::json!({"data": {"id": 1}}));
    });

    let outcome = engine(&server).run("1001").await;

    assert_eq!(outcome.as_str(), "failure");
    assert!(matches!(
        outcome.error(),
        Some(SyncError::CrmRequestError {
            resource: "persons",
            status: 500,
            ..
        })
    ));

    find_person_mock.assert();
    // 聯絡人解析失敗後，產品與 deal 的步驟都不能執行
    find_product_mock.assert_hits(0);
    create_deal_mock.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_product_creation_failure_prevents_deal_creation() -> Result<()> {
    let server = MockServer::start();

    let _order_mock = server.mock(|when, then| {
        when.method(GET).path("/admin/api/2021-07/orders/1001.json");
        then.status(200).json_body(order_body());
    });

    let _find_person_mock = server.mock(|when, then| {
        when.method(GET).path("/persons/find");
        then.status(200)
            .json_body(serde_json::json!({"data": [{"id": 55, "name": "Jane Doe"}]}));
    });

    let _find_product_mock = server.mock(|when, then| {
        when.method(GET).path("/products/find");
        then.status(200).json_body(serde_json::json!({"data": []}));
    });

    let create_product_mock = server.mock(|when, then| {
        when.method(POST).path("/products");
        then.status(422);
    });

    let create_deal_mock = server.mock(|when, then| {
        when.method(POST).path("/deals");
        then.status(201).json_body(serde_json::json!({"data": {"id": 1}}));
    });

    let outcome = engine(&server).run("1001").await;

    assert_eq!(outcome.as_str(), "failure");
    assert!(matches!(
        outcome.error(),
        Some(SyncError::CrmRequestError {
            resource: "products",
            ..
        })
    ));

    create_product_mock.assert();
    create_deal_mock.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_deal_creation_failure_prevents_attachment() -> Result<()> {
    let server = MockServer::start();

    let _order_mock = server.mock(|when, then| {
        when.method(GET).path("/admin/api/2021-07/orders/1001.json");
        then.status(200).json_body(order_body());
    });

    let _find_person_mock = server.mock(|when, then| {
        when.method(GET).path("/persons/find");
        then.status(200)
            .json_body(serde_json::json!({"data": [{"id": 55, "name": "Jane Doe"}]}));
    });

    let _find_product_mock = server.mock(|when, then| {
        when.method(GET).path("/products/find");
        then.status(200).json_body(serde_json::json!({
            "data": [{"id": 301, "name": "Widget", "code": "SKU1", "prices": [{"price": 9.99}]}]
        }));
    });

    let create_deal_mock = server.mock(|when, then| {
        when.method(POST).path("/deals");
        then.status(500);
    });

    let attach_mock = server.mock(|when, then| {
        // 只匹配 /deals/{id}/products，不會吃掉上面的 POST /deals
        when.method(POST)
            .path_contains("/deals/")
            .path_contains("/products");
        then.status(201).json_body(serde_json::json!({"data": {"id": 1}}));
    });

    let outcome = engine(&server).run("1001").await;

    assert_eq!(outcome.as_str(), "failure");
    assert!(matches!(
        outcome.error(),
        Some(SyncError::CrmRequestError {
            resource: "deals",
            ..
        })
    ));

    create_deal_mock.assert();
    attach_mock.assert_hits(0);

    Ok(())
}
