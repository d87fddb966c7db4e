//! Integration Tests: SDK Facade
//!
//! Composition from one configuration, backend-backed features, lifecycle.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tma_bridge::RecordingHost;
use tma_game_sdk::{
    ApiConfig, GameClientSdk, SdkBuilder, SdkConfig, SdkError, StarInvoiceRequest,
    PLACEHOLDER_COLLECTION_ADDRESS,
};

use super::{spawn_backend, MockConnector};

fn coin_pack() -> StarInvoiceRequest {
    StarInvoiceRequest {
        title: "Coin pack".to_string(),
        description: "1000 coins".to_string(),
        payload: "pack-1000".to_string(),
        amount: 50,
    }
}

/// Test: the yescoin configuration builds a facade with independent dispatchers
#[tokio::test]
async fn test_yescoin_facade() {
    let connector = Arc::new(MockConnector::default());
    let sdk = GameClientSdk::new(SdkConfig::yescoin(), connector.clone())
        .await
        .unwrap();

    assert_eq!(sdk.project_id(), "yescoin");
    assert_eq!(sdk.payments().ton.project_id(), "yescoin");
    assert_eq!(sdk.payments().star.project_id(), "yescoin");

    let configured = connector.configured.lock().unwrap().clone();
    assert_eq!(configured, vec![SdkConfig::yescoin().ui]);

    // No backend: Stars unavailable, TON unaffected
    assert!(matches!(
        sdk.payments().star.pay(&coin_pack()).await,
        Err(SdkError::NotConfigured(_))
    ));
    sdk.payments().ton.pay(1.0, None, None).await.unwrap();
}

/// Test: a TON failure leaves Stars working
#[tokio::test]
async fn test_ton_failure_does_not_affect_star() {
    let backend = spawn_backend(|request| match request.path.as_str() {
        "/projects/yescoin/payments/star" => (
            200,
            r#"{"invoiceLink":"https://t.me/$yescoin_invoice"}"#.to_string(),
        ),
        _ => (404, r#"{"message":"not found"}"#.to_string()),
    })
    .await;

    let config = SdkConfig::yescoin().with_api(ApiConfig::new(&backend.base_url));
    let connector = Arc::new(MockConnector::rejecting("wallet unavailable"));
    let sdk = GameClientSdk::new(config, connector).await.unwrap();

    assert!(sdk.payments().ton.pay(1.0, None, None).await.is_err());

    let invoice = sdk.payments().star.pay(&coin_pack()).await.unwrap();
    assert_eq!(invoice.invoice_link, "https://t.me/$yescoin_invoice");

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "title": "Coin pack",
            "description": "1000 coins",
            "payload": "pack-1000",
            "amount": 50
        })
    );
}

/// Test: build_resolved takes the collection address from project settings
#[tokio::test]
async fn test_build_resolved_uses_project_settings() {
    let backend = spawn_backend(|request| match request.path.as_str() {
        "/projects/yescoin/settings" => (
            200,
            r#"{"collectionAddress":"EQ_yescoin_collection"}"#.to_string(),
        ),
        _ => (404, "{}".to_string()),
    })
    .await;

    let connector = Arc::new(MockConnector::default());
    let sdk = SdkBuilder::new(SdkConfig::yescoin().with_api(ApiConfig::new(&backend.base_url)))
        .connector(connector.clone())
        .build_resolved()
        .await
        .unwrap();

    assert_eq!(sdk.payments().ton.collection_address(), "EQ_yescoin_collection");

    sdk.payments().ton.pay(0.5, None, None).await.unwrap();
    assert_eq!(connector.sent()[0].messages[0].address, "EQ_yescoin_collection");
}

/// Test: a failing settings lookup falls back to the placeholder address
#[tokio::test]
async fn test_build_resolved_falls_back_on_error() {
    let backend = spawn_backend(|_| (500, r#"{"error":"database down"}"#.to_string())).await;

    let sdk = SdkBuilder::new(SdkConfig::yescoin().with_api(ApiConfig::new(&backend.base_url)))
        .connector(Arc::new(MockConnector::default()))
        .build_resolved()
        .await
        .unwrap();

    assert_eq!(
        sdk.payments().ton.collection_address(),
        PLACEHOLDER_COLLECTION_ADDRESS
    );
}

/// Test: non-2xx responses surface status and backend message
#[tokio::test]
async fn test_api_error_mapping() {
    let backend = spawn_backend(|_| (403, r#"{"message":"project disabled"}"#.to_string())).await;

    let config = SdkConfig::yescoin().with_api(ApiConfig::new(&backend.base_url));
    let sdk = GameClientSdk::new(config, Arc::new(MockConnector::default()))
        .await
        .unwrap();

    let api = sdk.api().expect("api configured");
    match api.project_settings().await.unwrap_err() {
        SdkError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "project disabled");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Test: the wallet initializes exactly once
#[tokio::test]
async fn test_wallet_init_twice() {
    let connector = Arc::new(MockConnector::default());
    let sdk = GameClientSdk::new(SdkConfig::yescoin(), connector.clone())
        .await
        .unwrap();

    assert!(matches!(
        sdk.wallet().init().await,
        Err(SdkError::AlreadyInitialized)
    ));
    assert_eq!(connector.configured.lock().unwrap().len(), 1);
}

/// Test: shutdown releases the connector and stops TON payments
#[tokio::test]
async fn test_shutdown() {
    let connector = Arc::new(MockConnector::default());
    let sdk = GameClientSdk::new(SdkConfig::yescoin(), connector.clone())
        .await
        .unwrap();

    sdk.wallet().connect().await.unwrap();
    assert_eq!(sdk.wallet().address().await.as_deref(), Some("UQ_mock_player"));

    sdk.shutdown().await;
    assert!(*connector.released.lock().unwrap());
    assert!(!sdk.wallet().is_connected().await);
    assert!(matches!(
        sdk.payments().ton.pay(1.0, None, None).await,
        Err(SdkError::ShutDown)
    ));
}

/// Test: a host bridge exposes launch state through the facade
#[tokio::test]
async fn test_mini_app_through_facade() {
    let host = Arc::new(
        RecordingHost::new()
            .with_user_info(r#"{"id":7,"firstName":"Yes","lastName":"Coin"}"#)
            .with_start_param("ref_99"),
    );
    let sdk = SdkBuilder::new(SdkConfig::yescoin())
        .connector(Arc::new(MockConnector::default()))
        .host(host)
        .build()
        .await
        .unwrap();

    let mini_app = sdk.mini_app().expect("host supplied");
    assert_eq!(mini_app.user().map(|u| u.full_name()), Some("Yes Coin".to_string()));
    assert_eq!(mini_app.start_param().as_deref(), Some("ref_99"));
}
