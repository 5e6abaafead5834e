mod common;

use std::sync::Arc;

use postnl_rs::{HttpResponse, MockClient, PostNLError};

fn query(mock: &MockClient) -> Vec<(String, String)> {
    mock.requests()[0]
        .url
        .query_pairs()
        .into_owned()
        .collect()
}

#[tokio::test]
async fn domestic_barcodes_use_the_customer_range() {
    let _guard = init_tracing_opentelemetry::TracingConfig::testing()
        .init_subscriber()
        .ok();

    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        200,
        r#"{"Barcode":"3SDEVC816223392"}"#,
    )));
    let client = common::client(&mock);

    let barcode = client.generate_barcode("3S", None, None, false).await.unwrap();
    assert_eq!(barcode, "3SDEVC816223392");

    assert_eq!(mock.requests()[0].url.path(), "/shipment/v1_1/barcode");
    assert_eq!(
        query(&mock),
        [
            ("CustomerCode".to_string(), "DEVC".to_string()),
            ("CustomerNumber".to_string(), "11223344".to_string()),
            ("Type".to_string(), "3S".to_string()),
            ("Serie".to_string(), "987000000-987600000".to_string()),
            ("Range".to_string(), "DEVC".to_string()),
        ]
    );
}

#[tokio::test]
async fn global_pack_barcodes_use_the_global_pack_range() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        200,
        r#"{"Barcode":"CD123456785NL"}"#,
    )));
    let client = common::client(&mock);

    client.generate_barcode("CD", None, None, false).await.unwrap();

    let query = query(&mock);
    assert!(query.contains(&("Range".to_string(), "1234".to_string())));
    assert!(query.contains(&("Serie".to_string(), "0000-9999".to_string())));
}

#[tokio::test]
async fn explicit_series_are_kept() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        200,
        r#"{"Barcode":"3SDEV1234567"}"#,
    )));
    let client = common::client(&mock);

    client
        .generate_barcode("3S", Some("DEV"), Some("1000000-2000000"), true)
        .await
        .unwrap();

    let query = query(&mock);
    assert!(query.contains(&("Range".to_string(), "DEV".to_string())));
    assert!(query.contains(&("Serie".to_string(), "1000000-2000000".to_string())));
}

#[tokio::test]
async fn unresolvable_eps_ranges_are_rejected() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(200, "{}")));
    let client = common::client(&mock);

    let result = client.generate_barcode("3S", Some("DE"), None, true).await;
    assert!(matches!(result, Err(PostNLError::InvalidBarcode(_))));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn barcodes_are_never_cached() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        200,
        r#"{"Barcode":"3SDEVC816223392"}"#,
    )));
    let client = common::cached_client(&mock, Arc::new(postnl_rs::MemoryCache::new()));

    client.generate_barcode("3S", None, None, false).await.unwrap();
    client.generate_barcode("3S", None, None, false).await.unwrap();
    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn missing_barcodes_are_invalid_responses() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(200, "{}")));
    let client = common::client(&mock);

    let result = client.generate_barcode("3S", None, None, false).await;
    assert!(matches!(
        result,
        Err(PostNLError::Response {
            status: Some(200),
            ..
        })
    ));
}
