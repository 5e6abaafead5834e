mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use postnl_rs::entity::{CompleteStatus, Message, Shipment};
use postnl_rs::{ApiMode, HttpRequest, HttpResponse, MemoryCache, MockClient, PostNLError};

#[tokio::test]
async fn current_status_by_barcode() {
    let _guard = init_tracing_opentelemetry::TracingConfig::testing()
        .init_subscriber()
        .ok();

    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        200,
        include_str!("fixtures/current_status.json"),
    )));
    let client = common::client(&mock);

    let status = client
        .current_status_by_barcode("3SDEVC201611210")
        .await
        .unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url.path(),
        "/shipment/v2/status/barcode/3SDEVC201611210"
    );
    assert_eq!(requests[0].url.query(), None);
    assert_eq!(requests[0].header_value("apikey"), Some("test-api-key"));

    // A single shipment object still decodes as a list.
    let shipments = status.shipments.unwrap();
    assert_eq!(shipments.len(), 1);
    let shipment = &shipments[0];
    assert_eq!(shipment.barcode.as_deref(), Some("3SDEVC201611210"));
    assert_eq!(shipment.addresses.as_ref().map(Vec::len), Some(1));
    assert_eq!(
        shipment
            .status
            .as_ref()
            .and_then(|status| status.current_status_code.as_deref()),
        Some("7")
    );
}

#[tokio::test]
async fn complete_status_by_reference() {
    let _guard = init_tracing_opentelemetry::TracingConfig::testing()
        .init_subscriber()
        .ok();

    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        200,
        include_str!("fixtures/complete_status.json"),
    )));
    let client = common::client(&mock);
    let request = CompleteStatus::builder()
        .customer(common::customer())
        .message(Message::new())
        .shipment(Shipment::builder().reference("339820938").build())
        .build();

    let status = client
        .shipping_status_service()
        .complete_status(&request)
        .await
        .unwrap();

    let url = &mock.requests()[0].url;
    assert_eq!(url.path(), "/shipment/v2/status/reference/339820938");
    let query = url.query_pairs().into_owned().collect::<Vec<_>>();
    assert_eq!(
        query,
        [
            ("customerCode".to_string(), "DEVC".to_string()),
            ("customerNumber".to_string(), "11223344".to_string()),
            ("detail".to_string(), "true".to_string()),
        ]
    );

    let shipment = &status.shipments.unwrap()[0];
    let events = shipment.events.as_ref().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].code.as_deref(), Some("J01"));
    // A single old status is coerced into a list.
    assert_eq!(shipment.old_statuses.as_ref().map(Vec::len), Some(1));
    assert_eq!(status.warnings, Some(Vec::new()));
}

#[tokio::test]
async fn updated_shipments_use_the_customer_number() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        200,
        r#"[{"Barcode":"3SDEVC201611210","CreationDate":"14-12-2016 13:32:32","CustomerNumber":"11223344","CustomerCode":"DEVC","Status":{"CurrentStatusCode":"7"}}]"#,
    )));
    let client = common::client(&mock);
    let from = NaiveDate::from_ymd_opt(2021, 6, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let to = NaiveDate::from_ymd_opt(2021, 6, 2)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    let shipments = client.get_updated_shipments(Some((from, to))).await.unwrap();
    assert_eq!(shipments.len(), 1);
    assert_eq!(shipments[0].barcode.as_deref(), Some("3SDEVC201611210"));

    let url = &mock.requests()[0].url;
    assert_eq!(url.path(), "/shipment/v2/status/11223344/updatedshipments");
    let periods = url
        .query_pairs()
        .filter(|(key, _)| key == "period")
        .map(|(_, value)| value.into_owned())
        .collect::<Vec<_>>();
    assert_eq!(periods, ["2021-06-01T09:00:00", "2021-06-02T09:00:00"]);
}

#[tokio::test]
async fn signatures_are_cached() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        200,
        r#"{"Signature":{"Barcode":"3SDEVC201611210","SignatureDate":"2018-03-07T13:52:45.000+01:00","SignatureImage":"iVBORw0KGgo="}}"#,
    )));
    let client = common::cached_client(&mock, Arc::new(MemoryCache::new()));

    let first = client.get_signature("3SDEVC201611210").await.unwrap();
    let second = client.get_signature("3SDEVC201611210").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.signature_date.as_deref(),
        Some("2018-03-07T13:52:45.000+01:00")
    );
    assert_eq!(mock.request_count(), 1);
    assert_eq!(
        mock.requests()[0].url.path(),
        "/shipment/v2/status/signature/3SDEVC201611210"
    );
}

#[tokio::test]
async fn soap_mode_keeps_using_rest() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        200,
        include_str!("fixtures/current_status.json"),
    )));
    let mut client = common::client(&mock);
    client.set_api_mode(ApiMode::Soap);

    assert_eq!(client.shipping_status_service().api_mode(), ApiMode::Soap);
    client
        .current_status_by_reference("339820938")
        .await
        .unwrap();
    assert_eq!(mock.requests()[0].method, postnl_rs::Method::GET);
}

#[tokio::test]
async fn unknown_shipments_are_not_found() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(404, "")));
    let client = common::client(&mock);

    match client.current_status_by_barcode("3SDEVC000000000").await {
        Err(PostNLError::NotFound(message)) => assert_eq!(message, "no data for this request"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn api_errors_keep_their_message() {
    let _guard = init_tracing_opentelemetry::TracingConfig::testing()
        .init_subscriber()
        .ok();
    let mock = Arc::new(MockClient::new(|request: &HttpRequest| {
        if request.url.path().ends_with("/3SDEVC000000000") {
            Ok(HttpResponse::new(
                400,
                r#"{"Errors":[{"ErrorMsg":"Invalid barcode","ErrorNumber":3}]}"#,
            ))
        } else {
            Ok(HttpResponse::new(
                401,
                r#"{"fault":{"faultstring":"Invalid ApiKey"}}"#,
            ))
        }
    }));
    let client = common::client(&mock);

    match client.current_status_by_barcode("3SDEVC000000000").await {
        Err(PostNLError::Response { message, status }) => {
            assert_eq!(message, "Invalid barcode");
            assert_eq!(status, Some(400));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    match client.current_status_by_barcode("3SDEVC201611210").await {
        Err(PostNLError::Response { message, status }) => {
            assert_eq!(message, "Invalid ApiKey");
            assert_eq!(status, Some(401));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn unreadable_error_bodies_are_not_found() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        201,
        r#"{"Unexpected":{}}"#,
    )));
    let client = common::client(&mock);

    match client.current_status_by_barcode("3SDEVC201611210").await {
        Err(PostNLError::NotFound(message)) => {
            assert_eq!(message, "Unable to get current status")
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_bodies_are_invalid_responses() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        200,
        r#"{"Unexpected":{}}"#,
    )));
    let client = common::client(&mock);

    let result = client.current_status_by_barcode("3SDEVC201611210").await;
    assert!(matches!(
        result,
        Err(PostNLError::Response {
            status: Some(200),
            ..
        })
    ));
}
